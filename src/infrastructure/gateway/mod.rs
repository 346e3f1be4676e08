//! HTTP adapter for the minting collaborator

pub mod client;

pub use client::{GatewayConfig, HttpNftGateway, MINT_METHOD};
