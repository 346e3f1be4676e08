//! Domain layer for batchmint
//!
//! Core types for a mint run and the ports the processor depends on.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{BatchError, ItemError};
