//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - HTTP gateway for metadata lookup and minting
//! - Checkpoint (retry cache) persistence
//! - Configuration management
//! - Logging infrastructure
//! - Signing credentials
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod checkpoint;
pub mod config;
pub mod credentials;
pub mod gateway;
pub mod logging;
