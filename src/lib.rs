//! Batchmint - resumable batch NFT minting
//!
//! Batchmint reads NFT metadata targets (URIs, files or folders), mints one
//! NFT per target through an external minting endpoint, and records every
//! outcome in a checkpoint file so an interrupted or partially failed run
//! can be resumed without minting anything twice.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Targets, results, the retry cache and the collaborator ports
//! - **Service Layer** (`services`): Target resolution, retry policy, the batch processor
//! - **Infrastructure Layer** (`infrastructure`): Config, logging, checkpoints, keypairs, HTTP gateway
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use batchmint::{BatchProcessor, HttpNftGateway, RetryPolicy};
//!
//! let gateway = Arc::new(HttpNftGateway::new()?);
//! let processor = BatchProcessor::new(gateway.clone(), gateway, RetryPolicy::enabled());
//! let report = processor.run(&ctx, targets, cache).await?;
//! println!("{} error(s)", report.errors());
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{BatchError, ItemError};
pub use domain::models::{
    ConfigContext, ConfigOverrides, Environment, LogLevel, MintResult, NftMetadata,
    PersistedConfig, RetryCache, Target, TargetKind, Wallet,
};
pub use domain::ports::{GatewayError, MetadataSource, MintContext, MintReceipt, NftMinter};
pub use infrastructure::checkpoint::CheckpointStore;
pub use infrastructure::config::{ConfigError, ConfigLoader, ConfigStore};
pub use infrastructure::gateway::HttpNftGateway;
pub use services::{BatchProcessor, BatchReport, RetryPolicy};
