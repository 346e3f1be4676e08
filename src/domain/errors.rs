//! Error taxonomy for a mint run.
//!
//! `BatchError` aborts the whole run. `ItemError` is recorded against a
//! single target and processing moves on.

use thiserror::Error;

use crate::domain::ports::GatewayError;

/// Errors that stop the run immediately
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Minting from local files is not supported: {0}")]
    FileTargetUnsupported(String),

    #[error("Failed to write checkpoint: {0}")]
    Checkpoint(String),
}

/// Per-target failures, stored in the result's `error` field
#[derive(Debug, Error)]
pub enum ItemError {
    /// The metadata document could not be fetched; no mint was attempted
    #[error("Metadata lookup failed: {0}")]
    MetadataUnavailable(#[source] GatewayError),

    /// The metadata document was fetched but rejected; no mint was attempted
    #[error("Invalid metadata")]
    InvalidMetadata { reason: String },

    /// Every mint attempt failed
    #[error("Mint failed")]
    MintFailed { attempts: u32, last_error: String },
}

impl ItemError {
    /// True when the item never reached the mint step
    pub const fn is_resolution_failure(&self) -> bool {
        matches!(self, Self::MetadataUnavailable(_) | Self::InvalidMetadata { .. })
    }
}
