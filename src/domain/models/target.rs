use serde::{Deserialize, Serialize};
use std::fmt;

use super::metadata::NftMetadata;

/// How a target's metadata is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// A path on the local filesystem
    File,
    /// A remote URI (`https://`, `ipfs://`, ...)
    Uri,
}

/// One mint request in the batch
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Path or URI exactly as it was supplied or discovered
    pub source: String,
    pub kind: TargetKind,
    /// Metadata attached while the target is being processed
    pub metadata: Option<NftMetadata>,
}

impl Target {
    pub fn file(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind: TargetKind::File,
            metadata: None,
        }
    }

    pub fn uri(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind: TargetKind::Uri,
            metadata: None,
        }
    }

    pub const fn is_uri(&self) -> bool {
        matches!(self.kind, TargetKind::Uri)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
