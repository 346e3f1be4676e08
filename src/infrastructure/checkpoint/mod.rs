//! Retry cache persistence
//!
//! The cache is rewritten in full after every processed target. Writes go
//! to a sibling temp file first and are renamed into place, so an interrupt
//! leaves either the previous or the new checkpoint, never a truncated one.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::domain::models::RetryCache;

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Failed to read checkpoint {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Checkpoint {path} is not a valid retry cache: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write checkpoint {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loads and saves the retry cache at a fixed path
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cache; a missing file is an empty cache
    pub async fn load(&self) -> Result<RetryCache, CheckpointError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no checkpoint yet, starting fresh");
                return Ok(RetryCache::new());
            }
            Err(source) => {
                return Err(CheckpointError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(RetryCache::new());
        }

        serde_json::from_str(&content).map_err(|source| CheckpointError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the checkpoint file with `cache`
    pub async fn save(&self, cache: &RetryCache) -> Result<(), CheckpointError> {
        let write_err = |source| CheckpointError::Write {
            path: self.path.clone(),
            source,
        };

        let content = serde_json::to_string_pretty(cache).map_err(|e| write_err(io::Error::other(e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, format!("{content}\n")).await.map_err(write_err)?;
        fs::rename(&tmp, &self.path).await.map_err(write_err)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("checkpoint"), ToOwned::to_owned);
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
