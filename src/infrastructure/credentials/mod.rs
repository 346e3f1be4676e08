//! Signing credential loading
//!
//! The keypair file is a JSON array of bytes, either the 64-byte
//! `seed || public key` layout written by common wallet tooling or a bare
//! 32-byte seed.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::models::Wallet;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Failed to read keypair file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Keypair file {path} is not a JSON byte array: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Keypair file {path} holds {len} bytes, expected 32 or 64")]
    Length { path: PathBuf, len: usize },

    #[error("Keypair file {path} public key does not match its secret key")]
    Mismatch { path: PathBuf },
}

/// Load the wallet stored at `path`
pub fn load_keypair_file(path: impl AsRef<Path>) -> Result<Wallet, WalletError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| WalletError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let bytes: Vec<u8> = serde_json::from_str(&content).map_err(|source| WalletError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    wallet_from_bytes(&bytes).map_err(|err| match err {
        KeyBytesError::Length(len) => WalletError::Length {
            path: path.to_path_buf(),
            len,
        },
        KeyBytesError::Mismatch => WalletError::Mismatch {
            path: path.to_path_buf(),
        },
    })
}

enum KeyBytesError {
    Length(usize),
    Mismatch,
}

fn wallet_from_bytes(bytes: &[u8]) -> Result<Wallet, KeyBytesError> {
    let seed: [u8; 32] = match bytes.len() {
        32 | 64 => bytes[..32]
            .try_into()
            .map_err(|_| KeyBytesError::Length(bytes.len()))?,
        len => return Err(KeyBytesError::Length(len)),
    };

    let wallet = Wallet::from_seed(&seed);
    if bytes.len() == 64 && bytes[32..] != wallet.public_key() {
        return Err(KeyBytesError::Mismatch);
    }
    Ok(wallet)
}
