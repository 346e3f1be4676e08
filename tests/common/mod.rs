//! Common test utilities for integration tests
//!
//! Provides a scripted collaborator that stands in for the metadata host and
//! the minting endpoint, plus small fixtures shared across test files.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing::subscriber::DefaultGuard;

use batchmint::domain::models::{NftMetadata, Wallet};
use batchmint::domain::ports::{
    GatewayError, MetadataSource, MintContext, MintReceipt, NftMinter,
};

/// Fixed signing seed so test wallets are reproducible
pub const TEST_SEED: [u8; 32] = [7u8; 32];

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Log lines captured from the current thread's subscriber
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    /// Lines at `level` (`"WARN"`, `"INFO"`, ...) containing `needle`
    pub fn count(&self, level: &str, needle: &str) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.contains(level) && line.contains(needle))
            .count()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route logs emitted on this thread into a buffer until the guard drops
///
/// `#[tokio::test]` runs on a current-thread runtime, so a thread-local
/// default subscriber sees every event of the test.
pub fn capture_logs() -> (DefaultGuard, CapturedLogs) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    (tracing::subscriber::set_default(subscriber), logs)
}

pub fn wallet() -> Wallet {
    Wallet::from_seed(&TEST_SEED)
}

pub fn ctx() -> MintContext {
    MintContext {
        rpc_url: "http://127.0.0.1:8899".to_string(),
        wallet: wallet(),
    }
}

/// Metadata document with a valid name
pub fn metadata(name: &str) -> NftMetadata {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "symbol": "TST",
        "image": format!("https://example.org/{name}.png"),
        "seller_fee_basis_points": 500,
    }))
    .expect("valid metadata")
}

/// Scripted behaviour for one URI
#[derive(Debug, Clone)]
enum Lookup {
    Found(NftMetadata),
    Missing(String),
}

#[derive(Debug, Clone, Copy)]
enum MintScript {
    /// Fail this many times, then succeed
    FailTimes(u32),
    AlwaysFail,
}

#[derive(Default)]
struct MockState {
    lookups: HashMap<String, Lookup>,
    mints: HashMap<String, MintScript>,
    lookup_calls: Vec<String>,
    mint_calls: Vec<String>,
}

/// In-memory collaborator implementing both ports
///
/// URIs without an explicit script resolve to valid metadata named after
/// the URI and mint on the first attempt.
#[derive(Default)]
pub struct MockCollaborator {
    state: Mutex<MockState>,
}

impl MockCollaborator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(self, uri: &str, metadata: NftMetadata) -> Self {
        self.state
            .lock()
            .unwrap()
            .lookups
            .insert(uri.to_string(), Lookup::Found(metadata));
        self
    }

    pub fn with_missing_metadata(self, uri: &str, reason: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .lookups
            .insert(uri.to_string(), Lookup::Missing(reason.to_string()));
        self
    }

    pub fn failing_mints(self, uri: &str, failures: u32) -> Self {
        self.state
            .lock()
            .unwrap()
            .mints
            .insert(uri.to_string(), MintScript::FailTimes(failures));
        self
    }

    pub fn always_failing(self, uri: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .mints
            .insert(uri.to_string(), MintScript::AlwaysFail);
        self
    }

    pub fn lookup_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().lookup_calls.clone()
    }

    pub fn mint_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().mint_calls.clone()
    }

    pub fn mint_attempts(&self, uri: &str) -> usize {
        self.mint_calls().iter().filter(|c| *c == uri).count()
    }

    pub fn total_calls(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.lookup_calls.len() + state.mint_calls.len()
    }
}

/// Deterministic receipt for a URI
pub fn receipt_for(uri: &str) -> MintReceipt {
    let tag: String = uri.chars().filter(char::is_ascii_alphanumeric).collect();
    MintReceipt {
        tx_id: format!("tx-{tag}"),
        mint: format!("mint-{tag}"),
        metadata: format!("meta-{tag}"),
    }
}

#[async_trait]
impl MetadataSource for MockCollaborator {
    async fn lookup_metadata(&self, uri: &str) -> Result<NftMetadata, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.lookup_calls.push(uri.to_string());
        match state.lookups.get(uri) {
            Some(Lookup::Found(metadata)) => Ok(metadata.clone()),
            Some(Lookup::Missing(reason)) => Err(GatewayError::InvalidResponse(reason.clone())),
            None => Ok(metadata(&format!("NFT {}", state.lookup_calls.len()))),
        }
    }
}

#[async_trait]
impl NftMinter for MockCollaborator {
    async fn mint_nft(&self, _ctx: &MintContext, uri: &str) -> Result<MintReceipt, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.mint_calls.push(uri.to_string());
        let attempts = state.mint_calls.iter().filter(|c| *c == uri).count();
        match state.mints.get(uri).copied() {
            Some(MintScript::AlwaysFail) => Err(GatewayError::Rpc {
                code: -32002,
                message: "Transaction simulation failed".to_string(),
            }),
            Some(MintScript::FailTimes(n)) if attempts <= n as usize => Err(GatewayError::Rpc {
                code: -32005,
                message: "Node is behind".to_string(),
            }),
            _ => Ok(receipt_for(uri)),
        }
    }
}
