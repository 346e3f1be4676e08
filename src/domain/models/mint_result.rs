use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::ports::MintReceipt;

/// Outcome of processing one target
///
/// Either `error` is set, or all of `name`, `mint`, `metadata` and `tx_id`
/// are. The constructors are the only way this crate builds a result, so a
/// half-populated record can only come from a hand-edited checkpoint file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResult {
    pub target: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
}

impl MintResult {
    /// A successful mint of `target`
    pub fn minted(target: impl Into<String>, name: impl Into<String>, receipt: MintReceipt) -> Self {
        Self {
            target: target.into(),
            error: None,
            name: Some(name.into()),
            mint: Some(receipt.mint),
            metadata: Some(receipt.metadata),
            tx_id: Some(receipt.tx_id),
        }
    }

    /// A failed attempt at `target`
    pub fn failed(target: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            target: target.into(),
            error: Some(error.to_string()),
            name: None,
            mint: None,
            metadata: None,
            tx_id: None,
        }
    }

    /// True once a transaction id has been recorded; such entries are never retried
    pub fn is_minted(&self) -> bool {
        self.tx_id.as_deref().is_some_and(|tx| !tx.is_empty())
    }
}

impl fmt::Display for MintResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            return write!(f, "{}: {error}", self.target);
        }
        write!(
            f,
            "{} => \"{}\" mint={} metadata={} tx={}",
            self.target,
            self.name.as_deref().unwrap_or_default(),
            self.mint.as_deref().unwrap_or_default(),
            self.metadata.as_deref().unwrap_or_default(),
            self.tx_id.as_deref().unwrap_or_default(),
        )
    }
}

/// Per-index results of a batch, persisted between runs
///
/// Keys are positions in the resolved target list and serialize as decimal
/// strings (`{"0": {...}, "1": {...}}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetryCache {
    entries: BTreeMap<usize, MintResult>,
}

impl RetryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&MintResult> {
        self.entries.get(&index)
    }

    pub fn insert(&mut self, index: usize, result: MintResult) {
        self.entries.insert(index, result);
    }

    /// True when `index` already holds a successful mint
    pub fn is_minted(&self, index: usize) -> bool {
        self.get(index).is_some_and(MintResult::is_minted)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &MintResult)> {
        self.entries.iter().map(|(index, result)| (*index, result))
    }
}

impl FromIterator<(usize, MintResult)> for RetryCache {
    fn from_iter<I: IntoIterator<Item = (usize, MintResult)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
