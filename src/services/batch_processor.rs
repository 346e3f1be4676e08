//! Idempotent, resumable batch minting.
//!
//! Targets are processed strictly in order, one at a time. Each index ends
//! in one of four terminal states:
//!
//! ```text
//! pending -> skipped
//! pending -> resolving -> resolution_failed
//! pending -> resolving -> resolved -> minting -> minted | mint_failed
//! ```
//!
//! `skipped` applies to indices whose cached result already carries a
//! transaction id; nothing is looked up, minted or logged for them. Every
//! other state writes a result into the cache, and the cache is flushed to
//! the checkpoint file before the next target starts.

use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

use super::retry::RetryPolicy;
use crate::domain::errors::{BatchError, ItemError};
use crate::domain::models::{MintResult, RetryCache, Target};
use crate::domain::ports::{MetadataSource, MintContext, MintReceipt, NftMinter};
use crate::infrastructure::checkpoint::CheckpointStore;

/// Totals for one run, plus the final cache
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub cache: RetryCache,
    /// Targets that were attempted (not skipped)
    pub processed: usize,
    pub minted: usize,
    /// Targets already minted in a previous run
    pub skipped: usize,
    /// Metadata could not be fetched or failed validation
    pub resolution_failures: usize,
    /// Every mint attempt failed
    pub mint_failures: usize,
}

impl BatchReport {
    /// Aggregate per-item error count for the run
    pub const fn errors(&self) -> usize {
        self.resolution_failures + self.mint_failures
    }
}

struct Minted {
    name: String,
    receipt: MintReceipt,
}

/// Sequential mint loop with bounded retry and per-item checkpointing
pub struct BatchProcessor {
    metadata: Arc<dyn MetadataSource>,
    minter: Arc<dyn NftMinter>,
    policy: RetryPolicy,
    checkpoint: Option<CheckpointStore>,
}

impl BatchProcessor {
    pub fn new(
        metadata: Arc<dyn MetadataSource>,
        minter: Arc<dyn NftMinter>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            metadata,
            minter,
            policy,
            checkpoint: None,
        }
    }

    /// Persist the cache to `store` after every processed target
    #[must_use]
    pub fn with_checkpoint(mut self, store: CheckpointStore) -> Self {
        self.checkpoint = Some(store);
        self
    }

    /// Process every target once, in order
    ///
    /// Per-item failures are recorded in the cache and counted in the
    /// report. Only a local-file target or a failed checkpoint write aborts
    /// the run; results recorded before the abort are already on disk.
    pub async fn run(
        &self,
        ctx: &MintContext,
        mut targets: Vec<Target>,
        mut cache: RetryCache,
    ) -> Result<BatchReport, BatchError> {
        let mut report = BatchReport::default();
        info!(
            targets = targets.len(),
            cached = cache.len(),
            max_attempts = self.policy.max_attempts(),
            "starting batch"
        );

        for (index, target) in targets.iter_mut().enumerate() {
            if let Some(existing) = cache.get(index).filter(|r| r.is_minted()) {
                if existing.target != target.source {
                    debug!(
                        index,
                        cached = %existing.target,
                        current = %target.source,
                        "cached target differs from current target at this index"
                    );
                }
                report.skipped += 1;
                continue;
            }

            let span = info_span!("target", index, source = %target.source);
            let outcome = self
                .process_target(ctx, target)
                .instrument(span)
                .await?;
            target.metadata = None;
            report.processed += 1;

            let result = match outcome {
                Ok(minted) => {
                    report.minted += 1;
                    let result = MintResult::minted(&target.source, minted.name, minted.receipt);
                    info!(index, "{result}");
                    result
                }
                Err(err) => {
                    if err.is_resolution_failure() {
                        report.resolution_failures += 1;
                    } else {
                        report.mint_failures += 1;
                    }
                    let result = MintResult::failed(&target.source, &err);
                    warn!(index, detail = %error_detail(&err), "{result}");
                    result
                }
            };

            cache.insert(index, result);
            if let Some(store) = &self.checkpoint {
                store
                    .save(&cache)
                    .await
                    .map_err(|e| BatchError::Checkpoint(e.to_string()))?;
            }
        }

        info!(
            minted = report.minted,
            skipped = report.skipped,
            errors = report.errors(),
            "batch complete"
        );
        report.cache = cache;
        Ok(report)
    }

    async fn process_target(
        &self,
        ctx: &MintContext,
        target: &mut Target,
    ) -> Result<Result<Minted, ItemError>, BatchError> {
        if !target.is_uri() {
            return Err(BatchError::FileTargetUnsupported(target.source.clone()));
        }

        let metadata = match self.metadata.lookup_metadata(&target.source).await {
            Ok(metadata) => metadata,
            Err(err) => return Ok(Err(ItemError::MetadataUnavailable(err))),
        };
        if let Err(reason) = metadata.validate() {
            return Ok(Err(ItemError::InvalidMetadata { reason }));
        }

        let name = metadata.name.trim().to_string();
        target.metadata = Some(metadata);
        debug!(%name, "metadata resolved");

        let uri = target.source.as_str();
        let minted = self
            .policy
            .execute(|_| self.minter.mint_nft(ctx, uri))
            .await
            .map(|receipt| Minted { name, receipt })
            .map_err(|exhausted| ItemError::MintFailed {
                attempts: exhausted.attempts,
                last_error: exhausted.last_error.to_string(),
            });
        Ok(minted)
    }
}

fn error_detail(err: &ItemError) -> String {
    match err {
        ItemError::MetadataUnavailable(source) => source.to_string(),
        ItemError::InvalidMetadata { reason } => reason.clone(),
        ItemError::MintFailed {
            attempts,
            last_error,
        } => format!("{attempts} attempt(s), last error: {last_error}"),
    }
}
