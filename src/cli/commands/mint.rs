//! Implementation of the `batchmint mint` command.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::cli::types::MintArgs;
use crate::domain::models::{ConfigOverrides, RetryCache};
use crate::domain::ports::{MetadataSource, MintContext, NftMinter};
use crate::infrastructure::checkpoint::CheckpointStore;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::credentials::load_keypair_file;
use crate::infrastructure::gateway::HttpNftGateway;
use crate::infrastructure::logging::{LogConfig, LoggerImpl};
use crate::services::{resolve_targets, BatchProcessor, BatchReport, RetryPolicy};

#[derive(Debug, Serialize)]
pub struct MintOutput {
    pub total: usize,
    pub processed: usize,
    pub minted: usize,
    pub skipped: usize,
    pub resolution_failures: usize,
    pub mint_failures: usize,
    pub errors: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_path: Option<PathBuf>,
    pub results: RetryCache,
}

impl MintOutput {
    fn from_report(total: usize, report: BatchReport, cache_path: Option<PathBuf>) -> Self {
        Self {
            total,
            processed: report.processed,
            minted: report.minted,
            skipped: report.skipped,
            resolution_failures: report.resolution_failures,
            mint_failures: report.mint_failures,
            errors: report.errors(),
            cache_path,
            results: report.cache,
        }
    }
}

impl CommandOutput for MintOutput {
    fn to_human(&self) -> String {
        let mut lines = Vec::new();
        if !self.results.is_empty() {
            lines.push(TableFormatter::new().format_results(&self.results));
        }
        lines.push(format!(
            "{} target(s): {} minted, {} skipped, {} error(s)",
            self.total, self.minted, self.skipped, self.errors
        ));
        if self.errors > 0 {
            lines.push(format!(
                "  {} metadata failure(s), {} mint failure(s)",
                self.resolution_failures, self.mint_failures
            ));
        }
        if let Some(path) = &self.cache_path {
            lines.push(format!("Results saved to {}", path.display()));
            if self.errors > 0 {
                lines.push("Re-run with the same --cache to retry failed targets.".to_string());
            }
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: MintArgs, json_mode: bool) -> Result<()> {
    let gateway = Arc::new(HttpNftGateway::new().context("Failed to build HTTP client")?);
    let output_data = run(args, gateway.clone(), gateway).await?;
    output(&output_data, json_mode);
    Ok(())
}

/// Resolve configuration, load inputs and run the batch against the given collaborators
pub async fn run(
    args: MintArgs,
    metadata: Arc<dyn MetadataSource>,
    minter: Arc<dyn NftMinter>,
) -> Result<MintOutput> {
    let overrides = ConfigOverrides::from(args.overrides);
    let config = ConfigLoader::resolve(&overrides).context("Failed to resolve configuration")?;
    let _logger = LoggerImpl::init(&LogConfig {
        level: config.log_level,
        format: args.log_format,
        log_dir: args.log_dir,
    });
    info!(
        env = %config.env,
        rpc_url = %config.rpc_url,
        keypair = %config.keypair_path.display(),
        "configuration resolved"
    );

    let wallet = load_keypair_file(&config.keypair_path).context("Failed to load keypair")?;
    info!(authority = %wallet.address(), "wallet loaded");

    let targets = resolve_targets(&args.targets, args.list.as_deref())
        .await
        .context("Failed to resolve mint targets")?;
    let total = targets.len();

    let checkpoint = args.cache.as_ref().map(CheckpointStore::new);
    let cache = match &checkpoint {
        Some(store) => store.load().await.context("Failed to load retry cache")?,
        None => RetryCache::new(),
    };

    let mut processor =
        BatchProcessor::new(metadata, minter, RetryPolicy::from_flag(args.no_retry));
    if let Some(store) = checkpoint {
        processor = processor.with_checkpoint(store);
    }

    let ctx = MintContext {
        rpc_url: config.rpc_url,
        wallet,
    };
    let report = processor
        .run(&ctx, targets, cache)
        .await
        .context("Mint run aborted")?;

    Ok(MintOutput::from_report(total, report, args.cache))
}
