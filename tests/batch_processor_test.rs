mod common;

use std::sync::Arc;
use std::time::Duration;

use batchmint::domain::errors::BatchError;
use batchmint::domain::models::{MintResult, RetryCache, Target};
use batchmint::infrastructure::checkpoint::CheckpointStore;
use batchmint::services::{BatchProcessor, RetryPolicy};
use common::{capture_logs, ctx, metadata, receipt_for, temp_dir, MockCollaborator};

fn fast_retry() -> RetryPolicy {
    RetryPolicy::enabled().with_delay(Duration::from_millis(1))
}

fn processor(mock: &Arc<MockCollaborator>, policy: RetryPolicy) -> BatchProcessor {
    BatchProcessor::new(mock.clone(), mock.clone(), policy)
}

fn uris(list: &[&str]) -> Vec<Target> {
    list.iter().map(|u| Target::uri(*u)).collect()
}

#[tokio::test]
async fn test_all_targets_minted_in_order() {
    let mock = Arc::new(MockCollaborator::new());
    let targets = uris(&["https://a.test/0.json", "https://a.test/1.json"]);

    let report = processor(&mock, fast_retry())
        .run(&ctx(), targets, RetryCache::new())
        .await
        .unwrap();

    assert_eq!(report.minted, 2);
    assert_eq!(report.errors(), 0);
    assert_eq!(
        mock.mint_calls(),
        vec!["https://a.test/0.json", "https://a.test/1.json"]
    );
    let first = report.cache.get(0).unwrap();
    assert_eq!(first.tx_id.as_deref(), Some("tx-httpsatest0json"));
    assert!(first.error.is_none());
}

#[tokio::test]
async fn test_fully_minted_cache_is_idempotent() {
    let dir = temp_dir();
    let cache_path = dir.path().join("cache.json");
    let targets = ["https://a.test/0.json", "https://a.test/1.json"];

    let first = Arc::new(MockCollaborator::new());
    processor(&first, fast_retry())
        .with_checkpoint(CheckpointStore::new(&cache_path))
        .run(&ctx(), uris(&targets), RetryCache::new())
        .await
        .unwrap();
    let before = std::fs::read(&cache_path).unwrap();

    let second = Arc::new(MockCollaborator::new());
    let store = CheckpointStore::new(&cache_path);
    let cache = store.load().await.unwrap();
    let report = processor(&second, fast_retry())
        .with_checkpoint(store)
        .run(&ctx(), uris(&targets), cache)
        .await
        .unwrap();

    assert_eq!(second.total_calls(), 0);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.processed, 0);
    assert_eq!(std::fs::read(&cache_path).unwrap(), before);
}

#[tokio::test]
async fn test_partial_cache_resumes_only_failed_indices() {
    let targets = ["https://a.test/0.json", "https://a.test/1.json", "https://a.test/2.json"];
    let cache: RetryCache = [
        (
            0,
            MintResult::minted(targets[0], "Zero", receipt_for(targets[0])),
        ),
        (1, MintResult::failed(targets[1], "Mint failed")),
    ]
    .into_iter()
    .collect();

    let mock = Arc::new(MockCollaborator::new());
    let report = processor(&mock, fast_retry())
        .run(&ctx(), uris(&targets), cache)
        .await
        .unwrap();

    assert_eq!(mock.lookup_calls(), vec![targets[1], targets[2]]);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.minted, 2);
    assert_eq!(report.cache.len(), 3);
    assert!(report.cache.get(1).unwrap().is_minted());
    assert_eq!(report.cache.get(0).unwrap().name.as_deref(), Some("Zero"));
}

#[tokio::test]
async fn test_retry_exhaustion_records_error_after_five_attempts() {
    let uri = "https://a.test/bad.json";
    let mock = Arc::new(MockCollaborator::new().always_failing(uri));
    let (_guard, logs) = capture_logs();

    let report = processor(&mock, fast_retry())
        .run(&ctx(), uris(&[uri]), RetryCache::new())
        .await
        .unwrap();

    assert_eq!(mock.mint_attempts(uri), 5);
    assert_eq!(logs.count("WARN", "attempt failed"), 5, "{}", logs.contents());
    assert_eq!(logs.count("WARN", "bad.json: Mint failed"), 1);
    assert_eq!(report.mint_failures, 1);
    assert_eq!(report.errors(), 1);
    let result = report.cache.get(0).unwrap();
    assert_eq!(result.error.as_deref(), Some("Mint failed"));
    assert!(result.tx_id.is_none());
    assert!(!result.is_minted());
}

#[tokio::test]
async fn test_no_retry_makes_a_single_attempt() {
    let uri = "https://a.test/bad.json";
    let mock = Arc::new(MockCollaborator::new().always_failing(uri));

    let report = processor(&mock, RetryPolicy::from_flag(true))
        .run(&ctx(), uris(&[uri]), RetryCache::new())
        .await
        .unwrap();

    assert_eq!(mock.mint_attempts(uri), 1);
    assert_eq!(report.cache.get(0).unwrap().error.as_deref(), Some("Mint failed"));
}

#[tokio::test]
async fn test_success_on_third_attempt() {
    let uri = "https://a.test/flaky.json";
    let mock = Arc::new(
        MockCollaborator::new()
            .with_metadata(uri, metadata("Flaky Cat"))
            .failing_mints(uri, 2),
    );
    let (_guard, logs) = capture_logs();

    let report = processor(&mock, fast_retry())
        .run(&ctx(), uris(&[uri]), RetryCache::new())
        .await
        .unwrap();

    assert_eq!(mock.mint_attempts(uri), 3);
    assert_eq!(logs.count("WARN", "attempt failed"), 2);
    assert_eq!(report.minted, 1);
    assert_eq!(report.errors(), 0);

    let expected = receipt_for(uri);
    let result = report.cache.get(0).unwrap();
    assert!(result.error.is_none());
    assert_eq!(result.name.as_deref(), Some("Flaky Cat"));
    assert_eq!(result.tx_id.as_deref(), Some(expected.tx_id.as_str()));
    assert_eq!(result.mint.as_deref(), Some(expected.mint.as_str()));
    assert_eq!(result.metadata.as_deref(), Some(expected.metadata.as_str()));
    assert_eq!(logs.count("INFO", "tx=tx-httpsatestflakyjson"), 1);
}

#[tokio::test]
async fn test_invalid_metadata_skips_mint() {
    let bad = "https://a.test/nameless.json";
    let good = "https://a.test/ok.json";
    let mock = Arc::new(
        MockCollaborator::new()
            .with_metadata(bad, metadata(""))
            .with_metadata(good, metadata("Good")),
    );

    let report = processor(&mock, fast_retry())
        .run(&ctx(), uris(&[bad, good]), RetryCache::new())
        .await
        .unwrap();

    assert_eq!(mock.mint_attempts(bad), 0);
    assert_eq!(mock.mint_attempts(good), 1);
    assert_eq!(report.resolution_failures, 1);
    assert_eq!(report.errors(), 1);
    assert_eq!(
        report.cache.get(0).unwrap().error.as_deref(),
        Some("Invalid metadata")
    );
    assert_eq!(report.cache.get(1).unwrap().name.as_deref(), Some("Good"));
}

#[tokio::test]
async fn test_metadata_lookup_failure_is_recorded() {
    let uri = "https://a.test/404.json";
    let mock = Arc::new(MockCollaborator::new().with_missing_metadata(uri, "not found"));

    let report = processor(&mock, fast_retry())
        .run(&ctx(), uris(&[uri]), RetryCache::new())
        .await
        .unwrap();

    assert_eq!(mock.mint_attempts(uri), 0);
    assert_eq!(report.resolution_failures, 1);
    let error = report.cache.get(0).unwrap().error.clone().unwrap();
    assert!(error.starts_with("Metadata lookup failed"), "{error}");
}

#[tokio::test]
async fn test_file_target_aborts_after_checkpointing_earlier_results() {
    let dir = temp_dir();
    let cache_path = dir.path().join("cache.json");
    let targets = vec![
        Target::uri("https://a.test/0.json"),
        Target::file("./local.json"),
        Target::uri("https://a.test/2.json"),
    ];

    let mock = Arc::new(MockCollaborator::new());
    let err = processor(&mock, fast_retry())
        .with_checkpoint(CheckpointStore::new(&cache_path))
        .run(&ctx(), targets, RetryCache::new())
        .await
        .unwrap_err();

    assert!(matches!(err, BatchError::FileTargetUnsupported(ref s) if s == "./local.json"));
    assert_eq!(mock.mint_calls(), vec!["https://a.test/0.json"]);

    let saved = CheckpointStore::new(&cache_path).load().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert!(saved.is_minted(0));
}

#[tokio::test]
async fn test_checkpoint_is_written_after_every_item() {
    let dir = temp_dir();
    let cache_path = dir.path().join("cache.json");
    let uri = "https://a.test/1.json";
    // Second target fails every attempt, third is a file and aborts:
    // whatever is on disk must cover exactly the first two indices.
    let targets = vec![
        Target::uri("https://a.test/0.json"),
        Target::uri(uri),
        Target::file("later.json"),
    ];

    let mock = Arc::new(MockCollaborator::new().always_failing(uri));
    let result = processor(&mock, RetryPolicy::disabled())
        .with_checkpoint(CheckpointStore::new(&cache_path))
        .run(&ctx(), targets, RetryCache::new())
        .await;
    assert!(result.is_err());

    let saved = CheckpointStore::new(&cache_path).load().await.unwrap();
    assert_eq!(saved.len(), 2);
    assert!(saved.is_minted(0));
    assert_eq!(saved.get(1).unwrap().error.as_deref(), Some("Mint failed"));
    assert!(saved.get(2).is_none());
}

#[tokio::test]
async fn test_cached_failures_keep_index_alignment() {
    // A cached failure at index 1 is retried against whatever target now
    // sits at index 1.
    let cache: RetryCache = [(1, MintResult::failed("https://old.test/1.json", "Mint failed"))]
        .into_iter()
        .collect();
    let targets = uris(&["https://a.test/0.json", "https://a.test/1.json"]);

    let mock = Arc::new(MockCollaborator::new());
    let report = processor(&mock, fast_retry())
        .run(&ctx(), targets, cache)
        .await
        .unwrap();

    assert_eq!(report.cache.get(1).unwrap().target, "https://a.test/1.json");
    assert!(report.cache.get(1).unwrap().is_minted());
}
