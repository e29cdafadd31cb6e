// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end coverage across this crate's public API: fan out a scan over
//! real targets, then persist and read back the resulting artifact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use wd_core::ScanResult;
use wd_error::WdError;
use wd_pipeline::{run_scan, write_scan_result, CancellationToken, ScanRequest, ScanStatus};
use wd_scanners_core::{Scanner, ScannerOptions, ScannerRegistry};

struct FileCountScanner;

#[async_trait]
impl Scanner for FileCountScanner {
    async fn scan(&self, target: &Path, _options: &ScannerOptions) -> Result<wd_core::ScannerOutput, WdError> {
        let count = std::fs::read_dir(target).map(|entries| entries.count()).unwrap_or(0);
        Ok(wd_core::ScannerOutput::new("fs.entry_count", vec![json!({"count": count})]))
    }
}

#[tokio::test]
async fn a_scan_over_two_real_targets_persists_a_readable_merged_artifact() {
    let target_a = tempfile::tempdir().unwrap();
    let target_b = tempfile::tempdir().unwrap();
    std::fs::write(target_a.path().join("one.txt"), "x").unwrap();

    let mut registry = ScannerRegistry::new();
    registry.register("fs", "entries", Arc::new(FileCountScanner)).unwrap();

    let request = ScanRequest {
        targets: vec![target_a.path().to_path_buf(), target_b.path().to_path_buf()],
        scanner_names: vec!["entries".to_string()],
        options: BTreeMap::new(),
        concurrency: Some(4),
        registry: &registry,
    };

    let outcome = run_scan(&request, &CancellationToken::new()).await.unwrap();
    assert_eq!(outcome.status, ScanStatus::Complete);
    assert!(outcome.had_any_completion);
    assert_eq!(outcome.result.findings["entries"].items.len(), 2);

    let output_dir = tempfile::tempdir().unwrap();
    let path = write_scan_result(output_dir.path(), "entries", "all", &outcome.result).unwrap();

    let read_back: ScanResult = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(read_back.schema, wd_core::SCAN_RESULT_SCHEMA);
    assert_eq!(read_back.total_items(), outcome.result.total_items());
    assert!(!read_back.had_partial_failure());
}

#[tokio::test]
async fn a_cancelled_scan_is_never_worth_persisting() {
    let mut registry = ScannerRegistry::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    registry.register("fs", "entries", Arc::new(FileCountScanner)).unwrap();
    let target = tempfile::tempdir().unwrap();
    let request = ScanRequest {
        targets: vec![target.path().to_path_buf()],
        scanner_names: vec!["entries".to_string()],
        options: BTreeMap::new(),
        concurrency: Some(2),
        registry: &registry,
    };

    let outcome = run_scan(&request, &cancel).await.unwrap();
    assert_eq!(outcome.status, ScanStatus::Interrupted);
    assert!(!outcome.had_any_completion);
}
