// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bounded-concurrency fan-out over `(scanner, target)` pairs.
//!
//! Every pair runs as an independent task over a worker pool sized `cores *
//! 2` by default: scanners block freely on filesystem, subprocess, or
//! network I/O, so oversubscribing cores pays off. A scanner's own failure
//! against one target is isolated to that pair and recorded in
//! `failed_scanners`; it never aborts sibling tasks, using a `JoinSet`
//! per task to keep each pair's isolation independent of the others.
//!
//! Outputs are merged across targets into one entry per scanner: a
//! scanner's items are concatenated and its metadata shallow-merged, so the
//! published [`ScanResult`] is scanner-keyed rather than target-addressable.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use wd_core::{ScanResult, ScannerOutput, SCAN_RESULT_SCHEMA};
use wd_error::{ErrorCode, WdError};
use wd_scanners_core::{Scanner, ScannerOptions, ScannerRegistry};

use crate::cancel::CancellationToken;

/// How a completed scan finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// Every requested scanner succeeded against every target.
    Complete,
    /// At least one scanner failed against at least one target, but the
    /// run ran to completion.
    Partial,
    /// The run was cancelled before every `(scanner, target)` pair finished.
    Interrupted,
}

/// The result of one `run_scan` invocation.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// The aggregated scan result, safe to persist even when interrupted.
    pub result: ScanResult,
    /// How the run finished.
    pub status: ScanStatus,
    /// `true` when at least one `(scanner, target)` pair completed. A
    /// partial artifact is only worth writing when this is `true`; callers
    /// should skip persistence otherwise.
    pub had_any_completion: bool,
}

/// One fan-out request: the targets and scanners to cross, plus per-scanner
/// options and an optional worker-pool size override.
pub struct ScanRequest<'a> {
    /// Target paths to scan (already expanded by [`crate::targets`]).
    pub targets: Vec<PathBuf>,
    /// Fully-qualified or flat scanner names to resolve against `registry`.
    pub scanner_names: Vec<String>,
    /// Per-scanner options, keyed by the same name given in `scanner_names`.
    pub options: BTreeMap<String, ScannerOptions>,
    /// Worker-pool size; `None` sizes from the host's CPU count (`cores * 2`
    /// for I/O-heavy runs).
    pub concurrency: Option<usize>,
    /// Where scanners are looked up by name.
    pub registry: &'a ScannerRegistry,
}

fn default_concurrency() -> usize {
    num_cpus::get().max(1) * 2
}

/// Resolve `scanner_names` against `registry`, failing fast if any name is
/// unknown, as an `ExternalError` tagged `ExternalScannerNotFound`.
fn resolve_scanners(
    scanner_names: &[String],
    registry: &ScannerRegistry,
) -> Result<Vec<(String, Arc<dyn Scanner>)>, WdError> {
    scanner_names
        .iter()
        .map(|name| {
            registry
                .get(name)
                .map(|scanner| (name.clone(), scanner))
                .ok_or_else(|| {
                    WdError::new(ErrorCode::ExternalScannerNotFound, format!("no scanner registered as '{name}'"))
                        .with_context("name", name.clone())
                })
        })
        .collect()
}

/// Run every `(scanner, target)` pair in `request` over a bounded worker
/// pool, merging results into a single [`ScanResult`].
///
/// # Errors
///
/// Returns an error only when a named scanner cannot be resolved against
/// `request.registry` — every other failure (a scanner erroring against a
/// target) is isolated and recorded in the returned [`ScanOutcome`].
pub async fn run_scan(request: &ScanRequest<'_>, cancel: &CancellationToken) -> Result<ScanOutcome, WdError> {
    let scanners = resolve_scanners(&request.scanner_names, request.registry)?;
    let started = Instant::now();

    let permits = request.concurrency.unwrap_or_else(default_concurrency);
    let semaphore = Arc::new(Semaphore::new(permits));

    let mut set: JoinSet<(String, String, Option<Result<ScannerOutput, WdError>>)> = JoinSet::new();
    for target in &request.targets {
        for (name, scanner) in &scanners {
            let semaphore = Arc::clone(&semaphore);
            let scanner = Arc::clone(scanner);
            let name = name.clone();
            let target_key = target.display().to_string();
            let target = target.clone();
            let options = request.options.get(&name).cloned().unwrap_or_default();
            let cancel = cancel.clone();

            set.spawn(async move {
                if cancel.is_cancelled() {
                    return (target_key, name, None);
                }
                let permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return (target_key, name, None),
                };
                let outcome = tokio::select! {
                    biased;
                    () = cancel.cancelled() => None,
                    res = scanner.scan(&target, &options) => Some(res),
                };
                drop(permit);
                (target_key, name, outcome)
            });
        }
    }

    let mut findings: BTreeMap<String, ScannerOutput> = BTreeMap::new();
    let mut failed_scanners: Vec<String> = Vec::new();
    let mut had_any_completion = false;
    let mut interrupted = false;

    while let Some(joined) = set.join_next().await {
        let (target_key, name, outcome) = match joined {
            Ok(v) => v,
            Err(join_err) => {
                tracing::warn!(error = %join_err, "scanner task panicked");
                continue;
            }
        };
        match outcome {
            Some(Ok(output)) => {
                had_any_completion = true;
                match findings.remove(&name) {
                    Some(existing) => {
                        findings.insert(name, existing.merge(output));
                    }
                    None => {
                        findings.insert(name, output);
                    }
                }
            }
            Some(Err(err)) => {
                tracing::warn!(scanner = %name, target = %target_key, error = %err, "scanner failed against target");
                if !failed_scanners.contains(&name) {
                    failed_scanners.push(name);
                }
            }
            None => interrupted = true,
        }
    }
    failed_scanners.sort();

    let status = if interrupted {
        ScanStatus::Interrupted
    } else if failed_scanners.is_empty() {
        ScanStatus::Complete
    } else {
        ScanStatus::Partial
    };

    let result = ScanResult {
        schema: SCAN_RESULT_SCHEMA.to_string(),
        completed_at: chrono::Utc::now().to_rfc3339(),
        findings,
        failed_scanners,
        duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    };

    Ok(ScanOutcome { result, status, had_any_completion })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingScanner {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Scanner for CountingScanner {
        async fn scan(&self, _target: &Path, _options: &ScannerOptions) -> Result<ScannerOutput, WdError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ScannerOutput::new("test.count", vec![json!({"ok": true})]))
        }
    }

    struct AlwaysFailsScanner;

    #[async_trait]
    impl Scanner for AlwaysFailsScanner {
        async fn scan(&self, _target: &Path, _options: &ScannerOptions) -> Result<ScannerOutput, WdError> {
            Err(WdError::new(ErrorCode::ExternalGitFailed, "simulated failure"))
        }
    }

    struct SlowScanner;

    #[async_trait]
    impl Scanner for SlowScanner {
        async fn scan(&self, _target: &Path, _options: &ScannerOptions) -> Result<ScannerOutput, WdError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(ScannerOutput::new("test.slow", vec![]))
        }
    }

    #[tokio::test]
    async fn unknown_scanner_name_fails_before_any_task_runs() {
        let registry = ScannerRegistry::new();
        let request = ScanRequest {
            targets: vec![PathBuf::from("/repos/alpha")],
            scanner_names: vec!["nope".to_string()],
            options: BTreeMap::new(),
            concurrency: Some(2),
            registry: &registry,
        };
        let err = run_scan(&request, &CancellationToken::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ExternalScannerNotFound);
    }

    #[tokio::test]
    async fn two_targets_one_scanner_calls_scanner_exactly_twice() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ScannerRegistry::new();
        registry.register("test", "count", Arc::new(CountingScanner { calls: Arc::clone(&calls) })).unwrap();

        let request = ScanRequest {
            targets: vec![PathBuf::from("/repos/alpha"), PathBuf::from("/repos/beta")],
            scanner_names: vec!["count".to_string()],
            options: BTreeMap::new(),
            concurrency: Some(4),
            registry: &registry,
        };
        let outcome = run_scan(&request, &CancellationToken::new()).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(outcome.status, ScanStatus::Complete);
        assert!(outcome.had_any_completion);
        assert_eq!(outcome.result.findings.len(), 1);
        assert_eq!(outcome.result.findings["count"].count, 2);
        assert_eq!(outcome.result.total_items(), 2);
    }

    #[tokio::test]
    async fn a_failing_scanner_is_isolated_and_marks_partial_status() {
        let mut registry = ScannerRegistry::new();
        registry.register("test", "fails", Arc::new(AlwaysFailsScanner)).unwrap();
        registry
            .register("test", "count", Arc::new(CountingScanner { calls: Arc::new(AtomicUsize::new(0)) }))
            .unwrap();

        let request = ScanRequest {
            targets: vec![PathBuf::from("/repos/alpha")],
            scanner_names: vec!["fails".to_string(), "count".to_string()],
            options: BTreeMap::new(),
            concurrency: Some(4),
            registry: &registry,
        };
        let outcome = run_scan(&request, &CancellationToken::new()).await.unwrap();
        assert_eq!(outcome.status, ScanStatus::Partial);
        assert_eq!(outcome.result.failed_scanners, vec!["fails".to_string()]);
        assert!(outcome.result.findings.contains_key("count"));
        assert!(!outcome.result.findings.contains_key("fails"));
    }

    #[tokio::test]
    async fn one_scanner_two_targets_merges_into_a_single_finding() {
        let mut registry = ScannerRegistry::new();
        registry.register("test", "count", Arc::new(CountingScanner { calls: Arc::new(AtomicUsize::new(0)) })).unwrap();

        let request = ScanRequest {
            targets: vec![PathBuf::from("/repos/alpha"), PathBuf::from("/repos/beta")],
            scanner_names: vec!["count".to_string()],
            options: BTreeMap::new(),
            concurrency: Some(4),
            registry: &registry,
        };
        let outcome = run_scan(&request, &CancellationToken::new()).await.unwrap();
        assert_eq!(outcome.result.findings.len(), 1);
        assert_eq!(outcome.result.findings["count"].items.len(), 2);
        assert_eq!(outcome.result.findings["count"].count, 2);
    }

    #[tokio::test]
    async fn empty_targets_yields_all_zero_result_and_no_errors() {
        let registry = ScannerRegistry::new();
        let request = ScanRequest {
            targets: vec![],
            scanner_names: vec![],
            options: BTreeMap::new(),
            concurrency: Some(2),
            registry: &registry,
        };
        let outcome = run_scan(&request, &CancellationToken::new()).await.unwrap();
        assert_eq!(outcome.status, ScanStatus::Complete);
        assert!(!outcome.had_any_completion);
        assert!(outcome.result.findings.is_empty());
        assert_eq!(outcome.result.total_items(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn cancelling_mid_run_yields_interrupted_status() {
        let mut registry = ScannerRegistry::new();
        registry.register("test", "slow", Arc::new(SlowScanner)).unwrap();

        let request = ScanRequest {
            targets: vec![PathBuf::from("/repos/alpha")],
            scanner_names: vec!["slow".to_string()],
            options: BTreeMap::new(),
            concurrency: Some(1),
            registry: &registry,
        };
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel_clone.cancel();
        });
        let outcome = run_scan(&request, &cancel).await.unwrap();
        assert_eq!(outcome.status, ScanStatus::Interrupted);
        assert!(!outcome.had_any_completion);
    }
}
