// SPDX-License-Identifier: MIT OR Apache-2.0
//! `wd scan` — run scanners against one or more targets and persist the
//! combined result as an artifact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use wd_dataaccess::DataAccessLayer;
use wd_pipeline::{run_scan, write_scan_result, CancellationToken, ScanRequest, TargetSelector};
use wd_scanners_core::{ScannerOptions, ScannerRegistry};

use crate::support;

pub async fn run(
    config_path: Option<&Path>,
    target: Option<PathBuf>,
    all: bool,
    scanners: Option<Vec<String>>,
    verbose: bool,
) -> Result<()> {
    let config = support::load_config(config_path)?;
    let resolver = support::build_resolver()?;

    let data_access = Arc::new(DataAccessLayer::new(
        config.backend_url.clone(),
        config.database_url.clone(),
        config.cache_dir.clone().map(PathBuf::from),
    ));

    let mut registry = ScannerRegistry::new();
    wd_scanners::register_all(&mut registry, data_access).context("failed to register scanners")?;

    let scanner_names = scanners.unwrap_or_else(|| {
        registry.list_qualified().iter().map(|s| s.to_string()).collect()
    });

    let selector = if all {
        TargetSelector::AllRegistered(resolver.all_workspaces())
    } else {
        TargetSelector::Single(target.unwrap_or(std::env::current_dir()?))
    };

    let targets = wd_pipeline::expand_targets(&selector, &scanner_names)?;
    let target_count = targets.len();

    let options: BTreeMap<String, ScannerOptions> = BTreeMap::new();
    let request = ScanRequest {
        targets,
        scanner_names: scanner_names.clone(),
        options,
        concurrency: config.worker_concurrency,
        registry: &registry,
    };

    let cancel = CancellationToken::new();
    let outcome = run_scan(&request, &cancel).await.context("scan run failed")?;

    if !outcome.had_any_completion {
        println!("scan {:?}: no scanner completed against any target, nothing to persist", outcome.status);
        return Ok(());
    }

    let artifacts_dir = resolver.artifacts_path();
    let scanner_label = if scanner_names.len() > 1 { "all".to_string() } else {
        scanner_names.first().cloned().unwrap_or_else(|| "all".to_string())
    };
    let scope_label = if all { "all" } else { "single" };

    let artifact_path = write_scan_result(&artifacts_dir, &scanner_label, scope_label, &outcome.result)
        .context("failed to persist scan artifact")?;

    if verbose {
        println!("{}", serde_json::to_string_pretty(&outcome.result)?);
    } else {
        println!(
            "scan {:?}: {} items across {} targets, {} failed scanners -> {}",
            outcome.status,
            outcome.result.total_items(),
            target_count,
            outcome.result.failed_scanners.len(),
            artifact_path.display(),
        );
    }

    Ok(())
}
