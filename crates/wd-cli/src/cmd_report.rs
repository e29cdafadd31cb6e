// SPDX-License-Identifier: MIT OR Apache-2.0
//! `wd report` — generate event-debt, event-gap, or project-drift reports.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;

use wd_core::{EventRegistry, ProjectRegistry, RegistryOverride};
use wd_dataaccess::DataAccessLayer;
use wd_reports::{analyze_gap, detect_drift, generate_debt_report, DiscoveredProject};
use wd_scanners_core::{ScannerOptions, ScannerRegistry};

use crate::support;
use crate::ReportKindArg;

pub async fn run(
    config_path: Option<&Path>,
    kind: ReportKindArg,
    target: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = support::load_config(config_path)?;
    let resolver = support::build_resolver()?;
    let output_dir = output.unwrap_or_else(|| resolver.artifacts_path());

    let now = Utc::now().to_rfc3339();

    if matches!(kind, ReportKindArg::Debt | ReportKindArg::All) {
        run_debt(&config, &resolver, &output_dir, &now)?;
    }
    if matches!(kind, ReportKindArg::Gap | ReportKindArg::All) {
        run_gap(&resolver, &output_dir, &now)?;
    }
    if matches!(kind, ReportKindArg::Drift | ReportKindArg::All) {
        run_drift(&config, &resolver, target.clone(), &output_dir, &now).await?;
    }

    Ok(())
}

fn run_debt(
    config: &wd_config::WardenConfig,
    resolver: &wd_paths::PathResolver,
    output_dir: &Path,
    now: &str,
) -> Result<()> {
    let registry_path = resolver.governance_path("events/EVENT_REGISTRY.yaml");
    let registry: EventRegistry = support::read_yaml_or_default(&registry_path)?;

    let report = generate_debt_report(&registry, &config.event_debt_rules, now.to_string());
    let path = output_dir.join("event_debt.yaml");
    support::write_yaml(&path, &report)?;
    println!("report debt: {} item(s) -> {}", report.debt_items.len(), path.display());
    Ok(())
}

fn run_gap(resolver: &wd_paths::PathResolver, output_dir: &Path, now: &str) -> Result<()> {
    let registry_path = resolver.governance_path("events/EVENT_REGISTRY.yaml");
    let registry: EventRegistry = support::read_yaml_or_default(&registry_path)?;

    let log_path = resolver.governance_path("events/event_log.ndjson");
    let log_content = std::fs::read_to_string(&log_path).unwrap_or_default();

    let analysis = analyze_gap(&registry, log_content.lines(), now.to_string());
    let path = output_dir.join("event_gap_analysis.yaml");
    support::write_yaml(&path, &analysis)?;
    println!(
        "report gap: {} latent, {} emergent -> {}",
        analysis.latent_events.len(),
        analysis.emergent_events.len(),
        path.display(),
    );
    Ok(())
}

async fn run_drift(
    config: &wd_config::WardenConfig,
    resolver: &wd_paths::PathResolver,
    target: Option<PathBuf>,
    output_dir: &Path,
    now: &str,
) -> Result<()> {
    let registry_path = resolver.governance_path("project_registry.json");
    let registry: ProjectRegistry = if registry_path.is_file() {
        support::read_json(&registry_path)
            .with_context(|| format!("failed to read registry {}", registry_path.display()))?
    } else {
        ProjectRegistry {
            generated_at: now.to_string(),
            projects: Default::default(),
            linked_count: 0,
            github_count: 0,
        }
    };
    let overrides: Vec<RegistryOverride> =
        support::read_yaml_or_default(&resolver.governance_path("registry_overrides.yaml"))?;

    let data_access = Arc::new(DataAccessLayer::new(
        config.backend_url.clone(),
        config.database_url.clone(),
        config.cache_dir.clone().map(PathBuf::from),
    ));
    let mut scanner_registry = ScannerRegistry::new();
    wd_scanners::register_all(&mut scanner_registry, data_access).context("failed to register scanners")?;
    let scanner = scanner_registry
        .get("project")
        .context("project discovery scanner is not registered")?;

    let scan_target = target.unwrap_or(std::env::current_dir()?);
    let output = scanner
        .scan(&scan_target, &ScannerOptions::empty())
        .await
        .context("project discovery scan failed")?;

    let discovered: Vec<DiscoveredProject> = output
        .items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<_, _>>()
        .context("discovery scanner output did not match the expected shape")?;

    let report = detect_drift(&registry, &overrides, &discovered, now.to_string());
    let path = output_dir.join("registry_drift.json");
    support::write_json_pretty(&path, &report)?;
    println!(
        "report drift: {} ghost(s), {} rogue(s) -> {}",
        report.summary.ghost_count, report.summary.rogue_count, path.display(),
    );
    Ok(())
}
