// SPDX-License-Identifier: MIT OR Apache-2.0
//! `wd audit` — internal consistency checks: UUID provenance, configuration
//! schema, and scanner registration hygiene.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use wd_config::WardenConfig;
use wd_core::ProjectRegistry;
use wd_dataaccess::DataAccessLayer;
use wd_scanners_core::ScannerRegistry;

use crate::support;

pub fn uuids(config_path: Option<&Path>, registry: Option<PathBuf>) -> Result<()> {
    let config = support::load_config(config_path)?;
    let resolver = support::build_resolver()?;

    let registry_path = registry.unwrap_or_else(|| resolver.governance_path("project_registry.json"));
    let registry: ProjectRegistry = support::read_json(&registry_path)
        .with_context(|| format!("failed to read registry {}", registry_path.display()))?;

    let mut categorized: Vec<(String, String)> = Vec::new();
    for project in registry.projects.values() {
        let label = categorize(&config, &project.identity.local_paths);
        for path in &project.identity.local_paths {
            categorized.push((path.clone(), label.clone()));
        }
        if project.identity.local_paths.is_empty() {
            categorized.push((project.identity.project_key.clone(), "unlocated".to_string()));
        }
    }

    let output_path = resolver.artifacts_path().join("uuid_provenance.json");
    support::write_json_pretty(&output_path, &categorized)?;

    let report_path = resolver.artifacts_path().join("UUID_AUDIT_REPORT.md");
    let mut report = String::from("# UUID Provenance Audit\n\n");
    report.push_str(&format!("Total entries: {}\n\n", categorized.len()));
    report.push_str("| Path | Provenance |\n|---|---|\n");
    for (path, label) in &categorized {
        report.push_str(&format!("| {path} | {label} |\n"));
    }
    std::fs::write(&report_path, report).context("failed to write UUID audit report")?;

    println!(
        "audit uuids: {} entries -> {} / {}",
        categorized.len(),
        output_path.display(),
        report_path.display(),
    );
    Ok(())
}

fn categorize(config: &WardenConfig, local_paths: &[String]) -> String {
    for path in local_paths {
        for rule in &config.provenance_rules {
            if path.contains(&rule.pattern) {
                return rule.label.clone();
            }
        }
    }
    "unclassified".to_string()
}

pub fn deps(config_path: Option<&Path>, schema_output: Option<PathBuf>) -> Result<()> {
    let config = support::load_config(config_path)?;
    let resolver = support::build_resolver()?;

    let warnings = wd_config::validate_config(&config).map_err(|e| anyhow::anyhow!("{e}"))?;
    for warning in &warnings {
        println!("audit deps: warning: {warning}");
    }

    let schema = schemars::schema_for!(WardenConfig);
    let output_path = schema_output.unwrap_or_else(|| resolver.artifacts_path().join("warden_config.schema.json"));
    support::write_json_pretty(&output_path, &schema)?;

    println!("audit deps: {} warning(s), schema -> {}", warnings.len(), output_path.display());
    Ok(())
}

pub fn lock(config_path: Option<&Path>) -> Result<()> {
    let config = support::load_config(config_path)?;
    let resolver = support::build_resolver()?;

    let data_access = Arc::new(DataAccessLayer::new(
        config.backend_url.clone(),
        config.database_url.clone(),
        config.cache_dir.clone().map(PathBuf::from),
    ));
    let mut registry = ScannerRegistry::new();
    wd_scanners::register_all(&mut registry, data_access).context("scanner registration collision detected")?;

    let expected = 5;
    if registry.len() != expected {
        anyhow::bail!("expected {expected} registered scanners, found {}", registry.len());
    }

    let artifacts_dir = resolver.artifacts_path();
    let mut leftover_tmp = Vec::new();
    if artifacts_dir.is_dir() {
        for entry in std::fs::read_dir(&artifacts_dir)? {
            let entry = entry?;
            if entry.path().extension().and_then(|e| e.to_str()) == Some("tmp") {
                leftover_tmp.push(entry.path());
            }
        }
    }

    if !leftover_tmp.is_empty() {
        anyhow::bail!(
            "found {} leftover temporary artifact file(s): {}",
            leftover_tmp.len(),
            leftover_tmp.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "),
        );
    }

    println!("audit lock: {} scanners registered, no leftover temp files", registry.len());
    Ok(())
}
