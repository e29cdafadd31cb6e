// SPDX-License-Identifier: MIT OR Apache-2.0
//! `wd gate` — evaluate a scan artifact against gating rules.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use wd_core::ScanResult;

use crate::support;

fn default_artifact(resolver: &wd_paths::PathResolver) -> PathBuf {
    resolver.artifacts_path().join("scan.all.all.json")
}

pub fn run(config_path: Option<&Path>, strict: bool, artifact: Option<PathBuf>) -> Result<()> {
    let _config = support::load_config(config_path)?;
    let resolver = support::build_resolver()?;

    let artifact_path = artifact.unwrap_or_else(|| default_artifact(&resolver));
    let result: ScanResult = support::read_json(&artifact_path)
        .with_context(|| format!("failed to read scan artifact {}", artifact_path.display()))?;

    let mut violations = Vec::new();
    if result.had_partial_failure() {
        violations.push(format!("scanners failed: {}", result.failed_scanners.join(", ")));
    }
    if result.total_items() == 0 {
        violations.push("scan produced zero items".to_string());
    }

    if violations.is_empty() {
        println!("gate: clean ({} items, {} scanners)", result.total_items(), result.findings.len());
        return Ok(());
    }

    for violation in &violations {
        println!("gate: violation: {violation}");
    }

    if strict {
        anyhow::bail!("gate failed with {} violation(s)", violations.len());
    }

    println!("gate: {} advisory violation(s), not strict, passing", violations.len());
    Ok(())
}
