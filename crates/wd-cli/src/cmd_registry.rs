// SPDX-License-Identifier: MIT OR Apache-2.0
//! `wd registry` — inspect the persisted project registry.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use wd_core::{IdentityStats, ProjectRegistry, RegistryOverride};

use crate::support;

fn load(resolver: &wd_paths::PathResolver, registry: Option<PathBuf>) -> Result<(ProjectRegistry, Vec<RegistryOverride>)> {
    let registry_path = registry.unwrap_or_else(|| resolver.governance_path("project_registry.json"));
    let registry: ProjectRegistry = support::read_json(&registry_path)
        .with_context(|| format!("failed to read registry {}", registry_path.display()))?;
    let overrides: Vec<RegistryOverride> =
        support::read_yaml_or_default(&resolver.governance_path("registry_overrides.yaml"))?;
    Ok((registry, overrides))
}

pub fn get(config_path: Option<&Path>, project_key: &str, registry: Option<PathBuf>) -> Result<()> {
    let _config = support::load_config(config_path)?;
    let resolver = support::build_resolver()?;
    let (registry, overrides) = load(&resolver, registry)?;

    match registry.resolve(project_key, &overrides) {
        Some(project) => println!("{}", serde_json::to_string_pretty(project)?),
        None => anyhow::bail!("no project found for key or alias '{project_key}'"),
    }
    Ok(())
}

pub fn summary(config_path: Option<&Path>, registry: Option<PathBuf>) -> Result<()> {
    let _config = support::load_config(config_path)?;
    let resolver = support::build_resolver()?;
    let (registry, _overrides) = load(&resolver, registry)?;

    let mut stats = IdentityStats::default();
    for project in registry.projects.values() {
        stats.record(&project.identity);
    }

    println!("generated_at: {}", registry.generated_at);
    println!("projects: {}", registry.projects.len());
    println!("linked_count: {}", registry.linked_count);
    println!("github_count: {}", registry.github_count);
    println!("converged: {}", stats.converged);
    println!("keyed: {}", stats.keyed);
    println!("discovered: {}", stats.discovered);
    println!("conflict: {}", stats.conflict);
    Ok(())
}
