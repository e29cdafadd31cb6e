// SPDX-License-Identifier: MIT OR Apache-2.0
//! `wd reconcile-identity` and `wd apply-patch` — resolve project identity
//! against configured authorities and apply the resulting patches to a CMP
//! store.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use wd_core::{IdentityPatch, RepoInventoryItem};
use wd_identity::{apply_patch, derive_patches, resolve_all, ApplyOutcome};

use crate::support::{self, JsonCmpStore};

pub fn reconcile(
    config_path: Option<&Path>,
    inventory_path: &Path,
    governance_root: Option<PathBuf>,
    emit_patches: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let _config = support::load_config(config_path)?;
    let resolver = support::build_resolver()?;

    let root = governance_root.unwrap_or(std::env::current_dir()?);
    let authorities = support::load_authorities(&root)?;

    let inventory: Vec<RepoInventoryItem> = support::read_json(inventory_path)
        .with_context(|| format!("failed to read inventory {}", inventory_path.display()))?;
    let urls: Vec<String> = inventory.iter().map(|item| item.url.clone()).collect();

    let scan_result = resolve_all(&urls, &authorities);

    let output_path = output.unwrap_or_else(|| resolver.artifacts_path().join("identity_scan.json"));
    support::write_json_pretty(&output_path, &scan_result)?;

    println!(
        "reconcile-identity: {} resolved, {} unresolved -> {}",
        scan_result.resolved.len(),
        scan_result.unresolved.len(),
        output_path.display(),
    );

    if emit_patches {
        let patches = derive_patches(&scan_result.resolved);
        let patches_path = resolver.artifacts_path().join("identity_patches.json");
        support::write_json_pretty(&patches_path, &patches)?;
        println!("reconcile-identity: {} patch(es) -> {}", patches.len(), patches_path.display());
    }

    Ok(())
}

pub fn apply(
    config_path: Option<&Path>,
    patches_path: &Path,
    cmp_store_path: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let _config = support::load_config(config_path)?;
    let resolver = support::build_resolver()?;

    let patches: Vec<IdentityPatch> = support::read_json(patches_path)
        .with_context(|| format!("failed to read patches {}", patches_path.display()))?;

    let store_path = cmp_store_path.unwrap_or_else(|| resolver.artifacts_path().join("cmp_store.json"));
    let mut store = JsonCmpStore::load(&store_path)?;

    let mut applied = 0;
    let mut no_op = 0;
    let mut skipped = 0;
    let mut errors = Vec::new();

    for patch in &patches {
        match apply_patch(patch, &mut store) {
            Ok(ApplyOutcome::Applied) => applied += 1,
            Ok(ApplyOutcome::NoOp) => no_op += 1,
            Ok(ApplyOutcome::Skipped) => skipped += 1,
            Err(e) => errors.push(format!("{}: {e}", patch.project_key)),
        }
    }

    println!("apply-patch: {applied} applied, {no_op} no-op, {skipped} skipped, {} error(s)", errors.len());

    if !dry_run {
        store.save().context("failed to persist CMP store")?;
    } else {
        println!("apply-patch: dry run, CMP store not persisted");
    }

    if !errors.is_empty() {
        anyhow::bail!("apply-patch encountered {} error(s):\n{}", errors.len(), errors.join("\n"));
    }

    Ok(())
}
