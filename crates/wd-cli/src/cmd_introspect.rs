// SPDX-License-Identifier: MIT OR Apache-2.0
//! `wd introspect` — report drift between declared and implemented
//! scanners.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use wd_scanners_core::detect_drift;

use crate::support;

pub fn run(config_path: Option<&Path>, scanners_root: Option<PathBuf>) -> Result<()> {
    let _config = support::load_config(config_path)?;
    let resolver = support::build_resolver()?;

    let root = scanners_root.unwrap_or_else(|| resolver.governance_path("scanners"));
    let drift = detect_drift(&root).context("failed to walk scanner manifests")?;

    if drift.is_empty() {
        println!("introspect: no scanner categories found under {}", root.display());
        return Ok(());
    }

    let mut any_dirty = false;
    for category in &drift {
        if category.is_clean() {
            println!("{}: clean", category.category);
            continue;
        }
        any_dirty = true;
        println!("{}: drift detected", category.category);
        for name in &category.undocumented {
            println!("  undocumented: {name}");
        }
        for name in &category.phantom {
            println!("  phantom: {name}");
        }
    }

    if !any_dirty {
        println!("introspect: all categories clean");
    }

    Ok(())
}
