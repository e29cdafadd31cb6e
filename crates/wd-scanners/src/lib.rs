// SPDX-License-Identifier: MIT OR Apache-2.0
//! Concrete scanner implementations, grouped by category the same way
//! the scanners directory itself is: each immediate child is a category.
//!
//! This crate intentionally implements only the categories needed to
//! exercise the registry end-to-end: `git`, `database`, `static`, and
//! `discovery`. Categories named in the manifest-discovery description
//! (`health`, `library`, `phoenix`, `polyglot`, `search`, `architecture`,
//! `fleet`) remain external interfaces and have no production scanner
//! here.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod database;
pub mod discovery;
pub mod git;
#[path = "static_/mod.rs"]
pub mod r#static;

use std::sync::Arc;

use wd_dataaccess::DataAccessLayer;
use wd_error::WdError;
use wd_scanners_core::ScannerRegistry;

/// Register every scanner this crate provides into `registry`.
///
/// Constructs each scanner, registers it under its category, and propagates
/// the first collision as a fatal error: a flat-name collision between two
/// scanners must abort startup rather than silently shadow one of them.
///
/// # Errors
///
/// Returns the first [`WdError`] raised by [`ScannerRegistry::register`].
pub fn register_all(registry: &mut ScannerRegistry, data_access: Arc<DataAccessLayer>) -> Result<(), WdError> {
    registry.register("git", "status", Arc::new(git::GitStatusScanner))?;
    registry.register("database", "cmp_projects", Arc::new(database::CmpProjectsScanner::new(data_access.clone())))?;
    registry.register("database", "cmp_agents", Arc::new(database::CmpAgentsScanner::new(data_access)))?;
    registry.register("static", "events", Arc::new(r#static::EventSurfaceScanner))?;
    registry.register("discovery", "project", Arc::new(discovery::ProjectDiscoveryScanner))?;
    tracing::debug!(count = registry.len(), "registered built-in scanners");
    Ok(())
}
