// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry drift: ghosts (registered projects no longer found on disk) and
//! rogues (projects found on disk but never registered).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use wd_core::{ProjectRegistry, RegistryOverride};

/// One project-root candidate found on disk, independent of the registry
/// (the shape the project discovery scanner's items deserialize into).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveredProject {
    /// The directory name.
    pub name: String,
    /// The absolute path on disk.
    pub path: String,
    /// Which marker file identified this as a project root.
    pub marker: String,
}

/// A project registered but absent on disk.
#[derive(Debug, Clone, Serialize)]
pub struct Ghost {
    /// The project's key.
    pub project_key: String,
    /// The project's display name.
    pub display_name: String,
    /// Every local path the registry expected to find.
    pub local_paths: Vec<String>,
}

/// A project present on disk but unregistered.
#[derive(Debug, Clone, Serialize)]
pub struct Rogue {
    /// The directory name.
    pub name: String,
    /// The absolute path on disk.
    pub path: String,
    /// Which marker file identified it.
    pub marker: String,
}

/// Roll-up counts for the drift report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DriftSummary {
    /// Number of non-excluded registered projects considered.
    pub registered_count: usize,
    /// Number of project roots discovered on disk.
    pub discovered_count: usize,
    /// Number of ghosts.
    pub ghost_count: usize,
    /// Number of rogues.
    pub rogue_count: usize,
}

/// Current shape version of [`DriftReport`]. Bump on any breaking change to
/// the artifact's fields.
pub const DRIFT_REPORT_SCHEMA: &str = "warden.drift_report.v1";

/// The registry drift report.
#[derive(Debug, Clone, Serialize)]
pub struct DriftReport {
    /// Shape version tag; see [`DRIFT_REPORT_SCHEMA`].
    pub schema: String,
    /// RFC 3339 generation timestamp.
    pub generated_at: String,
    /// Roll-up counts.
    pub summary: DriftSummary,
    /// Ghosts, sorted by project key.
    pub ghosts: Vec<Ghost>,
    /// Rogues, sorted by path.
    pub rogues: Vec<Rogue>,
}

fn is_excluded(project_key: &str, overrides: &[RegistryOverride]) -> bool {
    overrides.iter().any(|o| o.project_key == project_key && o.excluded)
}

/// Compare `registry` against `discovered` filesystem project roots,
/// producing a [`DriftReport`]. Projects whose override marks them
/// `excluded` are left out of both the registered count and ghost
/// detection.
#[must_use]
pub fn detect_drift(
    registry: &ProjectRegistry,
    overrides: &[RegistryOverride],
    discovered: &[DiscoveredProject],
    generated_at: impl Into<String>,
) -> DriftReport {
    let registered_paths: BTreeSet<&str> = registry
        .projects
        .values()
        .filter(|p| !is_excluded(&p.identity.project_key, overrides))
        .flat_map(|p| p.identity.local_paths.iter().map(String::as_str))
        .collect();

    let mut ghosts: Vec<Ghost> = Vec::new();
    let mut registered_count = 0;
    for project in registry.projects.values() {
        if is_excluded(&project.identity.project_key, overrides) {
            continue;
        }
        registered_count += 1;
        if project.identity.local_paths.is_empty() {
            continue;
        }
        let all_missing = project.identity.local_paths.iter().all(|p| !std::path::Path::new(p).exists());
        if all_missing {
            ghosts.push(Ghost {
                project_key: project.identity.project_key.clone(),
                display_name: project.identity.display_name.clone(),
                local_paths: project.identity.local_paths.clone(),
            });
        }
    }
    ghosts.sort_by(|a, b| a.project_key.cmp(&b.project_key));

    let mut rogues: Vec<Rogue> = discovered
        .iter()
        .filter(|d| !registered_paths.contains(d.path.as_str()))
        .map(|d| Rogue { name: d.name.clone(), path: d.path.clone(), marker: d.marker.clone() })
        .collect();
    rogues.sort_by(|a, b| a.path.cmp(&b.path));

    let summary = DriftSummary {
        registered_count,
        discovered_count: discovered.len(),
        ghost_count: ghosts.len(),
        rogue_count: rogues.len(),
    };

    DriftReport { schema: DRIFT_REPORT_SCHEMA.to_string(), generated_at: generated_at.into(), summary, ghosts, rogues }
}
