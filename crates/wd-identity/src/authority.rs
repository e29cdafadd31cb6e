// SPDX-License-Identifier: MIT OR Apache-2.0
//! Authority inputs consulted during resolution.

use std::collections::BTreeMap;

use uuid::Uuid;
use wd_core::{Classification, RegistryOverride};

/// A CMP database row for one project, keyed by `project_key` (the database
/// map collapsed with its sibling enrichment map — see `DESIGN.md`: CMP
/// rows either carry a UUID already or do not, which is exactly the
/// distinction [`crate::CmpStatus`] needs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmpProjectRecord {
    /// CMP's own display name for the project.
    pub display_name: String,
    /// The UUID CMP has on file, if any.
    pub uuid: Option<Uuid>,
    /// Normalized GitHub URL, if CMP has one recorded.
    pub github_url: Option<String>,
    /// CMP's free-text classification, if present.
    pub classification: Option<Classification>,
}

/// The three authorities consulted in priority order during resolution
/// (override → database → legacy registry), plus the override-alias index
/// needed to resolve a raw key to its override record.
#[derive(Debug, Clone, Default)]
pub struct Authorities {
    /// Override records, keyed by their own `project_key` (not by alias).
    pub overrides: BTreeMap<String, RegistryOverride>,
    /// CMP's known projects, keyed by `project_key`.
    pub cmp: BTreeMap<String, CmpProjectRecord>,
    /// The legacy registry file's `project_key → uuid` map.
    pub legacy_registry: BTreeMap<String, Uuid>,
}

impl Authorities {
    /// Look up the override for `project_key`, following aliases if the key
    /// itself is not a primary override key (supplemented feature:
    /// `registry_builder.py::_load_overrides`' alias resolution).
    #[must_use]
    pub fn override_for(&self, project_key: &str) -> Option<&RegistryOverride> {
        if let Some(o) = self.overrides.get(project_key) {
            return Some(o);
        }
        self.overrides.values().find(|o| o.aliases.iter().any(|a| a == project_key))
    }
}
