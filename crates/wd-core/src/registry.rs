// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry overrides and the on-disk project registry format.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::identity::{Classification, ProjectIdentity};

/// A manually-authored override entry. Overrides win over every other
/// authority, including alias resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RegistryOverride {
    /// The project key this override applies to.
    pub project_key: String,
    /// Forces the display name, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Forces the classification, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    /// Alternate keys that resolve to this project (e.g. renamed
    /// repositories, legacy CMP keys).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// When `true`, this project is excluded from scans and reports
    /// entirely.
    #[serde(default)]
    pub excluded: bool,
}

/// One project as it appears in the published registry artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RegistryProject {
    /// The project's canonical identity.
    #[serde(flatten)]
    pub identity: ProjectIdentity,
}

/// The full registry artifact written by the aggregation pipeline, mirrored
/// to `canonical_*_uuids.json` as a cold-fallback copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectRegistry {
    /// RFC 3339 timestamp of generation.
    pub generated_at: String,
    /// Every reconciled project, keyed by project key.
    pub projects: BTreeMap<String, RegistryProject>,
    /// Number of projects with a GitHub URL linked, at the time this
    /// registry was written. Used by the degradation guard to detect a
    /// drop in richness relative to the previous registry.
    pub linked_count: usize,
    /// Number of projects known to the GitHub inventory at generation time.
    pub github_count: usize,
}

impl ProjectRegistry {
    /// Look up a project by key or by any of its registered aliases.
    #[must_use]
    pub fn resolve<'a>(
        &'a self,
        key: &str,
        overrides: &[RegistryOverride],
    ) -> Option<&'a RegistryProject> {
        if let Some(p) = self.projects.get(key) {
            return Some(p);
        }
        let canonical = overrides
            .iter()
            .find(|o| o.aliases.iter().any(|a| a == key))
            .map(|o| o.project_key.as_str())?;
        self.projects.get(canonical)
    }

    /// UUIDs of every project currently in the registry, as a quick
    /// membership check for drift reports.
    #[must_use]
    pub fn uuids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.projects.values().map(|p| p.identity.project_uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{CmpStatus, IdentityStatus};

    fn sample_registry() -> ProjectRegistry {
        let identity = ProjectIdentity {
            project_uuid: Uuid::nil(),
            project_key: "github.com:acme/widget".into(),
            display_name: "widget".into(),
            github_url: Some("https://github.com/acme/widget".into()),
            local_paths: vec![],
            classification: Classification::Active,
            identity_status: IdentityStatus::Converged,
            cmp_status: CmpStatus::FoundWithUuid,
            conflicting_claims: vec![],
            enrichment: BTreeMap::new(),
        };
        let mut projects = BTreeMap::new();
        projects.insert("github.com:acme/widget".to_string(), RegistryProject { identity });
        ProjectRegistry {
            generated_at: "2026-07-30T00:00:00Z".into(),
            projects,
            linked_count: 1,
            github_count: 1,
        }
    }

    #[test]
    fn resolve_finds_project_by_direct_key() {
        let registry = sample_registry();
        assert!(registry.resolve("github.com:acme/widget", &[]).is_some());
    }

    #[test]
    fn resolve_falls_back_to_override_aliases() {
        let registry = sample_registry();
        let overrides = vec![RegistryOverride {
            project_key: "github.com:acme/widget".into(),
            display_name: None,
            classification: None,
            aliases: vec!["github.com:acme/widget-old-name".into()],
            excluded: false,
        }];
        let found = registry.resolve("github.com:acme/widget-old-name", &overrides);
        assert!(found.is_some());
        assert_eq!(found.unwrap().identity.project_key, "github.com:acme/widget");
    }

    #[test]
    fn resolve_returns_none_for_unknown_key_and_alias() {
        let registry = sample_registry();
        assert!(registry.resolve("github.com:acme/missing", &[]).is_none());
    }

    #[test]
    fn uuids_iterates_every_project() {
        let registry = sample_registry();
        let uuids: Vec<Uuid> = registry.uuids().collect();
        assert_eq!(uuids, vec![Uuid::nil()]);
    }
}
