// SPDX-License-Identifier: MIT OR Apache-2.0
//! Path resolution for the governance artifact tree (C1).
//!
//! Every other component asks [`PathResolver`] "where does governance data
//! live?" instead of hard-coding paths. The resolver delegates to an
//! optional external [`Cartography`] capability when one is attached;
//! otherwise it falls back to an environment variable and a sibling-directory
//! walk. Both paths are kept prefix-compatible: a scanner written against the
//! fallback works unchanged once a cartography is attached.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Environment variable carrying an infrastructure-root override.
pub const WD_INFRA_ROOT_ENV: &str = "WD_INFRA_ROOT";

/// Environment variable that, when set to a truthy value, redirects
/// artifacts to a scratch directory ("sandbox mode").
pub const WD_SANDBOX_MODE_ENV: &str = "WD_SANDBOX_MODE";

/// Marker file a fallback walk looks for: its presence identifies the
/// infrastructure root among candidate ancestor directories.
const MANIFEST_MARKER: &str = "FEDERATION_MANIFEST.yaml";

/// Status of a single entry in the contract map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEntry {
    /// Current status string (e.g. `"active"`, `"deprecated"`).
    pub status: String,
    /// A reference identifier for the contract (version tag, commit, URL).
    #[serde(rename = "ref")]
    pub reference: String,
}

/// External capability for resolving federation-wide paths. Implementations
/// may be backed by a live orchestration service; the core never assumes one
/// is present.
pub trait Cartography: Send + Sync {
    /// The federation's infrastructure root, if known.
    fn infrastructure_root(&self) -> Option<PathBuf>;

    /// Resolve an arbitrary governance-relative key to a path.
    fn resolve_path(&self, key: &str) -> Option<PathBuf>;

    /// List known station (workspace) directories.
    fn list_stations(&self) -> Vec<PathBuf>;

    /// List known agent identifiers.
    fn list_agents(&self) -> Vec<String>;

    /// Path to a named registry file (`"projects"`, `"agents"`, ...).
    fn registry_path(&self, kind: &str) -> Option<PathBuf>;

    /// The contract map: component name to its current status and reference.
    fn contract_map(&self) -> BTreeMap<String, ContractEntry>;
}

/// Resolves governance paths, delegating to an attached [`Cartography`] when
/// present and falling back to deterministic, environment-derived defaults
/// otherwise.
pub struct PathResolver {
    cartography: Option<Arc<dyn Cartography>>,
    fallback_root: PathBuf,
}

impl PathResolver {
    /// Build a resolver with no attached cartography, computing the fallback
    /// root from `WD_INFRA_ROOT` or a sibling-directory walk starting at
    /// `start_dir`.
    #[must_use]
    pub fn without_cartography(start_dir: &Path) -> Self {
        Self {
            cartography: None,
            fallback_root: resolve_fallback_root(start_dir),
        }
    }

    /// Build a resolver backed by an external cartography capability.
    #[must_use]
    pub fn with_cartography(cartography: Arc<dyn Cartography>, start_dir: &Path) -> Self {
        Self {
            cartography: Some(cartography),
            fallback_root: resolve_fallback_root(start_dir),
        }
    }

    /// `true` when an external cartography capability is attached.
    #[must_use]
    pub fn has_cartography(&self) -> bool {
        self.cartography.is_some()
    }

    /// The infrastructure root: delegated when a cartography is attached and
    /// reports one, otherwise the environment/walk-derived fallback.
    #[must_use]
    pub fn infrastructure_root(&self) -> PathBuf {
        self.cartography
            .as_ref()
            .and_then(|c| c.infrastructure_root())
            .unwrap_or_else(|| self.fallback_root.clone())
    }

    /// A path under the infrastructure root, relative to the `governance/`
    /// subtree.
    #[must_use]
    pub fn governance_path(&self, relative: &str) -> PathBuf {
        if let Some(c) = &self.cartography
            && let Some(resolved) = c.resolve_path(relative)
        {
            return resolved;
        }
        self.infrastructure_root().join("governance").join(relative)
    }

    /// The directory where pipeline artifacts (`scan.*.json`, reports) are
    /// written.
    #[must_use]
    pub fn artifacts_path(&self) -> PathBuf {
        if sandbox_mode_enabled() {
            return std::env::temp_dir().join("warden-sandbox").join("artifacts");
        }
        self.infrastructure_root().join("artifacts").join("omni")
    }

    /// Every known workspace (station) directory.
    #[must_use]
    pub fn all_workspaces(&self) -> Vec<PathBuf> {
        if let Some(c) = &self.cartography {
            let stations = c.list_stations();
            if !stations.is_empty() {
                return stations;
            }
        }
        let root = self.infrastructure_root();
        let agents_dir = root.join("agents");
        let mut found = Vec::new();
        if let Ok(entries) = std::fs::read_dir(&agents_dir) {
            for entry in entries.flatten() {
                if entry.path().is_dir() {
                    found.push(entry.path());
                }
            }
        }
        found.sort();
        found
    }

    /// The contract map, delegated when present, otherwise empty (the
    /// fallback has no concept of contracts).
    #[must_use]
    pub fn contract_map(&self) -> BTreeMap<String, ContractEntry> {
        self.cartography
            .as_ref()
            .map(|c| c.contract_map())
            .unwrap_or_default()
    }
}

/// `true` when `WD_SANDBOX_MODE` is set to a recognized truthy value.
#[must_use]
pub fn sandbox_mode_enabled() -> bool {
    match std::env::var(WD_SANDBOX_MODE_ENV) {
        Ok(val) => matches!(val.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => false,
    }
}

/// Resolve the fallback infrastructure root: `WD_INFRA_ROOT` first, then a
/// sibling-directory walk up from `start_dir` looking for a directory that
/// has both `governance/` and `agents/` siblings alongside
/// [`MANIFEST_MARKER`].
#[must_use]
pub fn resolve_fallback_root(start_dir: &Path) -> PathBuf {
    if let Ok(val) = std::env::var(WD_INFRA_ROOT_ENV) {
        return PathBuf::from(val);
    }
    if let Some(found) = walk_for_manifest(start_dir) {
        return found;
    }
    start_dir.to_path_buf()
}

fn walk_for_manifest(start_dir: &Path) -> Option<PathBuf> {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        if dir.join(MANIFEST_MARKER).is_file()
            && dir.join("governance").is_dir()
            && dir.join("agents").is_dir()
        {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct FakeCartography {
        root: PathBuf,
    }

    impl Cartography for FakeCartography {
        fn infrastructure_root(&self) -> Option<PathBuf> {
            Some(self.root.clone())
        }
        fn resolve_path(&self, key: &str) -> Option<PathBuf> {
            if key == "special" {
                Some(self.root.join("special-override"))
            } else {
                None
            }
        }
        fn list_stations(&self) -> Vec<PathBuf> {
            vec![self.root.join("station-a")]
        }
        fn list_agents(&self) -> Vec<String> {
            vec!["agent-a".into()]
        }
        fn registry_path(&self, kind: &str) -> Option<PathBuf> {
            Some(self.root.join(format!("{kind}.yaml")))
        }
        fn contract_map(&self) -> BTreeMap<String, ContractEntry> {
            let mut map = BTreeMap::new();
            map.insert(
                "identity".into(),
                ContractEntry { status: "active".into(), reference: "v1".into() },
            );
            map
        }
    }

    #[test]
    fn fallback_root_uses_env_var_when_set() {
        let tmp = tempfile::tempdir().unwrap();
        std::env::set_var(WD_INFRA_ROOT_ENV, tmp.path());
        let root = resolve_fallback_root(Path::new("/irrelevant"));
        assert_eq!(root, tmp.path());
        std::env::remove_var(WD_INFRA_ROOT_ENV);
    }

    #[test]
    fn fallback_root_falls_back_to_start_dir_when_nothing_found() {
        std::env::remove_var(WD_INFRA_ROOT_ENV);
        let tmp = tempfile::tempdir().unwrap();
        let leaf = tmp.path().join("a/b/c");
        std::fs::create_dir_all(&leaf).unwrap();
        let root = resolve_fallback_root(&leaf);
        assert_eq!(root, leaf);
    }

    #[test]
    fn walk_for_manifest_finds_ancestor_with_marker_and_siblings() {
        std::env::remove_var(WD_INFRA_ROOT_ENV);
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("governance")).unwrap();
        std::fs::create_dir_all(tmp.path().join("agents")).unwrap();
        std::fs::write(tmp.path().join(MANIFEST_MARKER), "version: 1\n").unwrap();
        let nested = tmp.path().join("agents/some-project/nested");
        std::fs::create_dir_all(&nested).unwrap();

        let root = resolve_fallback_root(&nested);
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn delegated_and_fallback_paths_are_prefix_compatible() {
        std::env::remove_var(WD_INFRA_ROOT_ENV);
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("governance")).unwrap();
        std::fs::create_dir_all(tmp.path().join("agents")).unwrap();
        std::fs::write(tmp.path().join(MANIFEST_MARKER), "version: 1\n").unwrap();

        let fallback = PathResolver::without_cartography(tmp.path());
        let with_cartography = PathResolver::with_cartography(
            Arc::new(FakeCartography { root: tmp.path().to_path_buf() }),
            tmp.path(),
        );

        assert_eq!(fallback.infrastructure_root(), with_cartography.infrastructure_root());
        assert!(
            with_cartography
                .governance_path("events.yaml")
                .starts_with(with_cartography.infrastructure_root())
        );
    }

    #[test]
    fn governance_path_without_cartography_joins_under_governance() {
        std::env::remove_var(WD_INFRA_ROOT_ENV);
        let tmp = tempfile::tempdir().unwrap();
        let resolver = PathResolver::without_cartography(tmp.path());
        let path = resolver.governance_path("events.yaml");
        assert_eq!(path, resolver.infrastructure_root().join("governance").join("events.yaml"));
    }

    #[test]
    fn cartography_resolve_path_overrides_default_join() {
        std::env::remove_var(WD_INFRA_ROOT_ENV);
        let tmp = tempfile::tempdir().unwrap();
        let resolver = PathResolver::with_cartography(
            Arc::new(FakeCartography { root: tmp.path().to_path_buf() }),
            tmp.path(),
        );
        assert_eq!(resolver.governance_path("special"), tmp.path().join("special-override"));
    }

    #[test]
    fn all_workspaces_prefers_cartography_stations() {
        std::env::remove_var(WD_INFRA_ROOT_ENV);
        let tmp = tempfile::tempdir().unwrap();
        let resolver = PathResolver::with_cartography(
            Arc::new(FakeCartography { root: tmp.path().to_path_buf() }),
            tmp.path(),
        );
        assert_eq!(resolver.all_workspaces(), vec![tmp.path().join("station-a")]);
    }

    #[test]
    fn all_workspaces_fallback_lists_agents_dir() {
        std::env::remove_var(WD_INFRA_ROOT_ENV);
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("agents/alpha")).unwrap();
        std::fs::create_dir_all(tmp.path().join("agents/beta")).unwrap();
        let resolver = PathResolver::without_cartography(tmp.path());
        let workspaces = resolver.all_workspaces();
        assert_eq!(workspaces.len(), 2);
    }

    #[test]
    fn contract_map_empty_without_cartography() {
        std::env::remove_var(WD_INFRA_ROOT_ENV);
        let tmp = tempfile::tempdir().unwrap();
        let resolver = PathResolver::without_cartography(tmp.path());
        assert!(resolver.contract_map().is_empty());
    }

    #[test]
    fn contract_map_delegates_when_cartography_present() {
        std::env::remove_var(WD_INFRA_ROOT_ENV);
        let tmp = tempfile::tempdir().unwrap();
        let resolver = PathResolver::with_cartography(
            Arc::new(FakeCartography { root: tmp.path().to_path_buf() }),
            tmp.path(),
        );
        assert!(resolver.contract_map().contains_key("identity"));
    }

    #[test]
    fn sandbox_mode_recognizes_truthy_values() {
        for val in ["1", "true", "TRUE", "yes", "on"] {
            std::env::set_var(WD_SANDBOX_MODE_ENV, val);
            assert!(sandbox_mode_enabled(), "expected {val} to be truthy");
        }
        std::env::set_var(WD_SANDBOX_MODE_ENV, "0");
        assert!(!sandbox_mode_enabled());
        std::env::remove_var(WD_SANDBOX_MODE_ENV);
    }
}
