// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared I/O helpers: path/config bootstrapping, on-disk governance file
//! formats, and the JSON-backed CMP target used by `apply-patch` when no
//! live database is configured.
//!
//! The governance files this crate reads (`registry_overrides.yaml`,
//! `legacy_registry.json`, `cmp_snapshot.json`, `github_inventory.json`) are
//! not modeled in `wd-core` or `wd-identity` — those crates only know the
//! in-memory [`wd_identity::Authorities`] shape. This module owns the
//! on-disk DTOs and the conversion into it, the same separation
//! `wd-error`'s `WdErrorDto` draws between a domain type and its wire form.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wd_config::WardenConfig;
use wd_core::{Classification, RegistryOverride};
use wd_identity::{Authorities, CmpProjectRecord, CmpRowState, CmpTarget};
use wd_paths::PathResolver;

/// Build a path resolver rooted at the current working directory. No
/// `Cartography` capability is attached; this crate only ever runs the
/// environment/walk-up fallback that every capability falls back to when
/// no richer source is wired in.
pub fn build_resolver() -> Result<PathResolver> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    Ok(PathResolver::without_cartography(&cwd))
}

/// Load, env-override, and validate the active configuration, logging any
/// advisory warnings.
pub fn load_config(path: Option<&Path>) -> Result<WardenConfig> {
    let config = wd_config::load_config(path).map_err(|e| anyhow::anyhow!("{e}"))?;
    match wd_config::validate_config(&config) {
        Ok(warnings) => {
            for warning in warnings {
                tracing::warn!(%warning, "configuration warning");
            }
        }
        Err(e) => anyhow::bail!("invalid configuration: {e}"),
    }
    Ok(config)
}

/// Read and deserialize a JSON file.
pub fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("cannot parse {} as JSON", path.display()))
}

/// Read and deserialize a JSON file, returning `default` when the file does
/// not exist (every governance input consulted here is optional — an
/// authority that has nothing on file is silence, not an error).
pub fn read_json_or_default<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Result<T> {
    if !path.is_file() {
        return Ok(T::default());
    }
    read_json(path)
}

/// Serialize and write a JSON file, pretty-printed, creating parent
/// directories as needed.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("cannot serialize to JSON")?;
    std::fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))
}

/// Read a YAML file, returning `default` when the file is absent.
pub fn read_yaml_or_default<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Result<T> {
    if !path.is_file() {
        return Ok(T::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("cannot parse {} as YAML", path.display()))
}

/// Write a value as YAML, creating parent directories as needed.
pub fn write_yaml(path: &Path, value: &impl Serialize) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let yaml = serde_yaml::to_string(value).context("cannot serialize to YAML")?;
    std::fs::write(path, yaml).with_context(|| format!("cannot write {}", path.display()))
}

/// One CMP project record as it appears in a `cmp_snapshot.json` file — the
/// on-disk twin of [`CmpProjectRecord`], which carries no `serde` impls of
/// its own since `wd-identity` never touches a file directly.
#[derive(Debug, Clone, Deserialize)]
struct CmpRecordEntry {
    display_name: String,
    #[serde(default)]
    uuid: Option<Uuid>,
    #[serde(default)]
    github_url: Option<String>,
    #[serde(default)]
    classification: Option<String>,
}

impl From<CmpRecordEntry> for CmpProjectRecord {
    fn from(entry: CmpRecordEntry) -> Self {
        Self {
            display_name: entry.display_name,
            uuid: entry.uuid,
            github_url: entry.github_url,
            classification: entry.classification.as_deref().map(Classification::from_str_lossy),
        }
    }
}

/// Load the three consulted authorities plus overrides from governance
/// files under `root`, building an [`Authorities`] ready for
/// [`wd_identity::resolve_all`].
///
/// Every input is optional: a missing file means that authority is silent
/// for every project key, treating an absent lookup the same as an
/// explicit "nothing".
pub fn load_authorities(root: &Path) -> Result<Authorities> {
    let overrides_list: Vec<RegistryOverride> =
        read_yaml_or_default(&root.join("registry_overrides.yaml"))?;
    let cmp_entries: BTreeMap<String, CmpRecordEntry> =
        read_json_or_default(&root.join("cmp_snapshot.json"))?;
    let legacy_registry: BTreeMap<String, Uuid> =
        read_json_or_default(&root.join("legacy_registry.json"))?;

    let overrides = overrides_list.into_iter().map(|o| (o.project_key.clone(), o)).collect();
    let cmp = cmp_entries.into_iter().map(|(k, v)| (k, CmpProjectRecord::from(v))).collect();

    Ok(Authorities { overrides, cmp, legacy_registry })
}

/// A [`CmpTarget`] backed by a flat JSON file (`project_key -> uuid`,
/// `null` meaning "row present without a uuid"). This is the offline tier
/// `apply-patch` writes against when no live database is wired in — the
/// same role `wd-dataaccess`'s cached JSON mirror plays for reads, mirrored
/// for writes.
pub struct JsonCmpStore {
    path: PathBuf,
    rows: BTreeMap<String, Option<Uuid>>,
}

impl JsonCmpStore {
    /// Load the store from `path`, or start empty if it does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        let rows = read_json_or_default(path)?;
        Ok(Self { path: path.to_path_buf(), rows })
    }

    /// Persist the store back to its file.
    pub fn save(&self) -> Result<()> {
        write_json_pretty(&self.path, &self.rows)
    }
}

impl CmpTarget for JsonCmpStore {
    fn row_state(&self, project_key: &str) -> CmpRowState {
        match self.rows.get(project_key) {
            None => CmpRowState::Absent,
            Some(None) => CmpRowState::PresentWithoutUuid,
            Some(Some(uuid)) => CmpRowState::PresentWithUuid(*uuid),
        }
    }

    fn create(&mut self, project_key: &str, project_uuid: Uuid) -> Result<(), wd_error::WdError> {
        self.rows.insert(project_key.to_string(), Some(project_uuid));
        Ok(())
    }

    fn backfill_uuid(&mut self, project_key: &str, project_uuid: Uuid) -> Result<(), wd_error::WdError> {
        self.rows.insert(project_key.to_string(), Some(project_uuid));
        Ok(())
    }
}
