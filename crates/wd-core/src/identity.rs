// SPDX-License-Identifier: MIT OR Apache-2.0
//! Project identity types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A project's classification, as assigned during reconciliation.
///
/// The "virtual" classification (known to CMP but with no local path and no
/// GitHub URL) is first-class here rather than an afterthought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// A project actively developed, linked to a local path.
    Active,
    /// A project whose local copy is a frozen snapshot.
    Snapshot,
    /// A project known only to CMP, with no local path and no GitHub URL.
    Virtual,
    /// A project retired from active development.
    Archived,
}

impl Classification {
    /// Parse from a lowercase string, defaulting to [`Classification::Active`]
    /// for unrecognized values, permissively tolerating CMP's free-text
    /// `type` field.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "snapshot" => Self::Snapshot,
            "virtual" => Self::Virtual,
            "archived" => Self::Archived,
            _ => Self::Active,
        }
    }
}

/// The four terminal states of identity resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IdentityStatus {
    /// All consulted authorities agreed on the minted UUID (or were silent).
    Converged,
    /// At least one authority supplied a UUID matching the minted one; none disagreed.
    Keyed,
    /// No authority knew the project; it is new to the federation.
    Discovered,
    /// Two authorities supplied different non-null UUIDs; never auto-resolved.
    Conflict,
}

/// The database-lookup classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CmpStatus {
    /// The project exists in CMP with a UUID.
    FoundWithUuid,
    /// The project exists in CMP but without a UUID.
    FoundNoUuid,
    /// The project is unknown to CMP.
    Missing,
}

/// A competing UUID observed from a named authority during conflict detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuthorityClaim {
    /// Name of the authority (`"override"`, `"database"`, `"legacy_registry"`).
    pub authority: String,
    /// The UUID that authority claims for this project key.
    pub uuid: Uuid,
}

/// The canonical, reconciled project entity.
///
/// **Invariant:** given the same `project_key` and the same namespace, the
/// minted UUID is bit-identical across runs and machines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectIdentity {
    /// Deterministic UUIDv5 minted from `project_key`.
    pub project_uuid: Uuid,
    /// Normalized `host:owner/repo` key, lowercase.
    pub project_key: String,
    /// Human-facing display name.
    pub display_name: String,
    /// Normalized GitHub URL, if the project has one.
    pub github_url: Option<String>,
    /// Zero or more local filesystem paths where this project is checked out.
    pub local_paths: Vec<String>,
    /// Active / snapshot / virtual / archived.
    pub classification: Classification,
    /// Converged / keyed / discovered / conflict.
    pub identity_status: IdentityStatus,
    /// found_with_uuid / found_no_uuid / missing.
    pub cmp_status: CmpStatus,
    /// Populated only when `identity_status == Conflict`: every authority's
    /// claim, enumerated rather than resolved (Policy C).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicting_claims: Vec<AuthorityClaim>,
    /// Free-form enrichment fields carried through from CMP / overrides.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub enrichment: BTreeMap<String, serde_json::Value>,
}

impl ProjectIdentity {
    /// `true` when this project needs manual adjudication before any patch
    /// action concerning it may be applied.
    #[must_use]
    pub fn requires_adjudication(&self) -> bool {
        self.identity_status == IdentityStatus::Conflict
    }
}
