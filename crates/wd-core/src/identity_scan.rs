// SPDX-License-Identifier: MIT OR Apache-2.0
//! The identity engine's per-run output: every resolved project plus a
//! summary stats block. The identity engine produces a new
//! `IdentityScanResult` per run and does not share mutable state with
//! subsequent runs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::identity::{CmpStatus, IdentityStatus, ProjectIdentity};

/// An inventory item that could not be turned into a [`ProjectIdentity`]
/// because its URL did not normalize to a Git remote. Recorded as a
/// per-item error rather than a degenerate identity record,
/// since [`ProjectIdentity::project_uuid`] is not optional (see `DESIGN.md`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UnresolvedInventoryItem {
    /// The raw URL or key that failed to normalize.
    pub source: String,
    /// Why normalization failed.
    pub reason: String,
}

/// Counts of resolved projects by [`IdentityStatus`] and [`CmpStatus`],
/// folded deterministically so two runs over the same inputs produce a
/// bit-identical stats summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IdentityStats {
    /// Total number of resolved projects.
    pub total: usize,
    /// Count with `identity_status == converged`.
    pub converged: usize,
    /// Count with `identity_status == keyed`.
    pub keyed: usize,
    /// Count with `identity_status == discovered`.
    pub discovered: usize,
    /// Count with `identity_status == conflict`.
    pub conflict: usize,
    /// Count with `cmp_status == found_with_uuid`.
    pub cmp_found_with_uuid: usize,
    /// Count with `cmp_status == found_no_uuid`.
    pub cmp_found_no_uuid: usize,
    /// Count with `cmp_status == missing`.
    pub cmp_missing: usize,
}

impl IdentityStats {
    /// Fold a single resolved identity's classification into a running
    /// stats block.
    pub fn record(&mut self, identity: &ProjectIdentity) {
        self.total += 1;
        match identity.identity_status {
            IdentityStatus::Converged => self.converged += 1,
            IdentityStatus::Keyed => self.keyed += 1,
            IdentityStatus::Discovered => self.discovered += 1,
            IdentityStatus::Conflict => self.conflict += 1,
        }
        match identity.cmp_status {
            CmpStatus::FoundWithUuid => self.cmp_found_with_uuid += 1,
            CmpStatus::FoundNoUuid => self.cmp_found_no_uuid += 1,
            CmpStatus::Missing => self.cmp_missing += 1,
        }
    }
}

/// The full output of one identity-engine run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IdentityScanResult {
    /// Every successfully resolved project, ordered by `project_key`
    /// ascending, so two runs over the same inputs are byte-for-byte
    /// identical.
    pub resolved: Vec<ProjectIdentity>,
    /// Inventory items that could not be normalized into a project key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<UnresolvedInventoryItem>,
    /// Summary counts, derivable from `resolved` but carried explicitly so
    /// downstream consumers need not recompute them.
    pub stats: IdentityStats,
}
