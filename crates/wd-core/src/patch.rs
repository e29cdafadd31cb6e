// SPDX-License-Identifier: MIT OR Apache-2.0
//! Identity patches — the only sanctioned mechanism for mutating CMP
//! identity state.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::AuthorityClaim;

/// The action an [`IdentityPatch`] represents. Every variant other than
/// [`IdentityPatchAction::NoOp`] and [`IdentityPatchAction::ConflictFreeze`]
/// is a write CMP has not yet seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum IdentityPatchAction {
    /// Create a brand-new CMP project row for a project discovered outside CMP.
    CmpCreate {
        /// The UUID to create the row with.
        project_uuid: Uuid,
    },
    /// Backfill a UUID onto an existing CMP row that lacks one.
    CmpBackfillUuid {
        /// The UUID to write.
        project_uuid: Uuid,
    },
    /// The project is already fully converged; nothing to do.
    NoOp,
    /// Two or more authorities disagree; frozen pending manual adjudication
    /// (Policy C). Carries every competing claim for the operator to
    /// inspect, but prescribes no resolution.
    ConflictFreeze {
        /// Every authority's claim for this project key.
        claims: Vec<AuthorityClaim>,
    },
}

impl IdentityPatchAction {
    /// `true` when applying this action would write to CMP.
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(self, Self::CmpCreate { .. } | Self::CmpBackfillUuid { .. })
    }
}

/// A single proposed or applied mutation against CMP identity state.
///
/// **Invariant:** applying the same patch twice has the same effect as
/// applying it once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IdentityPatch {
    /// The normalized project key this patch concerns.
    pub project_key: String,
    /// The action to take.
    pub action: IdentityPatchAction,
    /// Human-readable justification, surfaced in `--dry-run` output and
    /// audit logs.
    pub reason: String,
}

impl IdentityPatch {
    /// Build a no-op patch, recording why no action is needed.
    #[must_use]
    pub fn no_op(project_key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            project_key: project_key.into(),
            action: IdentityPatchAction::NoOp,
            reason: reason.into(),
        }
    }

    /// `true` when this patch requires an operator decision before it may be
    /// applied.
    #[must_use]
    pub fn requires_adjudication(&self) -> bool {
        matches!(self.action, IdentityPatchAction::ConflictFreeze { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_op_helper_builds_no_op_action() {
        let patch = IdentityPatch::no_op("github.com:acme/widget", "already converged");
        assert_eq!(patch.action, IdentityPatchAction::NoOp);
        assert!(!patch.requires_adjudication());
        assert!(!patch.action.is_write());
    }

    #[test]
    fn conflict_freeze_requires_adjudication_and_is_not_a_write() {
        let patch = IdentityPatch {
            project_key: "github.com:acme/widget".into(),
            action: IdentityPatchAction::ConflictFreeze {
                claims: vec![
                    AuthorityClaim { authority: "database".into(), uuid: Uuid::nil() },
                    AuthorityClaim { authority: "legacy_registry".into(), uuid: Uuid::max() },
                ],
            },
            reason: "database and legacy_registry disagree".into(),
        };
        assert!(patch.requires_adjudication());
        assert!(!patch.action.is_write());
    }

    #[test]
    fn cmp_create_and_backfill_are_writes() {
        let create = IdentityPatchAction::CmpCreate { project_uuid: Uuid::nil() };
        let backfill = IdentityPatchAction::CmpBackfillUuid { project_uuid: Uuid::nil() };
        assert!(create.is_write());
        assert!(backfill.is_write());
    }

    #[test]
    fn patch_serde_roundtrip_preserves_tagged_action() {
        let patch = IdentityPatch {
            project_key: "github.com:acme/widget".into(),
            action: IdentityPatchAction::CmpBackfillUuid { project_uuid: Uuid::nil() },
            reason: "found in CMP without a uuid".into(),
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert!(json.contains("\"action\":\"cmp_backfill_uuid\""));
        let back: IdentityPatch = serde_json::from_str(&json).unwrap();
        assert_eq!(patch, back);
    }
}
