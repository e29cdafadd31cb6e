// SPDX-License-Identifier: MIT OR Apache-2.0
//! Patch generation.

use wd_core::{CmpStatus, IdentityPatch, IdentityPatchAction, IdentityStatus, ProjectIdentity};

/// Derive the single [`IdentityPatch`] a resolved project implies.
///
/// Conflict takes precedence over every CMP-status rule: Policy C never
/// lets a frozen identity also trigger a create/backfill write (see
/// `DESIGN.md` — checking conflict first is the only reading consistent
/// with "the engine never picks a winner").
#[must_use]
pub fn derive_patch(identity: &ProjectIdentity) -> IdentityPatch {
    if identity.identity_status == IdentityStatus::Conflict {
        return IdentityPatch {
            project_key: identity.project_key.clone(),
            action: IdentityPatchAction::ConflictFreeze { claims: identity.conflicting_claims.clone() },
            reason: "two or more authorities disagree on this project's UUID".to_string(),
        };
    }

    match identity.cmp_status {
        CmpStatus::Missing => IdentityPatch {
            project_key: identity.project_key.clone(),
            action: IdentityPatchAction::CmpCreate { project_uuid: identity.project_uuid },
            reason: "project is unknown to CMP".to_string(),
        },
        CmpStatus::FoundNoUuid => IdentityPatch {
            project_key: identity.project_key.clone(),
            action: IdentityPatchAction::CmpBackfillUuid { project_uuid: identity.project_uuid },
            reason: "CMP has the project but no UUID on file".to_string(),
        },
        CmpStatus::FoundWithUuid => IdentityPatch::no_op(&identity.project_key, "already converged"),
    }
}

/// Derive patches for every resolved project, in the same `project_key`
/// order they arrive in, so that a repeat run over identical inputs always
/// produces a patch list identical in content and order.
#[must_use]
pub fn derive_patches(resolved: &[ProjectIdentity]) -> Vec<IdentityPatch> {
    resolved.iter().map(derive_patch).collect()
}
