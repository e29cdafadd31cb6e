// SPDX-License-Identifier: MIT OR Apache-2.0
//! Out-of-band patch appliers.
//!
//! Resolution (`resolve.rs`) never writes anything; a separate tool calls
//! [`apply_patch`] against a live [`CmpTarget`] only when an operator has
//! decided to, via an explicit trait with an absent-case rather than an
//! inheritance hierarchy.

use uuid::Uuid;
use wd_core::{IdentityPatch, IdentityPatchAction};
use wd_error::{ErrorCode, WdError};

/// What a [`CmpTarget`] currently knows about a project key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpRowState {
    /// No row exists for this project key.
    Absent,
    /// A row exists but has no UUID recorded.
    PresentWithoutUuid,
    /// A row exists with the given UUID.
    PresentWithUuid(Uuid),
}

/// The live CMP write surface an applier mutates. A real implementation
/// backs this with `wd-dataaccess`; tests use an in-memory double.
pub trait CmpTarget {
    /// Current on-file state for `project_key`.
    fn row_state(&self, project_key: &str) -> CmpRowState;
    /// Create a brand-new row. Only called when [`CmpRowState::Absent`].
    fn create(&mut self, project_key: &str, project_uuid: Uuid) -> Result<(), WdError>;
    /// Write a UUID onto an existing row. Only called when
    /// [`CmpRowState::PresentWithoutUuid`].
    fn backfill_uuid(&mut self, project_key: &str, project_uuid: Uuid) -> Result<(), WdError>;
}

/// What actually happened when a patch was handed to [`apply_patch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The target was mutated.
    Applied,
    /// No mutation was needed; the target already matched the patch's intent.
    NoOp,
    /// The patch was a [`IdentityPatchAction::ConflictFreeze`] and was
    /// logged, not applied.
    Skipped,
}

/// Apply one [`IdentityPatch`] against `target`, idempotently: a
/// `CmpCreate` whose target already exists becomes a `NoOp` at apply time;
/// a `CmpBackfillUuid` whose target already has the correct UUID becomes a
/// `NoOp`. A `ConflictFreeze` is never auto-applied.
///
/// # Errors
///
/// Returns a [`WdError`] when the target's on-file state contradicts the
/// patch in a way that cannot be safely resolved automatically (e.g. a
/// backfill target already carries a *different* UUID).
pub fn apply_patch(patch: &IdentityPatch, target: &mut dyn CmpTarget) -> Result<ApplyOutcome, WdError> {
    match &patch.action {
        IdentityPatchAction::CmpCreate { project_uuid } => match target.row_state(&patch.project_key) {
            CmpRowState::Absent => {
                target.create(&patch.project_key, *project_uuid)?;
                Ok(ApplyOutcome::Applied)
            }
            _ => Ok(ApplyOutcome::NoOp),
        },
        IdentityPatchAction::CmpBackfillUuid { project_uuid } => match target.row_state(&patch.project_key) {
            CmpRowState::PresentWithoutUuid => {
                target.backfill_uuid(&patch.project_key, *project_uuid)?;
                Ok(ApplyOutcome::Applied)
            }
            CmpRowState::PresentWithUuid(existing) if existing == *project_uuid => Ok(ApplyOutcome::NoOp),
            CmpRowState::PresentWithUuid(existing) => Err(WdError::new(
                ErrorCode::PolicyIdentityConflict,
                format!("CMP row for {} already carries a different UUID", patch.project_key),
            )
            .with_context("expected", project_uuid.to_string())
            .with_context("found", existing.to_string())),
            CmpRowState::Absent => Err(WdError::new(
                ErrorCode::DataRegistryMalformed,
                format!("cannot backfill a UUID onto a CMP row that does not exist: {}", patch.project_key),
            )),
        },
        IdentityPatchAction::NoOp => Ok(ApplyOutcome::NoOp),
        IdentityPatchAction::ConflictFreeze { claims } => {
            tracing::warn!(project_key = %patch.project_key, claim_count = claims.len(), "identity conflict frozen, not applying");
            Ok(ApplyOutcome::Skipped)
        }
    }
}
