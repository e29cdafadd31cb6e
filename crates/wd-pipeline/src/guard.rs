// SPDX-License-Identifier: MIT OR Apache-2.0
//! The degradation guard: refuses to overwrite a richer prior registry
//! artifact with a drastically poorer new one.

use wd_config::DegradationGuardConfig;
use wd_error::{ErrorCode, WdError};

/// A counted comparison between a prior artifact and the one about to
/// replace it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RichnessComparison {
    /// Number of projects with a linked UUID in the prior artifact.
    pub old_linked_count: usize,
    /// Number of projects with a linked UUID in the new artifact.
    pub new_linked_count: usize,
    /// Number of projects known to the GitHub inventory in the prior artifact.
    pub old_github_count: usize,
    /// Number of projects known to the GitHub inventory in the new artifact.
    pub new_github_count: usize,
}

/// What the guard decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The save may proceed without reservation.
    Allowed,
    /// The save may proceed, but the new artifact is meaningfully poorer
    /// than the old one by GitHub-linked count.
    AllowedWithWarning,
}

/// Evaluate the degradation guard for a prospective save.
///
/// Two thresholds:
/// a hard block when linked-project count drops from some positive number to
/// zero (unless `force` is set), and an advisory warning when the new
/// GitHub-linked count falls under `1 / warn_shrink_factor` of the old one
/// and the old count was large enough to be meaningful.
///
/// # Errors
///
/// Returns [`ErrorCode::PolicyDegradationGuardTriggered`] when the hard block
/// fires and `force` is `false`.
pub fn check_degradation(
    config: &DegradationGuardConfig,
    comparison: RichnessComparison,
    force: bool,
) -> Result<GuardOutcome, WdError> {
    let RichnessComparison {
        old_linked_count,
        new_linked_count,
        old_github_count,
        new_github_count,
    } = comparison;

    if config.block_on_zero_linked && old_linked_count > 0 && new_linked_count == 0 && !force {
        return Err(WdError::new(
            ErrorCode::PolicyDegradationGuardTriggered,
            "refusing to save a registry with zero linked projects over one that had linked projects",
        )
        .with_context("old_linked_count", old_linked_count)
        .with_context("new_linked_count", new_linked_count));
    }

    const MEANINGFUL_OLD_GITHUB_COUNT: usize = 5;
    let shrank_past_threshold = old_github_count > MEANINGFUL_OLD_GITHUB_COUNT
        && (new_github_count as f64) < (old_github_count as f64) / config.warn_shrink_factor;

    if shrank_past_threshold {
        Ok(GuardOutcome::AllowedWithWarning)
    } else {
        Ok(GuardOutcome::Allowed)
    }
}
