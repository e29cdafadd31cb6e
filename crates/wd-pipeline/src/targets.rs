// SPDX-License-Identifier: MIT OR Apache-2.0
//! Target expansion.

use std::path::PathBuf;

use wd_error::{ErrorCode, WdError};

/// Either a single explicit path or every path known to the local project
/// registry.
#[derive(Debug, Clone)]
pub enum TargetSelector {
    /// Scan exactly one path.
    Single(PathBuf),
    /// Scan every path in the given list (typically every registered
    /// project's local path).
    AllRegistered(Vec<PathBuf>),
}

/// Expand a [`TargetSelector`] into the concrete list of paths to scan.
///
/// A multi-target run (`AllRegistered`) requires at least one explicit
/// scanner name, to guard against accidentally running every scanner over
/// the whole estate.
///
/// # Errors
///
/// Returns [`ErrorCode::ConfigMultiTargetRequiresScanners`] when
/// `AllRegistered` is selected with an empty `scanner_names`.
pub fn expand_targets(
    selector: &TargetSelector,
    scanner_names: &[String],
) -> Result<Vec<PathBuf>, WdError> {
    match selector {
        TargetSelector::Single(path) => Ok(vec![path.clone()]),
        TargetSelector::AllRegistered(paths) => {
            if scanner_names.is_empty() {
                return Err(WdError::new(
                    ErrorCode::ConfigMultiTargetRequiresScanners,
                    "scanning every registered project requires an explicit --scanners selection",
                )
                .with_context("target_count", paths.len()));
            }
            Ok(paths.clone())
        }
    }
}
