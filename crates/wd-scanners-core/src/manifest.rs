// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scanner manifest discovery and drift detection.
//!
//! Each scanner category directory may carry a `SCANNER_MANIFEST.yaml`
//! declaring the scanners that are supposed to live there. Drift detection
//! compares that declaration against the files actually present, producing
//! two lists: undocumented (present, not declared) and phantom (declared,
//! not present).

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wd_error::{ErrorCode, WdError};

const MANIFEST_FILE_NAME: &str = "SCANNER_MANIFEST.yaml";

/// One scanner declared in a category's manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Scanner name, unique within its category.
    pub name: String,
    /// Source file name the scanner is implemented in, relative to the
    /// category directory.
    pub file: String,
    /// Entry-point function name within `file`.
    pub function: String,
    /// Human-readable summary of what the scanner finds.
    #[serde(default)]
    pub description: String,
}

/// The declared contents of one scanner category directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerManifest {
    /// Category name (e.g. `"git"`, `"database"`, `"static"`).
    pub category: String,
    /// Declared scanners.
    #[serde(default)]
    pub scanners: Vec<ManifestEntry>,
}

/// Drift found for a single category: files present without a manifest
/// entry, and manifest entries without a matching file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDrift {
    /// Category name this drift report covers.
    pub category: String,
    /// Source files present on disk that no manifest entry declares.
    pub undocumented: Vec<String>,
    /// Manifest-declared source files that do not exist on disk.
    pub phantom: Vec<String>,
}

impl CategoryDrift {
    /// `true` when neither list has any entries.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.undocumented.is_empty() && self.phantom.is_empty()
    }
}

/// Parse a single category's `SCANNER_MANIFEST.yaml`.
///
/// # Errors
///
/// Returns [`ErrorCode::ConfigManifestInvalid`] if the file exists but is
/// not valid YAML or is missing required fields.
pub fn parse_manifest(path: &Path) -> Result<ScannerManifest, WdError> {
    let content = fs::read_to_string(path).map_err(|e| {
        WdError::new(ErrorCode::ConfigManifestInvalid, format!("cannot read manifest: {e}"))
            .with_context("path", path.display().to_string())
    })?;
    serde_yaml::from_str(&content).map_err(|e| {
        WdError::new(ErrorCode::ConfigManifestInvalid, format!("invalid manifest yaml: {e}"))
            .with_context("path", path.display().to_string())
    })
}

/// Walk every immediate subdirectory of `scanners_root` (each one a
/// category) and report manifest-vs-filesystem drift.
///
/// A category directory with no `SCANNER_MANIFEST.yaml` is treated as
/// declaring zero scanners, not as an error: an undocumented category is
/// drift in itself, surfaced as every `.rs` file in it being undocumented.
///
/// # Errors
///
/// Returns an error if `scanners_root` cannot be read, or if a present
/// manifest fails to parse.
pub fn detect_drift(scanners_root: &Path) -> Result<Vec<CategoryDrift>, WdError> {
    let mut drifts = Vec::new();
    let entries = fs::read_dir(scanners_root).map_err(|e| {
        WdError::new(ErrorCode::IoTargetUnavailable, format!("cannot read scanners root: {e}"))
            .with_context("path", scanners_root.display().to_string())
    })?;

    let mut category_dirs: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    category_dirs.sort();

    for dir in category_dirs {
        let category = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let manifest_path = dir.join(MANIFEST_FILE_NAME);
        let declared: BTreeSet<String> = if manifest_path.is_file() {
            parse_manifest(&manifest_path)?
                .scanners
                .into_iter()
                .map(|entry| entry.file)
                .collect()
        } else {
            BTreeSet::new()
        };

        let present: BTreeSet<String> = fs::read_dir(&dir)
            .map_err(|e| {
                WdError::new(ErrorCode::IoTargetUnavailable, format!("cannot read category dir: {e}"))
                    .with_context("path", dir.display().to_string())
            })?
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "rs"))
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();

        let undocumented: Vec<String> = present.difference(&declared).cloned().collect();
        let phantom: Vec<String> = declared.difference(&present).cloned().collect();

        drifts.push(CategoryDrift {
            category,
            undocumented,
            phantom,
        });
    }

    Ok(drifts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_reads_declared_scanners() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE_NAME);
        std::fs::write(
            &path,
            r#"
category: git
scanners:
  - name: remotes
    file: remotes.rs
    function: scan_remotes
    description: lists git remotes
"#,
        )
        .unwrap();
        let manifest = parse_manifest(&path).unwrap();
        assert_eq!(manifest.category, "git");
        assert_eq!(manifest.scanners.len(), 1);
        assert_eq!(manifest.scanners[0].name, "remotes");
    }

    #[test]
    fn parse_manifest_errors_on_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE_NAME);
        std::fs::write(&path, "not: [valid yaml").unwrap();
        let err = parse_manifest(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigManifestInvalid);
    }

    #[test]
    fn detect_drift_finds_undocumented_file() {
        let root = tempfile::tempdir().unwrap();
        let git_dir = root.path().join("git");
        std::fs::create_dir(&git_dir).unwrap();
        std::fs::write(
            git_dir.join(MANIFEST_FILE_NAME),
            "category: git\nscanners:\n  - name: remotes\n    file: remotes.rs\n    function: scan_remotes\n",
        )
        .unwrap();
        std::fs::write(git_dir.join("remotes.rs"), "").unwrap();
        std::fs::write(git_dir.join("status.rs"), "").unwrap();

        let drifts = detect_drift(root.path()).unwrap();
        assert_eq!(drifts.len(), 1);
        assert_eq!(drifts[0].category, "git");
        assert_eq!(drifts[0].undocumented, vec!["status.rs"]);
        assert!(drifts[0].phantom.is_empty());
    }

    #[test]
    fn detect_drift_finds_phantom_entry() {
        let root = tempfile::tempdir().unwrap();
        let git_dir = root.path().join("git");
        std::fs::create_dir(&git_dir).unwrap();
        std::fs::write(
            git_dir.join(MANIFEST_FILE_NAME),
            "category: git\nscanners:\n  - name: remotes\n    file: remotes.rs\n    function: scan_remotes\n  - name: branches\n    file: branches.rs\n    function: scan_branches\n",
        )
        .unwrap();
        std::fs::write(git_dir.join("remotes.rs"), "").unwrap();

        let drifts = detect_drift(root.path()).unwrap();
        assert_eq!(drifts[0].phantom, vec!["branches.rs"]);
        assert!(drifts[0].undocumented.is_empty());
    }

    #[test]
    fn category_without_manifest_reports_all_files_undocumented() {
        let root = tempfile::tempdir().unwrap();
        let static_dir = root.path().join("static");
        std::fs::create_dir(&static_dir).unwrap();
        std::fs::write(static_dir.join("events.rs"), "").unwrap();

        let drifts = detect_drift(root.path()).unwrap();
        assert_eq!(drifts[0].undocumented, vec!["events.rs"]);
        assert!(drifts[0].phantom.is_empty());
    }

    #[test]
    fn clean_category_reports_is_clean() {
        let root = tempfile::tempdir().unwrap();
        let git_dir = root.path().join("git");
        std::fs::create_dir(&git_dir).unwrap();
        std::fs::write(
            git_dir.join(MANIFEST_FILE_NAME),
            "category: git\nscanners:\n  - name: remotes\n    file: remotes.rs\n    function: scan_remotes\n",
        )
        .unwrap();
        std::fs::write(git_dir.join("remotes.rs"), "").unwrap();

        let drifts = detect_drift(root.path()).unwrap();
        assert!(drifts[0].is_clean());
    }

    #[test]
    fn empty_scanners_root_yields_no_drift_entries() {
        let root = tempfile::tempdir().unwrap();
        let drifts = detect_drift(root.path()).unwrap();
        assert!(drifts.is_empty());
    }
}
