// SPDX-License-Identifier: MIT OR Apache-2.0
//! Project discovery scanner: finds candidate project roots on disk by
//! marker file, independent of any registry (see `DESIGN.md`).

use std::path::Path;

use async_trait::async_trait;
use serde_json::json;
use wd_core::ScannerOutput;
use wd_error::{ErrorCode, WdError};
use wd_scanners_core::{Scanner, ScannerOptions};

/// Project markers checked in priority order, used by drift detection to
/// flag rogue projects found on disk but not yet registered.
const PROJECT_MARKERS: &[&str] = &[".git", "package.json", "pyproject.toml", "Cargo.toml", "go.mod"];

fn marker_at(dir: &Path) -> Option<&'static str> {
    PROJECT_MARKERS.iter().copied().find(|marker| dir.join(marker).exists())
}

/// Walks `target` one level at a time, stopping descent as soon as a
/// directory carries a project marker (a project's internal layout is
/// not itself scanned for nested projects).
fn discover(target: &Path) -> Vec<(std::path::PathBuf, &'static str)> {
    let mut found = Vec::new();
    let mut stack = vec![target.to_path_buf()];

    while let Some(dir) = stack.pop() {
        if let Some(marker) = marker_at(&dir) {
            found.push((dir, marker));
            continue;
        }
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            }
        }
    }

    found.sort();
    found
}

/// Scans a directory tree for project roots, identified by well-known
/// marker files, without consulting any registry.
pub struct ProjectDiscoveryScanner;

#[async_trait]
impl Scanner for ProjectDiscoveryScanner {
    async fn scan(&self, target: &Path, _options: &ScannerOptions) -> Result<ScannerOutput, WdError> {
        if !target.is_dir() {
            return Err(WdError::new(
                ErrorCode::IoTargetUnavailable,
                format!("target is not a directory: {}", target.display()),
            )
            .with_context("target", target.display().to_string()));
        }

        let items: Vec<serde_json::Value> = discover(target)
            .into_iter()
            .map(|(path, marker)| {
                let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                json!({
                    "name": name,
                    "path": path.display().to_string(),
                    "marker": marker,
                })
            })
            .collect();

        Ok(ScannerOutput::new("discovery.project", items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scan_errors_on_nonexistent_target() {
        let scanner = ProjectDiscoveryScanner;
        let err = scanner.scan(Path::new("/nonexistent"), &ScannerOptions::empty()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::IoTargetUnavailable);
    }

    #[tokio::test]
    async fn scan_finds_projects_by_marker_and_stops_descent() {
        let dir = tempfile::tempdir().unwrap();
        let rust_project = dir.path().join("alpha");
        std::fs::create_dir_all(rust_project.join("src")).unwrap();
        std::fs::write(rust_project.join("Cargo.toml"), "[package]\n").unwrap();
        // A nested directory inside a discovered project must not itself be reported.
        std::fs::write(rust_project.join("src").join("Cargo.toml"), "").unwrap();

        let node_project = dir.path().join("beta");
        std::fs::create_dir_all(&node_project).unwrap();
        std::fs::write(node_project.join("package.json"), "{}").unwrap();

        let scanner = ProjectDiscoveryScanner;
        let output = scanner.scan(dir.path(), &ScannerOptions::empty()).await.unwrap();
        assert_eq!(output.count, 2);
        let names: Vec<&str> = output.items.iter().map(|i| i["name"].as_str().unwrap()).collect();
        assert!(names.contains(&"alpha"));
        assert!(names.contains(&"beta"));
    }

    #[tokio::test]
    async fn scan_of_directory_with_no_markers_yields_no_items() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("not_a_project")).unwrap();
        let scanner = ProjectDiscoveryScanner;
        let output = scanner.scan(dir.path(), &ScannerOptions::empty()).await.unwrap();
        assert_eq!(output.count, 0);
    }
}
