// SPDX-License-Identifier: MIT OR Apache-2.0
//! Git repository health scanner.

use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use wd_core::ScannerOutput;
use wd_error::{ErrorCode, WdError};
use wd_scanners_core::{Scanner, ScannerOptions};

use super::util::{find_git_repos, run_git};

/// Health classification for a single repository, ordered by urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Health {
    DirtyUnpushed,
    Dirty,
    Unpushed,
    Behind,
    Error,
    Clean,
    Unknown,
}

impl Health {
    fn priority(self) -> u8 {
        match self {
            Self::DirtyUnpushed => 0,
            Self::Dirty => 1,
            Self::Unpushed => 2,
            Self::Behind => 3,
            Self::Error => 4,
            Self::Clean => 5,
            Self::Unknown => 6,
        }
    }
}

struct RepoStatus {
    repo: String,
    path: String,
    branch: String,
    changes: i64,
    ahead: i64,
    behind: i64,
    health: Health,
}

async fn repo_status(repo_path: &Path) -> RepoStatus {
    let name = repo_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let path_str = repo_path.display().to_string();

    let branch = run_git(repo_path, &["branch", "--show-current"])
        .await
        .unwrap_or_default();

    let status_output = run_git(repo_path, &["status", "--porcelain"]).await;
    let changes = match &status_output {
        Some(s) if s.is_empty() => 0,
        Some(s) => s.lines().count() as i64,
        None => {
            return RepoStatus {
                repo: name,
                path: path_str,
                branch,
                changes: -1,
                ahead: -1,
                behind: -1,
                health: Health::Error,
            }
        }
    };

    let ahead = run_git(repo_path, &["rev-list", "--count", "@{u}..HEAD"])
        .await
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let behind = run_git(repo_path, &["rev-list", "--count", "HEAD..@{u}"])
        .await
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    let health = if changes == 0 && ahead == 0 && behind == 0 {
        Health::Clean
    } else if changes > 0 && ahead > 0 {
        Health::DirtyUnpushed
    } else if changes > 0 {
        Health::Dirty
    } else if ahead > 0 {
        Health::Unpushed
    } else if behind > 0 {
        Health::Behind
    } else {
        Health::Unknown
    };

    RepoStatus {
        repo: name,
        path: path_str,
        branch,
        changes,
        ahead,
        behind,
        health,
    }
}

/// Scans a directory tree for git repositories and reports their working-
/// tree status relative to their upstream.
pub struct GitStatusScanner;

#[async_trait]
impl Scanner for GitStatusScanner {
    async fn scan(&self, target: &Path, _options: &ScannerOptions) -> Result<ScannerOutput, WdError> {
        if !target.is_dir() {
            return Err(WdError::new(
                ErrorCode::IoTargetUnavailable,
                format!("target is not a directory: {}", target.display()),
            )
            .with_context("target", target.display().to_string()));
        }

        let repos = find_git_repos(target);
        let mut statuses = Vec::with_capacity(repos.len());
        for repo in &repos {
            statuses.push(repo_status(repo).await);
        }
        statuses.sort_by_key(|s| (s.health.priority(), -s.changes));

        let mut by_health: std::collections::BTreeMap<&'static str, u64> = Default::default();
        let (mut total_changes, mut total_ahead, mut total_behind, mut needs_attention) = (0i64, 0i64, 0i64, 0u64);

        let items: Vec<serde_json::Value> = statuses
            .into_iter()
            .map(|s| {
                let health_str = match s.health {
                    Health::DirtyUnpushed => "dirty+unpushed",
                    Health::Dirty => "dirty",
                    Health::Unpushed => "unpushed",
                    Health::Behind => "behind",
                    Health::Error => "error",
                    Health::Clean => "clean",
                    Health::Unknown => "unknown",
                };
                *by_health.entry(health_str).or_insert(0) += 1;
                total_changes += s.changes.max(0);
                total_ahead += s.ahead.max(0);
                total_behind += s.behind.max(0);
                if !matches!(s.health, Health::Clean | Health::Unknown) {
                    needs_attention += 1;
                }
                json!({
                    "repo": s.repo,
                    "path": s.path,
                    "branch": s.branch,
                    "changes": s.changes,
                    "ahead": s.ahead,
                    "behind": s.behind,
                    "health": health_str,
                })
            })
            .collect();

        Ok(ScannerOutput::new("git.status", items)
            .with_metadata("by_health", json!(by_health))
            .with_metadata("total_uncommitted_changes", json!(total_changes))
            .with_metadata("total_unpushed_commits", json!(total_ahead))
            .with_metadata("total_behind_commits", json!(total_behind))
            .with_metadata("needs_attention", json!(needs_attention)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn init_repo(path: &Path) {
        tokio::process::Command::new("git").arg("init").arg("-q").current_dir(path).status().await.ok();
        tokio::process::Command::new("git")
            .args(["-c", "user.name=wd", "-c", "user.email=wd@local", "commit", "--allow-empty", "-qm", "baseline"])
            .current_dir(path)
            .status()
            .await
            .ok();
    }

    #[tokio::test]
    async fn scan_reports_error_for_nonexistent_target() {
        let scanner = GitStatusScanner;
        let err = scanner
            .scan(Path::new("/nonexistent/target"), &ScannerOptions::empty())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::IoTargetUnavailable);
    }

    #[tokio::test]
    async fn scan_of_empty_directory_yields_no_items() {
        let dir = tempfile::tempdir().unwrap();
        let scanner = GitStatusScanner;
        let output = scanner.scan(dir.path(), &ScannerOptions::empty()).await.unwrap();
        assert_eq!(output.count, 0);
    }

    #[tokio::test]
    async fn scan_finds_clean_repo_with_no_upstream() {
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path().join("alpha");
        std::fs::create_dir(&repo).unwrap();
        init_repo(&repo).await;

        let scanner = GitStatusScanner;
        let output = scanner.scan(dir.path(), &ScannerOptions::empty()).await.unwrap();
        assert_eq!(output.count, 1);
        assert_eq!(output.items[0]["repo"], "alpha");
    }
}
