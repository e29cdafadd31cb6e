// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared git subprocess helpers, used by every scanner in this category.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

/// Per-command ceiling for git subprocess invocations.
pub const GIT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Run `git <args>` in `repo_path`, returning trimmed stdout on success.
///
/// Output is decoded as UTF-8 with replacement, never relying on the
/// system locale. Returns `None` on a non-zero exit, a timeout, or a spawn
/// failure — callers treat an unavailable git command the same as an
/// unreadable repo.
pub async fn run_git(repo_path: &Path, args: &[&str]) -> Option<String> {
    let spawn = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output();

    let output = match timeout(GIT_COMMAND_TIMEOUT, spawn).await {
        Ok(Ok(output)) => output,
        _ => return None,
    };

    if !output.status.success() {
        return None;
    }

    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Normalize a remote URL the way the rest of the workspace expects:
/// SSH form converted to HTTPS, `.git` suffix stripped, lowercased, and
/// restricted to `github.com` hosts (this scanner is GitHub-only).
#[must_use]
pub fn normalize_github_remote(url: &str) -> Option<String> {
    let mut url = url.trim().to_string();

    if let Some(rest) = url.strip_prefix("git@github.com:") {
        url = format!("https://github.com/{rest}");
    }

    if let Some(stripped) = url.strip_suffix(".git") {
        url = stripped.to_string();
    }

    let lowered = url.to_lowercase();
    if lowered.contains("github.com") {
        Some(lowered)
    } else {
        None
    }
}

/// Fetch the normalized `origin` remote URL for a repo, if any.
pub async fn get_remote_url(repo_path: &Path) -> Option<String> {
    let raw = run_git(repo_path, &["remote", "get-url", "origin"]).await?;
    normalize_github_remote(&raw)
}

/// Find every git repository under `root`, skipping `.git` directories
/// nested inside another repo's working tree.
#[must_use]
pub fn find_git_repos(root: &Path) -> Vec<PathBuf> {
    let mut repos = Vec::new();

    for entry in walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
    {
        if entry.file_name() != ".git" || !entry.file_type().is_dir() {
            continue;
        }

        let Some(repo_path) = entry.path().parent() else {
            continue;
        };

        let Ok(relative) = repo_path.strip_prefix(root) else {
            continue;
        };
        if relative.components().any(|c| c.as_os_str() == ".git") {
            continue;
        }

        repos.push(repo_path.to_path_buf());
    }

    repos.sort();
    repos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_converts_ssh_form_to_https() {
        let normalized = normalize_github_remote("git@github.com:Example/Alpha.git").unwrap();
        assert_eq!(normalized, "https://github.com/example/alpha");
    }

    #[test]
    fn normalize_strips_git_suffix_and_lowercases() {
        let normalized = normalize_github_remote("https://GitHub.com/Example/Alpha.git").unwrap();
        assert_eq!(normalized, "https://github.com/example/alpha");
    }

    #[test]
    fn normalize_rejects_non_github_hosts() {
        assert!(normalize_github_remote("https://gitlab.com/example/alpha").is_none());
    }

    #[test]
    fn find_git_repos_skips_nested_git_directories() {
        let root = tempfile::tempdir().unwrap();
        let repo = root.path().join("alpha");
        std::fs::create_dir_all(repo.join(".git")).unwrap();
        let nested = repo.join("vendor").join("nested").join(".git");
        std::fs::create_dir_all(&nested).unwrap();

        let repos = find_git_repos(root.path());
        assert_eq!(repos, vec![repo]);
    }

    #[tokio::test]
    async fn run_git_returns_none_for_nonexistent_repo() {
        let output = run_git(Path::new("/nonexistent/repo"), &["status"]).await;
        assert!(output.is_none());
    }
}
