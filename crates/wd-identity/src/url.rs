// SPDX-License-Identifier: MIT OR Apache-2.0
//! URL normalization and `project_key` derivation.
//!
//! Shares its approach with `wd-scanners`' `git::util::normalize_github_remote`,
//! but generalized: the identity engine must accept any Git host, not just
//! `github.com` (the scanner-side helper stays GitHub-only because that
//! scanner only ever sees GitHub remotes).

/// A Git remote URL, normalized to its canonical HTTPS form plus its
/// decomposed `host`/`owner`/`repo` parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    /// Canonical `https://host/owner/repo` form (lowercase, no `.git`, no
    /// trailing slash).
    pub url: String,
    /// Lowercased host.
    pub host: String,
    /// Lowercased owner/organization segment.
    pub owner: String,
    /// Lowercased repository segment.
    pub repo: String,
}

impl NormalizedUrl {
    /// The `host:owner/repo` key this URL resolves to.
    #[must_use]
    pub fn project_key(&self) -> String {
        format!("{}:{}/{}", self.host, self.owner, self.repo)
    }
}

/// Normalize a raw Git remote URL.
///
/// Accepts SSH form (`git@host:owner/repo.git`) and HTTP(S) form
/// (`https://host/owner/repo[.git][/]`). Returns `None` when `raw` does not
/// decompose into a `host` plus exactly an `owner` and a `repo` segment —
/// the caller records this as an [`crate::UnresolvedInventoryItem`] rather
/// than minting an identity.
#[must_use]
pub fn normalize(raw: &str) -> Option<NormalizedUrl> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (host, path) = if let Some(rest) = trimmed.strip_prefix("git@") {
        rest.split_once(':').map(|(h, p)| (h, p))?
    } else if let Some(rest) = trimmed.strip_prefix("https://") {
        rest.split_once('/').map(|(h, p)| (h, p))?
    } else if let Some(rest) = trimmed.strip_prefix("http://") {
        rest.split_once('/').map(|(h, p)| (h, p))?
    } else if let Some(rest) = trimmed.strip_prefix("ssh://git@") {
        rest.split_once('/').map(|(h, p)| (h, p))?
    } else {
        return None;
    };

    let host = host.to_ascii_lowercase();
    if host.is_empty() {
        return None;
    }

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let owner = segments.next()?.to_ascii_lowercase();
    let repo = segments.next()?.to_ascii_lowercase();
    if segments.next().is_some() || owner.is_empty() || repo.is_empty() {
        return None;
    }

    Some(NormalizedUrl {
        url: format!("https://{host}/{owner}/{repo}"),
        host,
        owner,
        repo,
    })
}
