// SPDX-License-Identifier: MIT OR Apache-2.0
//! GitHub-organization inventory item.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One entry from the GitHub-organization repository inventory, as produced
/// by the discovery scanners. This is lookup/enrichment data, never the
/// primary authority for identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RepoInventoryItem {
    /// Repository owner login.
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// Normalized `https://github.com/<owner>/<name>` URL.
    pub url: String,
    /// `true` when GitHub reports the repository as archived.
    pub archived: bool,
    /// `true` when GitHub reports the repository as a fork.
    #[serde(default)]
    pub fork: bool,
    /// Primary language, if GitHub reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_language: Option<String>,
    /// Default branch name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
}

impl RepoInventoryItem {
    /// The `host:owner/repo` key this item would resolve to under identity
    /// normalization.
    #[must_use]
    pub fn project_key(&self) -> String {
        format!("github.com:{}/{}", self.owner.to_ascii_lowercase(), self.name.to_ascii_lowercase())
    }
}
