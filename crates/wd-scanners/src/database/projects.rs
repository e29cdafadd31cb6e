// SPDX-License-Identifier: MIT OR Apache-2.0
//! CMP-projects scanner.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use wd_core::ScannerOutput;
use wd_dataaccess::{DataAccessLayer, FetchSpec};
use wd_error::WdError;
use wd_scanners_core::{Scanner, ScannerOptions};

const BACKEND_ENDPOINT: &str = "/api/v1/projects/";
const SQL_QUERY: &str = "SELECT id, name, key, type, status, metadata_->>'github_url' as github_url, metadata_->>'domain' as domain FROM projects ORDER BY name";
const CACHE_FILE: &str = "canonical_projects_uuids.json";

/// Scans the CMP database's `projects` table via the hybrid data-access
/// layer (HTTP health probe, SQL fallback, cached-mirror cold fallback).
pub struct CmpProjectsScanner {
    data_access: Arc<DataAccessLayer>,
}

impl CmpProjectsScanner {
    /// Build a scanner backed by a shared [`DataAccessLayer`].
    #[must_use]
    pub fn new(data_access: Arc<DataAccessLayer>) -> Self {
        Self { data_access }
    }
}

#[async_trait]
impl Scanner for CmpProjectsScanner {
    async fn scan(&self, _target: &Path, _options: &ScannerOptions) -> Result<ScannerOutput, WdError> {
        let spec = FetchSpec {
            scanner: "database.cmp_projects".to_string(),
            backend_endpoint: BACKEND_ENDPOINT.to_string(),
            sql_query: SQL_QUERY.to_string(),
            cache_file: CACHE_FILE.to_string(),
        };
        let output = self.data_access.fetch(&spec).await;

        let mut by_domain: std::collections::BTreeMap<String, u64> = Default::default();
        let with_github_url = output
            .items
            .iter()
            .filter(|item| item.get("github_url").and_then(|v| v.as_str()).is_some_and(|s| !s.is_empty()))
            .count();
        for item in &output.items {
            let domain = item
                .get("domain")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .unwrap_or("UNKNOWN")
                .to_string();
            *by_domain.entry(domain).or_insert(0) += 1;
        }

        Ok(output
            .with_metadata("scanner", json!("cmp_projects"))
            .with_metadata("total_projects", json!(output.count))
            .with_metadata("with_github_url", json!(with_github_url))
            .with_metadata("by_domain", json!(by_domain)))
    }
}
