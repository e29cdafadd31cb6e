// SPDX-License-Identifier: MIT OR Apache-2.0
//! CMP-agents scanner.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use wd_core::ScannerOutput;
use wd_dataaccess::{DataAccessLayer, FetchSpec};
use wd_error::WdError;
use wd_scanners_core::{Scanner, ScannerOptions};

const BACKEND_ENDPOINT: &str = "/api/agents";
const SQL_QUERY: &str = "SELECT id, name, kind, role, metadata_->>'clearance_tier' as clearance_tier, metadata_->>'twin_bond' as twin_bond FROM agents ORDER BY name";
const CACHE_FILE: &str = "canonical_agents_uuids.json";

/// Scans the CMP database's `agents` table. Agents may also be declared
/// in a file-based council registry; this scanner covers database
/// records only.
pub struct CmpAgentsScanner {
    data_access: Arc<DataAccessLayer>,
}

impl CmpAgentsScanner {
    /// Build a scanner backed by a shared [`DataAccessLayer`].
    #[must_use]
    pub fn new(data_access: Arc<DataAccessLayer>) -> Self {
        Self { data_access }
    }
}

#[async_trait]
impl Scanner for CmpAgentsScanner {
    async fn scan(&self, _target: &Path, _options: &ScannerOptions) -> Result<ScannerOutput, WdError> {
        let spec = FetchSpec {
            scanner: "database.cmp_agents".to_string(),
            backend_endpoint: BACKEND_ENDPOINT.to_string(),
            sql_query: SQL_QUERY.to_string(),
            cache_file: CACHE_FILE.to_string(),
        };
        let output = self.data_access.fetch(&spec).await;
        Ok(output.with_metadata("scanner", json!("cmp_agents")))
    }
}
