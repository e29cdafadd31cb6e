// SPDX-License-Identifier: MIT OR Apache-2.0
//! Hybrid data-access layer (C2): live backend HTTP, direct PostgreSQL
//! fallback, and a cached JSON mirror as a last resort.
//!
//! Used by the CMP-projects, CMP-agents, CMP-conversations, CMP-artifacts,
//! and CMP-entities scanners. The layer never raises on a failed fetch; it
//! always returns a [`ScannerOutput`]-compatible result with an `error`
//! string in its metadata and an empty item list.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod http;
mod sql;

pub use cache::CacheError;
pub use sql::SqlError;

use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use wd_core::{DataSource, ScannerOutput};

/// One data-source request: where to look, in priority order.
#[derive(Debug, Clone)]
pub struct FetchSpec {
    /// Fully-qualified scanner name this fetch is performed on behalf of.
    pub scanner: String,
    /// Backend path appended to the configured base URL (e.g. `/api/projects`).
    pub backend_endpoint: String,
    /// SQL statement run against the direct PostgreSQL fallback.
    pub sql_query: String,
    /// File name (not path) of the cached JSON mirror to use as a cold
    /// fallback, relative to the configured cache directory.
    pub cache_file: String,
}

/// Hybrid data-access layer: backend health probe + HTTP fetch, SQL
/// fallback, and cached-JSON cold fallback.
pub struct DataAccessLayer {
    client: reqwest::Client,
    backend_url: Option<String>,
    database_url: Option<String>,
    cache_dir: Option<PathBuf>,
}

/// Health-probe and fetch timeouts.
const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(2);
const BACKEND_FETCH_TIMEOUT: Duration = Duration::from_secs(5);
const SQL_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const SQL_STATEMENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Well-known health endpoints tried in order.
const HEALTH_ENDPOINTS: &[&str] = &["/api/health", "/health", "/"];

impl DataAccessLayer {
    /// Build a layer. Any of `backend_url`, `database_url`, `cache_dir` may
    /// be `None`; the layer degrades gracefully when a tier is unavailable.
    #[must_use]
    pub fn new(
        backend_url: Option<String>,
        database_url: Option<String>,
        cache_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            backend_url,
            database_url,
            cache_dir,
        }
    }

    /// Run the full four-tier fetch for `spec`, never returning an `Err` —
    /// failures are folded into the returned output's metadata instead.
    pub async fn fetch(&self, spec: &FetchSpec) -> ScannerOutput {
        if self.backend_healthy().await {
            match self.fetch_backend(&spec.backend_endpoint).await {
                Ok(items) => {
                    tracing::debug!(scanner = %spec.scanner, source = "backend", count = items.len(), "fetch succeeded");
                    return ScannerOutput::new(spec.scanner.clone(), items).with_source(DataSource::Backend);
                }
                Err(e) => {
                    tracing::debug!(scanner = %spec.scanner, error = %e, "backend fetch failed, falling back to SQL");
                }
            }
        }

        match self.fetch_sql(&spec.sql_query).await {
            Ok(items) => {
                tracing::debug!(scanner = %spec.scanner, source = "sql", count = items.len(), "fetch succeeded");
                return ScannerOutput::new(spec.scanner.clone(), items).with_source(DataSource::Sql);
            }
            Err(e) => {
                tracing::debug!(scanner = %spec.scanner, error = %e, "sql fallback failed, falling back to cache");
            }
        }

        match self.fetch_cache(&spec.cache_file).await {
            Ok(items) => {
                ScannerOutput::new(spec.scanner.clone(), items).with_source(DataSource::Cache)
            }
            Err(e) => ScannerOutput::new(spec.scanner.clone(), Vec::new())
                .with_source(DataSource::Unknown)
                .with_metadata("error", Value::String(e.to_string())),
        }
    }

    /// Try each well-known health endpoint in turn with a short timeout.
    async fn backend_healthy(&self) -> bool {
        let Some(base) = &self.backend_url else {
            return false;
        };
        for suffix in HEALTH_ENDPOINTS {
            let url = format!("{base}{suffix}");
            let attempt = self
                .client
                .get(&url)
                .timeout(HEALTH_PROBE_TIMEOUT)
                .send()
                .await;
            if let Ok(resp) = attempt
                && resp.status().is_success()
            {
                return true;
            }
        }
        false
    }

    async fn fetch_backend(&self, endpoint: &str) -> Result<Vec<Value>, http::BackendError> {
        let base = self.backend_url.as_deref().ok_or(http::BackendError::NotConfigured)?;
        http::fetch(&self.client, base, endpoint, BACKEND_FETCH_TIMEOUT).await
    }

    async fn fetch_sql(&self, query: &str) -> Result<Vec<Value>, sql::SqlError> {
        let url = self.database_url.as_deref().ok_or(sql::SqlError::NotConfigured)?;
        sql::fetch_rows(url, query, SQL_CONNECT_TIMEOUT, SQL_STATEMENT_TIMEOUT).await
    }

    async fn fetch_cache(&self, file_name: &str) -> Result<Vec<Value>, cache::CacheError> {
        let dir = self.cache_dir.as_ref().ok_or(cache::CacheError::NotConfigured)?;
        cache::read_mirror(&dir.join(file_name)).await
    }
}
