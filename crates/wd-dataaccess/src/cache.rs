// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cached JSON mirror, the cold fallback tier, reading the
//! `canonical_<entity>_uuids.json` snapshot left behind by the last
//! successful registry write.

use std::path::Path;

use serde_json::Value;

/// Errors from the cache tier.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// No cache directory was configured for this layer.
    #[error("no cache directory configured")]
    NotConfigured,
    /// The mirror file does not exist.
    #[error("cache mirror not found: {0}")]
    NotFound(String),
    /// The mirror file could not be read.
    #[error("failed to read cache mirror: {0}")]
    Read(std::io::Error),
    /// The mirror file was not valid JSON.
    #[error("failed to parse cache mirror: {0}")]
    Parse(serde_json::Error),
}

/// Read a cached mirror file and extract its item list.
///
/// Mirrors are expected to be a JSON object carrying a top-level array
/// field (`"projects"`, `"agents"`, `"items"`, ...); the first such field
/// found is used. A bare top-level array is also accepted.
pub(crate) async fn read_mirror(path: &Path) -> Result<Vec<Value>, CacheError> {
    if !path.is_file() {
        return Err(CacheError::NotFound(path.display().to_string()));
    }
    let content = tokio::fs::read_to_string(path).await.map_err(CacheError::Read)?;
    let parsed: Value = serde_json::from_str(&content).map_err(CacheError::Parse)?;
    Ok(extract_items(parsed))
}

fn extract_items(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(map) => map
            .into_values()
            .find_map(|v| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}
