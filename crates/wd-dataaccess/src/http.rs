// SPDX-License-Identifier: MIT OR Apache-2.0
//! Primary backend HTTP fetch.

use serde_json::Value;
use std::time::Duration;

/// Errors from the backend HTTP tier.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// No backend URL was configured for this layer.
    #[error("no backend url configured")]
    NotConfigured,
    /// The request failed at the transport level (connect, timeout, TLS).
    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The backend responded with a non-2xx status.
    #[error("backend returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Issue a GET against `base` + `endpoint`, returning the parsed body as a
/// list of items. A bare JSON object response is treated as a single-item
/// list; a JSON array is passed through; anything else is an empty list.
pub(crate) async fn fetch(
    client: &reqwest::Client,
    base: &str,
    endpoint: &str,
    timeout: Duration,
) -> Result<Vec<Value>, BackendError> {
    let url = format!("{base}{endpoint}");
    let resp = client.get(&url).timeout(timeout).send().await?;
    if !resp.status().is_success() {
        return Err(BackendError::Status(resp.status()));
    }
    let body: Value = resp.json().await?;
    Ok(normalize_to_items(body))
}

fn normalize_to_items(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(ref map) => {
            if let Some(Value::Array(items)) = map.get("items") {
                items.clone()
            } else {
                vec![body]
            }
        }
        other => vec![other],
    }
}
