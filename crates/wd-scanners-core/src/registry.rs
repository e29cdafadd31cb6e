// SPDX-License-Identifier: MIT OR Apache-2.0
//! The scanner registry: flat + qualified name registration and dispatch.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use wd_core::ScannerOutput;
use wd_error::{ErrorCode, WdError};

use crate::options::ScannerOptions;

/// A single scanner: `(target, options) -> ScannerOutput`, a uniform
/// dispatch contract every scanner implements. The registry never catches
/// a scanner's errors or panics — the aggregation pipeline does.
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Inspect `target` and return findings.
    async fn scan(&self, target: &Path, options: &ScannerOptions) -> Result<ScannerOutput, WdError>;
}

/// Registration frozen after startup; read-only thereafter.
pub struct ScannerRegistry {
    by_flat_name: HashMap<String, Arc<dyn Scanner>>,
    by_qualified_name: HashMap<String, Arc<dyn Scanner>>,
}

impl Default for ScannerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ScannerRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_flat_name: HashMap::new(),
            by_qualified_name: HashMap::new(),
        }
    }

    /// Register `scanner` under `category/name` (the qualified name) and
    /// under `name` alone (the flat name).
    ///
    /// A collision in the flat-name namespace is a fatal startup error: the
    /// scanner-name namespace is flat and unique.
    pub fn register(
        &mut self,
        category: &str,
        name: &str,
        scanner: Arc<dyn Scanner>,
    ) -> Result<(), WdError> {
        if self.by_flat_name.contains_key(name) {
            return Err(WdError::new(
                ErrorCode::ConfigScannerNameCollision,
                format!("scanner name '{name}' is already registered"),
            )
            .with_context("category", category)
            .with_context("name", name));
        }
        let qualified = format!("{category}/{name}");
        self.by_flat_name.insert(name.to_string(), scanner.clone());
        self.by_qualified_name.insert(qualified, scanner);
        Ok(())
    }

    /// Look up a scanner by flat or qualified name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Scanner>> {
        self.by_flat_name
            .get(name)
            .or_else(|| self.by_qualified_name.get(name))
            .cloned()
    }

    /// `true` when a scanner is registered under `name` (flat or qualified).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_flat_name.contains_key(name) || self.by_qualified_name.contains_key(name)
    }

    /// Every registered qualified name, sorted.
    #[must_use]
    pub fn list_qualified(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_qualified_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of distinct scanners registered (flat-name count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_flat_name.len()
    }

    /// `true` when no scanners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_flat_name.is_empty()
    }
}
