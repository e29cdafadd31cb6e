// SPDX-License-Identifier: MIT OR Apache-2.0
//! The open, per-scanner options bag: typed-but-open.

use serde_json::{Map, Value};

/// Scanner-specific options passed through by name; the registry and
/// pipeline never interpret them, only scanners do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScannerOptions(Map<String, Value>);

impl ScannerOptions {
    /// An empty options bag.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from an existing JSON object map.
    #[must_use]
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Raw value lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String-typed lookup.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Boolean-typed lookup.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Unsigned-integer-typed lookup.
    #[must_use]
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(Value::as_u64)
    }

    /// Insert or replace an option, builder-style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}
