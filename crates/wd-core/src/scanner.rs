// SPDX-License-Identifier: MIT OR Apache-2.0
//! The uniform scanner output envelope.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a scanner's data ultimately came from, for hybrid data-access
/// scanners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Served by the live backend API.
    Backend,
    /// Served by a direct SQL fallback query.
    Sql,
    /// Served by the cached JSON mirror (cold fallback).
    Cache,
    /// Not applicable — e.g. a filesystem scanner.
    Unknown,
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Output of a single scanner invocation against a single target, in a
/// uniform `(count, items, metadata)` shape every scanner shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScannerOutput {
    /// Number of items this scanner found; always `items.len()`.
    pub count: usize,
    /// The scanner's raw findings, shape determined by the scanner itself.
    pub items: Vec<serde_json::Value>,
    /// Fully-qualified scanner name (`"<category>.<name>"`).
    pub scanner: String,
    /// Where the data came from, when applicable.
    #[serde(default)]
    pub source: DataSource,
    /// Free-form scanner-specific metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl ScannerOutput {
    /// Build an output, computing `count` from `items` so the two can
    /// never disagree.
    #[must_use]
    pub fn new(scanner: impl Into<String>, items: Vec<serde_json::Value>) -> Self {
        Self {
            count: items.len(),
            items,
            scanner: scanner.into(),
            source: DataSource::Unknown,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a data source tag.
    #[must_use]
    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = source;
        self
    }

    /// Attach a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Merge another target's output for the same scanner into this one:
    /// `items` are concatenated, `metadata` is shallow-merged with `other`
    /// winning on key collisions, and `count` is recomputed so it never
    /// drifts from `items.len()`. `source` is kept from `self` unless it is
    /// `Unknown`, in which case `other`'s is taken.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.items.extend(other.items);
        self.count = self.items.len();
        self.metadata.extend(other.metadata);
        if self.source == DataSource::Unknown {
            self.source = other.source;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_computes_count_from_items() {
        let output = ScannerOutput::new("git.remotes", vec![json!({"name": "origin"}), json!({"name": "upstream"})]);
        assert_eq!(output.count, 2);
        assert_eq!(output.source, DataSource::Unknown);
    }

    #[test]
    fn builder_methods_set_source_and_metadata() {
        let output = ScannerOutput::new("database.projects", vec![])
            .with_source(DataSource::Sql)
            .with_metadata("query_ms", json!(42));
        assert_eq!(output.source, DataSource::Sql);
        assert_eq!(output.metadata.get("query_ms"), Some(&json!(42)));
    }

    #[test]
    fn count_and_items_len_never_disagree_after_construction() {
        let items: Vec<serde_json::Value> = (0..5).map(|i| json!({"i": i})).collect();
        let output = ScannerOutput::new("static.events", items);
        assert_eq!(output.count, output.items.len());
    }

    #[test]
    fn data_source_default_is_unknown() {
        assert_eq!(DataSource::default(), DataSource::Unknown);
    }

    #[test]
    fn merge_concatenates_items_and_recomputes_count() {
        let a = ScannerOutput::new("git.remotes", vec![json!({"name": "origin"})]);
        let b = ScannerOutput::new("git.remotes", vec![json!({"name": "upstream"})]);
        let merged = a.merge(b);
        assert_eq!(merged.count, 2);
        assert_eq!(merged.items.len(), 2);
    }

    #[test]
    fn merge_shallow_merges_metadata_with_other_winning() {
        let a = ScannerOutput::new("database.projects", vec![]).with_metadata("query_ms", json!(10));
        let b = ScannerOutput::new("database.projects", vec![]).with_metadata("query_ms", json!(20)).with_metadata("rows", json!(3));
        let merged = a.merge(b);
        assert_eq!(merged.metadata.get("query_ms"), Some(&json!(20)));
        assert_eq!(merged.metadata.get("rows"), Some(&json!(3)));
    }

    #[test]
    fn merge_keeps_self_source_unless_unknown() {
        let a = ScannerOutput::new("database.projects", vec![]).with_source(DataSource::Sql);
        let b = ScannerOutput::new("database.projects", vec![]).with_source(DataSource::Cache);
        assert_eq!(a.merge(b).source, DataSource::Sql);

        let a = ScannerOutput::new("database.projects", vec![]);
        let b = ScannerOutput::new("database.projects", vec![]).with_source(DataSource::Cache);
        assert_eq!(a.merge(b).source, DataSource::Cache);
    }
}
