// SPDX-License-Identifier: MIT OR Apache-2.0
//! Aggregated multi-target, multi-scanner scan results.

use crate::scanner::ScannerOutput;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current shape version of [`ScanResult`]. Bump on any breaking change to
/// the artifact's fields.
pub const SCAN_RESULT_SCHEMA: &str = "warden.scan_result.v1";

/// The result of running one or more scanners across one or more targets in
/// a single pipeline invocation. Per-scanner outputs are merged across every
/// scanned target, so the artifact is flat and scanner-keyed rather than
/// target-addressable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScanResult {
    /// Shape version tag; see [`SCAN_RESULT_SCHEMA`].
    pub schema: String,
    /// RFC 3339 timestamp of when the scan completed.
    pub completed_at: String,
    /// Scanner output, keyed by fully-qualified scanner name, merged across
    /// every target the scan ran against.
    pub findings: BTreeMap<String, ScannerOutput>,
    /// Fully-qualified names of scanners that were requested but failed or
    /// timed out against at least one target.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_scanners: Vec<String>,
    /// Total wall-clock duration of the scan, in milliseconds.
    pub duration_ms: u64,
}

impl ScanResult {
    /// Total number of items found across every scanner.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.findings.values().map(|o| o.count).sum()
    }

    /// `true` when at least one requested scanner failed against at least
    /// one target. A scan never aborts wholesale on a single scanner's
    /// failure; it records the failure here and keeps going.
    #[must_use]
    pub fn had_partial_failure(&self) -> bool {
        !self.failed_scanners.is_empty()
    }
}
