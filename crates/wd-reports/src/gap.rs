// SPDX-License-Identifier: MIT OR Apache-2.0
//! Static/dynamic gap analysis.
//!
//! Compares a static event registry against a newline-delimited JSON event
//! log, producing the two asymmetric differences: events the registry
//! declares but the log never observed (latent), and events the log
//! observed but the registry never declared (emergent).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use wd_core::EventRegistry;

/// An event declared in the registry but never observed in the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatentEvent {
    /// The event name.
    pub event: String,
    /// Known producer locations, carried over for context.
    pub locations: Vec<String>,
}

/// An event observed in the log but never declared in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergentEvent {
    /// The event name (taken from the log's `event_type` field).
    pub event: String,
    /// Number of log lines observed for this event.
    pub count: usize,
    /// Distinct `source` values seen for this event, sorted.
    pub sources: Vec<String>,
    /// The most recently seen timestamp, if the log carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
}

/// Roll-up counts for the gap analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GapSummary {
    /// Number of distinct events declared in the registry.
    pub defined_count: usize,
    /// Number of distinct events observed in the log.
    pub observed_count: usize,
    /// Number of latent events.
    pub latent_count: usize,
    /// Number of emergent events.
    pub emergent_count: usize,
}

/// Current shape version of [`GapAnalysis`]. Bump on any breaking change to
/// the artifact's fields.
pub const GAP_ANALYSIS_SCHEMA: &str = "warden.gap_analysis.v1";

/// The gap analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapAnalysis {
    /// Shape version tag; see [`GAP_ANALYSIS_SCHEMA`].
    pub schema: String,
    /// RFC 3339 generation timestamp.
    pub generated_at: String,
    /// Roll-up counts.
    pub summary: GapSummary,
    /// Events defined but never observed, sorted by name.
    pub latent_events: Vec<LatentEvent>,
    /// Events observed but never defined, sorted by name.
    pub emergent_events: Vec<EmergentEvent>,
}

#[derive(Default)]
struct ObservedDetail {
    count: usize,
    sources: BTreeSet<String>,
    last_seen: Option<String>,
}

/// Parse one NDJSON log line into `(event_type, source, timestamp)`,
/// silently skipping malformed or incomplete lines — a bad log line
/// carries no identity to report against, so it is dropped rather than
/// surfaced as an error, matching the scanner-local recovery policy
/// applied to per-row parse errors elsewhere in this workspace.
fn parse_log_line(line: &str) -> Option<(String, String, Option<String>)> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: serde_json::Value = serde_json::from_str(trimmed).ok()?;
    let event_type = value.get("event_type")?.as_str()?.to_string();
    let source = value.get("source").and_then(|v| v.as_str()).unwrap_or("unknown").to_string();
    let timestamp = value
        .get("timestamp")
        .or_else(|| value.get("_logged_at"))
        .and_then(|v| v.as_str())
        .map(str::to_string);
    Some((event_type, source, timestamp))
}

/// Compare `registry` against `log_lines` (each expected to be one NDJSON
/// record), producing a [`GapAnalysis`]. `generated_at` is the
/// caller-supplied RFC 3339 timestamp.
#[must_use]
pub fn analyze_gap<'a>(
    registry: &EventRegistry,
    log_lines: impl IntoIterator<Item = &'a str>,
    generated_at: impl Into<String>,
) -> GapAnalysis {
    let defined: BTreeMap<&str, &[wd_core::EventProducer]> =
        registry.events.iter().map(|e| (e.name.as_str(), e.producers.as_slice())).collect();

    let mut observed: BTreeMap<String, ObservedDetail> = BTreeMap::new();
    for line in log_lines {
        let Some((event_type, source, timestamp)) = parse_log_line(line) else {
            continue;
        };
        let detail = observed.entry(event_type).or_default();
        detail.count += 1;
        detail.sources.insert(source);
        if timestamp.is_some() {
            detail.last_seen = timestamp;
        }
    }

    let latent_events: Vec<LatentEvent> = defined
        .iter()
        .filter(|(name, _)| !observed.contains_key(**name))
        .map(|(name, producers)| LatentEvent {
            event: (*name).to_string(),
            locations: producers.iter().map(|p| p.location.clone()).collect(),
        })
        .collect();

    let emergent_events: Vec<EmergentEvent> = observed
        .iter()
        .filter(|(name, _)| !defined.contains_key(name.as_str()))
        .map(|(name, detail)| EmergentEvent {
            event: name.clone(),
            count: detail.count,
            sources: detail.sources.iter().cloned().collect(),
            last_seen: detail.last_seen.clone(),
        })
        .collect();

    let summary = GapSummary {
        defined_count: defined.len(),
        observed_count: observed.len(),
        latent_count: latent_events.len(),
        emergent_count: emergent_events.len(),
    };

    GapAnalysis { schema: GAP_ANALYSIS_SCHEMA.to_string(), generated_at: generated_at.into(), summary, latent_events, emergent_events }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wd_core::{EventProducer, EventRegistryEntry};

    fn registry_with(names: &[&str]) -> EventRegistry {
        EventRegistry {
            events: names
                .iter()
                .map(|n| EventRegistryEntry {
                    name: (*n).to_string(),
                    lane: None,
                    producers: vec![EventProducer { location: format!("src/{n}.rs") }],
                })
                .collect(),
        }
    }

    #[test]
    fn matches_the_canonical_three_vs_two_scenario() {
        let registry = registry_with(&["alpha", "beta", "gamma"]);
        let log = [r#"{"event_type":"beta"}"#, r#"{"event_type":"delta"}"#];
        let analysis = analyze_gap(&registry, log, "2026-07-30T00:00:00Z");
        let latent: Vec<&str> = analysis.latent_events.iter().map(|e| e.event.as_str()).collect();
        let emergent: Vec<&str> = analysis.emergent_events.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(latent, vec!["alpha", "gamma"]);
        assert_eq!(emergent, vec!["delta"]);
        assert_eq!(analysis.summary.defined_count, 3);
        assert_eq!(analysis.summary.observed_count, 2);
    }

    #[test]
    fn malformed_log_lines_are_skipped() {
        let registry = registry_with(&["alpha"]);
        let log = ["not json", "", r#"{"no_event_type": true}"#, r#"{"event_type":"alpha"}"#];
        let analysis = analyze_gap(&registry, log, "2026-07-30T00:00:00Z");
        assert!(analysis.latent_events.is_empty());
        assert_eq!(analysis.summary.observed_count, 1);
    }

    #[test]
    fn empty_registry_and_empty_log_yields_no_gap() {
        let registry = EventRegistry::default();
        let analysis = analyze_gap(&registry, std::iter::empty(), "2026-07-30T00:00:00Z");
        assert!(analysis.latent_events.is_empty());
        assert!(analysis.emergent_events.is_empty());
    }

    #[test]
    fn repeated_observations_aggregate_count_and_sources() {
        let registry = EventRegistry::default();
        let log = [
            r#"{"event_type":"alpha","source":"svc-a","timestamp":"t1"}"#,
            r#"{"event_type":"alpha","source":"svc-b","timestamp":"t2"}"#,
        ];
        let analysis = analyze_gap(&registry, log, "2026-07-30T00:00:00Z");
        let alpha = &analysis.emergent_events[0];
        assert_eq!(alpha.count, 2);
        assert_eq!(alpha.sources, vec!["svc-a".to_string(), "svc-b".to_string()]);
        assert_eq!(alpha.last_seen, Some("t2".to_string()));
    }
}
