// SPDX-License-Identifier: MIT OR Apache-2.0
//! The event debt report: flags registry entries whose event names show
//! signs of not being finished (unknown, placeholder, URI-shaped, or
//! lane-mismatched names).

use serde::{Deserialize, Serialize};
use wd_config::EventDebtRules;
use wd_core::EventRegistry;

/// Why an event entry was flagged as debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtKind {
    /// The event name itself signals the publisher couldn't determine a
    /// literal name (a dynamic `publish()` call site).
    UnknownEventName,
    /// The event name is a known placeholder, never replaced with a real one.
    PlaceholderEvent,
    /// The event name is a bare URI rather than a dotted namespace.
    UriStyle,
    /// The event's declared lane does not match the namespace its name implies.
    LaneMismatch,
    /// Every known producer location is an archived or fossil code path.
    ArchivedEmitter,
}

/// One flagged event, with a human-readable reason and fix suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtItem {
    /// What kind of debt this is.
    pub kind: DebtKind,
    /// The event name as declared.
    pub name: String,
    /// Known producer locations for this event.
    pub locations: Vec<String>,
    /// Why this was flagged.
    pub reason: &'static str,
    /// A suggested remediation.
    pub suggested_fix: &'static str,
}

/// Per-kind counts, rolled up for a quick-glance summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebtSummary {
    /// Total number of flagged events.
    pub total_debt: usize,
    /// Count of [`DebtKind::UnknownEventName`].
    pub unknown_names: usize,
    /// Count of [`DebtKind::PlaceholderEvent`].
    pub placeholders: usize,
    /// Count of [`DebtKind::UriStyle`].
    pub uri_style: usize,
    /// Count of [`DebtKind::LaneMismatch`].
    pub lane_mismatches: usize,
    /// Count of [`DebtKind::ArchivedEmitter`].
    pub archived: usize,
}

/// Current shape version of [`DebtReport`]. Bump on any breaking change to
/// the artifact's fields.
pub const DEBT_REPORT_SCHEMA: &str = "warden.debt_report.v1";

/// The event debt report: every flagged event plus a summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtReport {
    /// Shape version tag; see [`DEBT_REPORT_SCHEMA`].
    pub schema: String,
    /// RFC 3339 generation timestamp.
    pub generated_at: String,
    /// Flagged events, in registry order.
    pub debt_items: Vec<DebtItem>,
    /// Roll-up counts.
    pub summary: DebtSummary,
}

fn classify_name(name: &str, rules: &EventDebtRules) -> Option<(DebtKind, &'static str, &'static str)> {
    if rules.unknown_name_prefixes.iter().any(|p| name.starts_with(p.as_str())) {
        return Some((
            DebtKind::UnknownEventName,
            "dynamic publish() prevents registry truth",
            "publish(LITERAL_EVENT_NAME, data) or publish(CONST_STRING, data)",
        ));
    }

    if rules.placeholder_literals.iter().any(|lit| name.contains(lit.as_str())) {
        return Some((DebtKind::PlaceholderEvent, "placeholder name detected", "replace with a concrete event name"));
    }

    if name.contains("://") {
        return Some((DebtKind::UriStyle, "URI-style event name", "use dot.notation namespace"));
    }

    None
}

fn is_lane_mismatch(name: &str, lane: Option<&str>) -> bool {
    name.starts_with("crown.") && lane == Some("federation")
}

fn is_archived(locations: &[String], rules: &EventDebtRules) -> bool {
    locations
        .iter()
        .any(|loc| rules.archived_location_substrings.iter().any(|sub| loc.contains(sub.as_str())))
}

/// Classify every event in `registry` against `rules`, producing a
/// [`DebtReport`]. `generated_at` is the caller-supplied RFC 3339 timestamp
/// (this crate never reads the clock itself).
#[must_use]
pub fn generate_debt_report(registry: &EventRegistry, rules: &EventDebtRules, generated_at: impl Into<String>) -> DebtReport {
    let mut debt_items = Vec::new();

    for event in &registry.events {
        let locations: Vec<String> = event.producers.iter().map(|p| p.location.clone()).collect();

        let flagged = classify_name(&event.name, rules).or_else(|| {
            if is_lane_mismatch(&event.name, event.lane.as_deref()) {
                Some((
                    DebtKind::LaneMismatch,
                    "crown.* event detected outside the crown lane",
                    "set lane=crown or rename the namespace",
                ))
            } else {
                None
            }
        });

        let flagged = flagged.or_else(|| {
            if is_archived(&locations, rules) {
                Some((
                    DebtKind::ArchivedEmitter,
                    "archived emitter polluting the live scan",
                    "exclude via config or tag the emitter archived",
                ))
            } else {
                None
            }
        });

        if let Some((kind, reason, suggested_fix)) = flagged {
            debt_items.push(DebtItem { kind, name: event.name.clone(), locations, reason, suggested_fix });
        }
    }

    let summary = DebtSummary {
        total_debt: debt_items.len(),
        unknown_names: debt_items.iter().filter(|d| d.kind == DebtKind::UnknownEventName).count(),
        placeholders: debt_items.iter().filter(|d| d.kind == DebtKind::PlaceholderEvent).count(),
        uri_style: debt_items.iter().filter(|d| d.kind == DebtKind::UriStyle).count(),
        lane_mismatches: debt_items.iter().filter(|d| d.kind == DebtKind::LaneMismatch).count(),
        archived: debt_items.iter().filter(|d| d.kind == DebtKind::ArchivedEmitter).count(),
    };

    DebtReport { schema: DEBT_REPORT_SCHEMA.to_string(), generated_at: generated_at.into(), debt_items, summary }
}
