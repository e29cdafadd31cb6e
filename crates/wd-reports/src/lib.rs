// SPDX-License-Identifier: MIT OR Apache-2.0
//! Derived reports, each a pure function of its inputs: event debt,
//! static/dynamic gap analysis, and registry drift.
//!
//! None of these generators read the filesystem, a database, or the clock
//! themselves — every input arrives already parsed, and every timestamp is
//! supplied by the caller. This keeps them trivially testable and keeps the
//! "pure function of inputs" property honest.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod debt;
mod drift;
mod gap;

pub use debt::{generate_debt_report, DebtItem, DebtKind, DebtReport, DebtSummary, DEBT_REPORT_SCHEMA};
pub use drift::{detect_drift, DiscoveredProject, DriftReport, DriftSummary, Ghost, Rogue, DRIFT_REPORT_SCHEMA};
pub use gap::{analyze_gap, EmergentEvent, GapAnalysis, GapSummary, LatentEvent, GAP_ANALYSIS_SCHEMA};
