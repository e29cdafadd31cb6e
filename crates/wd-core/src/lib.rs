// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Stable contract types shared by every Warden crate.
//!
//! This crate has no I/O and no async; it exists so that `wd-dataaccess`,
//! `wd-scanners`, `wd-identity`, `wd-pipeline`, `wd-reports`, and `wd-cli`
//! can agree on shapes without depending on each other.

/// Project identity, classification, and resolution status.
pub mod identity;

/// The static event registry format consumed by the debt and gap reports.
pub mod events;

/// GitHub-organization inventory items.
pub mod inventory;

/// Registry overrides and the published registry artifact.
pub mod registry;

/// The uniform scanner output envelope.
pub mod scanner;

/// Aggregated multi-target, multi-scanner scan results.
pub mod scan_result;

/// Identity patches, the sanctioned mutation mechanism for CMP state.
pub mod patch;

/// Per-run identity-engine output: resolved projects plus summary stats.
pub mod identity_scan;

pub use events::{EventProducer, EventRegistry, EventRegistryEntry};
pub use identity::{AuthorityClaim, Classification, CmpStatus, IdentityStatus, ProjectIdentity};
pub use identity_scan::{IdentityScanResult, IdentityStats, UnresolvedInventoryItem};
pub use inventory::RepoInventoryItem;
pub use patch::{IdentityPatch, IdentityPatchAction};
pub use registry::{ProjectRegistry, RegistryOverride, RegistryProject};
pub use scan_result::{ScanResult, SCAN_RESULT_SCHEMA};
pub use scanner::{DataSource, ScannerOutput};

/// Version of the contract these types encode. Bump only on a breaking
/// change to any public shape in this crate.
///
/// ```
/// assert_eq!(wd_core::CONTRACT_VERSION, 1);
/// ```
pub const CONTRACT_VERSION: u32 = 1;
