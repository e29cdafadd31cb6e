// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scanner registry (C3): manifest-driven discovery, drift detection, and
//! the uniform `(target, options) -> ScannerOutput` dispatch contract
//! every concrete scanner implements.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod manifest;
mod options;
mod registry;

pub use manifest::{detect_drift, parse_manifest, CategoryDrift, ManifestEntry, ScannerManifest};
pub use options::ScannerOptions;
pub use registry::{Scanner, ScannerRegistry};
