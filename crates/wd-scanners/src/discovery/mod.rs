// SPDX-License-Identifier: MIT OR Apache-2.0
//! Discovery category: registry-independent filesystem discovery, used
//! by `wd-reports`' registry-drift report to find rogue projects.

mod project;

pub use project::ProjectDiscoveryScanner;
