// SPDX-License-Identifier: MIT OR Apache-2.0
//! Database category: scanners built on the hybrid data-access layer.

mod agents;
mod projects;

pub use agents::CmpAgentsScanner;
pub use projects::CmpProjectsScanner;
