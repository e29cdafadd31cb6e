// SPDX-License-Identifier: MIT OR Apache-2.0
//! Static category: source-level pattern scanners that need no running
//! process or external service.

mod events;

pub use events::EventSurfaceScanner;
