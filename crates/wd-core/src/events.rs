// SPDX-License-Identifier: MIT OR Apache-2.0
//! The static event registry format consumed by the event-debt and
//! gap-analysis reports.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single call site believed to emit an event, as discovered by a static
/// scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EventProducer {
    /// Where the emitter lives, e.g. a file path or a module name.
    pub location: String,
}

/// One event as declared in the static registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EventRegistryEntry {
    /// The event's declared name, which may itself be malformed (a
    /// placeholder, a dynamic expression, a bare URI) — that malformation
    /// is exactly what the event-debt report flags.
    pub name: String,
    /// The transport lane this event is declared to travel on, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane: Option<String>,
    /// Known emission call sites for this event.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub producers: Vec<EventProducer>,
}

/// The full static event registry: every event name known to the system,
/// however it was declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EventRegistry {
    /// Every declared event.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventRegistryEntry>,
}
