//! Port traits — the boundary between domain logic and the platform.
//!
//! ```text
//!   Host NFC stack ──▶ TagService (domain) ──▶ EventSink port ──▶ adapter
//! ```
//!
//! The service consumes sinks via generics, so the domain core never
//! depends on where events end up.

use super::events::TagEvent;

/// The domain emits structured [`TagEvent`]s through this port.
/// Adapters decide where they go (logger, UI bridge, metrics).
pub trait EventSink {
    fn emit(&mut self, event: &TagEvent);
}

/// Sink that drops every event.  For hosts that only want the APDU
/// exchange and the `log` output.
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&mut self, _event: &TagEvent) {}
}
