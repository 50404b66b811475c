//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured tag events to the
//! `log` facade (logcat, console, or wherever the host routes it).
//! A UI-bridge or metrics adapter would implement the same trait.

use log::info;

use crate::app::events::TagEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`TagEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &TagEvent) {
        match event {
            TagEvent::SessionStarted => {
                info!("SESSION | started");
            }
            TagEvent::UrlUpdated { url } => {
                info!("URL | set to {url:?}");
            }
            TagEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from.name(), to.name());
            }
            TagEvent::ReadServed { file, offset, len } => {
                info!("READ | {file:?} offset={offset} len={len}");
            }
            TagEvent::CommandRejected { state } => {
                info!("REJECT | in state {}", state.name());
            }
            TagEvent::Deactivated(reason) => {
                info!("SESSION | deactivated ({reason:?})");
            }
        }
    }
}
