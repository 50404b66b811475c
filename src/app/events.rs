//! Outbound application events.
//!
//! The [`TagService`](super::service::TagService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log them, surface a "tap served"
//! toast in the UI, feed usage metrics, etc.

use crate::apdu::command::FileId;
use crate::apdu::responder::SelectionState;

/// Structured events emitted by the tag core.
#[derive(Debug, Clone)]
pub enum TagEvent {
    /// A reader activated the tag; selection state is fresh.
    SessionStarted,

    /// The shared URL was replaced.
    UrlUpdated { url: String },

    /// The responder moved between selection states.
    StateChanged {
        from: SelectionState,
        to: SelectionState,
    },

    /// A read window was served from a file.
    ReadServed {
        file: FileId,
        offset: u16,
        len: usize,
    },

    /// A command was answered with the failure status word.
    CommandRejected { state: SelectionState },

    /// The link went away; selection state was dropped.
    Deactivated(DeactivationReason),
}

/// Why the host NFC stack ended the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeactivationReason {
    /// The reader left the field.
    LinkLoss,
    /// The reader selected a different application.
    Deselected,
    /// A reason code this crate does not know.
    Unknown(i32),
}

impl DeactivationReason {
    /// Map the host's raw reason code (Android convention: 0 = link
    /// loss, 1 = deselect).
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::LinkLoss,
            1 => Self::Deselected,
            other => Self::Unknown(other),
        }
    }
}
