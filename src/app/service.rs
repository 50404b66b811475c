//! Tag service — the hexagonal core.
//!
//! [`TagService`] owns the responder, the serialized Capability
//! Container, and the shared content store.  It exposes exactly the
//! operations the host platform calls:
//!
//! ```text
//!  UI thread ────── set_url ────────▶ ┌─────────────────────────┐
//!                                     │       TagService        │
//!  NFC thread ── process_command ───▶ │  Responder · CC · Store │──▶ EventSink
//!               on_session_start      └─────────────────────────┘
//!               on_deactivated
//! ```
//!
//! APDU processing is synchronous and sequential within a tap; the URL
//! may change concurrently from the UI side, which the content store
//! absorbs by snapshot publishing.  Cross-thread URL updates go through
//! [`TagService::content_store`].

use std::sync::Arc;

use log::{debug, info};

use crate::apdu::command::{Command, StatusWord};
use crate::apdu::responder::{Responder, ResponseApdu, SelectionState, TagFiles};
use crate::cc::{CC_FILE_LEN, CapabilityContainer};
use crate::config::TagConfig;
use crate::content::ContentStore;
use crate::error::Result;

use super::events::{DeactivationReason, TagEvent};
use super::ports::EventSink;

// ───────────────────────────────────────────────────────────────
// TagService
// ───────────────────────────────────────────────────────────────

/// The tag core: one of these per emulated tag.
pub struct TagService {
    config: TagConfig,
    /// CC file image, fixed for the service's lifetime.
    cc_file: [u8; CC_FILE_LEN],
    /// Shared with the UI-side update path.
    content: Arc<ContentStore>,
    responder: Responder,
}

impl TagService {
    /// Build a service from validated configuration and publish its
    /// initial URL (if any).
    pub fn new(config: TagConfig) -> Result<Self> {
        config.validate()?;

        let cc_file = CapabilityContainer::from_config(&config).to_bytes();
        let content = Arc::new(ContentStore::new(config.max_ndef_file_len as usize));
        if !config.initial_url.is_empty() {
            content.set_url(&config.initial_url)?;
        }

        info!(
            "tag service up: max NDEF {} B, initial URL {:?}",
            config.max_ndef_file_len, config.initial_url
        );
        Ok(Self {
            config,
            cc_file,
            content,
            responder: Responder::new(),
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// A reader activated the tag.  Selection state starts fresh.
    pub fn on_session_start(&mut self, sink: &mut impl EventSink) {
        self.responder.reset();
        info!("tap session started");
        sink.emit(&TagEvent::SessionStarted);
    }

    /// The link went away.  Unconditionally drops selection state so no
    /// later command can read stale selection from this tap.
    pub fn on_deactivated(&mut self, reason: DeactivationReason, sink: &mut impl EventSink) {
        self.responder.reset();
        info!("deactivated: {reason:?}");
        sink.emit(&TagEvent::Deactivated(reason));
    }

    // ── Protocol path ─────────────────────────────────────────

    /// Process one command APDU and produce exactly one response APDU.
    /// Total: every input byte sequence, including empty, maps to a
    /// defined response.
    pub fn process_command_apdu(&mut self, apdu: &[u8], sink: &mut impl EventSink) -> ResponseApdu {
        debug!("C-APDU: {:02X?}", apdu);

        let command = Command::parse(apdu);
        let snapshot = self.content.snapshot();
        let files = TagFiles {
            cc: &self.cc_file,
            ndef: snapshot.file(),
        };

        let before = self.responder.state();
        let response = self.responder.handle(command, &files);
        let after = self.responder.state();

        if after != before {
            sink.emit(&TagEvent::StateChanged {
                from: before,
                to: after,
            });
        }
        match (ok(&response), command) {
            (true, Command::ReadBinary { offset, le }) => {
                if let Some(file) = after.selected_file() {
                    sink.emit(&TagEvent::ReadServed {
                        file,
                        offset,
                        len: le,
                    });
                }
            }
            (false, _) => sink.emit(&TagEvent::CommandRejected { state: after }),
            _ => {}
        }

        debug!("R-APDU: {:02X?}", response.as_slice());
        response
    }

    // ── Control path ──────────────────────────────────────────

    /// Replace the shared URL.  Takes effect for the next NDEF read,
    /// including one mid-tap.
    pub fn set_url(&self, url: &str, sink: &mut impl EventSink) -> Result<()> {
        self.content.set_url(url)?;
        info!("URL set ({} B)", url.len());
        sink.emit(&TagEvent::UrlUpdated { url: url.to_owned() });
        Ok(())
    }

    /// Handle to the content store for updates from another thread
    /// (the UI's "set URL" path).
    pub fn content_store(&self) -> Arc<ContentStore> {
        Arc::clone(&self.content)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current selection state.
    pub fn selection_state(&self) -> SelectionState {
        self.responder.state()
    }

    /// The URL currently published.
    pub fn current_url(&self) -> String {
        self.content.snapshot().url().to_owned()
    }

    /// The CC file image this tag announces.
    pub fn capability_container_file(&self) -> &[u8] {
        &self.cc_file
    }

    /// Live configuration (for read-back over the host bridge).
    pub fn config(&self) -> &TagConfig {
        &self.config
    }
}

/// Whether a response ends in the success status word.
fn ok(response: &ResponseApdu) -> bool {
    response.ends_with(&StatusWord::Success.to_bytes())
}
