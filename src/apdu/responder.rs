//! File-selection state machine.
//!
//! The Type 4 Tag protocol is inherently multi-step: a reader must select
//! the application, then select a file, before it may read that file's
//! bytes.  A stray or out-of-order command is rejected deterministically —
//! silently ignoring one shows up in the field as a failed or hanging tap.
//!
//! ```text
//!                     ┌────────────── SELECT AID ──────────────┐
//!                     ▼                                        │
//!  NO FILE ── SELECT AID ──▶ APPLICATION ── SELECT E1 03 ──▶ CC SELECTED
//!  SELECTED                   SELECTED  ── SELECT E1 04 ──▶ NDEF SELECTED
//!     ▲                                                        │
//!     └───────────────── deactivation (any state) ◀────────────┘
//! ```
//!
//! There is no path from `NoFileSelected` directly to a file: selecting
//! the CC or NDEF file before the application is a protocol violation and
//! fails with `6A 82`.  Re-selecting between the two files (or the same
//! file twice) is allowed once the application is selected.
//!
//! `READ BINARY` serves a byte window of the currently selected file.
//! Bounds are exact: a window touching any byte past the file's true end
//! fails whole rather than returning short data, because readers walk a
//! file with increasing offsets and a silently shortened chunk corrupts
//! the message they reassemble.

use log::{debug, info, warn};

use super::command::{Command, FileId, READ_BINARY_DEFAULT_LE, StatusWord};

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// Per-session file-selection state.  Nothing survives a deactivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SelectionState {
    NoFileSelected = 0,
    ApplicationSelected = 1,
    CapabilityContainerSelected = 2,
    NdefFileSelected = 3,
}

impl SelectionState {
    /// Short name for transition logging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoFileSelected => "NoFileSelected",
            Self::ApplicationSelected => "ApplicationSelected",
            Self::CapabilityContainerSelected => "CcSelected",
            Self::NdefFileSelected => "NdefSelected",
        }
    }

    /// The file a `READ BINARY` would address in this state.
    pub const fn selected_file(self) -> Option<FileId> {
        match self {
            Self::CapabilityContainerSelected => Some(FileId::CapabilityContainer),
            Self::NdefFileSelected => Some(FileId::Ndef),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Response buffer
// ---------------------------------------------------------------------------

/// Largest possible response: a full 256-byte read window plus the status
/// word.  The parser caps Le at 256, so this bound is structural.
pub const MAX_RESPONSE_LEN: usize = READ_BINARY_DEFAULT_LE + 2;

/// One response APDU, built in place without heap allocation.
pub type ResponseApdu = heapless::Vec<u8, MAX_RESPONSE_LEN>;

/// Read-only view of the two files the responder can serve.  The NDEF
/// slice is a snapshot taken per command, so a concurrent URL update never
/// tears a read.
#[derive(Debug, Clone, Copy)]
pub struct TagFiles<'a> {
    pub cc: &'a [u8],
    pub ndef: &'a [u8],
}

impl TagFiles<'_> {
    fn content(&self, file: FileId) -> &[u8] {
        match file {
            FileId::CapabilityContainer => self.cc,
            FileId::Ndef => self.ndef,
        }
    }
}

fn status_only(sw: StatusWord) -> ResponseApdu {
    let mut resp = ResponseApdu::new();
    // 2 bytes into a MAX_RESPONSE_LEN buffer always fits.
    let ok = resp.extend_from_slice(&sw.to_bytes()).is_ok();
    debug_assert!(ok);
    resp
}

fn data_response(window: &[u8]) -> ResponseApdu {
    let mut resp = ResponseApdu::new();
    let ok = resp.extend_from_slice(window).is_ok()
        && resp.extend_from_slice(&StatusWord::Success.to_bytes()).is_ok();
    debug_assert!(ok, "window bounded by Le <= {READ_BINARY_DEFAULT_LE}");
    resp
}

// ---------------------------------------------------------------------------
// Responder
// ---------------------------------------------------------------------------

/// The per-session APDU responder.
///
/// Owns nothing but the selection state; file content is passed in per
/// command as a [`TagFiles`] view so the caller controls snapshotting.
pub struct Responder {
    state: SelectionState,
}

impl Responder {
    pub fn new() -> Self {
        Self {
            state: SelectionState::NoFileSelected,
        }
    }

    /// Current selection state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Drop all selection state.  Called on session start and on link
    /// deactivation so no command can read stale selection from a
    /// previous tap.
    pub fn reset(&mut self) {
        if self.state != SelectionState::NoFileSelected {
            debug!("responder reset from {}", self.state.name());
        }
        self.state = SelectionState::NoFileSelected;
    }

    /// Handle one decoded command and produce exactly one response APDU.
    pub fn handle(&mut self, command: Command, files: &TagFiles<'_>) -> ResponseApdu {
        match command {
            Command::SelectApplication => {
                // Valid from any state, including re-selection mid-tap.
                self.transition(SelectionState::ApplicationSelected);
                status_only(StatusWord::Success)
            }

            Command::SelectFile(file) => {
                if self.state == SelectionState::NoFileSelected {
                    // File selection before the application is a protocol
                    // violation.
                    warn!("SELECT {file:?} before application select");
                    return status_only(StatusWord::FileNotFound);
                }
                let next = match file {
                    FileId::CapabilityContainer => SelectionState::CapabilityContainerSelected,
                    FileId::Ndef => SelectionState::NdefFileSelected,
                };
                self.transition(next);
                status_only(StatusWord::Success)
            }

            Command::SelectUnknownFile(id) => {
                warn!("SELECT of unknown file id {id:02X?}");
                status_only(StatusWord::FileNotFound)
            }

            Command::ReadBinary { offset, le } => match self.state.selected_file() {
                Some(file) => read_window(files.content(file), file, offset, le),
                None => {
                    warn!("READ BINARY with no file selected");
                    status_only(StatusWord::FileNotFound)
                }
            },

            Command::Unknown => status_only(StatusWord::FileNotFound),
        }
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: SelectionState) {
        if next != self.state {
            info!("selection: {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
    }
}

/// Serve `[offset, offset+le)` from `content`, or fail whole.
fn read_window(content: &[u8], file: FileId, offset: u16, le: usize) -> ResponseApdu {
    let start = offset as usize;
    let end = start + le;
    if end > content.len() {
        warn!(
            "READ {file:?} out of range: offset={start} le={le} size={}",
            content.len()
        );
        return status_only(StatusWord::FileNotFound);
    }

    debug!("READ {file:?}: offset={start} le={le}");
    data_response(&content[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const CC: [u8; 15] = [
        0x00, 0x0F, 0x20, 0x00, 0x3B, 0x00, 0x34, 0x04, 0x06, 0xE1, 0x04, 0x00, 0xFF, 0x00, 0xFF,
    ];
    const NDEF: [u8; 9] = [0x00, 0x07, 0xD1, 0x01, 0x03, 0x55, 0x00, 0x61, 0x62];

    fn files() -> TagFiles<'static> {
        TagFiles { cc: &CC, ndef: &NDEF }
    }

    fn select_app(r: &mut Responder) {
        let resp = r.handle(Command::SelectApplication, &files());
        assert_eq!(resp.as_slice(), [0x90, 0x00]);
    }

    #[test]
    fn starts_with_no_file_selected() {
        assert_eq!(Responder::new().state(), SelectionState::NoFileSelected);
    }

    #[test]
    fn select_application_from_any_state() {
        let mut r = Responder::new();
        select_app(&mut r);
        assert_eq!(r.state(), SelectionState::ApplicationSelected);

        let _ = r.handle(Command::SelectFile(FileId::Ndef), &files());
        select_app(&mut r);
        assert_eq!(r.state(), SelectionState::ApplicationSelected);
    }

    #[test]
    fn file_select_before_application_fails() {
        for file in [FileId::CapabilityContainer, FileId::Ndef] {
            let mut r = Responder::new();
            let resp = r.handle(Command::SelectFile(file), &files());
            assert_eq!(resp.as_slice(), [0x6A, 0x82]);
            assert_eq!(r.state(), SelectionState::NoFileSelected);
        }
    }

    #[test]
    fn file_select_after_application_succeeds() {
        let mut r = Responder::new();
        select_app(&mut r);

        let resp = r.handle(Command::SelectFile(FileId::CapabilityContainer), &files());
        assert_eq!(resp.as_slice(), [0x90, 0x00]);
        assert_eq!(r.state(), SelectionState::CapabilityContainerSelected);

        let resp = r.handle(Command::SelectFile(FileId::Ndef), &files());
        assert_eq!(resp.as_slice(), [0x90, 0x00]);
        assert_eq!(r.state(), SelectionState::NdefFileSelected);
    }

    #[test]
    fn reselecting_same_file_is_idempotent() {
        let mut r = Responder::new();
        select_app(&mut r);
        for _ in 0..2 {
            let resp = r.handle(Command::SelectFile(FileId::Ndef), &files());
            assert_eq!(resp.as_slice(), [0x90, 0x00]);
            assert_eq!(r.state(), SelectionState::NdefFileSelected);
        }
    }

    #[test]
    fn unknown_file_select_fails_and_keeps_state() {
        let mut r = Responder::new();
        select_app(&mut r);
        let resp = r.handle(Command::SelectUnknownFile([0xE1, 0x05]), &files());
        assert_eq!(resp.as_slice(), [0x6A, 0x82]);
        assert_eq!(r.state(), SelectionState::ApplicationSelected);
    }

    #[test]
    fn read_without_selection_fails() {
        let mut r = Responder::new();
        let resp = r.handle(Command::ReadBinary { offset: 0, le: 2 }, &files());
        assert_eq!(resp.as_slice(), [0x6A, 0x82]);

        select_app(&mut r);
        let resp = r.handle(Command::ReadBinary { offset: 0, le: 2 }, &files());
        assert_eq!(resp.as_slice(), [0x6A, 0x82]);
    }

    #[test]
    fn reads_cc_window() {
        let mut r = Responder::new();
        select_app(&mut r);
        let _ = r.handle(Command::SelectFile(FileId::CapabilityContainer), &files());

        let resp = r.handle(Command::ReadBinary { offset: 0, le: 15 }, &files());
        assert_eq!(&resp[..15], &CC);
        assert_eq!(&resp[15..], [0x90, 0x00]);
    }

    #[test]
    fn reads_partial_window_at_offset() {
        let mut r = Responder::new();
        select_app(&mut r);
        let _ = r.handle(Command::SelectFile(FileId::Ndef), &files());

        let resp = r.handle(Command::ReadBinary { offset: 2, le: 5 }, &files());
        assert_eq!(&resp[..5], &NDEF[2..7]);
        assert_eq!(&resp[5..], [0x90, 0x00]);
    }

    #[test]
    fn read_to_exact_end_succeeds() {
        let mut r = Responder::new();
        select_app(&mut r);
        let _ = r.handle(Command::SelectFile(FileId::Ndef), &files());

        let le = NDEF.len();
        let resp = r.handle(Command::ReadBinary { offset: 0, le }, &files());
        assert_eq!(&resp[..le], &NDEF);
    }

    #[test]
    fn read_past_end_fails_whole() {
        let mut r = Responder::new();
        select_app(&mut r);
        let _ = r.handle(Command::SelectFile(FileId::Ndef), &files());

        // One byte past the end: no partial data, just the status word.
        let resp = r.handle(
            Command::ReadBinary {
                offset: 0,
                le: NDEF.len() + 1,
            },
            &files(),
        );
        assert_eq!(resp.as_slice(), [0x6A, 0x82]);

        let resp = r.handle(
            Command::ReadBinary {
                offset: NDEF.len() as u16,
                le: 1,
            },
            &files(),
        );
        assert_eq!(resp.as_slice(), [0x6A, 0x82]);
    }

    #[test]
    fn unknown_command_fails_and_keeps_state() {
        let mut r = Responder::new();
        select_app(&mut r);
        let resp = r.handle(Command::Unknown, &files());
        assert_eq!(resp.as_slice(), [0x6A, 0x82]);
        assert_eq!(r.state(), SelectionState::ApplicationSelected);
    }

    #[test]
    fn reset_drops_selection() {
        let mut r = Responder::new();
        select_app(&mut r);
        let _ = r.handle(Command::SelectFile(FileId::Ndef), &files());

        r.reset();
        assert_eq!(r.state(), SelectionState::NoFileSelected);
        let resp = r.handle(Command::ReadBinary { offset: 0, le: 2 }, &files());
        assert_eq!(resp.as_slice(), [0x6A, 0x82]);
    }
}
