//! ISO 7816-4 APDU subsystem.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      APDU Stack                              │
//! │                                                              │
//! │  ┌───────────┐   ┌───────────┐   ┌───────────────────────┐  │
//! │  │ Host NFC  │──▶│  Command  │──▶│  Responder (selection │  │
//! │  │ stack     │   │  (decode) │   │  state machine)       │  │
//! │  └───────────┘   └───────────┘   └───────────────────────┘  │
//! │       ▲                                      │               │
//! │       └────────── response APDU ◀────────────┘               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command APDU is decoded **once** into a tagged [`Command`]
//! value, then dispatched through the responder's per-state transition
//! match.  Decoding is total: every byte sequence, including empty or
//! truncated input, maps to a variant and therefore to a defined
//! response.

pub mod command;
pub mod responder;

pub use command::{Command, FileId, StatusWord};
pub use responder::{Responder, ResponseApdu, SelectionState, TagFiles};
