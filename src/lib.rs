//! TapLink tag-emulation core.
//!
//! Everything needed to answer a contactless reader as an NFC Forum
//! Type 4 Tag serving a single, dynamically updatable URL: NDEF
//! encoding, the Capability Container, the APDU selection state machine,
//! and the thread-safe content store.  The platform shell (HCE service
//! registration, UI, method-channel plumbing) lives outside this crate
//! and drives it through [`app::service::TagService`].

#![deny(unused_must_use)]

pub mod apdu;
pub mod app;
pub mod cc;
pub mod config;
pub mod content;
pub mod ndef;

mod error;

pub use error::{Error, NdefError, Result, UrlError};

// Built-in port adapters.
pub mod adapters;
