//! Unified error types for the TapLink HCE core.
//!
//! Protocol failures are *not* represented here — the ISO 7816-4 exchange
//! reports them to the reader through status words, and the responder never
//! fails internally.  These types cover the local API surface: URL updates
//! that violate the declared tag capacity, NDEF parsing, and configuration
//! validation.  All variants are `Copy` so they can cross the host bridge
//! without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level crate error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A URL update was rejected.
    Url(UrlError),
    /// An NDEF message could not be parsed.
    Ndef(NdefError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(e) => write!(f, "url: {e}"),
            Self::Ndef(e) => write!(f, "ndef: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// URL update errors
// ---------------------------------------------------------------------------

/// Rejections from [`ContentStore::set_url`](crate::content::ContentStore::set_url).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlError {
    /// The encoded NDEF file would exceed the maximum NDEF size declared in
    /// the Capability Container.  Serving it anyway would break the tag's
    /// contract with the reader, so the update is refused outright.
    ExceedsCapacity {
        /// Byte length the NDEF file would have.
        required: usize,
        /// Declared maximum NDEF file length.
        max: usize,
    },
}

impl fmt::Display for UrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExceedsCapacity { required, max } => {
                write!(f, "NDEF file of {required} B exceeds declared max of {max} B")
            }
        }
    }
}

impl From<UrlError> for Error {
    fn from(e: UrlError) -> Self {
        Self::Url(e)
    }
}

// ---------------------------------------------------------------------------
// NDEF parse errors
// ---------------------------------------------------------------------------

/// Failures while decoding an NDEF URI message back into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NdefError {
    /// Buffer ends before the structure it announces is complete.
    Truncated,
    /// A declared length field disagrees with the actual byte count.
    LengthMismatch,
    /// The record is not a single short well-known URI record.
    NotAUriRecord,
    /// URI bytes are not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for NdefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "message truncated"),
            Self::LengthMismatch => write!(f, "declared length does not match content"),
            Self::NotAUriRecord => write!(f, "not a single well-known URI record"),
            Self::InvalidUtf8 => write!(f, "URI is not valid UTF-8"),
        }
    }
}

impl From<NdefError> for Error {
    fn from(e: NdefError) -> Self {
        Self::Ndef(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
