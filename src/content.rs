//! Shared NDEF content store.
//!
//! One URL is shared process-wide: the UI sets it, any number of tap
//! sessions read it.  The derived NDEF file is recomputed on every update
//! and published as an immutable snapshot behind a mutex:
//!
//! ```text
//!  set_url ──▶ encode (off-lock) ──▶ swap Arc ──▶ snapshot() readers
//! ```
//!
//! A `READ BINARY` arriving concurrently with an update therefore
//! observes either the old or the new URL's fully-formed encoding, never
//! a torn buffer.  The mutex is held only for the pointer swap or clone —
//! encoding happens outside it.

use std::sync::{Arc, Mutex, PoisonError};

use log::debug;

use crate::error::UrlError;
use crate::ndef;

/// One published version of the shared content: the URL and its derived
/// NDEF file bytes, immutable once built.
#[derive(Debug)]
pub struct NdefSnapshot {
    url: String,
    file: Vec<u8>,
}

impl NdefSnapshot {
    fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            file: ndef::encode_file(url),
        }
    }

    /// The URL this snapshot encodes.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Complete NDEF file content: 2-byte length prefix + message.
    pub fn file(&self) -> &[u8] {
        &self.file
    }
}

/// Thread-safe store for the current URL and its NDEF encoding.
pub struct ContentStore {
    /// Declared maximum NDEF file length; updates that would exceed it
    /// are rejected before anything is published.
    max_file_len: usize,
    current: Mutex<Arc<NdefSnapshot>>,
}

impl ContentStore {
    /// Create a store with no content (canonical empty NDEF file).
    pub fn new(max_file_len: usize) -> Self {
        Self {
            max_file_len,
            current: Mutex::new(Arc::new(NdefSnapshot::new(""))),
        }
    }

    /// Replace the shared URL.  Idempotent; takes effect for the next
    /// NDEF read, including one mid-tap.
    pub fn set_url(&self, url: &str) -> Result<(), UrlError> {
        let required = ndef::encoded_file_len(url);
        if required > self.max_file_len {
            return Err(UrlError::ExceedsCapacity {
                required,
                max: self.max_file_len,
            });
        }

        // Full encode before taking the lock; the critical section is
        // just the pointer swap.
        let snapshot = Arc::new(NdefSnapshot::new(url));
        *self.lock() = snapshot;
        debug!("published NDEF file of {required} B");
        Ok(())
    }

    /// The currently published snapshot.  Holders keep a consistent view
    /// for as long as they retain the `Arc`, regardless of later updates.
    pub fn snapshot(&self) -> Arc<NdefSnapshot> {
        Arc::clone(&self.lock())
    }

    /// Declared capacity this store enforces.
    pub fn max_file_len(&self) -> usize {
        self.max_file_len
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Arc<NdefSnapshot>> {
        // A poisoned lock only means a writer panicked mid-swap; the Arc
        // inside is still a complete snapshot.
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn starts_empty() {
        let store = ContentStore::new(255);
        let snap = store.snapshot();
        assert_eq!(snap.url(), "");
        assert_eq!(snap.file(), [0x00, 0x00]);
    }

    #[test]
    fn publishes_full_encoding() {
        let store = ContentStore::new(255);
        store.set_url("https://a.co").unwrap();
        let snap = store.snapshot();
        assert_eq!(snap.url(), "https://a.co");
        assert_eq!(snap.file(), ndef::encode_file("https://a.co").as_slice());
    }

    #[test]
    fn rejects_oversize_url_and_keeps_previous() {
        let store = ContentStore::new(20);
        assert_eq!(store.max_file_len(), 20);
        store.set_url("https://a.co").unwrap();

        let err = store.set_url("https://example.com/way/too/long").unwrap_err();
        assert!(matches!(err, UrlError::ExceedsCapacity { max: 20, .. }));
        assert_eq!(store.snapshot().url(), "https://a.co");
    }

    #[test]
    fn url_at_exact_capacity_is_accepted() {
        let store = ContentStore::new(255);
        let url = "x".repeat(255 - 7);
        store.set_url(&url).unwrap();
        assert_eq!(store.snapshot().file().len(), 255);
    }

    #[test]
    fn snapshot_outlives_update() {
        let store = ContentStore::new(255);
        store.set_url("https://old.example").unwrap();
        let old = store.snapshot();
        store.set_url("https://new.example").unwrap();

        assert_eq!(old.url(), "https://old.example");
        assert_eq!(store.snapshot().url(), "https://new.example");
    }

    #[test]
    fn concurrent_updates_never_tear() {
        let a = ndef::encode_file("https://aaaa.example/pppp");
        let b = ndef::encode_file("https://bb.example/q");

        let store = Arc::new(ContentStore::new(255));
        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..500 {
                    let url = if i % 2 == 0 {
                        "https://aaaa.example/pppp"
                    } else {
                        "https://bb.example/q"
                    };
                    store.set_url(url).unwrap();
                }
            })
        };

        for _ in 0..500 {
            let file = store.snapshot().file().to_vec();
            assert!(
                file == a || file == b || file == [0x00, 0x00],
                "observed torn snapshot: {file:02X?}"
            );
        }
        writer.join().unwrap();
    }
}
