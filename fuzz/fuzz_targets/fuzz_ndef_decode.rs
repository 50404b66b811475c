//! Fuzz target: `ndef::decode_file`
//!
//! The parser exists for diagnostics on captured traffic, so it must
//! tolerate anything: arbitrary input either parses or returns a typed
//! error, and whatever this crate encodes must parse back to the same
//! URL.
//!
//! cargo fuzz run fuzz_ndef_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use taplink::ndef;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes: typed error or success, never a panic.
    let _ = ndef::decode_file(data);

    // Round-trip whatever valid UTF-8 fits a short record.
    if let Ok(url) = core::str::from_utf8(data) {
        if url.len() <= ndef::MAX_SHORT_RECORD_URL_LEN {
            let parsed = ndef::decode_file(&ndef::encode_file(url)).expect("own encoding parses");
            assert_eq!(parsed.uri, url);
        }
    }
});
