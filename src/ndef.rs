//! NDEF URI record encoding and parsing.
//!
//! Builds the byte image of the NDEF file a Type 4 Tag exposes: a 2-byte
//! big-endian length prefix followed by one short well-known URI record.
//!
//! ```text
//! ┌──────────────┬──────┬──────┬──────┬──────┬──────┬─────────────┐
//! │ NLEN (2B BE) │ 0xD1 │ 0x01 │ PLEN │ 0x55 │ 0x00 │ URL (UTF-8) │
//! └──────────────┴──────┴──────┴──────┴──────┴──────┴─────────────┘
//!                 flags   TLEN          'U'    id
//! ```
//!
//! Flags `0xD1`: message begin + message end, short record, no ID field,
//! well-known type.  Identifier code `0x00` means the URI is carried
//! literally with no abbreviation prefix.
//!
//! Encoding is a pure function of the URL — same input, byte-identical
//! output, no state.  The inverse parser exists for the round-trip law in
//! tests and for diagnostics on captured reader traffic.

use crate::error::NdefError;

/// Record flags: MB=1, ME=1, CF=0, SR=1, IL=0, TNF=0b001 (well-known).
const FLAGS_SHORT_URI: u8 = 0xD1;

/// Record type for a well-known URI record: ASCII `U`.
const TYPE_URI: u8 = 0x55;

/// URI identifier code for "no abbreviation, literal URL".
pub const URI_IDENTIFIER_NONE: u8 = 0x00;

/// Fixed bytes a short URI record adds around the URL: flags, type length,
/// payload length, type, identifier code.
pub const RECORD_OVERHEAD: usize = 5;

/// Size of the NDEF file's big-endian length prefix.
pub const FILE_PREFIX_LEN: usize = 2;

/// The canonical empty NDEF file: zero length prefix, no payload.
pub const EMPTY_FILE: [u8; FILE_PREFIX_LEN] = [0x00, 0x00];

/// Longest URL a short record can carry (payload length is one byte and
/// includes the identifier code).
pub const MAX_SHORT_RECORD_URL_LEN: usize = 254;

/// Largest NDEF file this encoder can produce.
pub const MAX_SHORT_RECORD_FILE_LEN: usize =
    FILE_PREFIX_LEN + RECORD_OVERHEAD + MAX_SHORT_RECORD_URL_LEN;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode a URL as a single-record NDEF message (no file prefix).
///
/// The URL must fit a short record; callers enforce the tag's declared
/// capacity, which is always tighter (see [`encoded_file_len`]).
pub fn encode_message(url: &str) -> Vec<u8> {
    debug_assert!(url.len() <= MAX_SHORT_RECORD_URL_LEN);

    let url_bytes = url.as_bytes();
    let mut message = Vec::with_capacity(RECORD_OVERHEAD + url_bytes.len());
    message.push(FLAGS_SHORT_URI);
    message.push(0x01); // type length
    message.push((1 + url_bytes.len()) as u8); // payload length: id code + URL
    message.push(TYPE_URI);
    message.push(URI_IDENTIFIER_NONE);
    message.extend_from_slice(url_bytes);
    message
}

/// Encode a URL as complete NDEF file content: 2-byte big-endian message
/// length followed by the message.  An empty URL yields the canonical
/// empty file `00 00`.
pub fn encode_file(url: &str) -> Vec<u8> {
    if url.is_empty() {
        return EMPTY_FILE.to_vec();
    }

    let message = encode_message(url);
    let nlen = message.len() as u16;
    let mut file = Vec::with_capacity(FILE_PREFIX_LEN + message.len());
    file.extend_from_slice(&nlen.to_be_bytes());
    file.extend_from_slice(&message);
    file
}

/// Byte length [`encode_file`] would produce for `url`, without allocating.
/// Used for capacity checks against the Capability Container's declared
/// maximum before committing an update.
pub fn encoded_file_len(url: &str) -> usize {
    if url.is_empty() {
        FILE_PREFIX_LEN
    } else {
        FILE_PREFIX_LEN + RECORD_OVERHEAD + url.len()
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// A parsed URI record: identifier code plus the literal URI string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriRecord {
    pub identifier_code: u8,
    pub uri: String,
}

/// Parse a single-record NDEF URI message (no file prefix).
pub fn decode_message(message: &[u8]) -> Result<UriRecord, NdefError> {
    if message.len() < RECORD_OVERHEAD {
        return Err(NdefError::Truncated);
    }
    if message[0] != FLAGS_SHORT_URI || message[1] != 0x01 || message[3] != TYPE_URI {
        return Err(NdefError::NotAUriRecord);
    }

    let payload_len = message[2] as usize;
    if payload_len == 0 {
        // Payload must at least carry the identifier code.
        return Err(NdefError::NotAUriRecord);
    }
    let payload = &message[4..];
    if payload.len() != payload_len {
        return Err(NdefError::LengthMismatch);
    }

    let uri = core::str::from_utf8(&payload[1..]).map_err(|_| NdefError::InvalidUtf8)?;
    Ok(UriRecord {
        identifier_code: payload[0],
        uri: uri.to_owned(),
    })
}

/// Parse complete NDEF file content (length prefix + message).
///
/// A zero length prefix decodes to the empty URI, mirroring
/// [`encode_file`] on the empty URL.
pub fn decode_file(file: &[u8]) -> Result<UriRecord, NdefError> {
    if file.len() < FILE_PREFIX_LEN {
        return Err(NdefError::Truncated);
    }

    let nlen = u16::from_be_bytes([file[0], file[1]]) as usize;
    let body = &file[FILE_PREFIX_LEN..];
    if body.len() != nlen {
        return Err(NdefError::LengthMismatch);
    }
    if nlen == 0 {
        return Ok(UriRecord {
            identifier_code: URI_IDENTIFIER_NONE,
            uri: String::new(),
        });
    }
    decode_message(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_yields_canonical_empty_file() {
        assert_eq!(encode_file(""), vec![0x00, 0x00]);
    }

    #[test]
    fn short_url_byte_layout() {
        // Byte positions per the Type 4 Tag NDEF file layout.
        let file = encode_file("https://a.co");
        assert_eq!(file[2], 0xD1, "record flags");
        assert_eq!(file[3], 0x01, "type length");
        assert_eq!(file[4], (1 + "https://a.co".len()) as u8, "payload length");
        assert_eq!(file[5], 0x55, "type 'U'");
        assert_eq!(file[6], 0x00, "identifier code");
        assert_eq!(&file[7..], b"https://a.co");
    }

    #[test]
    fn length_prefix_matches_message() {
        let url = "https://example.com/some/share";
        let file = encode_file(url);
        let nlen = u16::from_be_bytes([file[0], file[1]]) as usize;
        assert_eq!(nlen, file.len() - FILE_PREFIX_LEN);
        assert_eq!(nlen, encode_message(url).len());
    }

    #[test]
    fn encoded_file_len_agrees_with_encoder() {
        for url in ["", "a", "https://a.co", "https://example.com/x?q=1"] {
            assert_eq!(encoded_file_len(url), encode_file(url).len(), "url={url:?}");
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        let url = "https://example.com/files/abc";
        assert_eq!(encode_file(url), encode_file(url));
    }

    #[test]
    fn round_trip_preserves_url() {
        let url = "https://example.com/share/42?k=v";
        let parsed = decode_file(&encode_file(url)).unwrap();
        assert_eq!(parsed.uri, url);
        assert_eq!(parsed.identifier_code, URI_IDENTIFIER_NONE);
    }

    #[test]
    fn empty_file_decodes_to_empty_url() {
        let parsed = decode_file(&EMPTY_FILE).unwrap();
        assert_eq!(parsed.uri, "");
    }

    #[test]
    fn decode_rejects_truncated_prefix() {
        assert_eq!(decode_file(&[0x00]), Err(NdefError::Truncated));
    }

    #[test]
    fn decode_rejects_prefix_mismatch() {
        let mut file = encode_file("https://a.co");
        file[1] = file[1].wrapping_add(1);
        assert_eq!(decode_file(&file), Err(NdefError::LengthMismatch));
    }

    #[test]
    fn decode_rejects_text_record() {
        // A text record ('T') must not parse as a URI record.
        let mut file = encode_file("https://a.co");
        file[5] = 0x54;
        assert_eq!(decode_file(&file), Err(NdefError::NotAUriRecord));
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let mut file = encode_file("https://a.co");
        let last = file.len() - 1;
        file[last] = 0xFF;
        assert_eq!(decode_file(&file), Err(NdefError::InvalidUtf8));
    }
}
