//! Tag configuration parameters.
//!
//! Everything the Capability Container declares to the reader comes from
//! here, so these values are part of the wire contract: changing them
//! changes the bytes a reader sees.  The host bridge ships configuration
//! as JSON; [`TagConfig::validate`] gates every value before a service is
//! built from it.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ndef;

/// Core tag configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagConfig {
    // --- Declared Capability Container fields ---
    /// Maximum NDEF file length in bytes (length prefix + message).
    pub max_ndef_file_len: u16,
    /// Maximum response-APDU data size the reader may request.
    pub max_r_apdu_len: u16,
    /// Maximum command-APDU size the reader may send.
    pub max_c_apdu_len: u16,

    // --- Content ---
    /// URL published at service construction; empty means the tag starts
    /// with the canonical empty NDEF file.
    pub initial_url: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            // Declared CC fields (the values the shipped tag announces)
            max_ndef_file_len: 0x00FF,
            max_r_apdu_len: 0x003B,
            max_c_apdu_len: 0x0034,

            // Content
            initial_url: String::new(),
        }
    }
}

impl TagConfig {
    /// Validate before building a service.  Rejects rather than clamps:
    /// a silently adjusted value would desynchronise the served CC bytes
    /// from what the operator configured.
    pub fn validate(&self) -> Result<()> {
        if (self.max_ndef_file_len as usize) < ndef::FILE_PREFIX_LEN {
            return Err(Error::Config("max NDEF size below empty-file minimum"));
        }
        if (self.max_ndef_file_len as usize) > ndef::MAX_SHORT_RECORD_FILE_LEN {
            return Err(Error::Config("max NDEF size beyond short-record reach"));
        }
        if (self.max_r_apdu_len as usize) < crate::cc::CC_FILE_LEN {
            // Readers assume the CC arrives in a single READ BINARY.
            return Err(Error::Config("max R-APDU cannot carry the CC file"));
        }
        if self.max_c_apdu_len < 13 {
            // The application SELECT is a 13-byte C-APDU.
            return Err(Error::Config("max C-APDU cannot carry the SELECT AID"));
        }
        if ndef::encoded_file_len(&self.initial_url) > self.max_ndef_file_len as usize {
            return Err(Error::Config("initial URL exceeds declared NDEF capacity"));
        }
        Ok(())
    }

    /// Longest URL the declared NDEF capacity admits.
    pub fn max_url_len(&self) -> usize {
        (self.max_ndef_file_len as usize)
            .saturating_sub(ndef::FILE_PREFIX_LEN + ndef::RECORD_OVERHEAD)
    }

    /// Deserialize from the JSON shape the host bridge sends.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed config JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize for read-back over the host bridge.
    pub fn to_json(&self) -> String {
        // A struct of integers and a string cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TagConfig::default().validate().is_ok());
    }

    #[test]
    fn default_matches_shipped_cc_values() {
        let c = TagConfig::default();
        assert_eq!(c.max_ndef_file_len, 0x00FF);
        assert_eq!(c.max_r_apdu_len, 0x003B);
        assert_eq!(c.max_c_apdu_len, 0x0034);
        assert!(c.initial_url.is_empty());
    }

    #[test]
    fn max_url_len_fills_capacity_exactly() {
        let c = TagConfig::default();
        let url = "x".repeat(c.max_url_len());
        assert_eq!(ndef::encoded_file_len(&url), c.max_ndef_file_len as usize);
    }

    #[test]
    fn rejects_tiny_ndef_capacity() {
        let c = TagConfig {
            max_ndef_file_len: 1,
            ..TagConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_capacity_beyond_short_record() {
        let c = TagConfig {
            max_ndef_file_len: 0x0400,
            ..TagConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_r_apdu_smaller_than_cc() {
        let c = TagConfig {
            max_r_apdu_len: 8,
            ..TagConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_oversize_initial_url() {
        let c = TagConfig {
            initial_url: "x".repeat(300),
            ..TagConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let c = TagConfig {
            initial_url: "https://example.com".into(),
            ..TagConfig::default()
        };
        let c2 = TagConfig::from_json(&c.to_json()).unwrap();
        assert_eq!(c2.max_ndef_file_len, c.max_ndef_file_len);
        assert_eq!(c2.initial_url, c.initial_url);
    }

    #[test]
    fn from_json_rejects_invalid_values() {
        let json = r#"{"max_ndef_file_len":1,"max_r_apdu_len":59,"max_c_apdu_len":52,"initial_url":""}"#;
        assert!(TagConfig::from_json(json).is_err());
    }
}
