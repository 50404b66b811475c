//! Type 4 Tag Capability Container.
//!
//! The CC is the first file a reader retrieves: it announces the mapping
//! version, the APDU sizes the tag supports, and where the NDEF file
//! lives, how big it may get, and whether it is writable.  Its fields are
//! a contract — the NDEF file-control TLV must name the identifier the
//! responder actually serves, and the declared maximum must bound every
//! NDEF file the encoder can produce for an accepted URL.
//!
//! ```text
//! ┌───────┬─────┬───────┬───────┬────┬────┬───────┬───────┬────┬────┐
//! │ CCLEN │ ver │ MLe   │ MLc   │ 04 │ 06 │ E1 04 │ max   │ rd │ wr │
//! │ 2B    │ 1B  │ 2B    │ 2B    │ tag│ len│ file  │ NDEF  │ 00 │ FF │
//! └───────┴─────┴───────┴───────┴────┴────┴───────┴───────┴────┴────┘
//! ```

use crate::apdu::command::FileId;
use crate::config::TagConfig;

/// Serialized CC file length.  CCLEN announces the same value.
pub const CC_FILE_LEN: usize = 15;

/// Type 4 Tag mapping version 2.0.
pub const MAPPING_VERSION_2_0: u8 = 0x20;

/// NDEF file read access: granted without security.
pub const READ_ACCESS_GRANTED: u8 = 0x00;

/// NDEF file write access: denied — this tag is read-only.
pub const WRITE_ACCESS_DENIED: u8 = 0xFF;

/// NDEF file-control TLV tag and value length.
const NDEF_FILE_CONTROL_TAG: u8 = 0x04;
const NDEF_FILE_CONTROL_LEN: u8 = 0x06;

/// Typed view of the Capability Container before serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityContainer {
    pub cclen: u16,
    pub mapping_version: u8,
    pub max_r_apdu_len: u16,
    pub max_c_apdu_len: u16,
    pub ndef_file_id: [u8; 2],
    pub max_ndef_file_len: u16,
    pub read_access: u8,
    pub write_access: u8,
}

impl CapabilityContainer {
    /// Build the CC this tag announces for a given configuration.
    pub fn from_config(config: &TagConfig) -> Self {
        Self {
            cclen: CC_FILE_LEN as u16,
            mapping_version: MAPPING_VERSION_2_0,
            max_r_apdu_len: config.max_r_apdu_len,
            max_c_apdu_len: config.max_c_apdu_len,
            ndef_file_id: FileId::Ndef.to_bytes(),
            max_ndef_file_len: config.max_ndef_file_len,
            read_access: READ_ACCESS_GRANTED,
            write_access: WRITE_ACCESS_DENIED,
        }
    }

    /// Serialize to the exact 15-byte wire image.
    pub fn to_bytes(&self) -> [u8; CC_FILE_LEN] {
        let cclen = self.cclen.to_be_bytes();
        let mle = self.max_r_apdu_len.to_be_bytes();
        let mlc = self.max_c_apdu_len.to_be_bytes();
        let max_ndef = self.max_ndef_file_len.to_be_bytes();
        [
            cclen[0],
            cclen[1],
            self.mapping_version,
            mle[0],
            mle[1],
            mlc[0],
            mlc[1],
            NDEF_FILE_CONTROL_TAG,
            NDEF_FILE_CONTROL_LEN,
            self.ndef_file_id[0],
            self.ndef_file_id[1],
            max_ndef[0],
            max_ndef[1],
            self.read_access,
            self.write_access,
        ]
    }
}
