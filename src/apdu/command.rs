//! Command APDU decoding.
//!
//! Wire constants for the NFC Forum Type 4 Tag application and a total
//! decoder from raw command bytes to a tagged [`Command`].  The decoder
//! matches structure (header fields, Lc, payload), not whole-array
//! equality, so the optional trailing Le byte some reader stacks append
//! to the SELECT AID command is accepted in both forms.

/// Inter-industry class byte used by every command this tag understands.
const CLA_ISO: u8 = 0x00;

/// SELECT instruction.
const INS_SELECT: u8 = 0xA4;

/// READ BINARY instruction.
const INS_READ_BINARY: u8 = 0xB0;

/// SELECT P1: by DF name (application identifier).
const P1_SELECT_BY_NAME: u8 = 0x04;

/// SELECT P1: by file identifier.
const P1_SELECT_BY_FILE_ID: u8 = 0x00;

/// SELECT P2 for by-name selection: first or only occurrence.
const P2_FIRST_OR_ONLY: u8 = 0x00;

/// SELECT P2 for by-file-id selection: first occurrence, no FCI.
const P2_NO_FCI: u8 = 0x0C;

/// Registered application identifier of the Type 4 Tag NDEF application.
pub const NDEF_APPLICATION_AID: [u8; 7] = [0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01];

/// Command header length: CLA, INS, P1, P2.
const HEADER_LEN: usize = 4;

/// An absent or zero Le conventionally requests 256 bytes.
pub const READ_BINARY_DEFAULT_LE: usize = 256;

// ---------------------------------------------------------------------------
// Status words
// ---------------------------------------------------------------------------

/// The 2-byte trailer of every response APDU.  This is the entire error
/// channel to the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum StatusWord {
    /// Command completed: `90 00`.
    Success = 0x9000,
    /// File or application not found (also used for any command this tag
    /// rejects): `6A 82`.
    FileNotFound = 0x6A82,
}

impl StatusWord {
    /// Big-endian wire bytes of this status word.
    pub const fn to_bytes(self) -> [u8; 2] {
        (self as u16).to_be_bytes()
    }
}

// ---------------------------------------------------------------------------
// File identifiers
// ---------------------------------------------------------------------------

/// The two elementary files this tag exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileId {
    /// Capability Container file, id `E1 03`.
    CapabilityContainer,
    /// NDEF file, id `E1 04`.
    Ndef,
}

impl FileId {
    /// Wire bytes of the file identifier.
    pub const fn to_bytes(self) -> [u8; 2] {
        match self {
            Self::CapabilityContainer => [0xE1, 0x03],
            Self::Ndef => [0xE1, 0x04],
        }
    }

    /// Map a wire identifier to a known file.
    pub fn from_bytes(bytes: [u8; 2]) -> Option<Self> {
        match bytes {
            [0xE1, 0x03] => Some(Self::CapabilityContainer),
            [0xE1, 0x04] => Some(Self::Ndef),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tagged command
// ---------------------------------------------------------------------------

/// One decoded command APDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// SELECT by DF name carrying the Type 4 Tag NDEF application AID.
    SelectApplication,
    /// SELECT by file identifier of a file this tag serves.
    SelectFile(FileId),
    /// SELECT by file identifier of a file this tag does not have.
    SelectUnknownFile([u8; 2]),
    /// READ BINARY at `offset`, requesting `le` bytes.
    ReadBinary { offset: u16, le: usize },
    /// Anything else: unknown instruction, malformed structure, truncated
    /// header, foreign AID, or an empty buffer.
    Unknown,
}

impl Command {
    /// Decode a raw command APDU.  Total — never fails; anything that is
    /// not a recognised, well-formed command becomes [`Command::Unknown`].
    pub fn parse(apdu: &[u8]) -> Self {
        if apdu.len() < HEADER_LEN || apdu[0] != CLA_ISO {
            return Self::Unknown;
        }

        match (apdu[1], apdu[2], apdu[3]) {
            (INS_SELECT, P1_SELECT_BY_NAME, P2_FIRST_OR_ONLY) => parse_select_application(apdu),
            (INS_SELECT, P1_SELECT_BY_FILE_ID, P2_NO_FCI) => parse_select_file(apdu),
            (INS_READ_BINARY, p1, p2) => parse_read_binary(p1, p2, apdu),
            _ => Self::Unknown,
        }
    }
}

fn parse_select_application(apdu: &[u8]) -> Command {
    // Body: Lc (must be 7), the AID, then optionally a single Le byte.
    // Reader stacks disagree on whether the trailing Le is present, so
    // both lengths are accepted.
    let body = &apdu[HEADER_LEN..];
    let with_le = NDEF_APPLICATION_AID.len() + 2;
    let without_le = NDEF_APPLICATION_AID.len() + 1;
    if body.len() != with_le && body.len() != without_le {
        return Command::Unknown;
    }
    if body[0] as usize != NDEF_APPLICATION_AID.len() {
        return Command::Unknown;
    }
    if body[1..=NDEF_APPLICATION_AID.len()] != NDEF_APPLICATION_AID {
        // Some other application's AID: not found, handled downstream.
        return Command::Unknown;
    }
    Command::SelectApplication
}

fn parse_select_file(apdu: &[u8]) -> Command {
    // Body: Lc (must be 2) followed by exactly the 2-byte file id.
    let body = &apdu[HEADER_LEN..];
    if body.len() != 3 || body[0] != 2 {
        return Command::Unknown;
    }
    let id = [body[1], body[2]];
    match FileId::from_bytes(id) {
        Some(file) => Command::SelectFile(file),
        None => Command::SelectUnknownFile(id),
    }
}

fn parse_read_binary(p1: u8, p2: u8, apdu: &[u8]) -> Command {
    let offset = u16::from_be_bytes([p1, p2]);
    let le = match apdu.len() {
        // Absent Le: conventionally a 256-byte request.
        4 => READ_BINARY_DEFAULT_LE,
        5 => match apdu[4] {
            0x00 => READ_BINARY_DEFAULT_LE,
            le => le as usize,
        },
        // Longer forms (extended length, or a data field) are out of
        // contract for this tag.
        _ => return Command::Unknown,
    };
    Command::ReadBinary { offset, le }
}
