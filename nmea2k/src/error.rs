//! Error types shared by the codec, transport and bit-level helpers.
use thiserror::Error;

/// Failures raised by [`crate::bits::BitReader`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitReaderError {
    #[error("cannot read {asked} bits, only {available} left")]
    OutOfBounds { asked: usize, available: usize },
    #[error("field of {asked} bits does not fit in {max} bits")]
    TooLongForType { max: u8, asked: u16 },
    #[error("byte slice requested at non-aligned bit cursor {cursor}")]
    NonAlignedBit { cursor: usize },
}

/// Failures raised by [`crate::bits::BitWriter`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitWriterError {
    #[error("cannot write {asked} bits, only {available} left")]
    OutOfBounds { asked: usize, available: usize },
    #[error("field of {asked} bits does not fit in {max} bits")]
    TooLongForType { max: u8, asked: u16 },
    #[error("byte slice written at non-aligned bit cursor {cursor}")]
    NonAlignedBit { cursor: usize },
}

/// A payload could not be turned into a [`crate::record::PgnRecord`].
///
/// Every variant keeps the raw payload so callers can still pass the
/// message through untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unknown PGN {pgn}")]
    UnknownPgn { pgn: u32, payload: Vec<u8> },
    #[error("PGN {pgn}: payload of {len} bytes is too short for field '{field}'")]
    Truncated {
        pgn: u32,
        field: &'static str,
        len: usize,
        payload: Vec<u8>,
    },
    #[error("PGN {pgn}: invalid value in field '{field}'")]
    InvalidField {
        pgn: u32,
        field: &'static str,
        payload: Vec<u8>,
    },
}

impl DecodeError {
    /// The raw payload that failed to decode.
    pub fn payload(&self) -> &[u8] {
        match self {
            DecodeError::UnknownPgn { payload, .. }
            | DecodeError::Truncated { payload, .. }
            | DecodeError::InvalidField { payload, .. } => payload,
        }
    }

    pub fn pgn(&self) -> u32 {
        match self {
            DecodeError::UnknownPgn { pgn, .. }
            | DecodeError::Truncated { pgn, .. }
            | DecodeError::InvalidField { pgn, .. } => *pgn,
        }
    }
}

/// A record or JSON message could not be turned into CAN frames.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("unknown PGN {0} and no raw data supplied")]
    UnknownPgn(u32),
    #[error("message has no valid 'pgn' number")]
    MissingPgn,
    #[error("message is not a JSON object")]
    NotAnObject,
    #[error("field '{field}': {reason}")]
    InvalidField { field: String, reason: String },
    #[error("field '{field}': value {value} out of range")]
    OutOfRange { field: String, value: f64 },
    #[error("field '{field}': unknown lookup value '{value}'")]
    UnknownLookup { field: String, value: String },
    #[error("payload of {len} bytes exceeds the {max} byte limit for PGN {pgn}")]
    PayloadTooLong { pgn: u32, len: usize, max: usize },
    #[error("invalid CAN identifier: {0}")]
    CanId(#[from] CanIdBuildError),
    #[error("bit writer: {0}")]
    Bits(#[from] BitWriterError),
}

/// Failures while composing a 29-bit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CanIdBuildError {
    #[error("PGN {0} does not fit in 18 bits")]
    PgnTooLarge(u32),
    #[error("PDU1 PGN {0} must have a zero PS byte")]
    PsFocusMessageMustBeNull(u32),
    #[error("raw identifier {0:#X} exceeds 29 bits")]
    NotExtended(u32),
}

/// A fast-packet session was abandoned before it completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReassemblyError {
    #[error("fast packet PGN {pgn} from {source_address} timed out with {received}/{expected} frames")]
    Timeout {
        pgn: u32,
        source_address: u8,
        received: usize,
        expected: usize,
    },
    #[error("fast packet PGN {pgn} from {source_address} superseded by a new sequence")]
    Superseded { pgn: u32, source_address: u8 },
    #[error("fast packet PGN {pgn} from {source_address} evicted, too many concurrent sessions")]
    Evicted { pgn: u32, source_address: u8 },
    #[error("fast packet PGN {pgn} from {source_address}: frame index {index} outside announced length")]
    InvalidIndex {
        pgn: u32,
        source_address: u8,
        index: u8,
    },
}
