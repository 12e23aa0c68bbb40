//! Error types for LS11 operations.
//!
//! One error type covers the whole workspace: I/O failures, allocation
//! failures on large working buffers, malformed archive structure, and
//! corrupt compressed payloads. Every failure is deterministic for the
//! same input bytes, so none of them are worth retrying — recovery means
//! fixing the input, not calling again.

use std::io;
use thiserror::Error;

/// The main error type for LS11 operations.
#[derive(Debug, Error)]
pub enum Ls11Error {
    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A working buffer could not be allocated.
    #[error("allocation of {requested} bytes failed")]
    Allocation {
        /// Number of bytes that could not be reserved.
        requested: usize,
    },

    /// Invalid magic tag in an archive or entry header.
    #[error("invalid magic: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: [u8; 4],
        /// Actual bytes found.
        found: [u8; 4],
    },

    /// A header is structurally unusable (too short, bad payload offset).
    #[error("invalid header: {message}")]
    InvalidHeader {
        /// Description of the header problem.
        message: String,
    },

    /// A location record violates a container invariant.
    #[error("malformed record {index}: {message}")]
    MalformedRecord {
        /// Index of the offending record.
        index: usize,
        /// Description of the violation.
        message: String,
    },

    /// The bitstream ended in the middle of a code.
    #[error("unexpected end of bitstream at bit {bit_position}")]
    UnexpectedEof {
        /// Bit position where the stream ran out.
        bit_position: u64,
    },

    /// A universal code exceeds the 32-bit value range.
    #[error("oversized universal code at bit {bit_position}")]
    InvalidCode {
        /// Bit position where the code started.
        bit_position: u64,
    },

    /// The payload was exhausted before the expanded length was reached.
    #[error("truncated entry: produced {produced} of {expected} bytes")]
    TruncatedEntry {
        /// Bytes decoded before the payload ran out.
        produced: usize,
        /// Expanded length the header promised.
        expected: usize,
    },

    /// A back-reference points outside the bytes already produced.
    #[error("invalid back-reference distance {distance} with only {produced} bytes produced")]
    InvalidDistance {
        /// The offending distance.
        distance: usize,
        /// Bytes produced so far.
        produced: usize,
    },

    /// An entry failed to decode during an archive operation.
    #[error("entry {index} failed to decode: {source}")]
    EntryDecode {
        /// Index of the failing record.
        index: usize,
        /// The underlying codec error.
        #[source]
        source: Box<Ls11Error>,
    },
}

/// Result type alias for LS11 operations.
pub type Result<T> = std::result::Result<T, Ls11Error>;

impl Ls11Error {
    /// Create an allocation error.
    pub fn allocation(requested: usize) -> Self {
        Self::Allocation { requested }
    }

    /// Create an invalid magic error.
    pub fn invalid_magic(expected: [u8; 4], found: [u8; 4]) -> Self {
        Self::InvalidMagic { expected, found }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a malformed record error.
    pub fn malformed_record(index: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            index,
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(bit_position: u64) -> Self {
        Self::UnexpectedEof { bit_position }
    }

    /// Create an oversized code error.
    pub fn invalid_code(bit_position: u64) -> Self {
        Self::InvalidCode { bit_position }
    }

    /// Create a truncated entry error.
    pub fn truncated_entry(produced: usize, expected: usize) -> Self {
        Self::TruncatedEntry { produced, expected }
    }

    /// Create an invalid distance error.
    pub fn invalid_distance(distance: usize, produced: usize) -> Self {
        Self::InvalidDistance { distance, produced }
    }

    /// Wrap a codec error with the index of the failing record.
    pub fn entry_decode(index: usize, source: Ls11Error) -> Self {
        Self::EntryDecode {
            index,
            source: Box::new(source),
        }
    }
}
