//! Location records and the archive FAT.
//!
//! Each entry of an archive is placed by a 12-byte record: compressed
//! length, expanded length, and the absolute offset of its payload. The
//! record list starts right after the shared header and ends at a record
//! whose first word is zero.

use ls11arc_core::error::{Ls11Error, Result};

/// Size of one record on disk.
pub const RECORD_LEN: usize = 12;

/// Offset of the first record, right after the shared header.
pub const FAT_OFFSET: usize = 0x110;

/// Placement of one entry inside an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationRecord {
    /// Compressed length in bytes, entry header excluded.
    pub compressed_len: u32,
    /// Expanded (original) length in bytes.
    pub expanded_len: u32,
    /// Absolute offset of the compressed bytes within the archive.
    pub start_offset: u32,
}

impl LocationRecord {
    /// Parse one 12-byte big-endian record.
    pub fn from_bytes(bytes: &[u8; RECORD_LEN]) -> Self {
        Self {
            compressed_len: u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            expanded_len: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            start_offset: u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        }
    }

    /// Serialize to the 12-byte big-endian on-disk form.
    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let mut out = [0u8; RECORD_LEN];
        out[0..4].copy_from_slice(&self.compressed_len.to_be_bytes());
        out[4..8].copy_from_slice(&self.expanded_len.to_be_bytes());
        out[8..12].copy_from_slice(&self.start_offset.to_be_bytes());
        out
    }

    /// Whether the entry is stored verbatim rather than compressed.
    pub fn is_stored(&self) -> bool {
        self.compressed_len == self.expanded_len
    }

    /// Space saved by compression, as a percentage of the expanded size.
    pub fn space_savings(&self) -> f64 {
        if self.expanded_len == 0 {
            return 0.0;
        }
        (1.0 - f64::from(self.compressed_len) / f64::from(self.expanded_len)) * 100.0
    }
}

/// Read the record list starting at [`FAT_OFFSET`].
///
/// The list ends at a record whose first word is zero; a list that runs
/// off the end of the buffer without a terminator is malformed.
pub fn read_record_list(data: &[u8]) -> Result<Vec<LocationRecord>> {
    let mut records = Vec::new();
    let mut pos = FAT_OFFSET;
    loop {
        let word = data.get(pos..pos + 4).ok_or_else(|| {
            Ls11Error::malformed_record(records.len(), "record list is not terminated")
        })?;
        let compressed_len = u32::from_be_bytes([word[0], word[1], word[2], word[3]]);
        if compressed_len == 0 {
            break;
        }

        let rest = data.get(pos + 4..pos + RECORD_LEN).ok_or_else(|| {
            Ls11Error::malformed_record(records.len(), "record is cut off mid-field")
        })?;
        records.push(LocationRecord {
            compressed_len,
            expanded_len: u32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]),
            start_offset: u32::from_be_bytes([rest[4], rest[5], rest[6], rest[7]]),
        });
        pos += RECORD_LEN;
    }
    Ok(records)
}
