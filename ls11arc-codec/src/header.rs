//! The fixed per-entry header.
//!
//! Every self-contained entry starts with a 0x120-byte prologue: the
//! magic tag, a reserved region, the translation table in its stored
//! direction, and three big-endian size/offset fields. An archive
//! carries the same prologue once at its front, shared by all entries.

use ls11arc_core::error::{Ls11Error, Result};

/// The 4-byte magic tag.
pub const MAGIC: [u8; 4] = *b"LS11";

/// Total length of the fixed prologue.
pub const HEADER_LEN: usize = 0x120;

/// Offset of the translation table within the prologue.
pub const TABLE_OFFSET: usize = 0x10;

/// Offset of the three size/offset fields.
pub const SIZES_OFFSET: usize = 0x110;

/// Payload start offset written by the encoder.
pub const PAYLOAD_START: usize = 0x120;

/// Parsed form of the entry prologue.
#[derive(Debug, Clone)]
pub struct EntryHeader {
    /// Translation table in the stored (decode) direction.
    pub table: [u8; 256],
    /// Compressed payload length, header excluded.
    pub compressed_len: u32,
    /// Original (expanded) length.
    pub expanded_len: u32,
    /// Offset of the first payload byte.
    pub payload_start: u32,
}

impl EntryHeader {
    /// Parse a header from the front of `data`.
    ///
    /// The magic tag is validated before anything else is read, so a
    /// buffer that is not an entry is rejected without touching the
    /// payload.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(Ls11Error::invalid_header(format!(
                "entry of {} bytes is shorter than the magic tag",
                data.len()
            )));
        }
        let found = [data[0], data[1], data[2], data[3]];
        if found != MAGIC {
            return Err(Ls11Error::invalid_magic(MAGIC, found));
        }
        if data.len() < HEADER_LEN {
            return Err(Ls11Error::invalid_header(format!(
                "entry of {} bytes is shorter than the {HEADER_LEN}-byte header",
                data.len()
            )));
        }

        let mut table = [0u8; 256];
        table.copy_from_slice(&data[TABLE_OFFSET..TABLE_OFFSET + 256]);

        let f = &data[SIZES_OFFSET..];
        let compressed_len = u32::from_be_bytes([f[0], f[1], f[2], f[3]]);
        let expanded_len = u32::from_be_bytes([f[4], f[5], f[6], f[7]]);
        let payload_start = u32::from_be_bytes([f[8], f[9], f[10], f[11]]);

        Ok(Self {
            table,
            compressed_len,
            expanded_len,
            payload_start,
        })
    }

    /// Write the prologue into the first `HEADER_LEN` bytes of `out`.
    ///
    /// The reserved regions are cleared, so `out` does not need to be
    /// zeroed first.
    pub fn write_into(&self, out: &mut [u8]) {
        let out = &mut out[..HEADER_LEN];
        out[..4].copy_from_slice(&MAGIC);
        out[4..TABLE_OFFSET].fill(0);
        out[TABLE_OFFSET..TABLE_OFFSET + 256].copy_from_slice(&self.table);
        out[SIZES_OFFSET..SIZES_OFFSET + 4].copy_from_slice(&self.compressed_len.to_be_bytes());
        out[SIZES_OFFSET + 4..SIZES_OFFSET + 8].copy_from_slice(&self.expanded_len.to_be_bytes());
        out[SIZES_OFFSET + 8..SIZES_OFFSET + 12].copy_from_slice(&self.payload_start.to_be_bytes());
        out[SIZES_OFFSET + 12..HEADER_LEN].fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TranslationTable;

    fn sample_header() -> EntryHeader {
        EntryHeader {
            table: *TranslationTable::identity().as_bytes(),
            compressed_len: 123,
            expanded_len: 4567,
            payload_start: PAYLOAD_START as u32,
        }
    }

    #[test]
    fn test_write_parse_roundtrip() {
        let header = sample_header();
        let mut buf = vec![0xAAu8; HEADER_LEN];
        header.write_into(&mut buf);

        let parsed = EntryHeader::parse(&buf).unwrap();
        assert_eq!(parsed.table, header.table);
        assert_eq!(parsed.compressed_len, 123);
        assert_eq!(parsed.expanded_len, 4567);
        assert_eq!(parsed.payload_start, PAYLOAD_START as u32);
        // Reserved regions are cleared
        assert!(buf[4..TABLE_OFFSET].iter().all(|&b| b == 0));
        assert!(buf[SIZES_OFFSET + 12..HEADER_LEN].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_size_fields_are_big_endian() {
        let header = sample_header();
        let mut buf = vec![0u8; HEADER_LEN];
        header.write_into(&mut buf);
        assert_eq!(&buf[SIZES_OFFSET..SIZES_OFFSET + 4], &[0, 0, 0, 123]);
        assert_eq!(
            &buf[SIZES_OFFSET + 4..SIZES_OFFSET + 8],
            &4567u32.to_be_bytes()
        );
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut buf = vec![0u8; HEADER_LEN];
        sample_header().write_into(&mut buf);
        buf[0] = b'X';
        assert!(matches!(
            EntryHeader::parse(&buf),
            Err(Ls11Error::InvalidMagic { .. })
        ));
    }

    #[test]
    fn test_short_buffer_rejected() {
        assert!(matches!(
            EntryHeader::parse(b"LS"),
            Err(Ls11Error::InvalidHeader { .. })
        ));
        assert!(matches!(
            EntryHeader::parse(b"LS11 short"),
            Err(Ls11Error::InvalidHeader { .. })
        ));
    }
}
