//! Entry decoding.

use crate::header::EntryHeader;
use crate::lzss::MIN_MATCH;
use crate::table::TranslationTable;
use ls11arc_core::bitstream::BitReader;
use ls11arc_core::error::{Ls11Error, Result};
use ls11arc_core::ucode;

/// Extra output capacity reserved beyond the expanded length.
///
/// A run copy may land past the expanded length before the loop notices
/// it is done; the margin absorbs that overshoot without reallocating.
pub const DECODE_MARGIN: usize = 50_000;

/// Codes below this are literal table indices; `256 + d` is a
/// back-reference of distance `d`.
const DISTANCE_BIAS: u32 = 256;

/// Decode one self-contained entry back into its raw bytes.
///
/// `expected_expanded` is the number of bytes to produce; the container
/// passes the location record's expanded length, which is the same value
/// the staged header carries.
pub fn decode(entry: &[u8], expected_expanded: u32) -> Result<Vec<u8>> {
    let header = EntryHeader::parse(entry)?;
    decode_payload(&header, entry, expected_expanded)
}

/// Decode a self-contained entry using the expanded length its own
/// header declares.
pub fn decode_entry(entry: &[u8]) -> Result<Vec<u8>> {
    let header = EntryHeader::parse(entry)?;
    let expanded = header.expanded_len;
    decode_payload(&header, entry, expanded)
}

fn decode_payload(header: &EntryHeader, entry: &[u8], expected_expanded: u32) -> Result<Vec<u8>> {
    let payload_start = header.payload_start as usize;
    let comp_len = header.compressed_len as usize;
    let payload_end = payload_start
        .checked_add(comp_len)
        .filter(|&end| end <= entry.len())
        .ok_or_else(|| {
            Ls11Error::invalid_header(format!(
                "payload of {comp_len} bytes at {payload_start:#x} exceeds entry of {} bytes",
                entry.len()
            ))
        })?;

    let table = TranslationTable::from_bytes(&header.table);
    let expanded = expected_expanded as usize;

    let mut out: Vec<u8> = Vec::new();
    out.try_reserve_exact(expanded + DECODE_MARGIN)
        .map_err(|_| Ls11Error::allocation(expanded + DECODE_MARGIN))?;

    let mut reader = BitReader::new(entry);
    reader.set_position(payload_start);
    while out.len() < expanded && reader.byte_pos() < payload_end {
        let code = ucode::decode(&mut reader)?;
        if code < DISTANCE_BIAS {
            out.push(table.byte_at(code as u8));
        } else {
            let distance = (code - DISTANCE_BIAS) as usize;
            if distance == 0 || distance > out.len() {
                return Err(Ls11Error::invalid_distance(distance, out.len()));
            }
            let length = ucode::decode(&mut reader)? as usize + MIN_MATCH;
            for _ in 0..length {
                let byte = out[out.len() - distance];
                out.push(byte);
            }
        }
    }

    if out.len() < expanded {
        return Err(Ls11Error::truncated_entry(out.len(), expanded));
    }
    out.truncate(expanded);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;
    use crate::header::{HEADER_LEN, PAYLOAD_START};
    use ls11arc_core::bitstream::BitWriter;

    /// Build an entry by hand: identity table, the given codes as
    /// payload.
    fn handmade_entry(codes: &[u32], expanded: u32) -> Vec<u8> {
        let mut writer = BitWriter::new();
        writer.set_position(PAYLOAD_START);
        for &code in codes {
            ucode::encode(&mut writer, code);
        }
        let total = writer.byte_len();
        let mut entry = writer.into_vec();
        let header = EntryHeader {
            table: *TranslationTable::identity().as_bytes(),
            compressed_len: (total - HEADER_LEN) as u32,
            expanded_len: expanded,
            payload_start: PAYLOAD_START as u32,
        };
        header.write_into(&mut entry[..HEADER_LEN]);
        entry
    }

    #[test]
    fn test_literal_decoding() {
        // Literal codes are table indices; identity table maps them
        // straight through.
        let entry = handmade_entry(&[7, 0, 255], 3);
        assert_eq!(decode(&entry, 3).unwrap(), vec![7, 0, 255]);
    }

    #[test]
    fn test_back_reference_run() {
        // "ab" then distance 2, length 0+3: "ababa".
        let entry = handmade_entry(&[b'a' as u32, b'b' as u32, 256 + 2, 0], 5);
        assert_eq!(decode(&entry, 5).unwrap(), b"ababa");
    }

    #[test]
    fn test_overlapping_distance_one() {
        // "x" then distance 1, length 4+3: eight x's.
        let entry = handmade_entry(&[b'x' as u32, 256 + 1, 4], 8);
        assert_eq!(decode(&entry, 8).unwrap(), vec![b'x'; 8]);
    }

    #[test]
    fn test_dangling_back_reference() {
        // A distance with no produced output behind it.
        let entry = handmade_entry(&[256 + 5, 0], 4);
        assert!(matches!(
            decode(&entry, 4),
            Err(Ls11Error::InvalidDistance {
                distance: 5,
                produced: 0
            })
        ));
    }

    #[test]
    fn test_zero_distance_rejected() {
        let entry = handmade_entry(&[b'a' as u32, 256, 0], 4);
        assert!(matches!(
            decode(&entry, 4),
            Err(Ls11Error::InvalidDistance { distance: 0, .. })
        ));
    }

    #[test]
    fn test_truncated_payload() {
        // Two literals but the header promises more bytes than the
        // payload can produce.
        let entry = handmade_entry(&[1, 2], 100);
        assert!(matches!(
            decode(&entry, 100),
            Err(Ls11Error::TruncatedEntry { expected: 100, .. })
        ));
    }

    #[test]
    fn test_run_overshoot_is_truncated() {
        // One literal then a 7-byte run, but only 5 bytes are expected:
        // the overshoot lands in the margin and is cut off.
        let entry = handmade_entry(&[b'q' as u32, 256 + 1, 4], 5);
        assert_eq!(decode(&entry, 5).unwrap(), vec![b'q'; 5]);
    }

    #[test]
    fn test_decode_entry_uses_header_length() {
        let raw = b"self-described entry";
        let entry = encode(raw).unwrap();
        assert_eq!(decode_entry(&entry).unwrap(), raw);
    }

    #[test]
    fn test_payload_bounds_validated() {
        let raw = b"bounds";
        let mut entry = encode(raw).unwrap();
        // Inflate the compressed length past the end of the buffer.
        let huge = (entry.len() as u32).to_be_bytes();
        entry[0x110..0x114].copy_from_slice(&huge);
        assert!(matches!(
            decode(&entry, raw.len() as u32),
            Err(Ls11Error::InvalidHeader { .. })
        ));
    }
}
