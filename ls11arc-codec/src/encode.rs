//! Entry encoding.

use crate::header::{EntryHeader, HEADER_LEN, PAYLOAD_START};
use crate::lzss::{self, MIN_MATCH, Token};
use crate::table::TranslationTable;
use ls11arc_core::bitstream::BitWriter;
use ls11arc_core::error::{Ls11Error, Result};
use ls11arc_core::ucode;

/// Distances are biased past the literal index range: codes `0..=255`
/// are table indices, `256 + d` is a back-reference of distance `d`.
const DISTANCE_BIAS: u32 = 256;

/// Encode a raw buffer into one self-contained entry (header + payload).
///
/// The translation table is frequency-ordered over `raw` so the most
/// common bytes get the shortest literal codes.
pub fn encode(raw: &[u8]) -> Result<Vec<u8>> {
    encode_with_table(raw, &TranslationTable::for_data(raw))
}

/// Encode with a caller-supplied table.
///
/// The container uses this to impose one shared table on every entry of
/// an archive.
pub fn encode_with_table(raw: &[u8], table: &TranslationTable) -> Result<Vec<u8>> {
    if raw.len() > u32::MAX as usize {
        return Err(Ls11Error::invalid_header(
            "input exceeds the 32-bit size field",
        ));
    }

    // Worst case is every byte a long-level literal, about two bytes of
    // code per input byte.
    let capacity = HEADER_LEN + raw.len() * 2 + 16;
    let mut writer = BitWriter::try_with_capacity(capacity)?;
    writer.set_position(PAYLOAD_START);

    for token in lzss::tokenize(raw) {
        match token {
            Token::Literal(byte) => {
                ucode::encode(&mut writer, u32::from(table.index_of(byte)));
            }
            Token::Match { length, distance } => {
                ucode::encode(&mut writer, distance + DISTANCE_BIAS);
                ucode::encode(&mut writer, length - MIN_MATCH as u32);
            }
        }
    }

    let total_len = writer.byte_len();
    let mut out = writer.into_vec();
    debug_assert_eq!(out.len(), total_len);

    let header = EntryHeader {
        table: *table.as_bytes(),
        compressed_len: (total_len - HEADER_LEN) as u32,
        expanded_len: raw.len() as u32,
        payload_start: PAYLOAD_START as u32,
    };
    header.write_into(&mut out[..HEADER_LEN]);

    Ok(out)
}
