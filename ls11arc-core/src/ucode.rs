//! The self-delimiting universal integer code used by LS11 payloads.
//!
//! Non-negative integers are partitioned into doubling-size level
//! buckets: level 0 holds `{0, 1}`, level `m` holds
//! `[2^(m+1)-2, 2^(m+2)-2)`. A value is written as its level in unary
//! (`m` one-bits then a zero) followed by the `m+1`-bit remainder within
//! the bucket, most significant bit first. Because the unary prefix
//! announces the remainder width, the code needs no side table to find
//! where one value ends and the next begins. It is not a Huffman code
//! and assumes nothing about the value distribution.
//!
//! # Example
//!
//! ```
//! use ls11arc_core::bitstream::{BitReader, BitWriter};
//! use ls11arc_core::ucode;
//!
//! let mut writer = BitWriter::new();
//! ucode::encode(&mut writer, 0);
//! ucode::encode(&mut writer, 300);
//! let buf = writer.into_vec();
//!
//! let mut reader = BitReader::new(&buf);
//! assert_eq!(ucode::decode(&mut reader).unwrap(), 0);
//! assert_eq!(ucode::decode(&mut reader).unwrap(), 300);
//! ```

use crate::bitstream::{BitReader, BitWriter};
use crate::error::{Ls11Error, Result};

/// Append the universal code of `n` to the writer.
pub fn encode(writer: &mut BitWriter, n: u32) {
    let mut level = 0u32;
    while u64::from(n) >= (1u64 << (level + 2)) - 2 {
        level += 1;
    }

    for _ in 0..level {
        writer.write_bit(true);
    }
    writer.write_bit(false);

    let base = (1u64 << (level + 1)) - 2;
    let remainder = u64::from(n) - base;
    let width = level + 1;
    for i in (0..width).rev() {
        writer.write_bit((remainder >> i) & 1 == 1);
    }
}

/// Read one universal code from the reader.
///
/// A unary prefix implying a value beyond the 32-bit range means the
/// stream is corrupt.
pub fn decode(reader: &mut BitReader<'_>) -> Result<u32> {
    let start = reader.bit_position();

    let mut level = 0u32;
    while reader.read_bit()? {
        level += 1;
        if level > 31 {
            return Err(Ls11Error::invalid_code(start));
        }
    }

    let width = level + 1;
    let mut remainder = 0u64;
    for _ in 0..width {
        remainder = (remainder << 1) | u64::from(reader.read_bit()?);
    }

    let value = (1u64 << width) - 2 + remainder;
    u32::try_from(value).map_err(|_| Ls11Error::invalid_code(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_len(n: u32) -> u64 {
        let mut writer = BitWriter::new();
        encode(&mut writer, n);
        writer.bit_len()
    }

    fn roundtrip(n: u32) -> u32 {
        let mut writer = BitWriter::new();
        encode(&mut writer, n);
        let buf = writer.into_vec();
        let mut reader = BitReader::new(&buf);
        decode(&mut reader).unwrap()
    }

    #[test]
    fn test_small_values() {
        // Level 0: "0" + 1 remainder bit
        let mut writer = BitWriter::new();
        encode(&mut writer, 0);
        encode(&mut writer, 1);
        assert_eq!(writer.bit_len(), 4);
        let buf = writer.into_vec();
        // 00 01 -> 0b0001_0000
        assert_eq!(buf, vec![0b0001_0000]);
    }

    #[test]
    fn test_roundtrip_dense_range() {
        for n in 0..=4096 {
            assert_eq!(roundtrip(n), n);
        }
    }

    #[test]
    fn test_roundtrip_large_values() {
        for n in [
            100_000,
            16_777_215,
            1 << 30,
            u32::MAX - 1,
            u32::MAX,
        ] {
            assert_eq!(roundtrip(n), n);
        }
    }

    #[test]
    fn test_code_length_grows_at_level_boundaries() {
        // Levels start at 2^(k+1)-2: {0, 2, 6, 14, 30, 62, ...}, each
        // level costing two more bits than the previous one.
        let boundaries = [0u32, 2, 6, 14, 30, 62, 126, 254];
        for (level, &start) in boundaries.iter().enumerate() {
            let expected = 2 * (level as u64 + 1);
            assert_eq!(code_len(start), expected, "level {level} start");
            // Last value of the level has the same length
            let end = boundaries
                .get(level + 1)
                .map(|&next| next - 1)
                .unwrap_or(start + 1);
            assert_eq!(code_len(end), expected, "level {level} end");
        }
    }

    #[test]
    fn test_interleaved_values() {
        let values = [0u32, 7, 255, 256, 3, 511, 42];
        let mut writer = BitWriter::new();
        for &n in &values {
            encode(&mut writer, n);
        }
        let buf = writer.into_vec();
        let mut reader = BitReader::new(&buf);
        for &n in &values {
            assert_eq!(decode(&mut reader).unwrap(), n);
        }
    }

    #[test]
    fn test_decode_rejects_oversized_unary_run() {
        // 0xFF bytes forever would imply a level past the 32-bit range.
        let data = vec![0xFF; 8];
        let mut reader = BitReader::new(&data);
        assert!(matches!(
            decode(&mut reader),
            Err(Ls11Error::InvalidCode { .. })
        ));
    }

    #[test]
    fn test_decode_eof_mid_code() {
        // 1000_0000 decodes as level 1, remainder 00 -> value 2.
        let data = vec![0b1000_0000];
        let mut reader = BitReader::new(&data);
        assert_eq!(decode(&mut reader).unwrap(), 2);

        // A byte of ones runs out of data before the unary prefix ends.
        let ones = vec![0xFF];
        let mut reader = BitReader::new(&ones);
        assert!(matches!(
            decode(&mut reader),
            Err(Ls11Error::UnexpectedEof { .. })
        ));
    }
}
