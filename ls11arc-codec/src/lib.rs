//! # ls11arc Codec
//!
//! The per-entry LS11 codec: a byte-remapping translation table, an
//! LZSS-style back-reference scheme, and the self-delimiting universal
//! code carrying both, behind a fixed 0x120-byte entry header.
//!
//! An encoded entry is self-contained: magic tag, translation table,
//! size fields, then the bit-packed payload. Codes below 256 are literal
//! table indices; `256 + d` starts a back-reference of distance `d`,
//! followed by one more code giving the run length minus 3.
//!
//! ## Example
//!
//! ```rust
//! use ls11arc_codec::{decode, encode};
//!
//! let raw = b"to be or not to be, to be or not";
//! let entry = encode(raw).unwrap();
//! let back = decode(&entry, raw.len() as u32).unwrap();
//! assert_eq!(back, raw);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod encode;
pub mod header;
pub mod lzss;
pub mod table;

// Re-exports
pub use decode::{DECODE_MARGIN, decode, decode_entry};
pub use encode::{encode, encode_with_table};
pub use header::{EntryHeader, HEADER_LEN, MAGIC, PAYLOAD_START, TABLE_OFFSET};
pub use lzss::{MAX_MATCH, MIN_MATCH, Token, WINDOW_SIZE, tokenize};
pub use table::TranslationTable;
