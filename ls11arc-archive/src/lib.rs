//! # ls11arc Archive
//!
//! Container support for LS11 (`.nb6`) archives.
//!
//! An LS11 archive bundles many independently compressed payloads behind
//! one shared translation table:
//!
//! ```text
//! 0x000  4    magic "LS11"
//! 0x004  12   reserved (zero)
//! 0x010  256  shared translation table
//! 0x110  location records, 12 bytes each (comp len, expanded len, offset)
//!        4    zero separator
//!        concatenated bit-packed payloads
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ls11arc_archive::{Ls11Archive, pack};
//!
//! let entries = vec![b"first entry".to_vec(), b"second entry".to_vec()];
//! let image = pack(&entries).unwrap();
//!
//! let archive = Ls11Archive::parse(&image).unwrap();
//! assert_eq!(archive.extract_all().unwrap(), entries);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod io;
pub mod record;

// Re-exports
pub use archive::{Ls11Archive, pack, pack_to_file};
pub use record::{FAT_OFFSET, LocationRecord, RECORD_LEN, read_record_list};
