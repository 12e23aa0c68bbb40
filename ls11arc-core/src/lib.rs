//! # ls11arc Core
//!
//! Core components for the ls11arc archive library.
//!
//! This crate provides the building blocks the LS11 codec and container
//! are assembled from:
//!
//! - [`bitstream`]: explicit-cursor bit I/O for the MSB-first payload
//! - [`ucode`]: the self-delimiting universal integer code
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! ls11arc is a layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ L4: CLI                                     │
//! │     list / extract / create / info / test   │
//! ├─────────────────────────────────────────────┤
//! │ L3: Container (ls11arc-archive)             │
//! │     shared header, FAT records, pack/unpack │
//! ├─────────────────────────────────────────────┤
//! │ L2: Entry codec (ls11arc-codec)             │
//! │     translation table, back-references      │
//! ├─────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                  │
//! │     BitReader/BitWriter, universal code     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ls11arc_core::bitstream::{BitReader, BitWriter};
//! use ls11arc_core::ucode;
//!
//! let mut writer = BitWriter::new();
//! ucode::encode(&mut writer, 42);
//! let buf = writer.into_vec();
//!
//! let mut reader = BitReader::new(&buf);
//! assert_eq!(ucode::decode(&mut reader).unwrap(), 42);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod ucode;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{Ls11Error, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{Ls11Error, Result};
    pub use crate::ucode;
}
