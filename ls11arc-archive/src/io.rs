//! Whole-file helpers.
//!
//! The container works on whole in-memory buffers; these wrappers are
//! the only place it touches the filesystem.

use ls11arc_core::error::Result;
use std::fs;
use std::io;
use std::path::Path;

/// Read an entire file into memory.
pub fn read_whole_file(path: &Path) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Size of a file, bounded to the 32-bit range the format can address.
pub fn file_size(path: &Path) -> Result<u32> {
    let len = fs::metadata(path)?.len();
    u32::try_from(len).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} exceeds the 32-bit size range", path.display()),
        )
        .into()
    })
}

/// Write a buffer to a file, replacing any existing content.
pub fn write_whole_file(path: &Path, bytes: &[u8]) -> Result<()> {
    Ok(fs::write(path, bytes)?)
}
