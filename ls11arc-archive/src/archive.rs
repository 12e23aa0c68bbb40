//! The LS11 container: parse, extract, pack.
//!
//! An archive is one shared 0x110-byte prologue (magic, reserved bytes,
//! translation table), a zero-terminated list of location records, and
//! the concatenated bit-packed payloads. Payloads carry no per-entry
//! header in the archive itself; before decoding, each entry is staged
//! back into the self-contained form the codec expects.

use crate::io;
use crate::record::{FAT_OFFSET, LocationRecord, RECORD_LEN, read_record_list};
use ls11arc_codec::{
    HEADER_LEN, MAGIC, PAYLOAD_START, TABLE_OFFSET, TranslationTable, decode, encode_with_table,
};
use ls11arc_core::error::{Ls11Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed LS11 archive over a borrowed byte buffer.
///
/// Records are validated lazily, at extraction time, so an archive with
/// a bad record still yields every entry before the offending one.
#[derive(Debug)]
pub struct Ls11Archive<'a> {
    /// The whole archive image.
    data: &'a [u8],
    /// Location records, in archive order.
    records: Vec<LocationRecord>,
}

impl<'a> Ls11Archive<'a> {
    /// Parse the shared header and the record list.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        Self::check_prologue(data)?;
        let records = read_record_list(data)?;
        Ok(Self { data, records })
    }

    /// Adopt a record list parsed elsewhere.
    ///
    /// The shared prologue is still validated; the records are taken as
    /// given and checked individually at extraction time.
    pub fn with_records(data: &'a [u8], records: Vec<LocationRecord>) -> Result<Self> {
        Self::check_prologue(data)?;
        Ok(Self { data, records })
    }

    fn check_prologue(data: &[u8]) -> Result<()> {
        if data.len() < 4 {
            return Err(Ls11Error::invalid_header(format!(
                "archive of {} bytes is shorter than the magic tag",
                data.len()
            )));
        }
        let found = [data[0], data[1], data[2], data[3]];
        if found != MAGIC {
            return Err(Ls11Error::invalid_magic(MAGIC, found));
        }
        if data.len() < FAT_OFFSET + 4 {
            return Err(Ls11Error::invalid_header(format!(
                "archive of {} bytes is shorter than the shared header",
                data.len()
            )));
        }
        Ok(())
    }

    /// Location records, in archive order.
    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the archive holds no entries.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The shared translation table bytes.
    pub fn table_bytes(&self) -> &[u8] {
        &self.data[TABLE_OFFSET..FAT_OFFSET]
    }

    /// Validate record `index` and slice its compressed bytes.
    fn entry_slice(&self, index: usize) -> Result<&'a [u8]> {
        let record = self.records[index];
        if record.expanded_len == 0 {
            return Err(Ls11Error::malformed_record(
                index,
                "expanded length is zero",
            ));
        }
        let start = record.start_offset as usize;
        start
            .checked_add(record.compressed_len as usize)
            .and_then(|end| self.data.get(start..end))
            .ok_or_else(|| {
                Ls11Error::malformed_record(
                    index,
                    format!(
                        "compressed bytes at {start:#x}+{} exceed archive of {} bytes",
                        record.compressed_len,
                        self.data.len()
                    ),
                )
            })
    }

    /// Rebuild the self-contained entry image the codec expects: shared
    /// prologue, the record with its offset field rewritten to the fixed
    /// payload start, the zero separator, then the payload bytes.
    fn stage_entry(&self, record: LocationRecord, payload: &[u8]) -> Result<Vec<u8>> {
        let total = HEADER_LEN + payload.len();
        let mut staged: Vec<u8> = Vec::new();
        staged
            .try_reserve_exact(total)
            .map_err(|_| Ls11Error::allocation(total))?;

        staged.extend_from_slice(&self.data[..FAT_OFFSET]);
        let staged_record = LocationRecord {
            start_offset: PAYLOAD_START as u32,
            ..record
        };
        staged.extend_from_slice(&staged_record.to_bytes());
        staged.extend_from_slice(&[0u8; 4]);
        staged.extend_from_slice(payload);
        Ok(staged)
    }

    /// Decode one entry to its raw bytes.
    ///
    /// Entries stored verbatim (`compressed_len == expanded_len`) are
    /// copied without running the codec.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the end of [`records`](Self::records).
    pub fn extract(&self, index: usize) -> Result<Vec<u8>> {
        let record = self.records[index];
        let payload = self.entry_slice(index)?;

        if record.is_stored() {
            let mut out: Vec<u8> = Vec::new();
            out.try_reserve_exact(payload.len())
                .map_err(|_| Ls11Error::allocation(payload.len()))?;
            out.extend_from_slice(payload);
            return Ok(out);
        }

        let staged = self.stage_entry(record, payload)?;
        decode(&staged, record.expanded_len).map_err(|e| Ls11Error::entry_decode(index, e))
    }

    /// Decode every entry, in record order.
    ///
    /// The first failure aborts the whole operation; no entry is ever
    /// silently skipped.
    pub fn extract_all(&self) -> Result<Vec<Vec<u8>>> {
        let mut out = Vec::with_capacity(self.records.len());
        for index in 0..self.records.len() {
            out.push(self.extract(index)?);
        }
        Ok(out)
    }

    /// Decode every entry to `<dir>/<stem>.NNN` files.
    ///
    /// Directory creation is idempotent. A failure aborts the operation,
    /// but files already written for earlier entries are left in place.
    pub fn extract_to_dir(&self, dir: &Path, stem: &str) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.records.len());
        for index in 0..self.records.len() {
            let raw = self.extract(index)?;
            let path = dir.join(format!("{stem}.{index:03}"));
            io::write_whole_file(&path, &raw)?;
            written.push(path);
        }
        Ok(written)
    }
}

/// Compress `entries` into a complete archive image.
///
/// Every entry shares one translation table, frequency-ordered over all
/// inputs. An entry whose encoded payload is not smaller than its input
/// is stored verbatim, which also keeps the `compressed == expanded`
/// stored-entry marker unambiguous. Any failure aborts with no partial
/// result.
pub fn pack<T: AsRef<[u8]>>(entries: &[T]) -> Result<Vec<u8>> {
    let mut counts = [0u64; 256];
    for (index, entry) in entries.iter().enumerate() {
        let raw = entry.as_ref();
        if raw.is_empty() {
            return Err(Ls11Error::malformed_record(
                index,
                "refusing to pack an empty entry",
            ));
        }
        for &byte in raw {
            counts[byte as usize] += 1;
        }
    }
    let table = TranslationTable::from_frequencies(&counts);

    let base = FAT_OFFSET + entries.len() * RECORD_LEN + 4;
    let mut offset = base;
    let mut records = Vec::with_capacity(entries.len());
    let mut payloads: Vec<Vec<u8>> = Vec::with_capacity(entries.len());

    for entry in entries {
        let raw = entry.as_ref();
        let encoded = encode_with_table(raw, &table)?;
        let payload = &encoded[HEADER_LEN..];

        let stored = if payload.len() < raw.len() {
            payload.to_vec()
        } else {
            raw.to_vec()
        };

        records.push(LocationRecord {
            compressed_len: stored.len() as u32,
            expanded_len: raw.len() as u32,
            start_offset: offset as u32,
        });
        offset += stored.len();
        payloads.push(stored);
    }

    if offset > u32::MAX as usize {
        return Err(Ls11Error::invalid_header(
            "archive exceeds the 32-bit offset range",
        ));
    }

    let mut out: Vec<u8> = Vec::new();
    out.try_reserve_exact(offset)
        .map_err(|_| Ls11Error::allocation(offset))?;
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&[0u8; 12]);
    out.extend_from_slice(table.as_bytes());
    for record in &records {
        out.extend_from_slice(&record.to_bytes());
    }
    out.extend_from_slice(&[0u8; 4]);
    for payload in &payloads {
        out.extend_from_slice(payload);
    }
    Ok(out)
}

/// Pack and write an archive file.
///
/// The image is assembled in memory first and written in one shot, so a
/// failed pack leaves nothing on disk.
pub fn pack_to_file<T: AsRef<[u8]>>(path: &Path, entries: &[T]) -> Result<()> {
    let image = pack(entries)?;
    io::write_whole_file(path, &image)
}
