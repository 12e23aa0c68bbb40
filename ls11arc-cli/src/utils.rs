//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use ls11arc_archive::LocationRecord;
use serde::Serialize;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// One record in machine-readable listings.
#[derive(Serialize)]
pub struct RecordInfo {
    /// Entry index within the archive.
    pub index: usize,
    /// Expanded size in bytes.
    pub expanded: u32,
    /// Compressed size in bytes.
    pub compressed: u32,
    /// Absolute payload offset.
    pub offset: u32,
    /// Whether the entry is stored verbatim.
    pub stored: bool,
}

impl RecordInfo {
    /// Build the listing row for one record.
    pub fn new(index: usize, record: &LocationRecord) -> Self {
        Self {
            index,
            expanded: record.expanded_len,
            compressed: record.compressed_len,
            offset: record.start_offset,
            stored: record.is_stored(),
        }
    }
}

/// Print records in a formatted table.
pub fn print_records(records: &[LocationRecord], verbose: bool) {
    if verbose {
        println!(
            "{:>5} {:>10} {:>10} {:>6} {:>8}  Method",
            "Entry", "Size", "Compressed", "Ratio", "Offset",
        );
        println!("{}", "-".repeat(56));

        let mut total_size = 0u64;
        let mut total_compressed = 0u64;

        for (index, record) in records.iter().enumerate() {
            let ratio = if record.expanded_len > 0 {
                format!("{:.1}%", record.space_savings())
            } else {
                "-".to_string()
            };
            let method = if record.is_stored() { "stored" } else { "ls11" };

            println!(
                "{:>5} {:>10} {:>10} {:>6} {:>8}  {}",
                index,
                record.expanded_len,
                record.compressed_len,
                ratio,
                record.start_offset,
                method,
            );

            total_size += u64::from(record.expanded_len);
            total_compressed += u64::from(record.compressed_len);
        }

        println!("{}", "-".repeat(56));
        let total_ratio = if total_size > 0 {
            (1.0 - total_compressed as f64 / total_size as f64) * 100.0
        } else {
            0.0
        };
        println!(
            "{:>5} {:>10} {:>10} {:>5.1}%          {} entries",
            "",
            total_size,
            total_compressed,
            total_ratio,
            records.len()
        );
    } else {
        for (index, record) in records.iter().enumerate() {
            println!("{:03}  {} bytes", index, record.expanded_len);
        }
    }
}
