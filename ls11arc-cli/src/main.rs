//! ls11arc CLI
//!
//! A Pure Rust utility for LS11 (`.nb6`) archives: the KOEI container
//! format that bundles compressed game assets behind one shared
//! translation table.

mod utils;

use clap::{Parser, Subcommand};
use ls11arc_archive::{Ls11Archive, io, pack_to_file};
use std::path::{Path, PathBuf};
use utils::{RecordInfo, create_progress_bar, print_records};

#[derive(Parser)]
#[command(name = "ls11arc")]
#[command(author, version, about = "Pure Rust LS11 (.nb6) archive utility")]
#[command(long_about = "
ls11arc reads and writes LS11 (.nb6) archives.

Examples:
  ls11arc list assets.nb6
  ls11arc list --json assets.nb6
  ls11arc extract assets.nb6 -o assets
  ls11arc create assets.nb6 face.bin map.bin
  ls11arc info assets.nb6
  ls11arc test assets.nb6
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the entries of an archive
    #[command(alias = "l")]
    List {
        /// Archive file to list
        archive: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Extract entries from an archive
    #[command(alias = "x")]
    Extract {
        /// Archive file to extract
        archive: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Output file stem (defaults to the archive file stem)
        #[arg(short, long)]
        stem: Option<String>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Show progress bar
        #[arg(short = 'P', long, default_value = "true")]
        progress: bool,
    },

    /// Create a new archive
    #[command(alias = "c")]
    Create {
        /// Output archive file
        archive: PathBuf,

        /// Files to add to the archive, one entry each, in order
        files: Vec<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about an archive
    #[command(alias = "i")]
    Info {
        /// Archive file to inspect
        archive: PathBuf,
    },

    /// Test archive integrity
    #[command(alias = "t")]
    Test {
        /// Archive file to test
        archive: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List {
            archive,
            verbose,
            json,
        } => cmd_list(&archive, verbose, json),
        Commands::Extract {
            archive,
            output,
            stem,
            verbose,
            progress,
        } => cmd_extract(&archive, &output, stem.as_deref(), verbose, progress),
        Commands::Create {
            archive,
            files,
            verbose,
        } => cmd_create(&archive, &files, verbose),
        Commands::Info { archive } => cmd_info(&archive),
        Commands::Test { archive, verbose } => cmd_test(&archive, verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_list(archive: &Path, verbose: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = io::read_whole_file(archive)?;
    let ar = Ls11Archive::parse(&data)?;

    if json {
        let rows: Vec<RecordInfo> = ar
            .records()
            .iter()
            .enumerate()
            .map(|(i, r)| RecordInfo::new(i, r))
            .collect();
        let listing = serde_json::json!({
            "archive": archive.display().to_string(),
            "format": "LS11",
            "entries": rows,
        });
        println!("{}", serde_json::to_string(&listing)?);
        return Ok(());
    }

    println!("Archive: {} (LS11)", archive.display());
    println!();
    print_records(ar.records(), verbose);
    Ok(())
}

fn cmd_extract(
    archive: &Path,
    output: &Path,
    stem: Option<&str>,
    verbose: bool,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = io::read_whole_file(archive)?;
    let ar = Ls11Archive::parse(&data)?;

    let stem = match stem {
        Some(s) => s.to_string(),
        None => archive
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned(),
    };

    println!("Extracting {} to {}", archive.display(), output.display());
    std::fs::create_dir_all(output)?;

    let pb = create_progress_bar(ar.len() as u64, progress);
    pb.set_message("entries");

    for index in 0..ar.len() {
        let raw = ar.extract(index)?;
        let path = output.join(format!("{stem}.{index:03}"));
        io::write_whole_file(&path, &raw)?;
        if verbose {
            pb.println(format!(
                "  Extracted: {} ({} bytes)",
                path.display(),
                raw.len()
            ));
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    Ok(())
}

fn cmd_create(
    archive: &Path,
    files: &[PathBuf],
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if files.is_empty() {
        return Err("No files specified".into());
    }

    println!("Creating LS11 archive: {}", archive.display());

    let mut entries = Vec::with_capacity(files.len());
    for path in files {
        let data = io::read_whole_file(path)?;
        if verbose {
            println!("  Added: {} ({} bytes)", path.display(), data.len());
        }
        entries.push(data);
    }

    pack_to_file(archive, &entries)?;

    println!("Archive created successfully");
    Ok(())
}

fn cmd_info(archive: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let size = io::file_size(archive)?;
    let data = io::read_whole_file(archive)?;
    let ar = Ls11Archive::parse(&data)?;

    let total_size: u64 = ar
        .records()
        .iter()
        .map(|r| u64::from(r.expanded_len))
        .sum();
    let total_compressed: u64 = ar
        .records()
        .iter()
        .map(|r| u64::from(r.compressed_len))
        .sum();
    let identity = ar
        .table_bytes()
        .iter()
        .enumerate()
        .all(|(i, &b)| b as usize == i);

    println!("Archive Information");
    println!("===================");
    println!("File: {}", archive.display());
    println!("Format: LS11");
    println!("Size: {} bytes", size);
    println!(
        "Translation table: {}",
        if identity { "identity" } else { "custom" }
    );
    println!();
    println!("Contents:");
    println!("  Entries: {}", ar.len());
    println!(
        "  Stored: {}",
        ar.records().iter().filter(|r| r.is_stored()).count()
    );
    println!("  Total size: {} bytes", total_size);
    println!("  Compressed size: {} bytes", total_compressed);
    if total_size > 0 {
        println!(
            "  Compression ratio: {:.1}%",
            (1.0 - total_compressed as f64 / total_size as f64) * 100.0
        );
    }

    Ok(())
}

fn cmd_test(archive: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = io::read_whole_file(archive)?;
    let ar = Ls11Archive::parse(&data)?;

    println!("Testing {} (LS11)", archive.display());

    let mut ok_count = 0usize;
    let mut errors: Vec<(usize, String)> = Vec::new();

    for index in 0..ar.len() {
        match ar.extract(index) {
            Ok(raw) => {
                ok_count += 1;
                if verbose {
                    println!("  OK: entry {:03} ({} bytes)", index, raw.len());
                }
            }
            Err(e) => {
                if verbose {
                    println!("  FAILED: entry {:03} - {}", index, e);
                }
                errors.push((index, e.to_string()));
            }
        }
    }

    println!();
    println!("Test results:");
    println!("  Total entries: {}", ar.len());
    println!("  OK: {}", ok_count);
    println!("  Failed: {}", errors.len());

    if !errors.is_empty() {
        if !verbose {
            println!();
            println!("Errors:");
            for (index, err) in &errors {
                println!("  entry {:03}: {}", index, err);
            }
        }
        std::process::exit(2);
    }

    println!();
    println!("All entries OK");
    Ok(())
}
