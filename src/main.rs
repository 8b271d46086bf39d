//! PAC archive CLI utility
//!
//! A command-line tool for the `.pac` asset archives of the Higurashi
//! desktop accessory.
//!
//! # Features
//!
//! - **extract**: Extract all entries, converting payloads to editable files
//!   (`.bmz` → `.bmp`, `.ttp` → `.json`, anything else verbatim)
//! - **list**: List all entries with payload-specific details
//! - **pack**: Build an archive from a directory of editable files
//!
//! # Usage Examples
//!
//! ```bash
//! # Extract an archive into a directory (recreated if it exists)
//! higupac extract omake.pac extracted/
//!
//! # List archive contents
//! higupac list omake.pac
//!
//! # Rebuild an archive from a directory
//! higupac pack rebuilt.pac extracted/
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use higupac_types::prelude::*;
use log::{error, info};

#[derive(Parser)]
#[command(name = "higupac")]
#[command(author = "higupac project")]
#[command(version = "1.0")]
#[command(about = "PAC archive utility - extract, list and pack", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Extract all entries from an archive into a directory
	#[command(alias = "x")]
	Extract {
		/// Input .pac archive
		#[arg(value_name = "ARC")]
		arc: PathBuf,

		/// Output directory; will be created, existing contents are REMOVED
		#[arg(value_name = "OUT_DIR")]
		out_dir: PathBuf,
	},

	/// List all entries in an archive
	#[command(alias = "l")]
	List {
		/// Input .pac archive
		#[arg(value_name = "ARC")]
		arc: PathBuf,
	},

	/// Pack a directory into an archive
	#[command(alias = "p")]
	Pack {
		/// Result will be saved to this file
		#[arg(value_name = "OUT_ARC")]
		out_arc: PathBuf,

		/// Build the archive from this directory (files only, not recursive)
		#[arg(value_name = "SRC_DIR")]
		src_dir: PathBuf,
	},
}

fn main() {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();

	let result = match cli.command {
		Commands::Extract {
			arc,
			out_dir,
		} => handle_extract(&arc, &out_dir),
		Commands::List {
			arc,
		} => handle_list(&arc),
		Commands::Pack {
			out_arc,
			src_dir,
		} => handle_pack(&out_arc, &src_dir),
	};

	if let Err(e) = result {
		error!("{}", e);
		std::process::exit(1);
	}
}

/// Splits an entry name into stem and extension (no leading dot)
fn split_name(name: &str) -> (&str, &str) {
	match name.rsplit_once('.') {
		Some((stem, ext)) if !stem.is_empty() => (stem, ext),
		_ => (name, ""),
	}
}

/// Handles the 'extract' command
fn handle_extract(arc: &Path, out_dir: &Path) -> Result<(), String> {
	let archive =
		PacFile::open(arc).map_err(|e| format!("Failed to open {}: {}", arc.display(), e))?;

	// Recreate the output directory from scratch
	if out_dir.exists() {
		if !out_dir.is_dir() {
			return Err(format!("{} is not a directory", out_dir.display()));
		}
		fs::remove_dir_all(out_dir)
			.map_err(|e| format!("Failed to clear {}: {}", out_dir.display(), e))?;
	}
	fs::create_dir_all(out_dir)
		.map_err(|e| format!("Failed to create {}: {}", out_dir.display(), e))?;

	let mut failures = 0usize;
	for entry in archive.entries() {
		// Per-entry failures are reported and skipped; the rest of the
		// archive still extracts
		match entry.payload.to_editable() {
			Ok(data) => {
				let (stem, packed_ext) = split_name(&entry.name);
				let editable_ext = PayloadKind::editable_ext(packed_ext);
				let output_path = if editable_ext.is_empty() {
					out_dir.join(stem)
				} else {
					out_dir.join(format!("{}.{}", stem, editable_ext))
				};

				match fs::write(&output_path, &data) {
					Ok(()) => info!("Extracted: {}", output_path.display()),
					Err(e) => {
						error!("Error extracting {}: {}", entry.name, e);
						failures += 1;
					}
				}
			}
			Err(e) => {
				error!("Error extracting {}: {}", entry.name, e);
				failures += 1;
			}
		}
	}

	if failures > 0 {
		info!("Extracted with {} failure(s)", failures);
	} else {
		info!("All files extracted successfully");
	}
	Ok(())
}

/// Handles the 'list' command
fn handle_list(arc: &Path) -> Result<(), String> {
	let archive =
		PacFile::open(arc).map_err(|e| format!("Failed to open {}: {}", arc.display(), e))?;

	println!("{:<6}{:<10}{:<48}{}", "Index", "Size", "Info", "Name");
	println!("{}", "-".repeat(80));

	for (idx, entry) in archive.entries().iter().enumerate() {
		println!("{:<6}{:<10}{:<48}{}", idx, entry.size, entry.payload.summary(), entry.name);
	}

	Ok(())
}

/// Handles the 'pack' command
fn handle_pack(out_arc: &Path, src_dir: &Path) -> Result<(), String> {
	if !src_dir.is_dir() {
		return Err(format!("{} is not a directory", src_dir.display()));
	}

	let mut paths: Vec<PathBuf> = fs::read_dir(src_dir)
		.map_err(|e| format!("Failed to read {}: {}", src_dir.display(), e))?
		.filter_map(|entry| entry.ok().map(|e| e.path()))
		.filter(|p| p.is_file())
		.collect();
	paths.sort();

	let mut builder = PacFileBuilder::new();
	for path in paths {
		// Per-file failures are reported and skipped
		if let Err(e) = add_source_file(&mut builder, &path) {
			error!("Error processing {}: {}", path.display(), e);
		}
	}

	builder.save(out_arc).map_err(|e| format!("Failed to write {}: {}", out_arc.display(), e))?;

	info!("Packed {} file(s) into {}", builder.num_entries(), out_arc.display());
	Ok(())
}

/// Converts one source file and adds it to the builder under its packed
/// name (`rika.bmp` becomes entry `rika.bmz`, and so on)
fn add_source_file(builder: &mut PacFileBuilder, path: &Path) -> Result<(), String> {
	let data = fs::read(path).map_err(|e| e.to_string())?;

	let editable_ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
	let kind = PayloadKind::from_editable_ext(editable_ext);
	let payload = Payload::from_editable(&data, kind).map_err(|e| e.to_string())?;

	let packed_ext = PayloadKind::packed_ext(editable_ext);
	let file_name = path
		.file_name()
		.and_then(|s| s.to_str())
		.ok_or_else(|| "source file has no valid name".to_string())?;
	let (stem, _) = split_name(file_name);
	let packed_name = if packed_ext.is_empty() {
		stem.to_string()
	} else {
		format!("{}.{}", stem, packed_ext)
	};

	builder.add_entry(&packed_name, payload).map_err(|e| e.to_string())?;

	info!("Added: {}", packed_name);
	Ok(())
}
