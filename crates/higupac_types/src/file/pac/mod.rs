//! PAC archive file format support.
//!
//! PAC archives are the asset containers of the desktop accessory. The
//! layout is a count-prefixed header block followed by the payload data:
//!
//! ```text
//! Offset  Size     Field        Description
//! ------  -------  -----------  ----------------------------------------
//! 0x00    4        entry_count  Number of entries (u32 LE)
//! 0x04    64 × n   headers      One 64-byte header per entry, in order
//! ...     ...      payloads     Payload bytes addressed by the headers
//! ```
//!
//! Reading scans the header block sequentially, fetching each payload
//! through its absolute offset (offsets are free to be out-of-order or
//! overlapping). Building is the inverse two-stage process: plan a
//! layout assigning offsets in input order, then emit headers and
//! payloads; see [`FileBuilder`].
//!
//! The read path is not reentrant with respect to stream position: each
//! payload fetch saves and restores the reader position, so a shared
//! reader must not be used concurrently.

pub mod builder;
pub mod entry;
pub mod payload;


use std::io::{Read, Seek};

use super::PacError;

pub use builder::{FileBuilder, Layout, PlannedEntry};
pub use entry::{ENTRY_HEADER_SIZE, Entry};
pub use payload::{Payload, PayloadKind};

/// A PAC archive read into memory, with every entry's payload classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	entries: Vec<Entry>,
}

impl File {
	/// Opens and reads a PAC archive from disk.
	///
	/// # Errors
	/// Returns `InvalidArchive` if the entry count cannot be read, and
	/// `InsufficientData` if the header block is truncated.
	pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, PacError> {
		let mut file = std::fs::File::open(path)?;
		Self::from_reader(&mut file)
	}

	/// Reads a PAC archive from any seekable reader.
	///
	/// # Errors
	/// Returns `InvalidArchive` if the entry count cannot be read, and
	/// `InsufficientData` if the header block is truncated.
	pub fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<Self, PacError> {
		let mut count_bytes = [0u8; 4];
		reader.read_exact(&mut count_bytes).map_err(|_| PacError::InvalidArchive)?;
		let entry_count = u32::from_le_bytes(count_bytes);

		// The count is untrusted input; a bogus value must surface as a
		// truncated header block, not as an allocation request
		let mut entries = Vec::new();
		for _ in 0..entry_count {
			let entry = Entry::from_reader(reader)?;
			entries.push(entry);
		}

		Ok(Self {
			entries,
		})
	}

	/// Returns the entries in header-block order
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Returns the number of entries
	pub fn num_entries(&self) -> usize {
		self.entries.len()
	}

	/// Gets an entry by index
	pub fn get_entry(&self, index: usize) -> Option<&Entry> {
		self.entries.get(index)
	}

	/// Finds an entry by name
	pub fn find_entry(&self, name: &str) -> Option<&Entry> {
		self.entries.iter().find(|e| e.name.eq_ignore_ascii_case(name))
	}
}

impl std::fmt::Display for File {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "PAC File: {} entries", self.entries.len())?;
		for entry in &self.entries {
			writeln!(f, "  {}", entry)?;
		}
		Ok(())
	}
}
