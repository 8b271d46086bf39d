//! Building PAC archives.
//!
//! Building is split into two stages so offset computation stays
//! auditable on its own: [`FileBuilder::plan`] produces an immutable
//! [`Layout`] with every entry's packed bytes, size and absolute offset
//! assigned in a single forward pass, and the emit step serializes that
//! layout without recomputing anything. No entry's offset depends on
//! another entry's content, only on the cumulative sizes before it.

use std::io::Write;

use crate::file::{ENTRY_NAME_SIZE, PacError};

use encoding_rs::SHIFT_JIS;

use super::entry::{ENTRY_HEADER_SIZE, Entry};
use super::payload::Payload;

/// One entry of a planned archive layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
	/// The entry with its final offset and size filled in
	pub entry: Entry,

	/// The packed payload bytes the offset and size were derived from
	pub packed: Vec<u8>,
}

/// Immutable result of the layout stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
	/// Planned entries in input order
	pub entries: Vec<PlannedEntry>,
}

impl Layout {
	/// Returns the size of the header block (count field + headers)
	pub fn header_block_size(&self) -> usize {
		4 + ENTRY_HEADER_SIZE * self.entries.len()
	}

	/// Returns the total size of the serialized archive in bytes
	pub fn total_size(&self) -> usize {
		self.header_block_size() + self.entries.iter().map(|e| e.packed.len()).sum::<usize>()
	}
}

/// Builder assembling a PAC archive from named payloads.
#[derive(Debug, Default, Clone)]
pub struct FileBuilder {
	entries: Vec<Entry>,
}

impl FileBuilder {
	/// Creates an empty builder
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
		}
	}

	/// Adds an entry in packing order.
	///
	/// # Errors
	/// Returns `NameTooLong` if the Shift-JIS encoded name does not fit
	/// the header's 56-byte field with its NUL terminator.
	pub fn add_entry(&mut self, name: impl Into<String>, payload: Payload) -> Result<(), PacError> {
		let name = name.into();

		let encoded_len = SHIFT_JIS.encode(&name).0.len();
		if encoded_len >= ENTRY_NAME_SIZE {
			return Err(PacError::NameTooLong {
				name,
				encoded_len,
				max: ENTRY_NAME_SIZE - 1,
			});
		}

		self.entries.push(Entry::new(name, payload));
		Ok(())
	}

	/// Returns the number of entries added so far
	pub fn num_entries(&self) -> usize {
		self.entries.len()
	}

	/// Layout stage: packs every payload and assigns offsets and sizes
	/// in a single forward pass starting right after the header block.
	pub fn plan(&self) -> Layout {
		let header_block_size = 4 + ENTRY_HEADER_SIZE * self.entries.len();

		let mut current_offset = header_block_size as u32;
		let mut planned = Vec::with_capacity(self.entries.len());

		for entry in &self.entries {
			let packed = entry.payload.to_packed_bytes();

			let mut entry = entry.clone();
			entry.offset = current_offset;
			entry.size = packed.len() as u32;
			current_offset += entry.size;

			planned.push(PlannedEntry {
				entry,
				packed,
			});
		}

		Layout {
			entries: planned,
		}
	}

	/// Serializes the archive to bytes.
	///
	/// # Errors
	/// Returns `NameTooLong` if an entry name no longer fits its header
	/// field (names are also checked on [`FileBuilder::add_entry`]).
	pub fn to_bytes(&self) -> Result<Vec<u8>, PacError> {
		let layout = self.plan();
		let mut buffer = Vec::with_capacity(layout.total_size());

		buffer.extend_from_slice(&(layout.entries.len() as u32).to_le_bytes());

		for planned in &layout.entries {
			buffer.extend_from_slice(&planned.entry.header_bytes()?);
		}

		for planned in &layout.entries {
			buffer.extend_from_slice(&planned.packed);
		}

		Ok(buffer)
	}

	/// Serializes the archive into any writer.
	///
	/// # Errors
	/// Returns `NameTooLong` for an oversized entry name or an IO error
	/// from the writer.
	pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), PacError> {
		let bytes = self.to_bytes()?;
		writer.write_all(&bytes)?;
		Ok(())
	}

	/// Packs the archive to a file on disk.
	///
	/// # Errors
	/// Returns `NameTooLong` for an oversized entry name or an IO error
	/// from the filesystem.
	pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), PacError> {
		let mut file = std::fs::File::create(path)?;
		self.write_to(&mut file)
	}
}
