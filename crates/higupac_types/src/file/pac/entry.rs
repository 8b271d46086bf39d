//! Entry records of PAC archives.
//!
//! Each entry is described by a fixed 64-byte header in the archive's
//! header block:
//!
//! ```text
//! Offset  Size  Field   Description
//! ------  ----  ------  -----------------------------------------------
//! +0x00   4     offset  Absolute byte offset of the payload (u32 LE)
//! +0x04   4     size    Payload size in bytes (u32 LE)
//! +0x08   56    name    Shift-JIS entry name, NUL-padded
//! ```
//!
//! Offsets may point anywhere in the file, in any order; the header
//! scan never follows them except to slice out the payload bytes.

use std::io::{Read, Seek, SeekFrom};

use encoding_rs::SHIFT_JIS;

use crate::file::{ENTRY_NAME_SIZE, PacError};

use super::Payload;

/// Size of a full entry header in bytes (offset + size + name field)
pub const ENTRY_HEADER_SIZE: usize = 8 + ENTRY_NAME_SIZE;

/// One named, offset-addressed record of a PAC archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	/// Absolute byte offset of the payload within the archive file.
	/// Zero until the owning builder performs layout; authoritative
	/// when read from an existing archive.
	pub offset: u32,

	/// Byte length of the packed payload
	pub size: u32,

	/// Entry name (must encode to at most 55 Shift-JIS bytes)
	pub name: String,

	/// Classified payload content
	pub payload: Payload,
}

impl Entry {
	/// Creates an entry with provisional (zero) offset and size
	pub fn new(name: impl Into<String>, payload: Payload) -> Self {
		Self {
			offset: 0,
			size: 0,
			name: name.into(),
			payload,
		}
	}

	/// Reads one entry from the archive's header block and resolves its
	/// payload.
	///
	/// The reader is left positioned immediately after the 64-byte
	/// header: the payload is fetched with a seek to `offset` and the
	/// prior position is restored, so sequential header scanning can
	/// continue. Like the original tool, a payload that runs past
	/// end-of-file yields the bytes that were available.
	///
	/// # Errors
	/// Returns `InsufficientData` if fewer than 64 header bytes remain,
	/// or an IO error if seeking fails.
	pub fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<Self, PacError> {
		let mut header = [0u8; ENTRY_HEADER_SIZE];
		let mut filled = 0;
		while filled < header.len() {
			let n = reader.read(&mut header[filled..])?;
			if n == 0 {
				return Err(PacError::insufficient_data(ENTRY_HEADER_SIZE, filled));
			}
			filled += n;
		}

		let offset = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
		let size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
		let name = decode_name(&header[8..]);

		// Fetch the payload out-of-line, then restore the scan position.
		// The declared size is untrusted (and may exceed the file length),
		// so the buffer grows with the bytes actually read.
		let current_pos = reader.stream_position()?;
		reader.seek(SeekFrom::Start(u64::from(offset)))?;
		let mut data = Vec::new();
		reader.by_ref().take(u64::from(size)).read_to_end(&mut data)?;
		reader.seek(SeekFrom::Start(current_pos))?;

		let payload = Payload::from_bytes(&data);

		Ok(Self {
			offset,
			size,
			name,
			payload,
		})
	}

	/// Serializes the entry's 64-byte header.
	///
	/// # Errors
	/// Returns `NameTooLong` if the Shift-JIS encoded name does not fit
	/// the 56-byte field with its NUL terminator. Packing rejects rather
	/// than truncating: a shortened name would change the archive's
	/// entry listing.
	pub fn header_bytes(&self) -> Result<[u8; ENTRY_HEADER_SIZE], PacError> {
		let (encoded, _encoding_used, _had_errors) = SHIFT_JIS.encode(&self.name);
		if encoded.len() >= ENTRY_NAME_SIZE {
			return Err(PacError::NameTooLong {
				name: self.name.clone(),
				encoded_len: encoded.len(),
				max: ENTRY_NAME_SIZE - 1,
			});
		}

		let mut buffer = [0u8; ENTRY_HEADER_SIZE];
		buffer[0..4].copy_from_slice(&self.offset.to_le_bytes());
		buffer[4..8].copy_from_slice(&self.size.to_le_bytes());
		buffer[8..8 + encoded.len()].copy_from_slice(&encoded);
		Ok(buffer)
	}

	/// Returns the size of an entry header in bytes
	pub const fn header_size() -> usize {
		ENTRY_HEADER_SIZE
	}
}

/// Decodes the fixed name field: bytes up to the first NUL (or the whole
/// field if none), Shift-JIS, substitution on invalid sequences.
fn decode_name(field: &[u8]) -> String {
	let name_bytes = match field.iter().position(|&b| b == 0) {
		Some(nul) => &field[..nul],
		None => field,
	};

	let (name, _encoding_used, _had_errors) = SHIFT_JIS.decode(name_bytes);
	name.into_owned()
}

impl std::fmt::Display for Entry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Entry {{ name: '{}', offset: {}, size: {}, kind: {} }}",
			self.name,
			self.offset,
			self.size,
			self.payload.kind()
		)
	}
}
