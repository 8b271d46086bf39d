//! Error types for file format parsing and manipulation.

use thiserror::Error;

/// Errors that can occur when parsing or manipulating PAC archives
/// and the file formats they carry (BMZ bitmaps, TTP animations).
#[derive(Debug, Error)]
pub enum PacError {
	/// Not enough data to parse
	#[error("Insufficient data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// The archive's entry count could not be read
	#[error("Invalid archive: cannot read entry count")]
	InvalidArchive,

	/// Corrupt zlib stream in a BMZ payload
	#[error("Failed to decompress BMZ payload: {reason}")]
	Decompression {
		/// Decoder failure description
		reason: String,
	},

	/// Editable JSON input does not match the expected TTP document shape
	#[error("Malformed TTP document: {0}")]
	MalformedDocument(#[from] serde_json::Error),

	/// Entry name does not fit the fixed 56-byte header field
	#[error("Entry name too long: '{name}' encodes to {encoded_len} bytes (max {max} usable)")]
	NameTooLong {
		/// The offending entry name
		name: String,
		/// Byte length of the Shift-JIS encoded name
		encoded_len: usize,
		/// Usable capacity of the name field
		max: usize,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl PacError {
	/// Creates an `InsufficientData` error
	pub fn insufficient_data(expected: usize, actual: usize) -> Self {
		Self::InsufficientData {
			expected,
			actual,
		}
	}

	/// Creates a `Decompression` error from any displayable failure
	pub fn decompression(reason: impl std::fmt::Display) -> Self {
		Self::Decompression {
			reason: reason.to_string(),
		}
	}
}
