//! Length-prefixed Shift-JIS string support.
//!
//! Resource names inside TTP animation frames are stored as a `u32`
//! little-endian byte length followed by that many Shift-JIS bytes.
//! Decoding and encoding are both permissive: invalid byte sequences and
//! unmappable characters are substituted, never rejected, matching the
//! original engine's tolerance for slightly mangled data.

use encoding_rs::SHIFT_JIS;
use serde::{Deserialize, Serialize};

use super::PacError;

/// A variable-length Shift-JIS encoded resource name.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResName {
	/// The decoded name value
	pub value: String,
}

impl ResName {
	/// Creates a resource name from any string-like value
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
		}
	}

	/// Parses a resource name from a byte slice.
	///
	/// Returns the name and the number of bytes consumed (`4 + length`).
	///
	/// # Errors
	/// Returns `InsufficientData` if the slice ends before the declared
	/// length is available. Invalid Shift-JIS sequences are substituted
	/// with replacement characters and do not fail.
	pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), PacError> {
		if data.len() < 4 {
			return Err(PacError::insufficient_data(4, data.len()));
		}

		let length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
		let end = 4 + length;
		if data.len() < end {
			return Err(PacError::insufficient_data(end, data.len()));
		}

		let (value, _encoding_used, _had_errors) = SHIFT_JIS.decode(&data[4..end]);

		Ok((
			Self {
				value: value.into_owned(),
			},
			end,
		))
	}

	/// Serializes the name to its length-prefixed binary form.
	///
	/// Characters without a Shift-JIS mapping are substituted by the
	/// encoder; this operation never fails.
	pub fn to_bytes(&self) -> Vec<u8> {
		let (encoded, _encoding_used, _had_errors) = SHIFT_JIS.encode(&self.value);

		let mut buffer = Vec::with_capacity(4 + encoded.len());
		buffer.extend_from_slice(&(encoded.len() as u32).to_le_bytes());
		buffer.extend_from_slice(&encoded);
		buffer
	}

	/// Returns the size of the binary form in bytes (`4 + encoded length`)
	pub fn byte_size(&self) -> usize {
		let (encoded, _, _) = SHIFT_JIS.encode(&self.value);
		4 + encoded.len()
	}

	/// Returns the name as a string slice
	pub fn as_str(&self) -> &str {
		&self.value
	}
}

impl std::fmt::Display for ResName {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.value)
	}
}

impl From<&str> for ResName {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for ResName {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}
