//! BMZ (zlib-compressed bitmap) file format support.
//!
//! BMZ files are plain bitmaps wrapped in a small container: a 4-byte
//! `ZLC3` magic, the uncompressed size as a `u32`, and a zlib stream.
//! The stored size is written by the original packer as a hint for
//! buffer allocation; it is not re-validated against the inflated data.

use std::io::Read;

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use super::PacError;

mod constants {
	/// Magic bytes for BMZ files
	pub const MAGIC: [u8; 4] = *b"ZLC3";

	/// Size of the BMZ header in bytes (magic + uncompressed size)
	pub const HEADER_SIZE: usize = 8;
}

/// A zlib-compressed bitmap as stored inside PAC archives.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct File {
	/// Size of the bitmap after decompression, as recorded by the packer
	pub uncompressed_size: u32,

	/// The zlib-compressed bitmap bytes (without the 8-byte header)
	pub data: Vec<u8>,
}

impl File {
	/// Size of the BMZ header in bytes
	pub const HEADER_SIZE: usize = constants::HEADER_SIZE;

	/// Returns `true` if the data starts with the BMZ magic and is long
	/// enough to carry the 8-byte header
	pub fn detect(data: &[u8]) -> bool {
		data.len() >= constants::HEADER_SIZE && data[0..4] == constants::MAGIC
	}

	/// Parses a BMZ file from its binary form.
	///
	/// The magic is not re-checked here; callers classify the payload via
	/// [`File::detect`] before parsing.
	///
	/// # Errors
	/// Returns `InsufficientData` if the slice is shorter than the 8-byte
	/// header.
	pub fn from_bytes(data: &[u8]) -> Result<Self, PacError> {
		if data.len() < constants::HEADER_SIZE {
			return Err(PacError::insufficient_data(constants::HEADER_SIZE, data.len()));
		}

		let uncompressed_size = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);

		Ok(Self {
			uncompressed_size,
			data: data[constants::HEADER_SIZE..].to_vec(),
		})
	}

	/// Serializes the file to its binary form (`ZLC3` + size + stream)
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buffer = Vec::with_capacity(constants::HEADER_SIZE + self.data.len());
		buffer.extend_from_slice(&constants::MAGIC);
		buffer.extend_from_slice(&self.uncompressed_size.to_le_bytes());
		buffer.extend_from_slice(&self.data);
		buffer
	}

	/// Compresses raw bitmap bytes into a BMZ file.
	///
	/// # Errors
	/// Returns an IO error if the zlib encoder fails, which for an
	/// in-memory sink only happens on allocation failure.
	pub fn compress(raw: &[u8]) -> Result<Self, PacError> {
		use std::io::Write;

		let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
		encoder.write_all(raw)?;
		let data = encoder.finish()?;

		Ok(Self {
			uncompressed_size: raw.len() as u32,
			data,
		})
	}

	/// Decompresses the zlib stream back into raw bitmap bytes.
	///
	/// # Errors
	/// Returns `Decompression` if the stream is corrupt.
	pub fn decompress(&self) -> Result<Vec<u8>, PacError> {
		let mut decoder = ZlibDecoder::new(self.data.as_slice());
		let mut raw = Vec::with_capacity(self.uncompressed_size as usize);
		decoder.read_to_end(&mut raw).map_err(PacError::decompression)?;
		Ok(raw)
	}

	/// Returns the size of the binary form in bytes
	pub fn byte_size(&self) -> usize {
		constants::HEADER_SIZE + self.data.len()
	}
}

impl std::fmt::Display for File {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"BMZ {{ compressed: {} bytes, uncompressed: {} bytes }}",
			self.data.len(),
			self.uncompressed_size
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_compress_decompress_roundtrip() {
		let raw = b"BM\x36\x00\x00\x00 pretend bitmap pixel data pretend bitmap pixel data";
		let bmz = File::compress(raw).unwrap();

		assert_eq!(bmz.uncompressed_size as usize, raw.len());
		assert_eq!(bmz.decompress().unwrap(), raw);
	}

	#[test]
	fn test_binary_roundtrip() {
		let bmz = File::compress(&[0xAB; 300]).unwrap();
		let bytes = bmz.to_bytes();

		assert!(File::detect(&bytes));
		assert_eq!(bytes.len(), bmz.byte_size());

		let parsed = File::from_bytes(&bytes).unwrap();
		assert_eq!(parsed, bmz);
	}

	#[test]
	fn test_detect_rejects_short_and_foreign_data() {
		assert!(!File::detect(b"ZLC"));
		assert!(!File::detect(b"BM\x00\x00\x00\x00\x00\x00"));
		assert!(File::detect(b"ZLC3\x00\x00\x00\x00"));
	}

	#[test]
	fn test_truncated_header() {
		let err = File::from_bytes(b"ZLC3\x10").unwrap_err();
		assert!(matches!(err, PacError::InsufficientData { expected: 8, actual: 5 }));
	}

	#[test]
	fn test_corrupt_stream() {
		let bmz = File {
			uncompressed_size: 0,
			data: vec![0x01, 0x02],
		};

		let err = bmz.decompress().unwrap_err();
		assert!(matches!(err, PacError::Decompression { .. }));
	}

	#[test]
	fn test_size_hint_not_validated() {
		// The stored size is a hint only; a lying header still inflates
		let mut bmz = File::compress(b"twelve bytes").unwrap();
		bmz.uncompressed_size = 9999;
		assert_eq!(bmz.decompress().unwrap(), b"twelve bytes");
	}
}
