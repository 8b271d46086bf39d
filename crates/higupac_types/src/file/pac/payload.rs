//! Payload classification and conversion for PAC archive entries.
//!
//! The archive format has no per-entry type byte; an entry's kind is
//! inferred from the payload bytes themselves. The probe order is fixed:
//! the `ZLC3` magic wins, then a structural TTP parse is attempted, and
//! anything else passes through untouched. A blob that happens to parse
//! as a valid TTP header will be misclassified; that ambiguity is part
//! of the format and not worked around with extra heuristics.

use crate::file::{BmzFile, PacError, TtpFile};

/// Kind of payload carried by an archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
	/// Zlib-compressed bitmap (`ZLC3` magic)
	Bmz,
	/// Animation script
	Ttp,
	/// Unrecognized data, carried verbatim
	Other,
}

impl PayloadKind {
	/// Derives the target kind from an editable file's extension
	/// (`bmp` and `json` map to packed kinds, everything else passes
	/// through)
	pub fn from_editable_ext(ext: &str) -> Self {
		match ext {
			"bmp" => Self::Bmz,
			"json" => Self::Ttp,
			_ => Self::Other,
		}
	}

	/// Maps a packed extension to the editable one (`bmz` → `bmp`,
	/// `ttp` → `json`, everything else unchanged)
	pub fn editable_ext(packed_ext: &str) -> &str {
		match packed_ext {
			"bmz" => "bmp",
			"ttp" => "json",
			other => other,
		}
	}

	/// Maps an editable extension to the packed one (`bmp` → `bmz`,
	/// `json` → `ttp`, everything else unchanged)
	pub fn packed_ext(editable_ext: &str) -> &str {
		match editable_ext {
			"bmp" => "bmz",
			"json" => "ttp",
			other => other,
		}
	}
}

impl std::fmt::Display for PayloadKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			PayloadKind::Bmz => write!(f, "bmz"),
			PayloadKind::Ttp => write!(f, "ttp"),
			PayloadKind::Other => write!(f, "other"),
		}
	}
}

/// Classified content of an archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
	/// Zlib-compressed bitmap
	Bmz(BmzFile),

	/// Animation script, keeping the raw span it was parsed from for
	/// listing display (re-packing uses the deterministic re-encode)
	Ttp {
		/// The parsed animation script
		file: TtpFile,
		/// The exact bytes the script was parsed from
		raw: Vec<u8>,
	},

	/// Unrecognized data, carried verbatim
	Other(Vec<u8>),
}

impl Payload {
	/// Classifies an entry's packed bytes.
	///
	/// Probe order: `ZLC3` magic, then structural TTP parse, then
	/// passthrough. Classification never fails; data that matches no
	/// probe is carried verbatim as [`Payload::Other`].
	pub fn from_bytes(data: &[u8]) -> Self {
		if BmzFile::detect(data) {
			// detect() guarantees the 8-byte header is present
			if let Ok(bmz) = BmzFile::from_bytes(data) {
				return Self::Bmz(bmz);
			}
		}

		match TtpFile::from_bytes(data) {
			Ok(file) => Self::Ttp {
				file,
				raw: data.to_vec(),
			},
			Err(_) => Self::Other(data.to_vec()),
		}
	}

	/// Builds a payload from an editable file's bytes, given the target
	/// kind derived from its extension.
	///
	/// # Errors
	/// Returns `MalformedDocument` if a TTP target's JSON has the wrong
	/// shape, or an IO error if bitmap compression fails.
	pub fn from_editable(data: &[u8], kind: PayloadKind) -> Result<Self, PacError> {
		match kind {
			PayloadKind::Bmz => Ok(Self::Bmz(BmzFile::compress(data)?)),
			PayloadKind::Ttp => {
				let text = String::from_utf8_lossy(data);
				let file = TtpFile::from_json(&text)?;
				let raw = file.to_bytes();
				Ok(Self::Ttp {
					file,
					raw,
				})
			}
			PayloadKind::Other => Ok(Self::Other(data.to_vec())),
		}
	}

	/// Converts the payload to its editable form: decompressed bitmap
	/// bytes, pretty JSON, or the raw data unchanged.
	///
	/// # Errors
	/// Returns `Decompression` for a corrupt BMZ stream.
	pub fn to_editable(&self) -> Result<Vec<u8>, PacError> {
		match self {
			Self::Bmz(bmz) => bmz.decompress(),
			Self::Ttp {
				file,
				..
			} => Ok(file.to_json()?.into_bytes()),
			Self::Other(data) => Ok(data.clone()),
		}
	}

	/// Serializes the payload to the packed bytes stored in the archive
	pub fn to_packed_bytes(&self) -> Vec<u8> {
		match self {
			Self::Bmz(bmz) => bmz.to_bytes(),
			Self::Ttp {
				file,
				..
			} => file.to_bytes(),
			Self::Other(data) => data.clone(),
		}
	}

	/// Returns the kind of this payload
	pub fn kind(&self) -> PayloadKind {
		match self {
			Self::Bmz(_) => PayloadKind::Bmz,
			Self::Ttp {
				..
			} => PayloadKind::Ttp,
			Self::Other(_) => PayloadKind::Other,
		}
	}

	/// Returns a one-line summary for listings
	pub fn summary(&self) -> String {
		match self {
			Self::Bmz(bmz) => format!("bmz uncompressed size: {}", bmz.uncompressed_size),
			Self::Ttp {
				file,
				..
			} => format!(
				"ttp type?: {:<3} w: {:<4} h: {:<4} frames: {}",
				file.maybe_ttp_type,
				file.window_width,
				file.window_height,
				file.num_frames()
			),
			Self::Other(_) => "other file".to_string(),
		}
	}
}
