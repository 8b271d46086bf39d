//! TTP (animation script) file format support.
//!
//! TTP files drive the desktop accessory's character animations. The
//! binary layout is:
//!
//! ```text
//! Offset  Size  Field             Description
//! ------  ----  ----------------  --------------------------------------
//! 0x00    4     ttp_type          Variant tag (u32 LE); 3 is special
//! 0x04    4     frame_count       Number of frames (u32 LE)
//! 0x08    4     window_width      Playback window width (u32 LE)
//! 0x0C    4     window_height     Playback window height (u32 LE)
//! 0x10    ...   frames            `frame_count` variable-length frames
//! ...     0/1   wakeup flag       Only when ttp_type == 3, may be absent
//! ```
//!
//! The trailing wakeup flag is structural: it exists exactly when a byte
//! is left over after all frames have been consumed. Files with
//! `ttp_type == 3` and no leftover byte are legal. Variant tags other
//! than 3 are carried verbatim; the engine's catalog of tags is unknown.
//!
//! For editing, a TTP file converts to and from a pretty-printed JSON
//! document ([`File::to_json`] / [`File::from_json`]). The JSON
//! `frame_count` key is informational: on input it is ignored and the
//! actual frame list length is used, so a hand-edited document can never
//! desync the binary header from its frames.

pub mod frame;


use serde::{Deserialize, Serialize};

use super::PacError;

pub use frame::TtpFrame;

mod constants {
	/// Size of the TTP header in bytes (four u32 fields)
	pub const HEADER_SIZE: usize = 16;

	/// Variant tag that enables the optional trailing wakeup flag
	pub const TYPE_WITH_WAKEUP_FLAG: u32 = 3;

	/// Smallest possible encoded frame: three empty length-prefixed
	/// names plus the five-u32 numeric tail
	pub const MIN_FRAME_SIZE: usize = 32;
}

/// An animation script as stored inside PAC archives.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct File {
	/// Variant tag; observed values include 3, which enables the
	/// optional trailing wakeup flag. Other values pass through untouched.
	pub maybe_ttp_type: u32,

	/// Playback window width in pixels
	pub window_width: u32,

	/// Playback window height in pixels
	pub window_height: u32,

	/// Animation frames in playback order
	pub frames: Vec<TtpFrame>,

	/// Optional trailing flag: when set, the first wakeup after packing
	/// plays no sound. Present only for `maybe_ttp_type == 3`, and even
	/// then may be absent.
	pub onetime_wakeup_dont_play_sound: Option<u8>,
}

/// JSON document mirror of [`File`].
///
/// Kept separate so the in-memory file never stores `frame_count`: the
/// binary header and the JSON output always derive it from the frame
/// list, while stale counts in hand-edited input are ignored.
#[derive(Serialize, Deserialize)]
struct TtpDocument {
	maybe_ttp_type: u32,
	frame_count: u32,
	window_width: u32,
	window_height: u32,
	frames: Vec<TtpFrame>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	onetime_wakeup_dont_play_sound: Option<u8>,
}

impl File {
	/// Size of the TTP header in bytes
	pub const HEADER_SIZE: usize = constants::HEADER_SIZE;

	/// Parses a TTP file from a byte slice.
	///
	/// Trailing bytes beyond the optional wakeup flag are ignored; the
	/// original engine never reads past that point either.
	///
	/// # Errors
	/// Returns `InsufficientData` if the slice ends before the declared
	/// frame count has been consumed.
	pub fn from_bytes(data: &[u8]) -> Result<Self, PacError> {
		if data.len() < constants::HEADER_SIZE {
			return Err(PacError::insufficient_data(constants::HEADER_SIZE, data.len()));
		}

		let read_u32 = |at: usize| u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);

		let maybe_ttp_type = read_u32(0);
		let frame_count = read_u32(4);
		let window_width = read_u32(8);
		let window_height = read_u32(12);

		// The count is untrusted input; allocate no more than the slice
		// could possibly hold so an absurd value fails in the parse loop
		// instead of in the allocator
		let capacity = (frame_count as usize).min(data.len() / constants::MIN_FRAME_SIZE);

		let mut pos = constants::HEADER_SIZE;
		let mut frames = Vec::with_capacity(capacity);
		for _ in 0..frame_count {
			let (frame, consumed) = TtpFrame::from_bytes(&data[pos..])?;
			frames.push(frame);
			pos += consumed;
		}

		// The wakeup flag exists exactly when a byte is left over
		let onetime_wakeup_dont_play_sound =
			if maybe_ttp_type == constants::TYPE_WITH_WAKEUP_FLAG && pos < data.len() {
				Some(data[pos])
			} else {
				None
			};

		Ok(Self {
			maybe_ttp_type,
			window_width,
			window_height,
			frames,
			onetime_wakeup_dont_play_sound,
		})
	}

	/// Serializes the file to its binary form.
	///
	/// The header frame count is always the actual frame list length.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buffer = Vec::with_capacity(self.byte_size());

		buffer.extend_from_slice(&self.maybe_ttp_type.to_le_bytes());
		buffer.extend_from_slice(&(self.frames.len() as u32).to_le_bytes());
		buffer.extend_from_slice(&self.window_width.to_le_bytes());
		buffer.extend_from_slice(&self.window_height.to_le_bytes());

		for frame in &self.frames {
			buffer.extend_from_slice(&frame.to_bytes());
		}

		if self.maybe_ttp_type == constants::TYPE_WITH_WAKEUP_FLAG {
			if let Some(flag) = self.onetime_wakeup_dont_play_sound {
				buffer.push(flag);
			}
		}

		buffer
	}

	/// Returns the size of the binary form in bytes
	pub fn byte_size(&self) -> usize {
		let flag_size = if self.maybe_ttp_type == constants::TYPE_WITH_WAKEUP_FLAG
			&& self.onetime_wakeup_dont_play_sound.is_some()
		{
			1
		} else {
			0
		};

		constants::HEADER_SIZE + self.frames.iter().map(TtpFrame::byte_size).sum::<usize>() + flag_size
	}

	/// Returns the number of frames
	pub fn num_frames(&self) -> usize {
		self.frames.len()
	}

	/// Converts the file to its editable JSON form (pretty-printed,
	/// non-ASCII characters preserved verbatim).
	///
	/// # Errors
	/// Returns `MalformedDocument` if serialization fails, which cannot
	/// happen for well-formed in-memory values.
	pub fn to_json(&self) -> Result<String, PacError> {
		let document = TtpDocument {
			maybe_ttp_type: self.maybe_ttp_type,
			frame_count: self.frames.len() as u32,
			window_width: self.window_width,
			window_height: self.window_height,
			frames: self.frames.clone(),
			onetime_wakeup_dont_play_sound: self.onetime_wakeup_dont_play_sound,
		};

		Ok(serde_json::to_string_pretty(&document)?)
	}

	/// Parses the editable JSON form back into a TTP file.
	///
	/// A `frame_count` key is required for shape compatibility with
	/// extracted documents but its value is ignored; the frame list
	/// length is authoritative.
	///
	/// # Errors
	/// Returns `MalformedDocument` if required keys are missing or of
	/// the wrong shape.
	pub fn from_json(text: &str) -> Result<Self, PacError> {
		let document: TtpDocument = serde_json::from_str(text)?;

		Ok(Self {
			maybe_ttp_type: document.maybe_ttp_type,
			window_width: document.window_width,
			window_height: document.window_height,
			frames: document.frames,
			onetime_wakeup_dont_play_sound: document.onetime_wakeup_dont_play_sound,
		})
	}
}

impl std::fmt::Display for File {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"TTP {{ type: {}, window: {}x{}, frames: {} }}",
			self.maybe_ttp_type,
			self.window_width,
			self.window_height,
			self.frames.len()
		)
	}
}

impl TryFrom<&[u8]> for File {
	type Error = PacError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

impl From<&File> for Vec<u8> {
	fn from(file: &File) -> Self {
		file.to_bytes()
	}
}
