//! Frame records for TTP animation files.

use serde::{Deserialize, Serialize};

use crate::file::{PacError, ResName};

/// Size of the fixed numeric tail of a frame (five `u32` values)
const NUMERIC_TAIL_SIZE: usize = 20;

/// A single animation frame.
///
/// Binary layout: three length-prefixed Shift-JIS resource names followed
/// by five `u32` little-endian values, in this order:
///
/// ```text
/// sprite_name, se_name, textbox_name,
/// delay_ms, x_offset_textbox, y_offset_textbox, x_offset, y_offset
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtpFrame {
	/// Sprite resource displayed by this frame
	pub sprite_name: ResName,

	/// Sound effect resource triggered with this frame
	pub se_name: ResName,

	/// Textbox resource shown with this frame
	pub textbox_name: ResName,

	/// Display duration in milliseconds
	pub delay_ms: u32,

	/// Horizontal offset of the textbox
	pub x_offset_textbox: u32,

	/// Vertical offset of the textbox
	pub y_offset_textbox: u32,

	/// Horizontal offset of the sprite
	pub x_offset: u32,

	/// Vertical offset of the sprite
	pub y_offset: u32,
}

impl TtpFrame {
	/// Parses a frame from a byte slice.
	///
	/// Returns the frame and the number of bytes consumed.
	///
	/// # Errors
	/// Returns `InsufficientData` if the slice ends inside any field.
	pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), PacError> {
		let mut pos = 0;

		let (sprite_name, consumed) = ResName::from_bytes(&data[pos..])?;
		pos += consumed;

		let (se_name, consumed) = ResName::from_bytes(&data[pos..])?;
		pos += consumed;

		let (textbox_name, consumed) = ResName::from_bytes(&data[pos..])?;
		pos += consumed;

		if data.len() < pos + NUMERIC_TAIL_SIZE {
			return Err(PacError::insufficient_data(pos + NUMERIC_TAIL_SIZE, data.len()));
		}

		let read_u32 = |at: usize| u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);

		let delay_ms = read_u32(pos);
		let x_offset_textbox = read_u32(pos + 4);
		let y_offset_textbox = read_u32(pos + 8);
		let x_offset = read_u32(pos + 12);
		let y_offset = read_u32(pos + 16);
		pos += NUMERIC_TAIL_SIZE;

		Ok((
			Self {
				sprite_name,
				se_name,
				textbox_name,
				delay_ms,
				x_offset_textbox,
				y_offset_textbox,
				x_offset,
				y_offset,
			},
			pos,
		))
	}

	/// Serializes the frame to its binary form
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buffer = Vec::with_capacity(self.byte_size());

		buffer.extend_from_slice(&self.sprite_name.to_bytes());
		buffer.extend_from_slice(&self.se_name.to_bytes());
		buffer.extend_from_slice(&self.textbox_name.to_bytes());

		buffer.extend_from_slice(&self.delay_ms.to_le_bytes());
		buffer.extend_from_slice(&self.x_offset_textbox.to_le_bytes());
		buffer.extend_from_slice(&self.y_offset_textbox.to_le_bytes());
		buffer.extend_from_slice(&self.x_offset.to_le_bytes());
		buffer.extend_from_slice(&self.y_offset.to_le_bytes());

		buffer
	}

	/// Returns the size of the binary form in bytes
	pub fn byte_size(&self) -> usize {
		self.sprite_name.byte_size()
			+ self.se_name.byte_size()
			+ self.textbox_name.byte_size()
			+ NUMERIC_TAIL_SIZE
	}
}

impl std::fmt::Display for TtpFrame {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Frame {{ sprite: '{}', se: '{}', textbox: '{}', delay: {}ms, offset: ({}, {}) }}",
			self.sprite_name, self.se_name, self.textbox_name, self.delay_ms, self.x_offset, self.y_offset
		)
	}
}
