//! Screen, border and transparency presets.

/// Clear the whole screen to one color.
///
/// Streams send this several times in a row; `repeat` counts up from 0 and only
/// the first packet of a burst is significant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MemoryPreset {
	/// Palette index to fill with
	pub color_index: u8,
	/// Position in the repeat burst
	pub repeat: u8,
}

impl MemoryPreset {
	/// Creates a memory preset payload.
	pub fn new(color_index: u8, repeat: u8) -> Self {
		Self {
			color_index,
			repeat,
		}
	}

	/// Returns true for the first packet of a repeat burst.
	pub fn is_first_of_burst(&self) -> bool {
		self.repeat == 0
	}
}

/// Paint the border area with one color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BorderPreset {
	/// Palette index for the border
	pub color_index: u8,
}

impl BorderPreset {
	/// Creates a border preset payload.
	pub fn new(color_index: u8) -> Self {
		Self {
			color_index,
		}
	}
}

/// Mark a palette index as the transparent key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DefineTransparency {
	/// Palette index treated as transparent
	pub color_index: u8,
}

impl DefineTransparency {
	/// Creates a transparency payload.
	pub fn new(color_index: u8) -> Self {
		Self {
			color_index,
		}
	}
}
