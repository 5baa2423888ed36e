//! Scroll packets.

use std::fmt;

use crate::constants::{MAX_HORIZONTAL_OFFSET, MAX_VERTICAL_OFFSET};

/// Horizontal scroll command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HorizontalScroll {
	/// Don't scroll
	#[default]
	None = 0,
	/// Scroll one tile width to the right
	Right = 1,
	/// Scroll one tile width to the left
	Left = 2,
}

impl HorizontalScroll {
	/// Converts a 2-bit command to `HorizontalScroll`. The reserved value 3 means no scroll.
	pub fn from_u8(value: u8) -> Self {
		match value & 0x3 {
			1 => Self::Right,
			2 => Self::Left,
			_ => Self::None,
		}
	}

	/// Converts `HorizontalScroll` to u8
	pub fn to_u8(self) -> u8 {
		self as u8
	}
}

/// Vertical scroll command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VerticalScroll {
	/// Don't scroll
	#[default]
	None = 0,
	/// Scroll one tile height down
	Down = 1,
	/// Scroll one tile height up
	Up = 2,
}

impl VerticalScroll {
	/// Converts a 2-bit command to `VerticalScroll`. The reserved value 3 means no scroll.
	pub fn from_u8(value: u8) -> Self {
		match value & 0x3 {
			1 => Self::Down,
			2 => Self::Up,
			_ => Self::None,
		}
	}

	/// Converts `VerticalScroll` to u8
	pub fn to_u8(self) -> u8 {
		self as u8
	}
}

/// Scroll parameters shared by scroll preset and scroll copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Scroll {
	/// Horizontal scroll command
	pub horizontal: HorizontalScroll,
	/// Vertical scroll command
	pub vertical: VerticalScroll,
	/// Horizontal display offset in pixels (0-5)
	pub horizontal_offset: u8,
	/// Vertical display offset in pixels (0-11)
	pub vertical_offset: u8,
}

impl Scroll {
	/// Creates scroll parameters, clamping the offsets to their limits.
	pub fn new(
		horizontal: HorizontalScroll,
		vertical: VerticalScroll,
		horizontal_offset: u8,
		vertical_offset: u8,
	) -> Self {
		Self {
			horizontal,
			vertical,
			horizontal_offset: horizontal_offset.min(MAX_HORIZONTAL_OFFSET),
			vertical_offset: vertical_offset.min(MAX_VERTICAL_OFFSET),
		}
	}
}

impl fmt::Display for Scroll {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"h={:?}+{} v={:?}+{}",
			self.horizontal, self.horizontal_offset, self.vertical, self.vertical_offset
		)
	}
}

/// Scroll the screen, filling vacated pixels with a color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScrollPreset {
	/// Palette index for vacated pixels
	pub fill_color_index: u8,
	/// Scroll parameters
	pub scroll: Scroll,
}

impl ScrollPreset {
	/// Creates a scroll preset payload.
	pub fn new(fill_color_index: u8, scroll: Scroll) -> Self {
		Self {
			fill_color_index,
			scroll,
		}
	}
}
