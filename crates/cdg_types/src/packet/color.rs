//! Colors and color table packets.
//!
//! CD+G palettes hold 16 entries of 12-bit color (4 bits per channel). A full
//! palette is sent as two `LoadColorTable` packets, the low half (entries 0-7)
//! and the high half (entries 8-15).

use std::fmt;

use crate::constants::COLORS_PER_TABLE_PACKET;

/// Scale between a 4-bit CD+G channel and an 8-bit channel (`15 * 17 = 255`).
pub const CHANNEL_SCALE: u8 = 17;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Color {
	/// Opaque black.
	pub const BLACK: Self = Self::rgb(0, 0, 0);

	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a new RGB color with full opacity.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 255)
	}

	/// Creates a color from 4-bit CD+G channel values, scaling each onto 0-255.
	///
	/// Channel values above 15 are clamped.
	pub const fn from_cdg(r: u8, g: u8, b: u8) -> Self {
		Self::rgb(scale_up(r), scale_up(g), scale_up(b))
	}

	/// Returns the 4-bit CD+G channel values of this color.
	pub const fn to_cdg(&self) -> (u8, u8, u8) {
		(self.r / CHANNEL_SCALE, self.g / CHANNEL_SCALE, self.b / CHANNEL_SCALE)
	}

	/// Returns the color as a 32-bit ARGB value.
	pub const fn to_argb32(&self) -> u32 {
		((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
	}

	/// Creates a color from a 32-bit ARGB value.
	pub const fn from_argb32(argb: u32) -> Self {
		Self {
			a: ((argb >> 24) & 0xFF) as u8,
			r: ((argb >> 16) & 0xFF) as u8,
			g: ((argb >> 8) & 0xFF) as u8,
			b: (argb & 0xFF) as u8,
		}
	}

	/// Returns the RGB channels.
	pub const fn to_rgb(&self) -> [u8; 3] {
		[self.r, self.g, self.b]
	}
}

const fn scale_up(channel: u8) -> u8 {
	let channel = if channel > 15 {
		15
	} else {
		channel
	};
	channel * CHANNEL_SCALE
}

impl Default for Color {
	/// Zeroed color, matching a freshly reset color table entry.
	fn default() -> Self {
		Self::new(0, 0, 0, 0)
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
	}
}

impl From<image::Rgb<u8>> for Color {
	fn from(pixel: image::Rgb<u8>) -> Self {
		Self::rgb(pixel.0[0], pixel.0[1], pixel.0[2])
	}
}

impl From<Color> for image::Rgb<u8> {
	fn from(color: Color) -> Self {
		image::Rgb(color.to_rgb())
	}
}

/// Which half of the 16-entry palette a color table packet loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTableSet {
	/// Entries 0-7
	Low,
	/// Entries 8-15
	High,
}

impl ColorTableSet {
	/// First palette index written by this half.
	pub const fn first_index(self) -> usize {
		match self {
			Self::Low => 0,
			Self::High => COLORS_PER_TABLE_PACKET,
		}
	}
}

impl fmt::Display for ColorTableSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Low => write!(f, "Low"),
			Self::High => write!(f, "High"),
		}
	}
}

/// Load half of the color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadColorTable {
	/// Palette half being loaded
	pub set: ColorTableSet,
	/// Colors for the eight entries of this half
	pub colors: [Color; COLORS_PER_TABLE_PACKET],
}

impl LoadColorTable {
	/// Creates a color table packet payload.
	pub fn new(set: ColorTableSet, colors: [Color; COLORS_PER_TABLE_PACKET]) -> Self {
		Self {
			set,
			colors,
		}
	}

	/// Default low half: black and the dim primaries.
	pub fn default_low() -> Self {
		Self::new(
			ColorTableSet::Low,
			[
				Color::rgb(0, 0, 0),
				Color::rgb(127, 0, 0),
				Color::rgb(0, 127, 0),
				Color::rgb(0, 0, 127),
				Color::rgb(127, 127, 0),
				Color::rgb(127, 0, 127),
				Color::rgb(0, 127, 127),
				Color::rgb(64, 64, 64),
			],
		)
	}

	/// Default high half: grey, the bright primaries and white.
	pub fn default_high() -> Self {
		Self::new(
			ColorTableSet::High,
			[
				Color::rgb(127, 127, 127),
				Color::rgb(255, 0, 0),
				Color::rgb(0, 255, 0),
				Color::rgb(0, 0, 255),
				Color::rgb(255, 255, 0),
				Color::rgb(255, 0, 255),
				Color::rgb(0, 255, 255),
				Color::rgb(255, 255, 255),
			],
		)
	}

	/// Returns the palette index that entry `i` of this packet lands on.
	pub fn palette_index(&self, i: usize) -> usize {
		self.set.first_index() + i
	}
}
