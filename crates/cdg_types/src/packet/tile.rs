//! Tile block packets.
//!
//! A tile is the smallest drawable unit: a 6x12 pixel mask placed on a 50x18 grid,
//! drawn with an "on" color where the mask bit is set and an "off" color elsewhere.

use std::fmt;

use crate::constants::{MAX_COLOR_INDEX, MAX_COLUMNS, MAX_ROWS, TILE_HEIGHT, TILE_WIDTH};
use crate::error::{CdgError, Result};

/// Bits used by one pixel row of a tile
const ROW_MASK: u8 = 0x3F;

/// How a tile is combined with the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileBlockType {
	/// Pixels overwrite the framebuffer
	Normal,
	/// Pixels are XORed into the framebuffer
	Xor,
}

impl fmt::Display for TileBlockType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Normal => write!(f, "Normal"),
			Self::Xor => write!(f, "XOR"),
		}
	}
}

/// A 6x12 boolean pixel mask.
///
/// Stored as twelve 6-bit rows; bit 5 of a row is the leftmost pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TilePixels {
	rows: [u8; TILE_HEIGHT],
}

impl TilePixels {
	/// Creates an empty mask.
	pub const fn new() -> Self {
		Self {
			rows: [0; TILE_HEIGHT],
		}
	}

	/// Creates a mask from packed rows. Only the low 6 bits of each row are kept.
	pub fn from_rows(rows: [u8; TILE_HEIGHT]) -> Self {
		Self {
			rows: rows.map(|row| row & ROW_MASK),
		}
	}

	/// Creates a mask with every pixel set.
	pub fn filled() -> Self {
		Self::from_rows([ROW_MASK; TILE_HEIGHT])
	}

	/// Builds a mask from a text pattern.
	///
	/// Each line is a pixel row; any character other than a space turns the pixel on.
	/// Lines may be shorter than a tile, missing pixels stay off.
	///
	/// ```
	/// use cdg_types::packet::TilePixels;
	///
	/// let pixels = TilePixels::from_pattern("######\n#    #").unwrap();
	/// assert!(pixels.get(0, 1));
	/// assert!(!pixels.get(1, 1));
	/// ```
	pub fn from_pattern(pattern: &str) -> Result<Self> {
		let lines: Vec<&str> = pattern.lines().collect();
		if lines.len() > TILE_HEIGHT {
			return Err(CdgError::invalid_tile_pattern(format!("{} rows", lines.len())));
		}

		let mut pixels = Self::new();
		for (y, line) in lines.iter().enumerate() {
			let width = line.chars().count();
			if width > TILE_WIDTH {
				return Err(CdgError::invalid_tile_pattern(format!("row {y} has {width} pixels")));
			}
			for (x, c) in line.chars().enumerate() {
				pixels.set(x, y, c != ' ');
			}
		}

		Ok(pixels)
	}

	/// Returns the packed bits of row `y`.
	#[inline]
	pub fn row(&self, y: usize) -> u8 {
		self.rows[y]
	}

	/// Returns all packed rows.
	#[inline]
	pub fn rows(&self) -> &[u8; TILE_HEIGHT] {
		&self.rows
	}

	/// Returns whether the pixel at (`x`, `y`) is on.
	#[inline]
	pub fn get(&self, x: usize, y: usize) -> bool {
		self.rows[y] & Self::bit(x) != 0
	}

	/// Turns the pixel at (`x`, `y`) on or off.
	#[inline]
	pub fn set(&mut self, x: usize, y: usize, on: bool) {
		if on {
			self.rows[y] |= Self::bit(x);
		} else {
			self.rows[y] &= !Self::bit(x);
		}
	}

	/// Number of pixels that are on.
	pub fn count_on(&self) -> usize {
		self.rows.iter().map(|row| row.count_ones() as usize).sum()
	}

	#[inline]
	fn bit(x: usize) -> u8 {
		0x20 >> x
	}
}

impl fmt::Display for TilePixels {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for y in 0..TILE_HEIGHT {
			for x in 0..TILE_WIDTH {
				write!(f, "{}", if self.get(x, y) { '#' } else { '.' })?;
			}
			if y + 1 < TILE_HEIGHT {
				writeln!(f)?;
			}
		}
		Ok(())
	}
}

/// Draw a 6x12 tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileBlock {
	/// Compositing mode
	pub kind: TileBlockType,
	/// Tile row (0-17 when valid)
	pub row: u8,
	/// Tile column (0-49 when valid)
	pub column: u8,
	/// Palette index drawn where the mask bit is set
	pub on_color_index: u8,
	/// Palette index drawn where the mask bit is clear
	pub off_color_index: u8,
	/// Pixel mask
	pub pixels: TilePixels,
	diagnostics: Vec<String>,
}

impl TileBlock {
	/// Creates a tile block with an empty mask.
	pub fn new(kind: TileBlockType, row: u8, column: u8, on_color_index: u8, off_color_index: u8) -> Self {
		Self {
			kind,
			row,
			column,
			on_color_index,
			off_color_index,
			pixels: TilePixels::new(),
			diagnostics: Vec::new(),
		}
	}

	/// Replaces the pixel mask.
	pub fn with_pixels(mut self, pixels: TilePixels) -> Self {
		self.pixels = pixels;
		self
	}

	/// Returns true if row and column address a tile on screen.
	pub fn has_valid_location(&self) -> bool {
		(self.row as usize) < MAX_ROWS && (self.column as usize) < MAX_COLUMNS
	}

	/// Returns true if both colors are valid palette indices.
	pub fn has_valid_colors(&self) -> bool {
		self.on_color_index <= MAX_COLOR_INDEX && self.off_color_index <= MAX_COLOR_INDEX
	}

	/// Messages recorded by the repair engine for this tile.
	pub fn diagnostics(&self) -> &[String] {
		&self.diagnostics
	}

	pub(crate) fn push_diagnostic(&mut self, message: String) {
		self.diagnostics.push(message);
	}
}
