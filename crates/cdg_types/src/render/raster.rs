//! Rendered RGB output.

use image::{Rgb, RgbImage, Rgba, RgbaImage};

use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::packet::Color;

/// A fully resolved 300x216 frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
	pixels: Vec<Color>,
}

impl Raster {
	pub(super) fn from_pixels(pixels: Vec<Color>) -> Self {
		debug_assert_eq!(pixels.len(), SCREEN_WIDTH * SCREEN_HEIGHT);
		Self {
			pixels,
		}
	}

	/// Width in pixels.
	#[inline]
	pub const fn width(&self) -> u32 {
		SCREEN_WIDTH as u32
	}

	/// Height in pixels.
	#[inline]
	pub const fn height(&self) -> u32 {
		SCREEN_HEIGHT as u32
	}

	/// Returns the color at (`x`, `y`), or `None` out of bounds.
	pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
		if x >= self.width() || y >= self.height() {
			return None;
		}
		self.pixels.get((y * self.width() + x) as usize).copied()
	}

	/// All pixels, row-major.
	pub fn pixels(&self) -> &[Color] {
		&self.pixels
	}

	/// Converts to an RGB image, dropping alpha.
	pub fn to_rgb_image(&self) -> RgbImage {
		RgbImage::from_fn(self.width(), self.height(), |x, y| {
			let color = self.pixels[(y * self.width() + x) as usize];
			Rgb(color.to_rgb())
		})
	}

	/// Converts to an RGBA image.
	pub fn to_rgba_image(&self) -> RgbaImage {
		RgbaImage::from_fn(self.width(), self.height(), |x, y| {
			let color = self.pixels[(y * self.width() + x) as usize];
			Rgba([color.r, color.g, color.b, color.a])
		})
	}
}
