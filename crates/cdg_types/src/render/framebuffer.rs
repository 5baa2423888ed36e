//! Palette index framebuffer.

use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// A 300x216 grid of palette indices, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
	cells: Vec<u8>,
}

impl Default for Framebuffer {
	fn default() -> Self {
		Self::new()
	}
}

impl Framebuffer {
	/// Creates a framebuffer with every cell set to index 0.
	pub fn new() -> Self {
		Self {
			cells: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
		}
	}

	/// Width in pixels.
	#[inline]
	pub const fn width(&self) -> usize {
		SCREEN_WIDTH
	}

	/// Height in pixels.
	#[inline]
	pub const fn height(&self) -> usize {
		SCREEN_HEIGHT
	}

	/// Returns the cell at (`x`, `y`), or `None` out of bounds.
	#[inline]
	pub fn get(&self, x: usize, y: usize) -> Option<u8> {
		if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
			return None;
		}
		self.cells.get(y * SCREEN_WIDTH + x).copied()
	}

	/// Sets the cell at (`x`, `y`). Returns `false` if out of bounds.
	#[inline]
	pub fn set(&mut self, x: usize, y: usize, value: u8) -> bool {
		if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
			return false;
		}
		match self.cells.get_mut(y * SCREEN_WIDTH + x) {
			Some(cell) => {
				*cell = value;
				true
			}
			None => false,
		}
	}

	/// Sets every cell to `value`.
	pub fn fill(&mut self, value: u8) {
		self.cells.fill(value);
	}

	/// Sets every cell of a rectangle, clipped to the screen.
	pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, value: u8) {
		let right = (x + width).min(SCREEN_WIDTH);
		let bottom = (y + height).min(SCREEN_HEIGHT);
		for row in y.min(bottom)..bottom {
			self.cells[row * SCREEN_WIDTH + x.min(right)..row * SCREEN_WIDTH + right].fill(value);
		}
	}

	/// All cells, row-major.
	pub fn cells(&self) -> &[u8] {
		&self.cells
	}

	/// Moves the contents by (`dx`, `dy`) pixels.
	///
	/// Cells uncovered by the move take `fill`, or wrap around from the opposite
	/// edge when `fill` is `None`.
	pub fn shift(&mut self, dx: isize, dy: isize, fill: Option<u8>) {
		if dx == 0 && dy == 0 {
			return;
		}

		let width = SCREEN_WIDTH as isize;
		let height = SCREEN_HEIGHT as isize;
		let source = self.cells.clone();

		for y in 0..height {
			for x in 0..width {
				let (sx, sy) = (x - dx, y - dy);
				let value = match fill {
					Some(fill) if sx < 0 || sx >= width || sy < 0 || sy >= height => fill,
					_ => source[(sy.rem_euclid(height) * width + sx.rem_euclid(width)) as usize],
				};
				self.cells[(y * width + x) as usize] = value;
			}
		}
	}
}
