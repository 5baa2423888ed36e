//! Packet interpreter.
//!
//! A [`Renderer`] owns the framebuffer of palette indices, the 16-entry color table
//! and the scalar screen state. Packets are applied in stream order with
//! [`Renderer::apply`]; [`Renderer::render`] resolves the current state into a
//! [`Raster`].
//!
//! # Screen layout
//!
//! ```text
//!  0      6                               294   300
//!  +------+-------------------------------+------+ 0
//!  |                  border                     |
//!  +------+-------------------------------+------+ 12
//!  |      |                               |      |
//!  |      |        visible area           |      |
//!  |      |                               |      |
//!  +------+-------------------------------+------+ 204
//!  |                  border                     |
//!  +------+-------------------------------+------+ 216
//! ```
//!
//! Border pixels always render with the border color. Inside, the output pixel at
//! (`x`, `y`) shows framebuffer cell (`x + horizontal_offset`, `y + vertical_offset`).
//!
//! # Examples
//!
//! ```
//! use cdg_types::packet::{MemoryPreset, Packet, PacketData};
//! use cdg_types::render::Renderer;
//!
//! let mut renderer = Renderer::with_default_palette();
//! renderer.apply(&Packet::new(PacketData::MemoryPreset(MemoryPreset::new(9, 0))));
//!
//! let raster = renderer.render();
//! assert_eq!(raster.pixel(150, 100), Some(renderer.color_table()[9]));
//! ```

mod framebuffer;
mod raster;

use crate::constants::{
	BORDER_HEIGHT, BORDER_WIDTH, COLOR_TABLE_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH, TILE_HEIGHT, TILE_WIDTH,
};
use crate::packet::{
	Color, HorizontalScroll, LoadColorTable, MemoryPreset, Packet, PacketData, Scroll, TileBlock,
	TileBlockType, VerticalScroll,
};
use crate::sequence::PacketSequence;

pub use framebuffer::Framebuffer;
pub use raster::Raster;

/// What [`Renderer::apply`] did with a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
	/// State was updated
	Applied,
	/// The packet carries no state change (timing, repeated memory preset)
	Ignored,
	/// A tile block addressed a location outside the screen
	Rejected {
		/// Tile row
		row: u8,
		/// Tile column
		column: u8,
	},
}

/// CD+G interpreter state.
#[derive(Debug, Clone)]
pub struct Renderer {
	framebuffer: Framebuffer,
	color_table: [Color; COLOR_TABLE_SIZE],
	border_color_index: u8,
	preset_color_index: u8,
	transparent_color_index: u8,
	horizontal_offset: u8,
	vertical_offset: u8,
	applied_count: usize,
}

impl Default for Renderer {
	fn default() -> Self {
		Self::new()
	}
}

impl Renderer {
	/// Creates a renderer with all state zeroed.
	pub fn new() -> Self {
		Self {
			framebuffer: Framebuffer::new(),
			color_table: [Color::default(); COLOR_TABLE_SIZE],
			border_color_index: 0,
			preset_color_index: 0,
			transparent_color_index: 0,
			horizontal_offset: 0,
			vertical_offset: 0,
			applied_count: 0,
		}
	}

	/// Creates a renderer with the default color table loaded.
	pub fn with_default_palette() -> Self {
		let mut renderer = Self::new();
		renderer.load_color_table(&LoadColorTable::default_low());
		renderer.load_color_table(&LoadColorTable::default_high());
		renderer
	}

	/// Zeroes the framebuffer, the color table and every scalar.
	pub fn reset(&mut self) {
		*self = Self::new();
	}

	/// Applies one packet.
	pub fn apply(&mut self, packet: &Packet) -> ApplyOutcome {
		self.applied_count += 1;

		match packet.data() {
			PacketData::Timing => ApplyOutcome::Ignored,
			PacketData::MemoryPreset(preset) => self.memory_preset(preset),
			PacketData::BorderPreset(preset) => {
				self.border_preset(preset.color_index);
				ApplyOutcome::Applied
			}
			PacketData::LoadColorTable(table) => {
				self.load_color_table(table);
				ApplyOutcome::Applied
			}
			PacketData::DefineTransparency(transparency) => {
				self.transparent_color_index = transparency.color_index;
				ApplyOutcome::Applied
			}
			PacketData::TileBlock(tile) => {
				let outcome = self.tile_block(tile);
				if let ApplyOutcome::Rejected {
					row,
					column,
				} = outcome
				{
					log::warn!("rejected tile block at row {row}, column {column} from {packet}");
				}
				outcome
			}
			PacketData::ScrollPreset(preset) => {
				self.scroll(&preset.scroll, Some(preset.fill_color_index));
				ApplyOutcome::Applied
			}
			PacketData::ScrollCopy(scroll) => {
				self.scroll(scroll, None);
				ApplyOutcome::Applied
			}
		}
	}

	/// Applies every packet of `sequence` in order. Returns the number of rejected tiles.
	pub fn apply_all(&mut self, sequence: &PacketSequence) -> usize {
		sequence
			.iter()
			.filter(|packet| matches!(self.apply(packet), ApplyOutcome::Rejected { .. }))
			.count()
	}

	/// Resolves the current state into colors.
	///
	/// Indices past the color table resolve through entry 0.
	pub fn render(&self) -> Raster {
		let mut pixels = Vec::with_capacity(SCREEN_WIDTH * SCREEN_HEIGHT);
		for y in 0..SCREEN_HEIGHT {
			for x in 0..SCREEN_WIDTH {
				let index = if is_border(x, y) {
					self.border_color_index
				} else {
					self.framebuffer
						.get(x + self.horizontal_offset as usize, y + self.vertical_offset as usize)
						.unwrap_or(0)
				};
				pixels.push(self.color(index));
			}
		}
		Raster::from_pixels(pixels)
	}

	/// Framebuffer cell at (`x`, `y`), ignoring border and offsets.
	pub fn index_at(&self, x: usize, y: usize) -> Option<u8> {
		self.framebuffer.get(x, y)
	}

	/// The framebuffer.
	pub fn framebuffer(&self) -> &Framebuffer {
		&self.framebuffer
	}

	/// The current color table.
	pub fn color_table(&self) -> &[Color; COLOR_TABLE_SIZE] {
		&self.color_table
	}

	/// Palette index of the border.
	pub fn border_color_index(&self) -> u8 {
		self.border_color_index
	}

	/// Palette index of the last screen clear.
	pub fn preset_color_index(&self) -> u8 {
		self.preset_color_index
	}

	/// Palette index marked transparent. Recorded only, rendering does not use it.
	pub fn transparent_color_index(&self) -> u8 {
		self.transparent_color_index
	}

	/// Horizontal display offset in pixels.
	pub fn horizontal_offset(&self) -> u8 {
		self.horizontal_offset
	}

	/// Vertical display offset in pixels.
	pub fn vertical_offset(&self) -> u8 {
		self.vertical_offset
	}

	/// Number of packets applied since creation or the last reset.
	pub fn applied_count(&self) -> usize {
		self.applied_count
	}

	#[inline]
	fn color(&self, index: u8) -> Color {
		let index = if (index as usize) < COLOR_TABLE_SIZE {
			index as usize
		} else {
			0
		};
		self.color_table[index]
	}

	fn memory_preset(&mut self, preset: &MemoryPreset) -> ApplyOutcome {
		if !preset.is_first_of_burst() {
			return ApplyOutcome::Ignored;
		}

		self.preset_color_index = preset.color_index;
		self.border_color_index = preset.color_index;
		self.framebuffer.fill(preset.color_index);
		ApplyOutcome::Applied
	}

	fn border_preset(&mut self, color_index: u8) {
		self.border_color_index = color_index;

		let fb = &mut self.framebuffer;
		fb.fill_rect(0, 0, SCREEN_WIDTH, BORDER_HEIGHT, color_index);
		fb.fill_rect(0, SCREEN_HEIGHT - BORDER_HEIGHT, SCREEN_WIDTH, BORDER_HEIGHT, color_index);
		fb.fill_rect(0, 0, BORDER_WIDTH, SCREEN_HEIGHT, color_index);
		fb.fill_rect(SCREEN_WIDTH - BORDER_WIDTH, 0, BORDER_WIDTH, SCREEN_HEIGHT, color_index);
	}

	fn load_color_table(&mut self, table: &LoadColorTable) {
		for (i, color) in table.colors.iter().enumerate() {
			self.color_table[table.palette_index(i)] = *color;
		}
	}

	fn tile_block(&mut self, tile: &TileBlock) -> ApplyOutcome {
		let top = tile.row as usize * TILE_HEIGHT;
		let left = tile.column as usize * TILE_WIDTH;
		if top >= SCREEN_HEIGHT || left >= SCREEN_WIDTH {
			return ApplyOutcome::Rejected {
				row: tile.row,
				column: tile.column,
			};
		}

		for y in 0..TILE_HEIGHT {
			for x in 0..TILE_WIDTH {
				let (px, py) = (left + x, top + y);
				let Some(current) = self.framebuffer.get(px, py) else {
					continue;
				};

				let color = if tile.pixels.get(x, y) {
					tile.on_color_index
				} else {
					tile.off_color_index
				};
				let value = match tile.kind {
					TileBlockType::Normal => color,
					TileBlockType::Xor => current ^ color,
				};
				self.framebuffer.set(px, py, value);
			}
		}

		ApplyOutcome::Applied
	}

	fn scroll(&mut self, scroll: &Scroll, fill: Option<u8>) {
		let dx = match scroll.horizontal {
			HorizontalScroll::None => 0,
			HorizontalScroll::Right => TILE_WIDTH as isize,
			HorizontalScroll::Left => -(TILE_WIDTH as isize),
		};
		let dy = match scroll.vertical {
			VerticalScroll::None => 0,
			VerticalScroll::Down => TILE_HEIGHT as isize,
			VerticalScroll::Up => -(TILE_HEIGHT as isize),
		};

		self.framebuffer.shift(dx, dy, fill);
		self.horizontal_offset = scroll.horizontal_offset;
		self.vertical_offset = scroll.vertical_offset;
	}
}

#[inline]
fn is_border(x: usize, y: usize) -> bool {
	x < BORDER_WIDTH || x >= SCREEN_WIDTH - BORDER_WIDTH || y < BORDER_HEIGHT || y >= SCREEN_HEIGHT - BORDER_HEIGHT
}
