//! Packet stream synthesis from a still image.
//!
//! The image is reduced to a 16-entry palette, the screen is cleared, and every
//! 6x12 tile is drawn as one XOR tile block per distinct color in that tile.

use std::collections::{HashMap, HashSet};

use image::RgbImage;

use crate::constants::{
	COLOR_TABLE_SIZE, COLORS_PER_TABLE_PACKET, MAX_COLUMNS, MAX_ROWS, SCREEN_HEIGHT, SCREEN_WIDTH,
	TILE_HEIGHT, TILE_WIDTH,
};
use crate::error::{CdgError, Result};
use crate::packet::{
	Color, ColorTableSet, LoadColorTable, MemoryPreset, Packet, PacketData, TileBlock, TileBlockType,
	TilePixels,
};
use crate::sequence::PacketSequence;

/// Number of memory presets emitted before the first tile
const CLEAR_BURST: u8 = 10;

/// Reduces a color set to at most `max_colors` entries.
pub trait ColorQuantizer {
	/// Returns at most `max_colors` colors representing `colors`.
	fn quantize(&self, colors: &[Color], max_colors: usize) -> Vec<Color>;
}

/// Keeps the first colors in scan order and drops the rest.
///
/// Images with more than 16 colors lose the excess; pixels in a dropped color are
/// drawn with the nearest remaining palette entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughQuantizer;

impl ColorQuantizer for PassthroughQuantizer {
	fn quantize(&self, colors: &[Color], max_colors: usize) -> Vec<Color> {
		if colors.len() > max_colors {
			log::warn!(
				"color quantization is not implemented, keeping the first {max_colors} of {} colors",
				colors.len()
			);
		}
		colors.iter().copied().take(max_colors).collect()
	}
}

/// Returns the distinct colors of `image` in row-major order of first appearance.
pub fn distinct_colors(image: &RgbImage) -> Vec<Color> {
	let mut seen = HashSet::new();
	let mut colors = Vec::new();
	for pixel in image.pixels() {
		let color = Color::from(*pixel);
		if seen.insert(color) {
			colors.push(color);
		}
	}
	colors
}

/// Splits a palette into low and high color table packets, padding with black.
///
/// Entries past the sixteenth are ignored.
pub fn build_color_table(palette: &[Color]) -> [LoadColorTable; 2] {
	let mut entries = [Color::BLACK; COLOR_TABLE_SIZE];
	for (entry, color) in entries.iter_mut().zip(palette) {
		*entry = *color;
	}

	let mut low = [Color::BLACK; COLORS_PER_TABLE_PACKET];
	let mut high = [Color::BLACK; COLORS_PER_TABLE_PACKET];
	low.copy_from_slice(&entries[..COLORS_PER_TABLE_PACKET]);
	high.copy_from_slice(&entries[COLORS_PER_TABLE_PACKET..]);

	[LoadColorTable::new(ColorTableSet::Low, low), LoadColorTable::new(ColorTableSet::High, high)]
}

/// Converts a 300x216 image into a complete packet stream.
///
/// The stream holds two color table packets, a burst of ten memory presets, then
/// XOR tile blocks covering the 50x18 tile grid. Packets carry no index.
///
/// # Errors
///
/// Returns [`CdgError::InvalidImageSize`] if the image is not 300x216.
pub fn synthesize(image: &RgbImage, quantizer: &dyn ColorQuantizer) -> Result<PacketSequence> {
	let (width, height) = image.dimensions();
	if width as usize != SCREEN_WIDTH || height as usize != SCREEN_HEIGHT {
		return Err(CdgError::InvalidImageSize {
			width,
			height,
		});
	}

	let mut colors = distinct_colors(image);
	if colors.len() > COLOR_TABLE_SIZE {
		colors = quantizer.quantize(&colors, COLOR_TABLE_SIZE);
	}
	let tables = build_color_table(&colors);
	let palette = PaletteLookup::new(&tables);

	let mut packets = Vec::with_capacity(2 + CLEAR_BURST as usize + MAX_ROWS * MAX_COLUMNS);
	packets.extend(tables.iter().map(|table| Packet::new(PacketData::LoadColorTable(*table))));
	packets.extend((0..CLEAR_BURST).map(|repeat| Packet::new(PacketData::MemoryPreset(MemoryPreset::new(0, repeat)))));

	let mut lookup_cache = HashMap::new();
	for row in 0..MAX_ROWS {
		for column in 0..MAX_COLUMNS {
			// (on color, mask) in order of first appearance within the tile
			let mut batch: Vec<(u8, TilePixels)> = Vec::new();
			for y in 0..TILE_HEIGHT {
				for x in 0..TILE_WIDTH {
					let pixel = image.get_pixel((column * TILE_WIDTH + x) as u32, (row * TILE_HEIGHT + y) as u32);
					let color = Color::from(*pixel);
					let index = *lookup_cache.entry(color).or_insert_with(|| palette.index_of(color));

					match batch.iter_mut().find(|(on, _)| *on == index) {
						Some((_, pixels)) => pixels.set(x, y, true),
						None => {
							let mut pixels = TilePixels::new();
							pixels.set(x, y, true);
							batch.push((index, pixels));
						}
					}
				}
			}

			packets.extend(batch.into_iter().map(|(on, pixels)| {
				let tile = TileBlock::new(TileBlockType::Xor, row as u8, column as u8, on, 0).with_pixels(pixels);
				Packet::new(PacketData::TileBlock(tile))
			}));
		}
	}

	log::debug!("synthesized {} packets from {} colors", packets.len(), colors.len());
	Ok(PacketSequence::from_packets(packets))
}

/// Maps image colors onto the 16 palette entries.
struct PaletteLookup {
	entries: [Color; COLOR_TABLE_SIZE],
}

impl PaletteLookup {
	fn new(tables: &[LoadColorTable; 2]) -> Self {
		let mut entries = [Color::BLACK; COLOR_TABLE_SIZE];
		for table in tables {
			for (i, color) in table.colors.iter().enumerate() {
				entries[table.palette_index(i)] = *color;
			}
		}
		Self {
			entries,
		}
	}

	/// Exact match first, nearest by squared RGB distance otherwise.
	fn index_of(&self, color: Color) -> u8 {
		if let Some(index) = self.entries.iter().position(|entry| entry.to_rgb() == color.to_rgb()) {
			return index as u8;
		}

		let distance = |entry: &Color| {
			let [r1, g1, b1] = entry.to_rgb().map(i32::from);
			let [r2, g2, b2] = color.to_rgb().map(i32::from);
			(r1 - r2).pow(2) + (g1 - g2).pow(2) + (b1 - b2).pow(2)
		};
		self.entries
			.iter()
			.enumerate()
			.min_by_key(|(_, entry)| distance(entry))
			.map_or(0, |(index, _)| index as u8)
	}
}
