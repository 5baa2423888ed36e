//! Frame encoding, the inverse of [`decode`](super::decode).

use crate::constants::{
	CDG_COMMAND, COLOR_INDEX_MASK, COMMAND_OFFSET, INSTRUCTION_OFFSET, PACKET_DATA_OFFSET,
	PACKET_DATA_SIZE, PACKET_SIZE, SUBCODE_MASK, TILE_HEIGHT, TIMING_COMMAND,
};
use crate::packet::{LoadColorTable, PacketData, Scroll, TileBlock};

use super::layout;

/// Encodes decoded fields into a full 24-byte frame.
///
/// Bytes 2-3 and 20-23 are left zero. Timing packets encode to an all-zero frame.
pub fn encode(data: &PacketData) -> [u8; PACKET_SIZE] {
	let mut frame = [0u8; PACKET_SIZE];
	let instruction = data.instruction();

	frame[COMMAND_OFFSET] = match data {
		PacketData::Timing => TIMING_COMMAND,
		_ => CDG_COMMAND,
	};
	frame[INSTRUCTION_OFFSET] = instruction.code();

	let mut payload = [0u8; PACKET_DATA_SIZE];
	match data {
		PacketData::Timing => {}
		PacketData::MemoryPreset(preset) => {
			payload[layout::COLOR] = preset.color_index & COLOR_INDEX_MASK;
			payload[layout::REPEAT] = preset.repeat & COLOR_INDEX_MASK;
		}
		PacketData::BorderPreset(preset) => {
			payload[layout::COLOR] = preset.color_index & COLOR_INDEX_MASK;
		}
		PacketData::DefineTransparency(transparency) => {
			payload[layout::COLOR] = transparency.color_index & COLOR_INDEX_MASK;
		}
		PacketData::LoadColorTable(table) => encode_color_table(&mut payload, table),
		PacketData::TileBlock(tile) => encode_tile_block(&mut payload, tile),
		PacketData::ScrollPreset(preset) => {
			payload[layout::COLOR] = preset.fill_color_index & COLOR_INDEX_MASK;
			encode_scroll(&mut payload, &preset.scroll);
		}
		PacketData::ScrollCopy(scroll) => encode_scroll(&mut payload, scroll),
	}

	frame[PACKET_DATA_OFFSET..PACKET_DATA_OFFSET + PACKET_DATA_SIZE].copy_from_slice(&payload);
	frame
}

fn encode_color_table(payload: &mut [u8; PACKET_DATA_SIZE], table: &LoadColorTable) {
	for (i, color) in table.colors.iter().enumerate() {
		let (r, g, b) = color.to_cdg();
		payload[2 * i] = (r << 2) | (g >> 2);
		payload[2 * i + 1] = ((g & 0x3) << 4) | b;
	}
}

fn encode_tile_block(payload: &mut [u8; PACKET_DATA_SIZE], tile: &TileBlock) {
	payload[layout::TILE_OFF_COLOR] = tile.off_color_index & COLOR_INDEX_MASK;
	payload[layout::TILE_ON_COLOR] = tile.on_color_index & COLOR_INDEX_MASK;
	payload[layout::TILE_ROW] = tile.row & SUBCODE_MASK;
	payload[layout::TILE_COLUMN] = tile.column & SUBCODE_MASK;
	payload[layout::TILE_PIXELS..layout::TILE_PIXELS + TILE_HEIGHT].copy_from_slice(tile.pixels.rows());
}

fn encode_scroll(payload: &mut [u8; PACKET_DATA_SIZE], scroll: &Scroll) {
	payload[layout::SCROLL_HORIZONTAL] =
		(scroll.horizontal.to_u8() << 4) | (scroll.horizontal_offset & 0x07);
	payload[layout::SCROLL_VERTICAL] = (scroll.vertical.to_u8() << 4) | (scroll.vertical_offset & 0x0F);
}
