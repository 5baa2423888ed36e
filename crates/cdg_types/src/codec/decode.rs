//! Frame decoding.
//!
//! Every field is read from the 16-byte payload starting at byte 4. Only the low
//! 6 bits of each payload byte carry data; palette indices use the low 4.
//!
//! | Instruction        | Payload layout                                               |
//! |--------------------|--------------------------------------------------------------|
//! | Memory preset      | `[0]` color, `[1]` repeat                                    |
//! | Border preset      | `[0]` color                                                  |
//! | Tile block         | `[0]` off color, `[1]` on color, `[2]` row, `[3]` column, `[4..16]` pixel rows |
//! | Scroll preset/copy | `[0]` fill color, `[1]` horizontal control, `[2]` vertical control |
//! | Transparency       | `[0]` color                                                  |
//! | Color table        | `[2i]`, `[2i+1]` packed 4-bit RGB for entry `i` (0-7)        |

use crate::constants::{
	COLOR_INDEX_MASK, COLORS_PER_TABLE_PACKET, INSTRUCTION_OFFSET, MAX_HORIZONTAL_OFFSET,
	MAX_VERTICAL_OFFSET, PACKET_DATA_OFFSET, PACKET_DATA_SIZE, PACKET_SIZE, SUBCODE_MASK, TILE_HEIGHT,
};
use crate::packet::{
	BorderPreset, Color, ColorTableSet, DefineTransparency, HorizontalScroll, Instruction, LoadColorTable,
	MemoryPreset, Packet, PacketData, Scroll, ScrollPreset, TileBlock, TileBlockType, TilePixels,
	VerticalScroll,
};

use super::layout;

/// Decodes one frame. Never fails: unrecognized instruction codes become timing packets.
///
/// The returned packet has no index; the caller assigns stream positions.
pub fn decode(frame: &[u8; PACKET_SIZE]) -> Packet {
	let mut payload = [0u8; PACKET_DATA_SIZE];
	payload.copy_from_slice(&frame[PACKET_DATA_OFFSET..PACKET_DATA_OFFSET + PACKET_DATA_SIZE]);

	let data = match Instruction::from_code(frame[INSTRUCTION_OFFSET]) {
		Instruction::Timing => PacketData::Timing,
		Instruction::MemoryPreset => PacketData::MemoryPreset(decode_memory_preset(&payload)),
		Instruction::BorderPreset => PacketData::BorderPreset(decode_border_preset(&payload)),
		Instruction::TileBlock => PacketData::TileBlock(decode_tile_block(&payload, TileBlockType::Normal)),
		Instruction::TileBlockXor => PacketData::TileBlock(decode_tile_block(&payload, TileBlockType::Xor)),
		Instruction::ScrollPreset => PacketData::ScrollPreset(decode_scroll_preset(&payload)),
		Instruction::ScrollCopy => PacketData::ScrollCopy(decode_scroll_preset(&payload).scroll),
		Instruction::DefineTransparency => {
			PacketData::DefineTransparency(decode_transparency(&payload))
		}
		Instruction::LoadColorTableLow => {
			PacketData::LoadColorTable(decode_color_table(&payload, ColorTableSet::Low))
		}
		Instruction::LoadColorTableHigh => {
			PacketData::LoadColorTable(decode_color_table(&payload, ColorTableSet::High))
		}
	};

	Packet::from_parts(*frame, data)
}

#[inline]
fn color_index(byte: u8) -> u8 {
	byte & SUBCODE_MASK & COLOR_INDEX_MASK
}

fn decode_memory_preset(payload: &[u8; PACKET_DATA_SIZE]) -> MemoryPreset {
	MemoryPreset::new(color_index(payload[layout::COLOR]), payload[layout::REPEAT] & COLOR_INDEX_MASK)
}

fn decode_border_preset(payload: &[u8; PACKET_DATA_SIZE]) -> BorderPreset {
	BorderPreset::new(color_index(payload[layout::COLOR]))
}

fn decode_transparency(payload: &[u8; PACKET_DATA_SIZE]) -> DefineTransparency {
	DefineTransparency::new(color_index(payload[layout::COLOR]))
}

fn decode_color_table(payload: &[u8; PACKET_DATA_SIZE], set: ColorTableSet) -> LoadColorTable {
	let mut colors = [Color::BLACK; COLORS_PER_TABLE_PACKET];
	for (i, color) in colors.iter_mut().enumerate() {
		let high = payload[2 * i] & SUBCODE_MASK;
		let low = payload[2 * i + 1] & SUBCODE_MASK;

		let r = high >> 2;
		let g = ((high & 0x3) << 2) | (low >> 4);
		let b = low & 0xF;

		*color = Color::from_cdg(r, g, b);
	}

	LoadColorTable::new(set, colors)
}

fn decode_tile_block(payload: &[u8; PACKET_DATA_SIZE], kind: TileBlockType) -> TileBlock {
	let mut rows = [0u8; TILE_HEIGHT];
	rows.copy_from_slice(&payload[layout::TILE_PIXELS..layout::TILE_PIXELS + TILE_HEIGHT]);

	TileBlock::new(
		kind,
		payload[layout::TILE_ROW] & SUBCODE_MASK,
		payload[layout::TILE_COLUMN] & SUBCODE_MASK,
		color_index(payload[layout::TILE_ON_COLOR]),
		color_index(payload[layout::TILE_OFF_COLOR]),
	)
	.with_pixels(TilePixels::from_rows(rows))
}

fn decode_scroll_preset(payload: &[u8; PACKET_DATA_SIZE]) -> ScrollPreset {
	let horizontal = payload[layout::SCROLL_HORIZONTAL] & SUBCODE_MASK;
	let vertical = payload[layout::SCROLL_VERTICAL] & SUBCODE_MASK;

	let scroll = Scroll {
		horizontal: HorizontalScroll::from_u8((horizontal & 0x30) >> 4),
		vertical: VerticalScroll::from_u8((vertical & 0x30) >> 4),
		horizontal_offset: (horizontal & 0x07).min(MAX_HORIZONTAL_OFFSET),
		vertical_offset: (vertical & 0x0F).min(MAX_VERTICAL_OFFSET),
	};

	ScrollPreset::new(payload[layout::COLOR] & COLOR_INDEX_MASK, scroll)
}
