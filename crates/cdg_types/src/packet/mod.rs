//! CD+G packet model.
//!
//! A [`Packet`] pairs the raw 24-byte frame with its decoded [`PacketData`], a closed
//! set of instruction variants. Unrecognized frames decode to [`PacketData::Timing`]
//! and keep their raw bytes.
//!
//! # Examples
//!
//! ```
//! use cdg_types::packet::{Instruction, MemoryPreset, Packet, PacketData};
//!
//! let packet = Packet::new(PacketData::MemoryPreset(MemoryPreset::new(2, 0)));
//! assert_eq!(packet.instruction(), Instruction::MemoryPreset);
//! assert_eq!(packet.raw()[0], 0x09);
//! assert_eq!(packet.raw()[4], 2);
//! ```

mod color;
mod preset;
mod scroll;
mod tile;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::constants::{INSTRUCTION_OFFSET, PACKET_DATA_OFFSET, PACKET_DATA_SIZE, PACKET_SIZE, SUBCODE_MASK};
use crate::error::{CdgError, Result};

pub use color::{CHANNEL_SCALE, Color, ColorTableSet, LoadColorTable};
pub use preset::{BorderPreset, DefineTransparency, MemoryPreset};
pub use scroll::{HorizontalScroll, Scroll, ScrollPreset, VerticalScroll};
pub use tile::{TileBlock, TileBlockType, TilePixels};

/// Instruction codes, as found in the low 6 bits of byte 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Instruction {
	/// No-op frame, or any unrecognized instruction
	Timing = 0,
	/// Clear the screen
	MemoryPreset = 1,
	/// Paint the border
	BorderPreset = 2,
	/// Draw a tile, overwriting
	TileBlock = 6,
	/// Scroll, filling vacated pixels
	ScrollPreset = 20,
	/// Scroll, wrapping vacated pixels
	ScrollCopy = 24,
	/// Define the transparent color
	DefineTransparency = 28,
	/// Load palette entries 0-7
	LoadColorTableLow = 30,
	/// Load palette entries 8-15
	LoadColorTableHigh = 31,
	/// Draw a tile, XORing
	TileBlockXor = 38,
}

impl Instruction {
	/// Maps an instruction code to an instruction. Unknown codes map to `Timing`.
	pub fn from_code(code: u8) -> Self {
		match code & crate::constants::SUBCODE_MASK {
			1 => Self::MemoryPreset,
			2 => Self::BorderPreset,
			6 => Self::TileBlock,
			20 => Self::ScrollPreset,
			24 => Self::ScrollCopy,
			28 => Self::DefineTransparency,
			30 => Self::LoadColorTableLow,
			31 => Self::LoadColorTableHigh,
			38 => Self::TileBlockXor,
			_ => Self::Timing,
		}
	}

	/// Returns the instruction code.
	pub fn code(self) -> u8 {
		self as u8
	}

	/// Returns true for both tile block instructions.
	pub fn is_tile_block(self) -> bool {
		matches!(self, Self::TileBlock | Self::TileBlockXor)
	}
}

impl fmt::Display for Instruction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Timing => "Timing",
			Self::MemoryPreset => "Memory Preset",
			Self::BorderPreset => "Border Preset",
			Self::TileBlock => "Tile Block Normal",
			Self::ScrollPreset => "Scroll Preset",
			Self::ScrollCopy => "Scroll Copy",
			Self::DefineTransparency => "Define Transparency",
			Self::LoadColorTableLow => "Color Table Low",
			Self::LoadColorTableHigh => "Color Table High",
			Self::TileBlockXor => "Tile Block XOR",
		};
		write!(f, "{name}")
	}
}

/// Decoded fields of a packet, one variant per instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacketData {
	/// Inert frame
	Timing,
	/// Clear the screen
	MemoryPreset(MemoryPreset),
	/// Paint the border
	BorderPreset(BorderPreset),
	/// Load half of the palette
	LoadColorTable(LoadColorTable),
	/// Define the transparent color
	DefineTransparency(DefineTransparency),
	/// Draw a tile
	TileBlock(TileBlock),
	/// Scroll, filling vacated pixels
	ScrollPreset(ScrollPreset),
	/// Scroll, wrapping vacated pixels
	ScrollCopy(Scroll),
}

impl PacketData {
	/// Returns the instruction encoded by this variant.
	pub fn instruction(&self) -> Instruction {
		match self {
			Self::Timing => Instruction::Timing,
			Self::MemoryPreset(_) => Instruction::MemoryPreset,
			Self::BorderPreset(_) => Instruction::BorderPreset,
			Self::LoadColorTable(table) => match table.set {
				ColorTableSet::Low => Instruction::LoadColorTableLow,
				ColorTableSet::High => Instruction::LoadColorTableHigh,
			},
			Self::DefineTransparency(_) => Instruction::DefineTransparency,
			Self::TileBlock(tile) => match tile.kind {
				TileBlockType::Normal => Instruction::TileBlock,
				TileBlockType::Xor => Instruction::TileBlockXor,
			},
			Self::ScrollPreset(_) => Instruction::ScrollPreset,
			Self::ScrollCopy(_) => Instruction::ScrollCopy,
		}
	}
}

/// One 24-byte CD+G packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
	index: Option<usize>,
	raw: [u8; PACKET_SIZE],
	data: PacketData,
}

impl Packet {
	/// Creates a packet from decoded fields. The raw frame is produced by encoding them.
	pub fn new(data: PacketData) -> Self {
		let raw = codec::encode(&data);
		Self {
			index: None,
			raw,
			data,
		}
	}

	/// Creates an inert timing packet.
	pub fn timing() -> Self {
		Self::new(PacketData::Timing)
	}

	pub(crate) fn from_parts(raw: [u8; PACKET_SIZE], data: PacketData) -> Self {
		Self {
			index: None,
			raw,
			data,
		}
	}

	/// Decodes a packet from the first 24 bytes of `bytes`.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		let frame: &[u8; PACKET_SIZE] = bytes
			.get(..PACKET_SIZE)
			.and_then(|slice| slice.try_into().ok())
			.ok_or_else(|| CdgError::insufficient_data(PACKET_SIZE, bytes.len()))?;
		Ok(codec::decode(frame))
	}

	/// Returns the frame bytes to write out.
	///
	/// An unchanged packet reproduces its raw frame, command and parity bytes
	/// included. When the fields were edited, only the instruction code and the
	/// payload are rewritten on top of the raw frame.
	pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
		if matches!(self.data, PacketData::Timing) {
			return self.raw;
		}

		let encoded = codec::encode(&self.data);
		if encoded == codec::encode(codec::decode(&self.raw).data()) {
			return self.raw;
		}

		let mut frame = self.raw;
		frame[INSTRUCTION_OFFSET] = (frame[INSTRUCTION_OFFSET] & !SUBCODE_MASK) | encoded[INSTRUCTION_OFFSET];
		let payload = PACKET_DATA_OFFSET..PACKET_DATA_OFFSET + PACKET_DATA_SIZE;
		frame[payload.clone()].copy_from_slice(&encoded[payload]);
		frame
	}

	/// Position of this packet in its stream, if it was loaded from one.
	#[inline]
	pub fn index(&self) -> Option<usize> {
		self.index
	}

	/// Assigns the stream position.
	pub fn set_index(&mut self, index: usize) {
		self.index = Some(index);
	}

	/// Builder form of [`Self::set_index`].
	pub fn with_index(mut self, index: usize) -> Self {
		self.set_index(index);
		self
	}

	/// Raw frame this packet was decoded from or encoded to.
	#[inline]
	pub fn raw(&self) -> &[u8; PACKET_SIZE] {
		&self.raw
	}

	/// Decoded fields.
	#[inline]
	pub fn data(&self) -> &PacketData {
		&self.data
	}

	/// Instruction carried by this packet.
	#[inline]
	pub fn instruction(&self) -> Instruction {
		self.data.instruction()
	}

	/// Playback time at which this packet occurs. Zero for packets without an index.
	pub fn position(&self) -> Duration {
		self.index.map_or(Duration::ZERO, |index| crate::sequence::packet_count_to_duration(index as u64))
	}

	/// Returns the tile block fields, if this is a tile block.
	pub fn as_tile_block(&self) -> Option<&TileBlock> {
		match &self.data {
			PacketData::TileBlock(tile) => Some(tile),
			_ => None,
		}
	}

	pub(crate) fn as_tile_block_mut(&mut self) -> Option<&mut TileBlock> {
		match &mut self.data {
			PacketData::TileBlock(tile) => Some(tile),
			_ => None,
		}
	}

	/// Returns the memory preset fields, if this is a memory preset.
	pub fn as_memory_preset(&self) -> Option<&MemoryPreset> {
		match &self.data {
			PacketData::MemoryPreset(preset) => Some(preset),
			_ => None,
		}
	}

	/// Returns true for tile blocks of either type.
	pub fn is_tile_block(&self) -> bool {
		matches!(self.data, PacketData::TileBlock(_))
	}
}

impl From<PacketData> for Packet {
	fn from(data: PacketData) -> Self {
		Self::new(data)
	}
}

impl fmt::Display for Packet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.index {
			Some(index) => write!(f, "#{index} {}", self.instruction()),
			None => write!(f, "{}", self.instruction()),
		}
	}
}
