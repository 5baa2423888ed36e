//! Tile block repair.
//!
//! Streams ripped from damaged discs carry tile blocks with out-of-range columns
//! and rows, or colors that do not fit the screen's color roles. [`repair`] walks
//! every tile block, reports structural problems and patches what it can from
//! neighboring tiles:
//!
//! - **Colors**: a color outside its role is replaced by the only valid color of
//!   that role, or by the matching color of the next tile if that one is valid.
//! - **Location**: an invalid column is derived from the previous tile (one column
//!   further for primary colored text), an invalid row is copied from it.
//!
//! Neighbor lookups match both normal and XOR tiles and are bounded by
//! [`RepairConfig::search_limit`].
//!
//! # Examples
//!
//! ```
//! use cdg_types::packet::{Packet, PacketData, TileBlock, TileBlockType};
//! use cdg_types::repair::{RepairConfig, Rules, repair};
//! use cdg_types::sequence::PacketSequence;
//!
//! let mut sequence: PacketSequence = [
//! 	TileBlock::new(TileBlockType::Normal, 3, 10, 1, 0),
//! 	TileBlock::new(TileBlockType::Normal, 3, 60, 1, 0),
//! ]
//! .into_iter()
//! .map(|tile| Packet::new(PacketData::TileBlock(tile)))
//! .collect();
//!
//! let results = repair(&mut sequence, &Rules::default(), &RepairConfig::default());
//! assert_eq!(sequence[1].as_tile_block().unwrap().column, 11);
//! assert!(!results.is_empty());
//! ```

mod rules;

#[cfg(test)]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_COLOR_INDEX, MAX_COLUMNS, MAX_ROWS};
use crate::packet::{Instruction, Packet, TileBlock};
use crate::sequence::PacketSequence;

pub use rules::{RepairConfig, Rules};

/// Outcome class of a validation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationKind {
	/// A field is out of range
	Invalid,
	/// A field was changed
	Repaired,
	/// A field needed a fix and none was found
	Unresolved,
}

impl fmt::Display for ValidationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Invalid => write!(f, "invalid"),
			Self::Repaired => write!(f, "repaired"),
			Self::Unresolved => write!(f, "unresolved"),
		}
	}
}

/// One diagnostic produced by [`repair`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
	/// Position of the packet in the sequence
	pub index: usize,
	/// Instruction of the packet
	pub instruction: Instruction,
	/// Human readable description
	pub message: String,
	/// Outcome class
	pub kind: ValidationKind,
}

impl fmt::Display for ValidationResult {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{} {} [{}]: {}", self.index, self.instruction, self.kind, self.message)
	}
}

/// Which tile color a repair targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorRole {
	On,
	Off,
}

impl ColorRole {
	fn get(self, tile: &TileBlock) -> u8 {
		match self {
			Self::On => tile.on_color_index,
			Self::Off => tile.off_color_index,
		}
	}

	fn set(self, tile: &mut TileBlock, value: u8) {
		match self {
			Self::On => tile.on_color_index = value,
			Self::Off => tile.off_color_index = value,
		}
	}
}

impl fmt::Display for ColorRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::On => write!(f, "on"),
			Self::Off => write!(f, "off"),
		}
	}
}

/// Validates and repairs every tile block of `sequence` in place.
///
/// Returns every structural problem, change and unresolved condition, in stream
/// order. Changes and unresolved conditions are also recorded on the tile itself
/// (see [`TileBlock::diagnostics`]).
pub fn repair(sequence: &mut PacketSequence, rules: &Rules, config: &RepairConfig) -> Vec<ValidationResult> {
	let packet_count = sequence.len();
	let mut repairer = Repairer {
		sequence,
		rules,
		config,
		results: Vec::new(),
	};

	for index in 0..packet_count {
		if !repairer.sequence[index].is_tile_block() {
			continue;
		}

		repairer.check_structure(index);
		if config.repair_on_color {
			repairer.repair_color(index, ColorRole::On);
		}
		if config.repair_off_color {
			repairer.repair_color(index, ColorRole::Off);
		}
		if config.repair_location {
			repairer.repair_location(index);
		}
	}

	let results = repairer.results;
	let repaired = results.iter().filter(|r| r.kind == ValidationKind::Repaired).count();
	let unresolved = results.iter().filter(|r| r.kind == ValidationKind::Unresolved).count();
	log::debug!(
		"repair pass over {packet_count} packets: {} entries, {repaired} repaired, {unresolved} unresolved",
		results.len()
	);
	results
}

struct Repairer<'a> {
	sequence: &'a mut PacketSequence,
	rules: &'a Rules,
	config: &'a RepairConfig,
	results: Vec<ValidationResult>,
}

impl Repairer<'_> {
	fn tile(&self, index: usize) -> Option<&TileBlock> {
		self.sequence.get(index).and_then(Packet::as_tile_block)
	}

	fn next_tile(&self, index: usize) -> Option<&TileBlock> {
		let found = self.sequence.find_next_where(index + 1, self.config.search_limit, Packet::is_tile_block)?;
		self.tile(found)
	}

	fn previous_tile(&self, index: usize) -> Option<&TileBlock> {
		let start = index.checked_sub(1)?;
		let found = self.sequence.find_previous_where(start, self.config.search_limit, Packet::is_tile_block)?;
		self.tile(found)
	}

	fn check_structure(&mut self, index: usize) {
		let Some(tile) = self.tile(index) else {
			return;
		};

		let mut problems = Vec::new();
		if tile.column as usize >= MAX_COLUMNS {
			problems.push(format!("invalid column {}", tile.column));
		}
		if tile.row as usize >= MAX_ROWS {
			problems.push(format!("invalid row {}", tile.row));
		}
		if tile.off_color_index > MAX_COLOR_INDEX {
			problems.push(format!("invalid off color {}", tile.off_color_index));
		}
		if tile.on_color_index > MAX_COLOR_INDEX {
			problems.push(format!("invalid on color {}", tile.on_color_index));
		}

		for message in problems {
			self.report(index, ValidationKind::Invalid, message);
		}
	}

	fn repair_color(&mut self, index: usize, role: ColorRole) {
		let Some(current) = self.tile(index).map(|tile| role.get(tile)) else {
			return;
		};
		let valid = match role {
			ColorRole::On => self.rules.on_colors(),
			ColorRole::Off => self.rules.off_colors(),
		};
		if valid.contains(&current) {
			return;
		}

		let replacement = match valid.as_slice() {
			[only] => Some(*only),
			_ => self.next_tile(index).map(|next| role.get(next)).filter(|color| valid.contains(color)),
		};

		match replacement {
			Some(color) => {
				self.update_tile(index, |tile| role.set(tile, color));
				self.record(
					index,
					ValidationKind::Repaired,
					format!("invalid {role} color {current}, changed to {color}"),
				);
			}
			None => self.record(
				index,
				ValidationKind::Unresolved,
				format!("invalid {role} color {current}, no suitable fix found"),
			),
		}
	}

	fn repair_location(&mut self, index: usize) {
		let Some(tile) = self.tile(index) else {
			return;
		};
		let (row, column) = (tile.row, tile.column);
		let is_primary = self.rules.is_primary(tile.on_color_index);
		let previous = self.previous_tile(index).map(|previous| (previous.row, previous.column));

		if column as usize >= MAX_COLUMNS {
			match previous {
				Some((_, previous_column)) => {
					let fixed = if is_primary {
						previous_column.saturating_add(1)
					} else {
						previous_column
					};
					self.update_tile(index, |tile| tile.column = fixed);
					if (fixed as usize) < MAX_COLUMNS {
						self.record(index, ValidationKind::Repaired, format!("invalid column {column}, changed to {fixed}"));
					} else {
						self.record(
							index,
							ValidationKind::Unresolved,
							format!("invalid column {column}, changed to {fixed}, still out of range"),
						);
					}
				}
				None => self.record(
					index,
					ValidationKind::Unresolved,
					format!("invalid column {column}, no suitable fix found"),
				),
			}
		}

		if row as usize >= MAX_ROWS {
			match previous {
				Some((previous_row, _)) => {
					self.update_tile(index, |tile| tile.row = previous_row);
					self.record(index, ValidationKind::Repaired, format!("invalid row {row}, changed to {previous_row}"));
				}
				None => self.record(
					index,
					ValidationKind::Unresolved,
					format!("invalid row {row}, no suitable fix found"),
				),
			}
		}
	}

	fn update_tile(&mut self, index: usize, update: impl FnOnce(&mut TileBlock)) {
		if let Some(tile) = self.sequence.get_mut(index).and_then(Packet::as_tile_block_mut) {
			update(tile);
		}
	}

	/// Adds an entry to the aggregate results only.
	fn report(&mut self, index: usize, kind: ValidationKind, message: String) {
		let instruction = self.sequence[index].instruction();
		if kind == ValidationKind::Unresolved {
			log::warn!("packet #{index} {instruction}: {message}");
		} else {
			log::debug!("packet #{index} {instruction}: {message}");
		}
		self.results.push(ValidationResult {
			index,
			instruction,
			message,
			kind,
		});
	}

	/// Adds an entry to both the tile's diagnostics and the aggregate results.
	fn record(&mut self, index: usize, kind: ValidationKind, message: String) {
		self.update_tile(index, |tile| tile.push_diagnostic(message.clone()));
		self.report(index, kind, message);
	}
}
