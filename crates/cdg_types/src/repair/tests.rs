//! Unit tests for tile block repair

use super::*;
use crate::packet::{BorderPreset, PacketData, TileBlockType};
use test_log::test;

fn tile(row: u8, column: u8, on: u8, off: u8) -> Packet {
	Packet::new(PacketData::TileBlock(TileBlock::new(TileBlockType::Normal, row, column, on, off)))
}

fn xor_tile(row: u8, column: u8, on: u8, off: u8) -> Packet {
	Packet::new(PacketData::TileBlock(TileBlock::new(TileBlockType::Xor, row, column, on, off)))
}

fn sequence(packets: Vec<Packet>) -> PacketSequence {
	packets.into_iter().collect()
}

fn tile_at(sequence: &PacketSequence, index: usize) -> &TileBlock {
	sequence[index].as_tile_block().unwrap()
}

#[test]
fn test_valid_stream_is_untouched() {
	let mut seq = sequence(vec![tile(0, 0, 1, 0), tile(1, 1, 10, 0), Packet::timing()]);
	let before = seq.clone();
	let results = repair(&mut seq, &Rules::default(), &RepairConfig::default());

	assert!(results.is_empty());
	assert_eq!(seq, before);
}

#[test]
fn test_column_repair_primary_advances() {
	let mut seq = sequence(vec![tile(3, 10, 1, 0), Packet::timing(), tile(3, 60, 1, 0)]);
	let results = repair(&mut seq, &Rules::default(), &RepairConfig::default());

	assert_eq!(tile_at(&seq, 2).column, 11);
	assert_eq!(results.len(), 2);
	assert_eq!(results[0].kind, ValidationKind::Invalid);
	assert_eq!(results[0].index, 2);
	assert_eq!(results[0].instruction, Instruction::TileBlock);
	assert_eq!(results[1].kind, ValidationKind::Repaired);
	assert_eq!(tile_at(&seq, 2).diagnostics(), &["invalid column 60, changed to 11".to_string()]);
}

#[test]
fn test_column_repair_highlight_keeps_column() {
	let mut seq = sequence(vec![tile(3, 10, 1, 0), tile(3, 55, 10, 0)]);
	repair(&mut seq, &Rules::default(), &RepairConfig::default());
	assert_eq!(tile_at(&seq, 1).column, 10);
}

#[test]
fn test_column_repair_past_last_column_is_unresolved() {
	let mut seq = sequence(vec![tile(3, 49, 1, 0), tile(3, 60, 1, 0)]);
	let results = repair(&mut seq, &Rules::default(), &RepairConfig::default());

	assert_eq!(tile_at(&seq, 1).column, 50);
	assert!(results.iter().all(|r| r.kind != ValidationKind::Repaired));
	let unresolved = results.iter().find(|r| r.kind == ValidationKind::Unresolved).unwrap();
	assert_eq!(unresolved.message, "invalid column 60, changed to 50, still out of range");
	assert_eq!(tile_at(&seq, 1).diagnostics(), &[unresolved.message.clone()]);
}

#[test]
fn test_row_repair_copies_previous_row() {
	let mut seq = sequence(vec![tile(7, 2, 1, 0), tile(40, 3, 1, 0)]);
	let results = repair(&mut seq, &Rules::default(), &RepairConfig::default());

	assert_eq!(tile_at(&seq, 1).row, 7);
	assert_eq!(tile_at(&seq, 1).column, 3);
	assert!(results.iter().any(|r| r.kind == ValidationKind::Repaired && r.message.contains("row 40")));
}

#[test]
fn test_location_unresolved_without_previous_tile() {
	let mut seq = sequence(vec![Packet::timing(), tile(20, 60, 1, 0)]);
	let results = repair(&mut seq, &Rules::default(), &RepairConfig::default());

	let tile = tile_at(&seq, 1);
	assert_eq!((tile.row, tile.column), (20, 60));
	let unresolved: Vec<_> = results.iter().filter(|r| r.kind == ValidationKind::Unresolved).collect();
	assert_eq!(unresolved.len(), 2);
	assert_eq!(tile.diagnostics().len(), 2);
	assert!(tile.diagnostics()[0].ends_with("no suitable fix found"));
}

#[test]
fn test_previous_lookup_matches_xor_tiles() {
	let mut seq = sequence(vec![xor_tile(5, 20, 1, 0), Packet::timing(), tile(5, 63, 1, 0)]);
	repair(&mut seq, &Rules::default(), &RepairConfig::default());
	assert_eq!(tile_at(&seq, 2).column, 21);
}

#[test]
fn test_previous_lookup_reaches_first_packet() {
	let mut seq = sequence(vec![tile(2, 0, 1, 0), tile(2, 50, 1, 0)]);
	repair(&mut seq, &Rules::default(), &RepairConfig::default());
	assert_eq!(tile_at(&seq, 1).column, 1);
}

#[test]
fn test_previous_lookup_respects_search_limit() {
	let mut packets = vec![tile(2, 4, 1, 0)];
	packets.extend((0..10).map(|_| Packet::timing()));
	packets.push(tile(2, 50, 1, 0));
	let mut seq = sequence(packets);

	repair(&mut seq, &Rules::default(), &RepairConfig::new(5));
	assert_eq!(tile_at(&seq, 11).column, 50);

	repair(&mut seq, &Rules::default(), &RepairConfig::new(10));
	assert_eq!(tile_at(&seq, 11).column, 5);
}

#[test]
fn test_off_color_single_background() {
	let mut seq = sequence(vec![tile(0, 0, 1, 4)]);
	let results = repair(&mut seq, &Rules::default(), &RepairConfig::default());

	assert_eq!(tile_at(&seq, 0).off_color_index, 0);
	assert_eq!(results.len(), 1);
	assert_eq!(results[0].message, "invalid off color 4, changed to 0");
}

#[test]
fn test_off_color_from_next_tile() {
	let rules = Rules::new([1], [10], [0, 2]).unwrap();
	let mut seq = sequence(vec![tile(0, 0, 1, 4), Packet::timing(), xor_tile(0, 1, 1, 2)]);
	repair(&mut seq, &rules, &RepairConfig::default());
	assert_eq!(tile_at(&seq, 0).off_color_index, 2);
}

#[test]
fn test_off_color_next_tile_invalid_is_unresolved() {
	let rules = Rules::new([1], [10], [0, 2]).unwrap();
	let mut seq = sequence(vec![tile(0, 0, 1, 4), tile(0, 1, 1, 5)]);
	let results = repair(&mut seq, &rules, &RepairConfig::default());

	assert_eq!(tile_at(&seq, 0).off_color_index, 4);
	assert_eq!(tile_at(&seq, 1).off_color_index, 5);
	assert_eq!(results.iter().filter(|r| r.kind == ValidationKind::Unresolved).count(), 2);
}

#[test]
fn test_on_color_repair_disabled_by_default() {
	let mut seq = sequence(vec![tile(0, 0, 7, 0)]);
	let results = repair(&mut seq, &Rules::default(), &RepairConfig::default());
	assert!(results.is_empty());
	assert_eq!(tile_at(&seq, 0).on_color_index, 7);
}

#[test]
fn test_on_color_repair_when_enabled() {
	let config = RepairConfig {
		repair_on_color: true,
		..RepairConfig::default()
	};
	let mut seq = sequence(vec![tile(0, 0, 7, 0), tile(0, 1, 10, 0)]);
	repair(&mut seq, &Rules::default(), &config);
	assert_eq!(tile_at(&seq, 0).on_color_index, 10);
}

#[test]
fn test_out_of_range_colors_reported() {
	let mut seq = sequence(vec![tile(0, 0, 16, 20)]);
	let results = repair(&mut seq, &Rules::default(), &RepairConfig::default());

	let invalid: Vec<_> = results.iter().filter(|r| r.kind == ValidationKind::Invalid).map(|r| &r.message).collect();
	assert_eq!(invalid, vec!["invalid off color 20", "invalid on color 16"]);
}

#[test]
fn test_disabled_repairs_only_report() {
	let config = RepairConfig {
		repair_off_color: false,
		repair_location: false,
		..RepairConfig::default()
	};
	let mut seq = sequence(vec![tile(0, 5, 1, 0), tile(30, 60, 1, 3)]);
	let results = repair(&mut seq, &Rules::default(), &config);

	assert_eq!(results.len(), 2);
	assert!(results.iter().all(|r| r.kind == ValidationKind::Invalid));
	assert_eq!(tile_at(&seq, 1).column, 60);
	assert_eq!(tile_at(&seq, 1).off_color_index, 3);
}

#[test]
fn test_non_tile_packets_ignored() {
	let mut seq = sequence(vec![Packet::new(PacketData::BorderPreset(BorderPreset::new(15)))]);
	assert!(repair(&mut seq, &Rules::default(), &RepairConfig::default()).is_empty());
}

#[test]
fn test_result_display() {
	let mut seq = sequence(vec![tile(0, 0, 1, 4)]);
	let results = repair(&mut seq, &Rules::default(), &RepairConfig::default());
	assert_eq!(results[0].to_string(), "#0 Tile Block Normal [repaired]: invalid off color 4, changed to 0");
}
