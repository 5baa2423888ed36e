//! Behavior of whole streams through decode, repair and render.

use cdg_rs::prelude::*;
use test_log::test;

use crate::{frame, stream};

#[test]
fn memory_preset_frame_clears_screen() {
	let bytes = stream(&[frame(1, &[0x02, 0x00])]);
	let sequence = PacketSequence::from_bytes(&bytes).unwrap();
	assert_eq!(sequence[0].instruction(), Instruction::MemoryPreset);

	let mut renderer = Renderer::new();
	assert_eq!(renderer.apply_all(&sequence), 0);
	assert!(renderer.framebuffer().cells().iter().all(|&cell| cell == 2));
}

#[test]
fn repaired_tile_is_drawn_one_column_further() {
	// on 1, off 0, row 3, column 10, then the same tile at column 60
	let mut pixels = [0u8; 16];
	pixels[..4].copy_from_slice(&[0, 1, 3, 10]);
	pixels[4..].fill(0x3F);
	let mut broken = pixels;
	broken[3] = 60;

	let bytes = stream(&[frame(6, &pixels), frame(0, &[]), frame(6, &broken)]);
	let mut sequence = PacketSequence::from_bytes(&bytes).unwrap();

	let mut unrepaired = Renderer::new();
	assert_eq!(unrepaired.apply_all(&sequence), 1);

	let results = repair(&mut sequence, &Rules::default(), &RepairConfig::default());
	assert!(results.iter().any(|r| r.index == 2 && r.kind == ValidationKind::Repaired));
	assert_eq!(sequence[2].as_tile_block().unwrap().column, 11);

	let mut renderer = Renderer::new();
	assert_eq!(renderer.apply_all(&sequence), 0);
	assert_eq!(renderer.index_at(11 * 6, 3 * 12), Some(1));
	assert_eq!(renderer.index_at(11 * 6 + 5, 3 * 12 + 11), Some(1));
	assert_eq!(renderer.index_at(12 * 6, 3 * 12), Some(0));
}

#[test]
fn repaired_stream_survives_save_and_reload() {
	let mut tile = [0u8; 16];
	tile[..4].copy_from_slice(&[4, 1, 2, 5]);
	let mut next = tile;
	next[0] = 0;
	next[3] = 6;

	let bytes = stream(&[frame(38, &tile), frame(38, &next)]);
	let mut sequence = PacketSequence::from_bytes(&bytes).unwrap();
	let results = repair(&mut sequence, &Rules::default(), &RepairConfig::default());
	assert_eq!(results.len(), 1);
	assert_eq!(results[0].message, "invalid off color 4, changed to 0");

	let reloaded = PacketSequence::from_bytes(&sequence.to_bytes()).unwrap();
	let tile = reloaded[0].as_tile_block().unwrap();
	assert_eq!(tile.off_color_index, 0);
	assert!(tile.diagnostics().is_empty());
	assert_eq!(reloaded[0].raw()[4], 0);
}

#[test]
fn clear_burst_counts_as_one_event() {
	let mut frames: Vec<_> = (0..10).map(|repeat| frame(1, &[0, repeat])).collect();
	frames.push(frame(0, &[]));
	frames.extend((0..10).map(|repeat| frame(1, &[3, repeat])));
	let sequence = PacketSequence::from_bytes(&stream(&frames)).unwrap();

	assert_eq!(sequence.find_next(Instruction::MemoryPreset, 1, 1000), Some(11));
	assert_eq!(sequence.find_previous(Instruction::MemoryPreset, 20, 1000), Some(11));
	assert_eq!(sequence.find_previous(Instruction::MemoryPreset, 10, 1000), Some(0));
}

#[test]
fn xor_redraw_erases_lyrics() {
	let mut renderer = Renderer::with_default_palette();
	renderer.apply(&Packet::new(PacketData::MemoryPreset(MemoryPreset::new(0, 0))));
	let blank = renderer.render();

	let pixels = TilePixels::from_pattern("##  ##\n #### \n  ##  ").unwrap();
	let lyric = Packet::new(PacketData::TileBlock(TileBlock::new(TileBlockType::Xor, 9, 20, 10, 0).with_pixels(pixels)));

	renderer.apply(&lyric);
	assert_ne!(renderer.render(), blank);
	renderer.apply(&lyric);
	assert_eq!(renderer.render(), blank);
}

#[test]
fn playback_position_selects_packets() {
	let bytes = stream(&vec![frame(0, &[]); 600]);
	let mut sequence = PacketSequence::from_bytes(&bytes).unwrap();

	assert_eq!(sequence.duration(), std::time::Duration::from_secs(2));
	assert_eq!(sequence.packet_index_at(std::time::Duration::from_millis(1500)), Some(450));
	assert_eq!(sequence.packet_index_at(std::time::Duration::from_secs(2)), None);

	sequence.set_position(std::time::Duration::from_secs(10));
	assert_eq!(sequence.position(), std::time::Duration::from_secs(2));
}

#[test]
fn observer_sees_every_packet() {
	let bytes = stream(&[frame(1, &[0, 0]), frame(2, &[5]), frame(0, &[])]);
	let mut seen = Vec::new();
	let sequence =
		PacketSequence::from_reader_with_observer(&mut bytes.as_slice(), |packet: &Packet| seen.push(packet.index()))
			.unwrap();

	assert_eq!(sequence.len(), 3);
	assert_eq!(seen, vec![Some(0), Some(1), Some(2)]);
}
