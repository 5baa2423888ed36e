//! Benchmark helper utilities for cdg-rs
//!
//! This module generates synthetic CD+G streams shaped like real karaoke tracks:
//! a palette load and clear burst, then lyric tiles interleaved with timing frames.
//! Generation is seeded so every run benchmarks the same bytes.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Size of one packet in bytes
const PACKET_SIZE: usize = 24;

/// Instruction codes written by the generator
const MEMORY_PRESET: u8 = 1;
const BORDER_PRESET: u8 = 2;
const TILE_BLOCK: u8 = 6;
const LOAD_COLOR_TABLE_LOW: u8 = 30;
const LOAD_COLOR_TABLE_HIGH: u8 = 31;
const TILE_BLOCK_XOR: u8 = 38;

fn frame(instruction: u8, payload: &[u8]) -> [u8; PACKET_SIZE] {
	let mut frame = [0u8; PACKET_SIZE];
	frame[0] = 0x09;
	frame[1] = instruction;
	frame[4..4 + payload.len()].copy_from_slice(payload);
	frame
}

/// Generates a synthetic stream of `packet_count` packets.
///
/// Roughly a quarter of the packets after the header are tile blocks, the rest
/// are timing frames. A small share of tiles carry out-of-range columns so the
/// repair engine has work to do.
pub fn generate_test_cdg_data(packet_count: usize, seed: u64) -> Vec<u8> {
	let mut rng = SmallRng::seed_from_u64(seed);
	let mut data = Vec::with_capacity(packet_count * PACKET_SIZE);

	let mut header: Vec<[u8; PACKET_SIZE]> = Vec::new();
	for instruction in [LOAD_COLOR_TABLE_LOW, LOAD_COLOR_TABLE_HIGH] {
		let payload: Vec<u8> = (0..16).map(|_| rng.random_range(0..0x40)).collect();
		header.push(frame(instruction, &payload));
	}
	for repeat in 0..10 {
		header.push(frame(MEMORY_PRESET, &[0, repeat]));
	}
	header.push(frame(BORDER_PRESET, &[0]));

	for packet in header.iter().take(packet_count) {
		data.extend_from_slice(packet);
	}

	for _ in header.len()..packet_count {
		if rng.random_range(0..4) != 0 {
			data.extend_from_slice(&[0u8; PACKET_SIZE]);
			continue;
		}

		let instruction = if rng.random_bool(0.8) {
			TILE_BLOCK_XOR
		} else {
			TILE_BLOCK
		};
		let column = if rng.random_bool(0.02) {
			rng.random_range(50..64)
		} else {
			rng.random_range(0..50)
		};
		let mut payload = [0u8; 16];
		payload[0] = 0;
		payload[1] = if rng.random_bool(0.5) { 1 } else { 10 };
		payload[2] = rng.random_range(0..18);
		payload[3] = column;
		for row in &mut payload[4..] {
			*row = rng.random_range(0..0x40);
		}
		data.extend_from_slice(&frame(instruction, &payload));
	}

	data
}

/// Common benchmark stream lengths, in packets (300 packets per second)
pub mod sizes {
	/// One second
	pub const SECOND: usize = 300;
	/// One minute
	pub const MINUTE: usize = 300 * 60;
	/// A typical four-minute track
	pub const TRACK: usize = 300 * 240;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_test_cdg_data() {
		let data = generate_test_cdg_data(sizes::SECOND, 7);
		assert_eq!(data.len(), sizes::SECOND * PACKET_SIZE);

		// palette load, then the clear burst
		assert_eq!(data[1], LOAD_COLOR_TABLE_LOW);
		assert_eq!(data[PACKET_SIZE + 1], LOAD_COLOR_TABLE_HIGH);
		assert_eq!(data[2 * PACKET_SIZE + 1], MEMORY_PRESET);
	}

	#[test]
	fn test_generation_is_seeded() {
		assert_eq!(generate_test_cdg_data(1000, 1), generate_test_cdg_data(1000, 1));
		assert_ne!(generate_test_cdg_data(1000, 1), generate_test_cdg_data(1000, 2));
	}

	#[test]
	fn test_short_stream() {
		assert_eq!(generate_test_cdg_data(3, 0).len(), 3 * PACKET_SIZE);
	}
}
