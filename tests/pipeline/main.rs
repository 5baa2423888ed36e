//! End-to-end tests for `cdg-rs`: bytes in, repaired stream, rendered frames out.

mod roundtrip;
mod scenarios;

use cdg_rs::prelude::*;

/// Builds a graphics frame with `payload` at the data offset.
pub(crate) fn frame(instruction: u8, payload: &[u8]) -> [u8; constants::PACKET_SIZE] {
	let mut frame = [0u8; constants::PACKET_SIZE];
	frame[constants::COMMAND_OFFSET] = constants::CDG_COMMAND;
	frame[constants::INSTRUCTION_OFFSET] = instruction;
	frame[constants::PACKET_DATA_OFFSET..constants::PACKET_DATA_OFFSET + payload.len()].copy_from_slice(payload);
	frame
}

/// Concatenates frames into a stream.
pub(crate) fn stream(frames: &[[u8; constants::PACKET_SIZE]]) -> Vec<u8> {
	frames.iter().flatten().copied().collect()
}
