//! Ordered packet streams.
//!
//! A [`PacketSequence`] is the decoded form of a `.cdg` file: packets in stream
//! order, each carrying its zero-based index. Playback time is derived from the
//! packet count at 300 packets per second.
//!
//! # Examples
//!
//! ```
//! use cdg_types::packet::{Instruction, MemoryPreset, Packet, PacketData};
//! use cdg_types::sequence::PacketSequence;
//!
//! let mut sequence = PacketSequence::new();
//! sequence.push(Packet::timing());
//! sequence.push(Packet::new(PacketData::MemoryPreset(MemoryPreset::new(0, 0))));
//!
//! assert_eq!(sequence.find_next(Instruction::MemoryPreset, 0, 10), Some(1));
//! assert_eq!(sequence[1].index(), Some(1));
//! ```

mod io;

use std::ops::Index;
use std::time::Duration;

use crate::constants::PACKETS_PER_SECOND;
use crate::packet::{Instruction, Packet, PacketData};

pub use io::{PacketObserver, validate_path};

/// Converts a packet count into playback time.
pub fn packet_count_to_duration(count: u64) -> Duration {
	Duration::from_micros(count.saturating_mul(1_000_000) / PACKETS_PER_SECOND)
}

/// Decoded packet stream with playback helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketSequence {
	packets: Vec<Packet>,
	position: Duration,
}

impl PacketSequence {
	/// Creates an empty sequence.
	pub fn new() -> Self {
		Self::default()
	}

	/// Wraps packets as-is, keeping whatever indices they carry.
	pub fn from_packets(packets: Vec<Packet>) -> Self {
		Self {
			packets,
			position: Duration::ZERO,
		}
	}

	/// Appends a packet, assigning it the next stream index.
	pub fn push(&mut self, packet: Packet) {
		let index = self.packets.len();
		self.packets.push(packet.with_index(index));
	}

	/// Number of packets.
	#[inline]
	pub fn len(&self) -> usize {
		self.packets.len()
	}

	/// Returns true if the sequence holds no packets.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.packets.is_empty()
	}

	/// Returns the packet at `index`.
	pub fn get(&self, index: usize) -> Option<&Packet> {
		self.packets.get(index)
	}

	pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Packet> {
		self.packets.get_mut(index)
	}

	/// Iterates over packets in stream order.
	pub fn iter(&self) -> std::slice::Iter<'_, Packet> {
		self.packets.iter()
	}

	/// All packets in stream order.
	pub fn packets(&self) -> &[Packet] {
		&self.packets
	}

	/// Consumes the sequence, returning its packets.
	pub fn into_packets(self) -> Vec<Packet> {
		self.packets
	}

	/// Total playback time of the stream.
	pub fn duration(&self) -> Duration {
		packet_count_to_duration(self.packets.len() as u64)
	}

	/// Current playback position.
	pub fn position(&self) -> Duration {
		self.position
	}

	/// Moves the playback position, clamped to [`Self::duration`].
	pub fn set_position(&mut self, position: Duration) {
		self.position = position.min(self.duration());
	}

	/// Index of the packet playing at `time`, or `None` past the end of the stream.
	pub fn packet_index_at(&self, time: Duration) -> Option<usize> {
		let index = time.as_micros() * u128::from(PACKETS_PER_SECOND) / 1_000_000;
		usize::try_from(index).ok().filter(|&index| index < self.packets.len())
	}

	/// Finds the first packet at or after `start` carrying `instruction`.
	///
	/// At most `limit + 1` packets are inspected. A memory preset only matches when it
	/// opens a repeat burst, so a burst counts as a single clear.
	pub fn find_next(&self, instruction: Instruction, start: usize, limit: usize) -> Option<usize> {
		self.find_next_where(start, limit, |packet| matches_instruction(packet, instruction))
	}

	/// Finds the last packet at or before `start` carrying `instruction`.
	///
	/// Same bound and memory preset rule as [`Self::find_next`].
	pub fn find_previous(&self, instruction: Instruction, start: usize, limit: usize) -> Option<usize> {
		self.find_previous_where(start, limit, |packet| matches_instruction(packet, instruction))
	}

	/// Forward bounded search with an arbitrary predicate.
	pub fn find_next_where<F>(&self, start: usize, limit: usize, predicate: F) -> Option<usize>
	where
		F: Fn(&Packet) -> bool,
	{
		let end = start.saturating_add(limit).saturating_add(1).min(self.packets.len());
		(start..end).find(|&i| predicate(&self.packets[i]))
	}

	/// Backward bounded search with an arbitrary predicate.
	pub fn find_previous_where<F>(&self, start: usize, limit: usize, predicate: F) -> Option<usize>
	where
		F: Fn(&Packet) -> bool,
	{
		if start >= self.packets.len() {
			return None;
		}
		let end = start.saturating_sub(limit);
		(end..=start).rev().find(|&i| predicate(&self.packets[i]))
	}
}

fn matches_instruction(packet: &Packet, instruction: Instruction) -> bool {
	match packet.data() {
		PacketData::MemoryPreset(preset) => {
			instruction == Instruction::MemoryPreset && preset.is_first_of_burst()
		}
		_ => packet.instruction() == instruction,
	}
}

impl Index<usize> for PacketSequence {
	type Output = Packet;

	fn index(&self, index: usize) -> &Self::Output {
		&self.packets[index]
	}
}

impl<'a> IntoIterator for &'a PacketSequence {
	type Item = &'a Packet;
	type IntoIter = std::slice::Iter<'a, Packet>;

	fn into_iter(self) -> Self::IntoIter {
		self.packets.iter()
	}
}

impl FromIterator<Packet> for PacketSequence {
	/// Collects packets, assigning stream indices in order.
	fn from_iter<I: IntoIterator<Item = Packet>>(iter: I) -> Self {
		let mut sequence = Self::new();
		for packet in iter {
			sequence.push(packet);
		}
		sequence
	}
}
