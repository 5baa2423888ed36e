//! Reading and writing `.cdg` streams.

use std::io::{BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;

use crate::codec;
use crate::constants::{CDG_EXTENSIONS, PACKET_SIZE};
use crate::error::{CdgError, Result};
use crate::packet::Packet;

use super::PacketSequence;

/// Receives every packet as it is decoded, in stream order.
///
/// Any `FnMut(&Packet)` closure is an observer.
pub trait PacketObserver {
	/// Called once per decoded packet, after its index is assigned.
	fn on_packet(&mut self, packet: &Packet);
}

impl<F: FnMut(&Packet)> PacketObserver for F {
	fn on_packet(&mut self, packet: &Packet) {
		self(packet)
	}
}

/// Checks that `path` exists and carries a `.cdg` extension (any case).
///
/// # Errors
///
/// Returns [`CdgError::FileNotFound`] or [`CdgError::UnsupportedExtension`].
pub fn validate_path(path: &Path) -> Result<()> {
	if !path.exists() {
		return Err(CdgError::FileNotFound {
			path: path.to_path_buf(),
		});
	}

	let extension = path.extension().map(|ext| ext.to_string_lossy().into_owned());
	let supported = extension
		.as_deref()
		.is_some_and(|ext| CDG_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)));
	if !supported {
		return Err(CdgError::UnsupportedExtension {
			path: path.to_path_buf(),
			extension,
		});
	}

	Ok(())
}

/// Fills `buffer` as far as the reader allows, returning the number of bytes read.
fn read_frame<R: Read>(reader: &mut R, buffer: &mut [u8; PACKET_SIZE]) -> std::io::Result<usize> {
	let mut filled = 0;
	while filled < PACKET_SIZE {
		match reader.read(&mut buffer[filled..]) {
			Ok(0) => break,
			Ok(n) => filled += n,
			Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
			Err(e) => return Err(e),
		}
	}
	Ok(filled)
}

impl PacketSequence {
	/// Opens a `.cdg` file.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - The file does not exist or has another extension
	/// - The file cannot be read
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::open_with_observer(path, |_: &Packet| {})
	}

	/// Opens a `.cdg` file, reporting each packet to `observer`.
	///
	/// # Errors
	///
	/// Same as [`Self::open`].
	pub fn open_with_observer(path: impl AsRef<Path>, observer: impl PacketObserver) -> Result<Self> {
		let path = path.as_ref();
		validate_path(path)?;

		let file = std::fs::File::open(path)?;
		let sequence = Self::from_reader_with_observer(&mut BufReader::new(file), observer)?;
		log::debug!("loaded {} packets ({:?}) from {}", sequence.len(), sequence.duration(), path.display());
		Ok(sequence)
	}

	/// Decodes a stream held in memory.
	///
	/// # Errors
	///
	/// Infallible in practice; the signature matches the reader based loaders.
	pub fn from_bytes(data: &[u8]) -> Result<Self> {
		Self::from_reader(&mut Cursor::new(data))
	}

	/// Decodes packets from any reader until end of stream.
	///
	/// A trailing partial frame is logged and dropped.
	///
	/// # Errors
	///
	/// Returns an error if the reader fails.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
		Self::from_reader_with_observer(reader, |_: &Packet| {})
	}

	/// Decodes packets from any reader, reporting each one to `observer`.
	///
	/// # Errors
	///
	/// Returns an error if the reader fails.
	pub fn from_reader_with_observer<R: Read>(
		reader: &mut R,
		mut observer: impl PacketObserver,
	) -> Result<Self> {
		let mut sequence = Self::new();
		let mut frame = [0u8; PACKET_SIZE];

		loop {
			let read = read_frame(reader, &mut frame)?;
			if read == 0 {
				break;
			}
			if read < PACKET_SIZE {
				log::warn!("ignoring {read} trailing bytes after packet {}", sequence.len());
				break;
			}

			let index = sequence.len();
			let packet = codec::decode(&frame).with_index(index);
			log::trace!("{packet}");
			observer.on_packet(&packet);
			sequence.packets.push(packet);
		}

		Ok(sequence)
	}

	/// Encodes every packet into one contiguous buffer.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut data = Vec::with_capacity(self.len() * PACKET_SIZE);
		for packet in &self.packets {
			data.extend_from_slice(&packet.to_bytes());
		}
		data
	}

	/// Writes every packet to `writer`.
	///
	/// # Errors
	///
	/// Returns an error if the writer fails.
	pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
		for packet in &self.packets {
			writer.write_all(&packet.to_bytes())?;
		}
		writer.flush()?;
		Ok(())
	}

	/// Saves the stream to `path`.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be written.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
		let path = path.as_ref();
		let file = std::fs::File::create(path)?;
		self.write_to(&mut BufWriter::new(file))?;
		log::debug!("saved {} packets to {}", self.len(), path.display());
		Ok(())
	}
}
