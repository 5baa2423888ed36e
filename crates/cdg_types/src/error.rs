//! Error types for CD+G decoding, repair and rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout `cdg_types`.
pub type Result<T, E = CdgError> = std::result::Result<T, E>;

/// Errors that can occur when reading, writing or synthesizing CD+G streams.
///
/// Malformed packets are never reported here: unknown instructions decode to
/// timing packets and out-of-range tile fields go through the repair engine.
#[derive(Debug, Error)]
pub enum CdgError {
	/// The source file does not exist
	#[error("Could not find the file {}", path.display())]
	FileNotFound {
		/// Path that was requested
		path: PathBuf,
	},

	/// The source file does not carry a recognized extension
	#[error("File {} must be a CD+G file with a .cdg extension (got {extension:?})", path.display())]
	UnsupportedExtension {
		/// Path that was requested
		path: PathBuf,
		/// Extension that was found, if any
		extension: Option<String>,
	},

	/// Not enough data to decode
	#[error("Insufficient data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Synthesis source image does not match the screen size
	#[error("Invalid image size: expected 300x216, got {width}x{height}")]
	InvalidImageSize {
		/// Width of the supplied image
		width: u32,
		/// Height of the supplied image
		height: u32,
	},

	/// A palette index was assigned to more than one color role
	#[error("Palette index {index} is assigned to more than one color role")]
	OverlappingColorRoles {
		/// The offending palette index
		index: u8,
	},

	/// A tile pattern does not fit in a 6x12 tile
	#[error("Tile pattern must be at most {max_width}x{max_height} pixels: {message}")]
	InvalidTilePattern {
		/// Maximum pattern width
		max_width: usize,
		/// Maximum pattern height
		max_height: usize,
		/// What was wrong with the pattern
		message: String,
	},

	/// Image encoding or decoding failed
	#[error(transparent)]
	Image(#[from] image::ImageError),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl CdgError {
	/// Creates an `InsufficientData` error.
	pub fn insufficient_data(expected: usize, actual: usize) -> Self {
		Self::InsufficientData {
			expected,
			actual,
		}
	}

	/// Creates an `InvalidTilePattern` error.
	pub fn invalid_tile_pattern(message: impl Into<String>) -> Self {
		Self::InvalidTilePattern {
			max_width: crate::constants::TILE_WIDTH,
			max_height: crate::constants::TILE_HEIGHT,
			message: message.into(),
		}
	}

	/// Returns true if the error comes from the underlying byte source or sink.
	pub fn is_io(&self) -> bool {
		matches!(self, Self::Io(_))
	}
}
