//! Prelude module for `cdg_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and functions.
//!
//! # Examples
//!
//! ```
//! use cdg_types::prelude::*;
//!
//! let mut sequence = PacketSequence::new();
//! sequence.push(Packet::new(PacketData::MemoryPreset(MemoryPreset::new(0, 0))));
//!
//! let mut renderer = Renderer::new();
//! renderer.apply_all(&sequence);
//! ```

// Error types
#[doc(inline)]
pub use crate::error::{CdgError, Result};

// Packet model
#[doc(inline)]
pub use crate::packet::{
	BorderPreset,
	Color,
	ColorTableSet,
	DefineTransparency,
	HorizontalScroll,
	Instruction,
	LoadColorTable,
	MemoryPreset,
	Packet,
	PacketData,
	Scroll,
	ScrollPreset,
	TileBlock,
	TileBlockType,
	TilePixels,
	VerticalScroll,
};

// Codec
#[doc(inline)]
pub use crate::codec::{ColorQuantizer, PassthroughQuantizer, decode, encode, synthesize};

// Sequence
#[doc(inline)]
pub use crate::sequence::{PacketObserver, PacketSequence, packet_count_to_duration};

// Repair
#[doc(inline)]
pub use crate::repair::{RepairConfig, Rules, ValidationKind, ValidationResult, repair};

// Render
#[doc(inline)]
pub use crate::render::{ApplyOutcome, Framebuffer, Raster, Renderer};

// Re-export the constants module for advanced usage
#[doc(inline)]
pub use crate::constants;
