//! Binary packet codec.
//!
//! - [`decode`]: 24-byte frame to [`Packet`](crate::packet::Packet)
//! - [`encode`]: [`PacketData`](crate::packet::PacketData) to 24-byte frame
//! - [`synthesize`]: source image to a complete packet stream

mod decode;
mod encode;
mod synth;

pub use decode::decode;
pub use encode::encode;
pub use synth::{ColorQuantizer, PassthroughQuantizer, build_color_table, distinct_colors, synthesize};

/// Payload byte offsets, relative to the start of the 16-byte payload.
mod layout {
	/// Color index of presets and transparency, fill color of scroll preset
	pub const COLOR: usize = 0;
	/// Repeat counter of memory preset
	pub const REPEAT: usize = 1;

	pub const TILE_OFF_COLOR: usize = 0;
	pub const TILE_ON_COLOR: usize = 1;
	pub const TILE_ROW: usize = 2;
	pub const TILE_COLUMN: usize = 3;
	/// First of twelve pixel rows
	pub const TILE_PIXELS: usize = 4;

	pub const SCROLL_HORIZONTAL: usize = 1;
	pub const SCROLL_VERTICAL: usize = 2;
}
