//! Core types for reading, repairing, rendering and writing CD+G karaoke graphics.
//!
//! # Modules
//!
//! - **packet**: The closed set of packet variants and their fields
//! - **codec**: 24-byte frame decoding and encoding, and stream synthesis from an image
//! - **sequence**: Ordered packet streams, bounded searches and `.cdg` file I/O
//! - **repair**: Validation and in-place repair of damaged tile blocks
//! - **render**: The interpreter turning a packet stream into an RGB frame
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use cdg_types::prelude::*;
//!
//! let mut sequence = PacketSequence::open("song.cdg")?;
//! let diagnostics = repair(&mut sequence, &Rules::default(), &RepairConfig::default());
//!
//! let mut renderer = Renderer::new();
//! renderer.apply_all(&sequence);
//! renderer.render().to_rgb_image().save("last_frame.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Or use explicit paths:
//!
//! ```
//! use cdg_types::codec::{decode, encode};
//! use cdg_types::packet::{BorderPreset, PacketData};
//!
//! let frame = encode(&PacketData::BorderPreset(BorderPreset::new(4)));
//! assert_eq!(decode(&frame).data(), &PacketData::BorderPreset(BorderPreset::new(4)));
//! ```

pub mod codec;
pub mod constants;
pub mod error;
pub mod packet;
pub mod render;
pub mod repair;
pub mod sequence;

/// `use cdg_types::prelude::*;` to import commonly used items.
pub mod prelude;
