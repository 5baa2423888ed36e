//! Prelude module for `cdg_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use cdg_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let packet = Packet::new(PacketData::BorderPreset(BorderPreset::new(3)));
//! let mut renderer = Renderer::with_default_palette();
//! renderer.apply(&packet);
//! assert_eq!(renderer.border_color_index(), 3);
//! ```

// Re-export everything from cdg_types::prelude
#[doc(inline)]
pub use cdg_types::prelude::*;

// Re-export the entire cdg_types module for advanced usage
#[doc(inline)]
pub use cdg_types;
