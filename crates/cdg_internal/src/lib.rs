//! This module is separated into its own crate to enable simple dynamic linking for `cdg-rs`, and should not be used directly.

/// `use cdg_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export cdg_types for convenience
pub use cdg_types;

// Re-export the core modules at crate root
pub use cdg_types::{codec, constants, error, packet, render, repair, sequence};
