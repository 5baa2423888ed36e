#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `cdg-rs` reads, repairs, renders and writes CD+G karaoke graphics streams.
//!
//! A `.cdg` file is a flat run of 24-byte subchannel packets, 300 per second. This
//! crate decodes them into typed packets, patches damaged tile blocks, and replays
//! the stream through a 300x216 palette framebuffer to produce RGB frames. Still
//! images can be turned back into a packet stream.
//!
pub use cdg_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use cdg_dylib;
