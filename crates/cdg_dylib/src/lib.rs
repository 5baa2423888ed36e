//! Forces dynamic linking of `cdg_internal` when the `dynamic_linking` feature is enabled.
//!
//! This crate should not be used directly.

#![allow(unused_imports)]
#![allow(clippy::single_component_path_imports)]

use cdg_internal;
