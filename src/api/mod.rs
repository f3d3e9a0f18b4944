//! Lyric Stage WASM API
//!
//! JavaScript-facing surface of the module.
//!
//! # Module Structure
//!
//! - `helpers`: logging macros, serde bridging, error mapping
//! - `core`: stage lifecycle, per-tick update, waveform canvas binding

pub mod helpers;
pub mod core;

pub use self::core::*;
