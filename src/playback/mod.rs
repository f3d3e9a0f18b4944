//! Per-tick playback logic
//!
//! - `cursor`: which characters are due at a playback position
//! - `rainbow`: rotating colors for the trigger phrase
//! - `intensity`: beat pulse for the waveform

pub mod cursor;
pub mod intensity;
pub mod rainbow;

pub use cursor::{CursorConfig, CursorStep, LyricCursor};
pub use intensity::{intensity, quint_out, try_intensity};
pub use rainbow::{RainbowConfig, RainbowRunDetector};
