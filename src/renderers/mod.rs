//! Output for the display side
//!
//! Reveal events for the lyric container and the waveform for the canvas.

pub mod canvas;
pub mod reveal;
pub mod waveform;

pub use reveal::{RevealEvent, RevealTags};
pub use waveform::{render, sample_wave, WaveParams, WaveStyle, WaveSurface};
