//! Lyric Stage WASM Module
//!
//! Drives a playback-synchronized lyric presentation: characters are revealed
//! in step with the song, a recurring trigger phrase is colored in a rotating
//! rainbow palette, and a waveform on a canvas pulses with the beat.

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod playback;
pub mod renderers;
pub mod stage;

// Re-export commonly used types
pub use config::{ConfigFormat, StageConfig};
pub use errors::{ConfigError, StageError};
pub use models::*;
pub use stage::{LyricStage, TickFrame};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            web_sys::console::warn_1(&format!("logger already initialized: {}", e).into());
        }
    }

    log::info!("Lyric stage WASM module initialized");
}
