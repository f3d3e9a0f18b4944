//! JavaScript-facing stage API
//!
//! The page forwards the playback provider's events here:
//!
//! - `configureStage(config?)` or `configureStageFromText(text, format)`
//!   once, before the first video
//! - `mediaChanged()` when the song is swapped
//! - `loadVideo(video)` when the analysis is ready
//! - `playbackStopped()` when the player stops
//! - `timeUpdate(position)` on every position update
//! - `bindWaveCanvas(canvas)` / `resizeWaveCanvas(dpr)` for the waveform
//!
//! `timeUpdate` repaints the bound canvas and returns a `TickFrame` with the
//! reveal events for the lyric container.

use std::cell::RefCell;
use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::api::helpers::{deserialize, serialize, to_js_error};
use crate::config::{ConfigFormat, StageConfig};
use crate::models::video::VideoInput;
use crate::renderers::canvas::CanvasSurface;
use crate::renderers::waveform;
use crate::stage::LyricStage;
use crate::{wasm_info, wasm_log, wasm_warn};

// WASM-owned stage (one per page, per-video state reset on load)
lazy_static! {
    static ref STAGE: Mutex<LyricStage> = Mutex::new(LyricStage::default());
}

thread_local! {
    static WAVE_CANVAS: RefCell<Option<CanvasSurface>> = RefCell::new(None);
}

fn stage() -> Result<MutexGuard<'static, LyricStage>, JsValue> {
    STAGE.lock().map_err(|e| to_js_error("Stage lock poisoned", e))
}

/// Replace the stage configuration
///
/// `undefined`/`null` restores the defaults.
#[wasm_bindgen(js_name = configureStage)]
pub fn configure_stage(config_js: JsValue) -> Result<(), JsValue> {
    let config: StageConfig = if config_js.is_undefined() || config_js.is_null() {
        StageConfig::default()
    } else {
        deserialize(config_js, "Invalid stage config")?
    };
    config.validate().map_err(|e| to_js_error("Invalid stage config", e))?;
    apply_config(config)
}

/// Replace the stage configuration from a JSON or YAML document
#[wasm_bindgen(js_name = configureStageFromText)]
pub fn configure_stage_from_text(text: &str, format: &str) -> Result<(), JsValue> {
    let format: ConfigFormat =
        format.parse().map_err(|e| to_js_error("Invalid stage config", e))?;
    let config =
        StageConfig::from_text(text, format).map_err(|e| to_js_error("Invalid stage config", e))?;
    apply_config(config)
}

fn apply_config(config: StageConfig) -> Result<(), JsValue> {
    wasm_info!(
        "configureStage: lookahead={}ms rewind={}ms palette={}",
        config.cursor.lookahead_ms,
        config.cursor.rewind_threshold_ms,
        config.rainbow.palette_len
    );
    stage()?.set_config(config);
    Ok(())
}

/// Song swapped: forget the current video and all revealed characters
#[wasm_bindgen(js_name = mediaChanged)]
pub fn media_changed() -> Result<(), JsValue> {
    wasm_info!("mediaChanged");
    stage()?.on_media_change();
    Ok(())
}

/// Install the analysed video (duration, phrases, beats)
#[wasm_bindgen(js_name = loadVideo)]
pub fn load_video(video_js: JsValue) -> Result<(), JsValue> {
    let input: VideoInput = deserialize(video_js, "Invalid video data")?;
    wasm_log!(
        "loadVideo: duration={}ms, {} phrases, {} beats",
        input.duration,
        input.phrases.len(),
        input.beats.len()
    );

    stage()?
        .on_video_ready(&input)
        .map_err(|e| to_js_error("Failed to load video", e))
}

/// Player stopped: clear the revealed lyrics, keep the video
#[wasm_bindgen(js_name = playbackStopped)]
pub fn playback_stopped() -> Result<(), JsValue> {
    wasm_info!("playbackStopped");
    stage()?.on_playback_stop();
    Ok(())
}

/// Advance to `position` (ms): repaint the waveform and return the tick frame
#[wasm_bindgen(js_name = timeUpdate)]
pub fn time_update(position: f64) -> Result<JsValue, JsValue> {
    let mut guard = stage()?;
    let frame = guard.on_tick(position);

    if !frame.skipped {
        let config = guard.config();
        WAVE_CANVAS.with(|slot| {
            if let Some(surface) = slot.borrow_mut().as_mut() {
                let (w, h) = surface.css_size();
                let (wave, style) = (&config.wave, &config.wave_style);
                waveform::render(surface, frame.intensity, position, w, h, wave, style);
            }
        });
    }
    drop(guard);

    serialize(&frame, "Failed to serialize tick frame")
}

/// Use `canvas` for the waveform from now on
#[wasm_bindgen(js_name = bindWaveCanvas)]
pub fn bind_wave_canvas(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    let surface = CanvasSurface::new(canvas)?;
    let (w, h) = surface.css_size();
    wasm_info!("bindWaveCanvas: {}x{} css px", w, h);
    WAVE_CANVAS.with(|slot| *slot.borrow_mut() = Some(surface));
    Ok(())
}

/// Re-fit the canvas backing store after a layout or pixel-ratio change
#[wasm_bindgen(js_name = resizeWaveCanvas)]
pub fn resize_wave_canvas(device_pixel_ratio: f64) -> Result<(), JsValue> {
    WAVE_CANVAS.with(|slot| match slot.borrow().as_ref() {
        Some(surface) => surface.resize(device_pixel_ratio),
        None => {
            wasm_warn!("resizeWaveCanvas called before bindWaveCanvas");
            Ok(())
        }
    })
}
