//! Lyric stage state machine
//!
//! Receives the provider's discrete signals (media change, video ready,
//! playback stop, position tick) and runs the per-tick pipeline:
//!
//! - position → beat intensity (drives the waveform)
//! - position → lyric cursor → rainbow detection → reveal events
//!
//! All per-video state lives here and is rebuilt on every video load.

use serde::{Deserialize, Serialize};

use crate::config::StageConfig;
use crate::errors::StageError;
use crate::models::beat::BeatLookup;
use crate::models::video::{Video, VideoInput};
use crate::playback::cursor::LyricCursor;
use crate::playback::intensity;
use crate::playback::rainbow::RainbowRunDetector;
use crate::renderers::reveal::RevealEvent;

/// Everything the display side needs after one tick
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TickFrame {
    pub position: f64,
    /// Beat intensity in [0, 1]
    pub intensity: f64,
    /// A new beat became active on this tick
    pub beat_started: bool,
    /// Seekbar fill (%), when the duration is known
    pub progress_percent: Option<f64>,
    /// Clear all previously revealed characters before applying `reveals`
    pub reset: bool,
    pub reveals: Vec<RevealEvent>,
    /// Nothing was computed (no video, or the tick was rejected)
    pub skipped: bool,
}

impl TickFrame {
    fn skipped(position: f64) -> Self {
        Self { position, skipped: true, ..Default::default() }
    }
}

pub struct LyricStage {
    config: StageConfig,
    video: Option<Video>,
    cursor: LyricCursor,
    rainbow: RainbowRunDetector,
    /// Index of the beat active on the previous tick
    prev_beat: Option<usize>,
    /// Characters were on screen when reveal state was dropped; the next
    /// processed tick tells the display to clear them
    pending_reset: bool,
}

impl LyricStage {
    pub fn new(config: StageConfig) -> Self {
        Self {
            cursor: LyricCursor::new(config.cursor.clone()),
            rainbow: RainbowRunDetector::new(config.rainbow.clone()),
            config,
            video: None,
            prev_beat: None,
            pending_reset: false,
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn video(&self) -> Option<&Video> {
        self.video.as_ref()
    }

    pub fn cursor(&self) -> &LyricCursor {
        &self.cursor
    }

    pub fn rainbow(&self) -> &RainbowRunDetector {
        &self.rainbow
    }

    /// Swap configuration; per-video state starts over
    pub fn set_config(&mut self, config: StageConfig) {
        self.reset();
        self.cursor = LyricCursor::new(config.cursor.clone());
        self.rainbow = RainbowRunDetector::new(config.rainbow.clone());
        self.config = config;
    }

    /// The provider switched media: drop the video and all reveal state
    pub fn on_media_change(&mut self) {
        log::info!("media changed, clearing lyric stage");
        self.video = None;
        self.reset();
    }

    /// The provider has the video analysis ready
    pub fn on_video_ready(&mut self, input: &VideoInput) -> Result<(), StageError> {
        let video = Video::from_input(input)?;
        log::info!(
            "video ready: {}ms, {} chars, {} beats",
            video.duration,
            video.lyrics.as_ref().map_or(0, |l| l.len()),
            video.beats.len()
        );
        self.load_video(video);
        Ok(())
    }

    pub fn load_video(&mut self, video: Video) {
        self.video = Some(video);
        self.reset();
    }

    /// Playback stopped: clear the lyric display but keep the video
    pub fn on_playback_stop(&mut self) {
        log::info!("playback stopped, clearing revealed lyrics");
        self.reset();
    }

    fn reset(&mut self) {
        self.pending_reset |= self.cursor.last_revealed().is_some();
        self.cursor.reset();
        self.rainbow.reset();
        self.prev_beat = None;
    }

    /// Run one tick; failures are logged and the tick is skipped
    pub fn on_tick(&mut self, position: f64) -> TickFrame {
        match self.try_tick(position) {
            Ok(frame) => frame,
            Err(e) if e.is_missing_data() => {
                log::debug!("tick at {}ms skipped: {}", position, e);
                TickFrame::skipped(position)
            }
            Err(e) => {
                log::error!("tick at {}ms skipped: {}", position, e);
                TickFrame::skipped(position)
            }
        }
    }

    /// Run one tick, reporting why it could not run
    ///
    /// State is only touched once the tick is known to be processable.
    pub fn try_tick(&mut self, position: f64) -> Result<TickFrame, StageError> {
        if !position.is_finite() {
            return Err(StageError::MalformedTick(format!("non-finite position {}", position)));
        }
        let video = self.video.as_ref().ok_or(StageError::NoVideo)?;

        let beat = video.beats.find_beat(position).map(|b| b.index);
        let intensity = intensity::intensity(position, Some(&video.beats));
        let beat_started = beat.is_some() && beat != self.prev_beat;
        self.prev_beat = beat;

        let mut frame = TickFrame {
            position,
            intensity,
            beat_started,
            progress_percent: video.progress_percent(position),
            reset: std::mem::take(&mut self.pending_reset),
            ..Default::default()
        };

        let Some(sheet) = video.lyrics.as_ref() else {
            return Ok(frame);
        };

        let step = self.cursor.advance(position, Some(sheet));
        if step.reset {
            self.rainbow.reset();
            frame.reset = true;
        }

        for id in step.revealed {
            let color = self.rainbow.color_on_reveal(sheet, id);
            if let Some(event) = RevealEvent::new(sheet, id, color) {
                frame.reveals.push(event);
            }
        }

        Ok(frame)
    }
}

impl Default for LyricStage {
    fn default() -> Self {
        Self::new(StageConfig::default())
    }
}
