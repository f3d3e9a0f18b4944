//! Video snapshot handed over by the provider once it is ready

use serde::{Deserialize, Serialize};

use crate::errors::StageError;
use crate::models::beat::{Beat, BeatGrid};
use crate::models::lyrics::{LyricSheet, PhraseInput};

/// What JavaScript passes on video-ready
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInput {
    /// Song length (ms)
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub phrases: Vec<PhraseInput>,
    #[serde(default)]
    pub beats: Vec<Beat>,
}

/// Loaded video: duration, optional lyrics, beat grid
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Video {
    pub duration: f64,
    /// `None` when the song has no lyric data
    pub lyrics: Option<LyricSheet>,
    pub beats: BeatGrid,
}

impl Video {
    pub fn from_input(input: &VideoInput) -> Result<Self, StageError> {
        let sheet = LyricSheet::from_phrases(&input.phrases)?;
        Ok(Self {
            duration: input.duration,
            lyrics: if sheet.is_empty() { None } else { Some(sheet) },
            beats: BeatGrid::new(input.beats.clone()),
        })
    }

    /// Seekbar fill in percent, truncated to one decimal
    pub fn progress_percent(&self, position: f64) -> Option<f64> {
        if !(self.duration > 0.0) {
            return None;
        }
        Some(((position * 1000.0) / self.duration).floor() / 10.0)
    }
}
