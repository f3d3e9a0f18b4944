//! Lyric reveal cursor
//!
//! Walks the character sequence forward as the playback position advances,
//! revealing every character whose start time falls inside the lookahead
//! window. A large backward jump of the position is treated as a seek and
//! restarts the scan from the first character.

use serde::{Deserialize, Serialize};

use crate::models::lyrics::{CharId, LyricSheet};

/// Characters are revealed this long before they are sung (ms)
pub const LOOKAHEAD_MS: f64 = 500.0;

/// Backward gap that counts as a seek rather than clock jitter (ms)
pub const REWIND_THRESHOLD_MS: f64 = 1000.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CursorConfig {
    pub lookahead_ms: f64,
    pub rewind_threshold_ms: f64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            lookahead_ms: LOOKAHEAD_MS,
            rewind_threshold_ms: REWIND_THRESHOLD_MS,
        }
    }
}

/// Outcome of one `advance` call
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorStep {
    /// Everything revealed so far must be discarded before `revealed` is shown
    pub reset: bool,
    /// Newly revealed characters, in start-time order
    pub revealed: Vec<CharId>,
}

impl CursorStep {
    pub fn is_empty(&self) -> bool {
        !self.reset && self.revealed.is_empty()
    }
}

/// Reveal state for one video
#[derive(Clone, Debug, Default)]
pub struct LyricCursor {
    config: CursorConfig,
    last_revealed: Option<CharId>,
}

impl LyricCursor {
    pub fn new(config: CursorConfig) -> Self {
        Self { config, last_revealed: None }
    }

    pub fn last_revealed(&self) -> Option<CharId> {
        self.last_revealed
    }

    pub fn reset(&mut self) {
        self.last_revealed = None;
    }

    /// Reveal everything due at `position` (ms)
    ///
    /// Calling twice with the same position emits nothing the second time.
    pub fn advance(&mut self, position: f64, sheet: Option<&LyricSheet>) -> CursorStep {
        let mut step = CursorStep::default();

        let Some(sheet) = sheet else {
            return step;
        };
        let Some(first) = sheet.first_char() else {
            return step;
        };

        if let Some(last) = self.last_revealed {
            let rewound = sheet
                .start_time(last)
                .map_or(true, |t| t > position + self.config.rewind_threshold_ms);
            if rewound {
                log::debug!(
                    "rewind detected at {}ms (last revealed char {}), resetting lyrics",
                    position,
                    last
                );
                self.last_revealed = None;
                step.reset = true;
            }
        }

        let horizon = position + self.config.lookahead_ms;
        let mut cursor = Some(self.last_revealed.unwrap_or(first));

        while let Some(id) = cursor {
            match sheet.start_time(id) {
                Some(start) if start < horizon => {}
                _ => break,
            }
            if self.last_revealed != Some(id) {
                step.revealed.push(id);
                self.last_revealed = Some(id);
            }
            cursor = sheet.next(id);
        }

        step
    }
}
