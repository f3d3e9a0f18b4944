//! Rainbow run detection
//!
//! Every occurrence of a fixed three-character trigger phrase gets the next
//! color of a rotating palette. Detection only fires when the first character
//! of a run is revealed: it looks two characters ahead and annotates all three
//! at once, so the other two already carry their color when they show up.
//!
//! A run whose first character was already annotated by an earlier,
//! overlapping run is not detected. That is accepted behavior.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::lyrics::{CharId, LyricSheet};

pub const TRIGGER_PHRASE: &str = "輝いて";
pub const PALETTE_LEN: u8 = 7;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RainbowConfig {
    pub trigger: String,
    pub palette_len: u8,
}

impl Default for RainbowConfig {
    fn default() -> Self {
        Self {
            trigger: TRIGGER_PHRASE.to_string(),
            palette_len: PALETTE_LEN,
        }
    }
}

/// Color annotations for one video
#[derive(Clone, Debug, Default)]
pub struct RainbowRunDetector {
    config: RainbowConfig,
    /// Index handed to the most recent run; `None` before the first run
    rotation: Option<u8>,
    colors: HashMap<CharId, u8>,
}

impl RainbowRunDetector {
    pub fn new(config: RainbowConfig) -> Self {
        Self { config, rotation: None, colors: HashMap::new() }
    }

    pub fn reset(&mut self) {
        self.rotation = None;
        self.colors.clear();
    }

    pub fn color_of(&self, id: CharId) -> Option<u8> {
        self.colors.get(&id).copied()
    }

    pub fn rotation(&self) -> Option<u8> {
        self.rotation
    }

    /// Try to start a run at `id`
    ///
    /// On a match the rotation advances once and all three characters get the
    /// new index. Characters that already have a color keep it.
    pub fn try_mark(&mut self, sheet: &LyricSheet, id: CharId) -> Option<u8> {
        let a = Some(id).filter(|&i| i < sheet.len());
        let b = a.and_then(|i| sheet.next(i));
        let c = b.and_then(|i| sheet.next(i));

        let text: String = [a, b, c]
            .iter()
            .flatten()
            .filter_map(|&i| sheet.char(i))
            .map(|ch| ch.text.as_str())
            .collect();

        if text != self.config.trigger {
            return None;
        }

        let palette = self.config.palette_len.max(1);
        let index = self.rotation.map_or(0, |r| (r + 1) % palette);
        self.rotation = Some(index);

        for member in [a, b, c].into_iter().flatten() {
            self.colors.entry(member).or_insert(index);
        }

        log::debug!("rainbow run at char {} -> color {}", id, index);
        Some(index)
    }

    /// Color for a freshly revealed character, detecting a run if it has none
    pub fn color_on_reveal(&mut self, sheet: &LyricSheet, id: CharId) -> Option<u8> {
        if let Some(color) = self.color_of(id) {
            return Some(color);
        }
        self.try_mark(sheet, id);
        self.color_of(id)
    }
}
