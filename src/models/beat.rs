//! Beat grid from the provider's beat analysis

use serde::{Deserialize, Serialize};

/// Source of the beat active at a playback position
pub trait BeatLookup {
    fn find_beat(&self, position: f64) -> Option<&Beat>;
}

/// A rhythmic interval
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beat {
    /// Start of the beat (ms)
    pub start_time: f64,
    /// Length of the beat (ms)
    pub duration: f64,
    /// Position of the beat within the song's beat sequence
    #[serde(default)]
    pub index: usize,
}

impl Beat {
    pub fn new(start_time: f64, duration: f64, index: usize) -> Self {
        Self { start_time, duration, index }
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Fraction of the beat elapsed at `position`
    ///
    /// 0 at the start, 1 at the end. Not clamped, and not finite for a
    /// zero-length beat; callers decide what to do with that.
    pub fn progress(&self, position: f64) -> f64 {
        (position - self.start_time) / self.duration
    }

    pub fn contains(&self, position: f64) -> bool {
        self.start_time <= position && position < self.end_time()
    }
}

/// Time-ordered beats of one song
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BeatGrid {
    beats: Vec<Beat>,
}

impl BeatGrid {
    /// Build a grid, sorting by start time and renumbering
    pub fn new(mut beats: Vec<Beat>) -> Self {
        beats.retain(|b| b.start_time.is_finite() && b.duration.is_finite());
        beats.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        for (i, beat) in beats.iter_mut().enumerate() {
            beat.index = i;
        }
        Self { beats }
    }

    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    pub fn beats(&self) -> &[Beat] {
        &self.beats
    }
}

impl BeatLookup for BeatGrid {
    fn find_beat(&self, position: f64) -> Option<&Beat> {
        // Last beat starting at or before `position`
        let after = self.beats.partition_point(|b| b.start_time <= position);
        let beat = self.beats.get(after.checked_sub(1)?)?;
        if beat.contains(position) { Some(beat) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> BeatGrid {
        BeatGrid::new(vec![
            Beat::new(1000.0, 500.0, 0),
            Beat::new(0.0, 500.0, 0),
            Beat::new(500.0, 500.0, 0),
        ])
    }

    #[test]
    fn test_new_sorts_and_renumbers() {
        let g = grid();
        let starts: Vec<f64> = g.beats().iter().map(|b| b.start_time).collect();
        assert_eq!(starts, vec![0.0, 500.0, 1000.0]);
        assert_eq!(g.beats()[2].index, 2);
    }

    #[test]
    fn test_find_beat_by_position() {
        let g = grid();
        assert_eq!(g.find_beat(0.0).unwrap().index, 0);
        assert_eq!(g.find_beat(499.9).unwrap().index, 0);
        assert_eq!(g.find_beat(500.0).unwrap().index, 1);
        assert_eq!(g.find_beat(1250.0).unwrap().index, 2);
    }

    #[test]
    fn test_find_beat_outside_grid() {
        let g = grid();
        assert!(g.find_beat(-1.0).is_none());
        assert!(g.find_beat(1500.0).is_none());
        assert!(BeatGrid::default().find_beat(100.0).is_none());
    }

    #[test]
    fn test_find_beat_in_gap() {
        let g = BeatGrid::new(vec![Beat::new(0.0, 100.0, 0), Beat::new(400.0, 100.0, 1)]);
        assert!(g.find_beat(250.0).is_none());
    }

    #[test]
    fn test_progress() {
        let beat = Beat::new(1000.0, 400.0, 0);
        assert_eq!(beat.progress(1000.0), 0.0);
        assert_eq!(beat.progress(1100.0), 0.25);
        assert_eq!(beat.progress(1400.0), 1.0);
        assert!(!Beat::new(0.0, 0.0, 0).progress(0.0).is_finite());
    }
}
