//! Beat intensity
//!
//! Maps the active beat into a pulse that is 1 at the downbeat and decays to
//! 0 by the end of the beat along an inverted quintic ease-out: a sharp
//! attack with a long soft tail.

use crate::errors::StageError;
use crate::models::beat::BeatLookup;

/// Quintic ease-out, `1 - (1 - t)^5`
pub fn quint_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(5)
}

/// Intensity at `position`, or why there is none
pub fn try_intensity<L: BeatLookup + ?Sized>(position: f64, lookup: &L) -> Result<f64, StageError> {
    let beat = lookup.find_beat(position).ok_or(StageError::NoBeat(position))?;
    let progress = beat.progress(position);
    if !progress.is_finite() {
        return Err(StageError::InvalidProgress { index: beat.index, position });
    }
    Ok((1.0 - quint_out(progress)).clamp(0.0, 1.0))
}

/// Intensity in [0, 1]; missing or broken beat data reads as 0
pub fn intensity<L: BeatLookup + ?Sized>(position: f64, lookup: Option<&L>) -> f64 {
    let Some(lookup) = lookup else {
        return 0.0;
    };
    match try_intensity(position, lookup) {
        Ok(value) => value,
        Err(StageError::NoBeat(_)) => 0.0,
        Err(e) => {
            log::warn!("intensity unavailable, using 0: {}", e);
            0.0
        }
    }
}
