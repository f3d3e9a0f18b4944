//! Beat-reactive waveform
//!
//! A primary sine plus a quieter half-frequency harmonic. Amplitude and
//! frequency both scale with intensity so the line swells on each beat.
//! Sampling is a pure function; painting goes through [`WaveSurface`].

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// Shape parameters of the wave
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WaveParams {
    /// Amplitude at zero intensity (px)
    pub base_amp: f64,
    /// Extra amplitude at full intensity (px)
    pub pulse_amp: f64,
    /// Angular frequency per px at zero intensity
    pub base_freq: f64,
    /// Relative frequency increase at full intensity
    pub freq_gain: f64,
    /// Phase advance per ms
    pub phase_rate: f64,
    /// Horizontal sampling step (px)
    pub step: f64,
    pub harmonic_freq_ratio: f64,
    pub harmonic_phase_ratio: f64,
    pub harmonic_amp_ratio: f64,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            base_amp: 6.0,
            pulse_amp: 22.0,
            base_freq: 0.018,
            freq_gain: 0.4,
            phase_rate: 0.01,
            step: 2.0,
            harmonic_freq_ratio: 0.5,
            harmonic_phase_ratio: 0.7,
            harmonic_amp_ratio: 0.15,
        }
    }
}

impl WaveParams {
    pub fn amplitude(&self, intensity: f64) -> f64 {
        self.base_amp + self.pulse_amp * intensity
    }

    pub fn frequency(&self, intensity: f64) -> f64 {
        self.base_freq * (1.0 + self.freq_gain * intensity)
    }

    pub fn phase(&self, time_ms: f64) -> f64 {
        (time_ms * self.phase_rate) % TAU
    }
}

/// Stroke appearance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WaveStyle {
    pub stroke_color: String,
    pub line_width: f64,
    pub glow_color: String,
    pub glow_blur: f64,
}

impl Default for WaveStyle {
    fn default() -> Self {
        Self {
            stroke_color: "#ffdec1".to_string(),
            line_width: 2.0,
            glow_color: "rgba(255,222,193,0.85)".to_string(),
            glow_blur: 8.0,
        }
    }
}

/// Something a polyline can be painted on
pub trait WaveSurface {
    fn clear(&mut self, width: f64, height: f64);
    fn stroke_polyline(&mut self, points: &[(f64, f64)], style: &WaveStyle);
}

/// Sample the wave across `width` px, both ends included
pub fn sample_wave(
    intensity: f64,
    time_ms: f64,
    width: f64,
    height: f64,
    params: &WaveParams,
) -> Vec<(f64, f64)> {
    if !(width > 0.0 && height > 0.0) || !(params.step > 0.0) {
        return Vec::new();
    }

    let mid_y = height / 2.0;
    let amp = params.amplitude(intensity);
    let freq = params.frequency(intensity);
    let phase = params.phase(time_ms);
    let harmonic_amp = amp * params.harmonic_amp_ratio;

    let count = (width / params.step).floor() as usize + 1;
    (0..count)
        .map(|i| {
            let x = i as f64 * params.step;
            let harmonic_angle =
                x * freq * params.harmonic_freq_ratio + phase * params.harmonic_phase_ratio;
            let y = mid_y + (x * freq + phase).sin() * amp + harmonic_angle.sin() * harmonic_amp;
            (x, y)
        })
        .collect()
}

/// Repaint `surface` with the wave for this tick
pub fn render<S: WaveSurface + ?Sized>(
    surface: &mut S,
    intensity: f64,
    time_ms: f64,
    width: f64,
    height: f64,
    params: &WaveParams,
    style: &WaveStyle,
) {
    if !(width > 0.0 && height > 0.0) {
        return;
    }
    surface.clear(width, height);
    let points = sample_wave(intensity, time_ms, width, height, params);
    surface.stroke_polyline(&points, style);
}
