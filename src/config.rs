//! Stage configuration
//!
//! Every field has a default, so a partial object (or none at all) is
//! enough. Accepted as a JS object at the API boundary, or as JSON / YAML
//! text.

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, StageError};
use crate::playback::cursor::CursorConfig;
use crate::playback::rainbow::RainbowConfig;
use crate::renderers::waveform::{WaveParams, WaveStyle};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StageConfig {
    pub cursor: CursorConfig,
    pub rainbow: RainbowConfig,
    pub wave: WaveParams,
    pub wave_style: WaveStyle,
}

/// Text encodings accepted for a config document
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl std::str::FromStr for ConfigFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ConfigFormat::Json),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

impl StageConfig {
    /// Parse and validate a config document
    pub fn from_text(text: &str, format: ConfigFormat) -> Result<Self, StageError> {
        let config = match format {
            ConfigFormat::Json => Self::from_json(text)?,
            ConfigFormat::Yaml => Self::from_yaml(text)?,
        };
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: StageConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: StageConfig =
            serde_yaml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("cursor.lookaheadMs", self.cursor.lookahead_ms)?;
        non_negative("cursor.rewindThresholdMs", self.cursor.rewind_threshold_ms)?;

        if self.rainbow.trigger.is_empty() {
            return Err(invalid("rainbow.trigger", "must not be empty"));
        }
        if self.rainbow.palette_len == 0 {
            return Err(invalid("rainbow.paletteLen", "must be at least 1"));
        }

        if !(self.wave.step > 0.0 && self.wave.step.is_finite()) {
            return Err(invalid("wave.step", "must be a positive number"));
        }
        for (field, value) in [
            ("wave.baseAmp", self.wave.base_amp),
            ("wave.pulseAmp", self.wave.pulse_amp),
            ("wave.baseFreq", self.wave.base_freq),
            ("wave.freqGain", self.wave.freq_gain),
            ("wave.phaseRate", self.wave.phase_rate),
            ("wave.harmonicFreqRatio", self.wave.harmonic_freq_ratio),
            ("wave.harmonicPhaseRatio", self.wave.harmonic_phase_ratio),
            ("wave.harmonicAmpRatio", self.wave.harmonic_amp_ratio),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }
        non_negative("waveStyle.lineWidth", self.wave_style.line_width)?;
        non_negative("waveStyle.glowBlur", self.wave_style.glow_blur)?;

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.to_string() }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a non-negative number, got {}", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StageConfig::default();
        assert_eq!(config.cursor.lookahead_ms, 500.0);
        assert_eq!(config.cursor.rewind_threshold_ms, 1000.0);
        assert_eq!(config.rainbow.trigger, "輝いて");
        assert_eq!(config.rainbow.palette_len, 7);
        assert_eq!(config.wave.base_amp, 6.0);
        assert_eq!(config.wave.pulse_amp, 22.0);
        assert_eq!(config.wave.base_freq, 0.018);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{ "cursor": { "lookaheadMs": 250 }, "rainbow": { "paletteLen": 3 } }"#;
        let config = StageConfig::from_json(json).unwrap();
        assert_eq!(config.cursor.lookahead_ms, 250.0);
        assert_eq!(config.cursor.rewind_threshold_ms, 1000.0);
        assert_eq!(config.rainbow.palette_len, 3);
        assert_eq!(config.rainbow.trigger, "輝いて");
    }

    #[test]
    fn test_yaml() {
        let yaml = "rainbow:\n  trigger: abc\nwaveStyle:\n  strokeColor: '#fff'\n";
        let config = StageConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.rainbow.trigger, "abc");
        assert_eq!(config.wave_style.stroke_color, "#fff");
        assert_eq!(config.wave_style.line_width, 2.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            StageConfig::from_json(r#"{ "rainbow": { "paletteLen": 0 } }"#),
            Err(ConfigError::Invalid { field: "rainbow.paletteLen", .. })
        ));
        assert!(matches!(
            StageConfig::from_json(r#"{ "cursor": { "lookaheadMs": -1 } }"#),
            Err(ConfigError::Invalid { field: "cursor.lookaheadMs", .. })
        ));
        assert!(matches!(
            StageConfig::from_json(r#"{ "wave": { "step": 0 } }"#),
            Err(ConfigError::Invalid { field: "wave.step", .. })
        ));
        assert!(matches!(StageConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_text_picks_the_parser() {
        let yaml = "cursor:\n  rewindThresholdMs: 2000\n";
        let config = StageConfig::from_text(yaml, "yml".parse().unwrap()).unwrap();
        assert_eq!(config.cursor.rewind_threshold_ms, 2000.0);

        let config = StageConfig::from_text("{}", ConfigFormat::Json).unwrap();
        assert_eq!(config, StageConfig::default());
    }

    #[test]
    fn test_from_text_failures_are_stage_errors() {
        let yaml = "rainbow: { paletteLen: 0 }";
        let err = StageConfig::from_text(yaml, ConfigFormat::Yaml).unwrap_err();
        assert!(matches!(
            err,
            StageError::Config(ConfigError::Invalid { field: "rainbow.paletteLen", .. })
        ));
        assert!(matches!(
            StageConfig::from_text("[1, 2", ConfigFormat::Json),
            Err(StageError::Config(ConfigError::Parse(_)))
        ));
        assert_eq!(
            "toml".parse::<ConfigFormat>(),
            Err(ConfigError::UnknownFormat("toml".to_string()))
        );
    }
}
