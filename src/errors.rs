//! Error types for the lyric stage
//!
//! Nothing here is fatal to the host loop. Missing data degrades the affected
//! sub-path to a no-op or a zero value; a malformed tick is skipped whole.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StageError {
    /// The provider has not delivered a video yet
    #[error("no video loaded")]
    NoVideo,

    /// No beat is active at the given position (ms)
    #[error("no beat at {0}ms")]
    NoBeat(f64),

    /// Beat progress came out non-finite (e.g. a zero-length beat)
    #[error("beat {index} has non-finite progress at {position}ms")]
    InvalidProgress { index: usize, position: f64 },

    /// The tick could not be processed at all and is skipped
    #[error("malformed tick: {0}")]
    MalformedTick(String),

    /// Lyric snapshot rejected on load
    #[error("invalid lyric data: {0}")]
    InvalidLyrics(String),

    /// Configuration text rejected
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl StageError {
    /// Missing-data errors degrade to zero/no-op for one sub-path only
    pub fn is_missing_data(&self) -> bool {
        matches!(
            self,
            StageError::NoVideo | StageError::NoBeat(_)
                | StageError::InvalidProgress { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown config format '{0}', expected json or yaml")]
    UnknownFormat(String),

    #[error("could not parse config: {0}")]
    Parse(String),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_is_not_an_error_path() {
        assert!(StageError::NoVideo.is_missing_data());
        assert!(StageError::NoBeat(10.0).is_missing_data());
        assert!(StageError::InvalidProgress { index: 0, position: 1.0 }.is_missing_data());
        assert!(!StageError::MalformedTick("nan".to_string()).is_missing_data());
        assert!(!StageError::from(ConfigError::Parse("x".to_string())).is_missing_data());
    }
}
