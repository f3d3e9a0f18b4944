//! Models module for the lyric stage
//!
//! Read-only snapshots of what the playback provider knows about a song:
//! timed lyrics, beats, and the video that ties them together.

pub mod beat;
pub mod lyrics;
pub mod video;

// Re-export commonly used types
pub use beat::{Beat, BeatGrid, BeatLookup};
pub use lyrics::{
    CharId, CharInput, Character, LyricSheet, PartOfSpeech, Phrase, PhraseInput, Word, WordInput,
};
pub use video::{Video, VideoInput};
