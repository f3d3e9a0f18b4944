//! Timed lyric structure
//!
//! The provider's phrase → word → character graph, materialized once per
//! video into flat, index-addressed vectors. A character's identity is its
//! position in the sheet, which is stable because the sheet is immutable and
//! ordered by start time.

use serde::{Deserialize, Serialize};

use crate::errors::StageError;

/// Index of a character inside a [`LyricSheet`]
pub type CharId = usize;

/// Part-of-speech tag attached to a word by the lyric analysis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    /// Noun
    #[serde(rename = "N")]
    Noun,
    /// Pronoun
    #[serde(rename = "PN")]
    Pronoun,
    /// Verb
    #[serde(rename = "V")]
    Verb,
    /// Adverb
    #[serde(rename = "R")]
    Adverb,
    /// Adjective
    #[serde(rename = "J")]
    Adjective,
    /// Particle
    #[serde(rename = "P")]
    Particle,
    /// Symbol / unclassified token
    #[serde(rename = "X")]
    Symbol,
    /// Anything the analysis emits that we do not distinguish
    #[serde(other)]
    Other,
}

impl PartOfSpeech {
    /// Nouns, pronouns and unclassified tokens are highlighted alike
    pub fn is_noun_like(&self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::Pronoun | PartOfSpeech::Symbol)
    }
}

impl Default for PartOfSpeech {
    fn default() -> Self {
        PartOfSpeech::Other
    }
}

/// One displayed grapheme with its vocalization time
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Character {
    pub text: String,
    /// Vocalization start (ms)
    pub start_time: f64,
    /// Index of the owning word
    pub word: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Word {
    pub part_of_speech: PartOfSpeech,
    pub language: String,
    pub first_char: CharId,
    pub last_char: CharId,
    /// Index of the owning phrase
    pub phrase: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Phrase {
    pub first_char: CharId,
    pub last_char: CharId,
}

// ============================================================================
// Input shapes (what JavaScript hands over)
// ============================================================================

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharInput {
    pub text: String,
    pub start_time: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordInput {
    #[serde(default)]
    pub pos: PartOfSpeech,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub chars: Vec<CharInput>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseInput {
    #[serde(default)]
    pub words: Vec<WordInput>,
}

/// Immutable, time-ordered lyric data for one video
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LyricSheet {
    chars: Vec<Character>,
    words: Vec<Word>,
    phrases: Vec<Phrase>,
}

impl LyricSheet {
    /// Materialize the provider's nested phrases into a flat sheet
    ///
    /// Empty words and phrases are dropped. Characters must not go back in
    /// time; a non-finite or decreasing start time rejects the whole sheet.
    pub fn from_phrases(phrases: &[PhraseInput]) -> Result<Self, StageError> {
        let mut sheet = LyricSheet::default();

        for phrase in phrases {
            let phrase_index = sheet.phrases.len();
            let phrase_first = sheet.chars.len();

            for word in &phrase.words {
                if word.chars.is_empty() {
                    continue;
                }
                let word_index = sheet.words.len();
                let word_first = sheet.chars.len();

                for ch in &word.chars {
                    sheet.push_char(ch, word_index)?;
                }

                sheet.words.push(Word {
                    part_of_speech: word.pos,
                    language: word.language.clone(),
                    first_char: word_first,
                    last_char: sheet.chars.len() - 1,
                    phrase: phrase_index,
                });
            }

            if sheet.chars.len() > phrase_first {
                sheet.phrases.push(Phrase {
                    first_char: phrase_first,
                    last_char: sheet.chars.len() - 1,
                });
            }
        }

        Ok(sheet)
    }

    fn push_char(&mut self, input: &CharInput, word: usize) -> Result<(), StageError> {
        if !input.start_time.is_finite() {
            return Err(StageError::InvalidLyrics(format!(
                "character {} ({:?}) has non-finite start time",
                self.chars.len(),
                input.text
            )));
        }
        if let Some(prev) = self.chars.last() {
            if input.start_time < prev.start_time {
                return Err(StageError::InvalidLyrics(format!(
                    "character {} ({:?}) starts at {}ms, before its predecessor at {}ms",
                    self.chars.len(),
                    input.text,
                    input.start_time,
                    prev.start_time
                )));
            }
        }
        self.chars.push(Character {
            text: input.text.clone(),
            start_time: input.start_time,
            word,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Entry point of the character sequence
    pub fn first_char(&self) -> Option<CharId> {
        if self.chars.is_empty() { None } else { Some(0) }
    }

    pub fn char(&self, id: CharId) -> Option<&Character> {
        self.chars.get(id)
    }

    /// Successor of `id` in vocalization order
    pub fn next(&self, id: CharId) -> Option<CharId> {
        let next = id + 1;
        if next < self.chars.len() { Some(next) } else { None }
    }

    pub fn start_time(&self, id: CharId) -> Option<f64> {
        self.chars.get(id).map(|c| c.start_time)
    }

    pub fn word_of(&self, id: CharId) -> Option<&Word> {
        self.chars.get(id).and_then(|c| self.words.get(c.word))
    }

    pub fn phrase_of(&self, id: CharId) -> Option<&Phrase> {
        self.word_of(id).and_then(|w| self.phrases.get(w.phrase))
    }

    pub fn chars(&self) -> &[Character] {
        &self.chars
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }
}
