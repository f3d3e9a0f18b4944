//! Reveal events for the display adapter
//!
//! One event per newly revealed character. JavaScript only has to create the
//! element, apply `classNames`, and seek to `seekTarget` on click.

use serde::{Deserialize, Serialize};

use crate::models::lyrics::{CharId, LyricSheet};

/// Classification of a revealed character
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RevealTags {
    /// Owning word is a noun, pronoun or unclassified token
    pub noun: bool,
    /// Last character of its phrase
    pub last_char: bool,
    pub first_char_in_english_word: bool,
    pub last_char_in_english_word: bool,
}

impl RevealTags {
    pub fn classify(sheet: &LyricSheet, id: CharId) -> Self {
        let mut tags = RevealTags::default();
        let Some(word) = sheet.word_of(id) else {
            return tags;
        };

        tags.noun = word.part_of_speech.is_noun_like();
        tags.last_char = sheet.phrase_of(id).is_some_and(|p| p.last_char == id);

        if word.language == "en" {
            if word.last_char == id {
                tags.last_char_in_english_word = true;
            } else if word.first_char == id {
                tags.first_char_in_english_word = true;
            }
        }

        tags
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RevealEvent {
    /// Position of the character in the sheet
    pub index: CharId,
    pub text: String,
    pub tags: RevealTags,
    /// Rainbow palette slot, if the character belongs to a trigger run
    pub color_index: Option<u8>,
    /// Where to seek when the character is clicked (ms)
    pub seek_target: f64,
    pub class_names: Vec<String>,
}

impl RevealEvent {
    pub fn new(sheet: &LyricSheet, id: CharId, color_index: Option<u8>) -> Option<Self> {
        let ch = sheet.char(id)?;
        let tags = RevealTags::classify(sheet, id);
        Some(Self {
            index: id,
            text: ch.text.clone(),
            tags,
            color_index,
            seek_target: ch.start_time,
            class_names: class_names(&tags, color_index),
        })
    }
}

fn class_names(tags: &RevealTags, color_index: Option<u8>) -> Vec<String> {
    let mut classes = Vec::new();
    if tags.noun {
        classes.push("noun".to_string());
    }
    if tags.last_char {
        classes.push("lastChar".to_string());
    }
    if tags.last_char_in_english_word {
        classes.push("lastCharInEnglishWord".to_string());
    }
    if tags.first_char_in_english_word {
        classes.push("firstCharInEnglishWord".to_string());
    }
    if let Some(color) = color_index {
        classes.push("kagayai".to_string());
        classes.push(format!("kagayai-{}", color));
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lyrics::{CharInput, PartOfSpeech, PhraseInput, WordInput};

    fn word(pos: PartOfSpeech, lang: &str, text: &str, start: f64) -> WordInput {
        WordInput {
            pos,
            language: lang.to_string(),
            chars: text
                .chars()
                .enumerate()
                .map(|(i, ch)| CharInput {
                    text: ch.to_string(),
                    start_time: start + i as f64 * 10.0,
                })
                .collect(),
        }
    }

    fn sheet() -> LyricSheet {
        LyricSheet::from_phrases(&[
            PhraseInput {
                words: vec![
                    word(PartOfSpeech::Noun, "ja", "夜空", 0.0),
                    word(PartOfSpeech::Particle, "ja", "に", 100.0),
                ],
            },
            PhraseInput {
                words: vec![
                    word(PartOfSpeech::Verb, "en", "shine", 1000.0),
                    word(PartOfSpeech::Pronoun, "en", "I", 2000.0),
                ],
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_noun_and_phrase_end() {
        let s = sheet();
        let first = RevealTags::classify(&s, 0);
        assert!(first.noun);
        assert!(!first.last_char);

        let particle = RevealTags::classify(&s, 2);
        assert!(!particle.noun);
        assert!(particle.last_char);
    }

    #[test]
    fn test_english_word_boundaries() {
        let s = sheet();
        // "shine" occupies 3..=7, "I" is 8
        assert!(RevealTags::classify(&s, 3).first_char_in_english_word);
        assert!(!RevealTags::classify(&s, 5).first_char_in_english_word);
        assert!(!RevealTags::classify(&s, 5).last_char_in_english_word);
        assert!(RevealTags::classify(&s, 7).last_char_in_english_word);

        let single = RevealTags::classify(&s, 8);
        assert!(single.last_char_in_english_word);
        assert!(!single.first_char_in_english_word);
        assert!(single.last_char);
        assert!(single.noun);
    }

    #[test]
    fn test_event_fields_and_classes() {
        let s = sheet();
        let event = RevealEvent::new(&s, 1, Some(4)).unwrap();
        assert_eq!(event.text, "空");
        assert_eq!(event.seek_target, 10.0);
        assert_eq!(event.color_index, Some(4));
        assert_eq!(event.class_names, vec!["noun", "kagayai", "kagayai-4"]);

        assert!(RevealEvent::new(&s, 42, None).is_none());
    }

    #[test]
    fn test_event_serializes_camel_case() {
        let s = sheet();
        let json = serde_json::to_value(RevealEvent::new(&s, 7, None).unwrap()).unwrap();
        assert_eq!(json["seekTarget"], 1040.0);
        assert_eq!(json["colorIndex"], serde_json::Value::Null);
        assert_eq!(json["tags"]["lastCharInEnglishWord"], true);
    }
}
