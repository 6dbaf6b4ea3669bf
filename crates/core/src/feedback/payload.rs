//! Provider payload reader: loosely-shaped scoring JSON → [`RawWord`]s.
//!
//! Scoring services disagree on field names, so every field is read through
//! an [`Aliases`] table that tries keys in priority order. Absent or empty
//! fields come through as `None`; only a document with no recognizable word
//! list is an error.

use serde_json::{Map, Value};

use crate::error::PayloadError;
use crate::types::{LetterGroup, RawPhoneme, RawSpan, RawWord};

/// Ordered key list for one logical field: the first present key wins.
///
/// A key is present when it exists, is not `null`, and is not a blank string.
#[derive(Debug, Clone, Copy)]
pub struct Aliases(pub &'static [&'static str]);

impl Aliases {
    pub fn keys(&self) -> &'static [&'static str] {
        self.0
    }

    pub fn lookup<'a>(&self, obj: &'a Map<String, Value>) -> Option<&'a Value> {
        self.0.iter().find_map(|key| obj.get(*key).filter(|v| is_present(v)))
    }

    /// Numeric value of the first present key; numeric strings are accepted.
    pub fn number(&self, obj: &Map<String, Value>) -> Option<f64> {
        self.lookup(obj).and_then(as_number)
    }

    pub fn string<'a>(&self, obj: &'a Map<String, Value>) -> Option<&'a str> {
        self.lookup(obj).and_then(Value::as_str)
    }

    pub fn array<'a>(&self, obj: &'a Map<String, Value>) -> Option<&'a Vec<Value>> {
        self.lookup(obj).and_then(Value::as_array)
    }
}

pub const WORD_LIST: Aliases = Aliases(&["words", "word_score_list", "Words"]);
/// Nested object some providers wrap the word list in.
pub const NESTED_ROOT: Aliases = Aliases(&["text_score"]);
pub const WORD_TEXT: Aliases = Aliases(&["word", "text", "Word", "display"]);
pub const PHONEME_LIST: Aliases = Aliases(&["phonemes", "phone_score_list", "Phonemes", "phones"]);
pub const SCORE: Aliases = Aliases(&["score", "accuracy_score", "AccuracyScore", "quality_score", "accuracy"]);
pub const LETTER_GROUPS: Aliases = Aliases(&["letter_groups", "letterGroups", "syllable_score_list", "syllables"]);
pub const SYMBOL: Aliases = Aliases(&["phoneme", "symbol", "phone", "ipa", "label", "Phoneme"]);
pub const SPAN: Aliases = Aliases(&["span", "extent", "timing", "time"]);
pub const SPAN_START: Aliases = Aliases(&["start", "begin", "offset"]);
pub const SPAN_END: Aliases = Aliases(&["end", "stop"]);
pub const PHONEME_LETTERS: Aliases = Aliases(&["letters", "letter_group", "grapheme"]);
pub const GROUP_LETTERS: Aliases = Aliases(&["letters", "spelling", "grapheme", "text"]);
pub const GROUP_PHONEMES: Aliases = Aliases(&["phonemes", "phones", "symbols"]);
pub const GROUP_PHONEME_COUNT: Aliases = Aliases(&["phone_count", "phoneme_count"]);

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Parse a provider JSON document into raw words.
pub fn parse_words(text: &str) -> Result<Vec<RawWord>, PayloadError> {
    let root: Value =
        serde_json::from_str(text).map_err(|e| PayloadError::json("parsing provider payload", e))?;
    words_from_value(&root)
}

/// Raw words from an already-parsed document: either a bare array of word
/// objects or an object holding one under [`WORD_LIST`] (optionally nested
/// in [`NESTED_ROOT`]).
pub fn words_from_value(root: &Value) -> Result<Vec<RawWord>, PayloadError> {
    let entries = find_word_list(root).ok_or_else(|| PayloadError::missing_words(WORD_LIST.keys()))?;

    let mut words = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        match entry.as_object() {
            Some(obj) => words.push(parse_word(obj)),
            None => log::warn!("Skipping word entry {}: expected an object, got {}", i, entry),
        }
    }
    Ok(words)
}

fn find_word_list(root: &Value) -> Option<&Vec<Value>> {
    match root {
        Value::Array(entries) => Some(entries),
        Value::Object(obj) => WORD_LIST
            .array(obj)
            .or_else(|| NESTED_ROOT.lookup(obj).and_then(find_word_list)),
        _ => None,
    }
}

/// One word object. Missing fields degrade to empty/`None`.
pub fn parse_word(obj: &Map<String, Value>) -> RawWord {
    let text = WORD_TEXT.string(obj).unwrap_or_default().to_string();

    let phonemes = PHONEME_LIST
        .array(obj)
        .map(|entries| {
            entries
                .iter()
                .enumerate()
                .filter_map(|(i, entry)| {
                    let phoneme = parse_phoneme(entry);
                    if phoneme.is_none() {
                        log::warn!("Skipping phoneme {} of {:?}: no symbol in {}", i, text, entry);
                    }
                    phoneme
                })
                .collect()
        })
        .unwrap_or_default();

    let letter_groups = LETTER_GROUPS.array(obj).map(|entries| {
        entries
            .iter()
            .filter_map(|entry| {
                let group = entry.as_object().and_then(parse_letter_group);
                if group.is_none() {
                    log::warn!("Skipping letter group of {:?}: {}", text, entry);
                }
                group
            })
            .collect()
    });

    RawWord {
        raw_score: SCORE.number(obj),
        text,
        phonemes,
        letter_groups,
    }
}

/// A phoneme entry: an object, or a bare symbol string.
pub fn parse_phoneme(entry: &Value) -> Option<RawPhoneme> {
    match entry {
        Value::String(s) if is_present(entry) => Some(RawPhoneme {
            symbol: s.clone(),
            ..Default::default()
        }),
        Value::Object(obj) => Some(RawPhoneme {
            symbol: SYMBOL.string(obj)?.to_string(),
            raw_score: SCORE.number(obj),
            span: parse_span(obj),
            letter_group: PHONEME_LETTERS.string(obj).map(str::to_string),
        }),
        _ => None,
    }
}

/// Span from a nested container (object or `[start, end]` pair), falling
/// back to flat start/end keys on the entry itself.
fn parse_span(obj: &Map<String, Value>) -> Option<RawSpan> {
    let span = match SPAN.lookup(obj) {
        Some(Value::Object(inner)) => RawSpan {
            start: SPAN_START.number(inner),
            end: SPAN_END.number(inner),
        },
        Some(Value::Array(pair)) if pair.len() >= 2 => RawSpan {
            start: as_number(&pair[0]),
            end: as_number(&pair[1]),
        },
        _ => RawSpan {
            start: SPAN_START.number(obj),
            end: SPAN_END.number(obj),
        },
    };
    (span.start.is_some() || span.end.is_some()).then_some(span)
}

fn parse_letter_group(obj: &Map<String, Value>) -> Option<LetterGroup> {
    let letters = GROUP_LETTERS.string(obj).unwrap_or_default();
    let phoneme_count = match GROUP_PHONEMES.array(obj) {
        Some(list) => list.len(),
        None => {
            let n = GROUP_PHONEME_COUNT.number(obj)?;
            if !n.is_finite() || n < 0.0 {
                return None;
            }
            n.round() as usize
        }
    };
    Some(LetterGroup::new(letters, phoneme_count))
}
