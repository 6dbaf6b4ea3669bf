//! Word and sentence analysis: raw provider words → scored chunks.
//!
//! Pipeline per word: canonicalize symbols, normalize scores, resolve spans,
//! align letters, chunk by vowel nuclei, then assemble and clean up chunks.
//! Everything here is pure and infallible.

use crate::config::EngineConfig;
use crate::feedback::assembler::assemble;
use crate::language::align::align_letters;
use crate::language::canonicalize::canonicalize;
use crate::language::syllabify::chunk_phonemes;
use crate::scoring::score::{normalize_score, weighted_average, ScoredItem};
use crate::scoring::span::resolve_raw_span;
use crate::types::{CanonicalPhoneme, LetterGroup, RawPhoneme, RawWord, Sentence, Word};

/// Canonicalize, score and time each raw phoneme, keeping order.
pub fn canonical_phonemes(raw: &[RawPhoneme], unit_to_seconds: f64) -> Vec<CanonicalPhoneme> {
    raw.iter()
        .enumerate()
        .map(|(index, p)| {
            let span = resolve_raw_span(p.span.as_ref(), unit_to_seconds);
            CanonicalPhoneme {
                index,
                symbol: canonicalize(&p.symbol),
                score: normalize_score(p.raw_score),
                start: span.map(|s| s.start),
                end: span.map(|s| s.end),
            }
        })
        .collect()
}

/// Letter groups for a word: its own word-level groups, or one group per
/// phoneme when every phoneme carries a letter group of its own.
pub fn word_letter_groups(raw: &RawWord) -> Option<Vec<LetterGroup>> {
    if let Some(groups) = &raw.letter_groups {
        return Some(groups.clone());
    }
    if raw.phonemes.is_empty() {
        return None;
    }
    raw.phonemes
        .iter()
        .map(|p| p.letter_group.as_deref().map(|letters| LetterGroup::new(letters, 1)))
        .collect()
}

pub fn analyze_word(raw: &RawWord, config: &EngineConfig) -> Word {
    analyze_word_with_coach(raw, None, config)
}

/// Analyze a learner's word, filling chunk coach spans from `coach` by
/// phoneme index when a reference recording is available.
pub fn analyze_word_with_coach(raw: &RawWord, coach: Option<&RawWord>, config: &EngineConfig) -> Word {
    let phonemes = canonical_phonemes(&raw.phonemes, config.unit_to_seconds);
    if phonemes.is_empty() {
        return Word {
            text: raw.text.clone(),
            phonemes,
            chunks: vec![],
            score: None,
        };
    }

    let coach_phonemes = coach.map(|c| canonical_phonemes(&c.phonemes, config.unit_to_seconds));
    let symbols: Vec<_> = phonemes.iter().map(|p| p.symbol.clone()).collect();
    let groups = word_letter_groups(raw);
    let letters = align_letters(&raw.text, phonemes.len(), groups.as_deref(), config.capitalize_letters);
    let ranges = chunk_phonemes(&symbols);
    let chunks = assemble(&ranges, &letters, &phonemes, coach_phonemes.as_deref(), &raw.text);

    let score = weighted_average(
        phonemes
            .iter()
            .map(|p| ScoredItem::with_duration(p.score, p.span().map(|s| s.duration()))),
    )
    .or_else(|| normalize_score(raw.raw_score));

    Word {
        text: raw.text.clone(),
        phonemes,
        chunks,
        score,
    }
}

/// Analyze every word of a sentence. Coach words pair with user words by
/// position; the sentence score weights each word by its duration, or 1
/// when its timing is unknown.
pub fn analyze_sentence(words: &[RawWord], coach_words: Option<&[RawWord]>, config: &EngineConfig) -> Sentence {
    let words: Vec<Word> = words
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let coach = coach_words.and_then(|c| c.get(i));
            analyze_word_with_coach(raw, coach, config)
        })
        .collect();

    Sentence {
        text: sentence_text(&words),
        score: sentence_score(&words),
        words,
    }
}

pub fn sentence_score(words: &[Word]) -> Option<u8> {
    weighted_average(
        words
            .iter()
            .map(|w| ScoredItem::with_duration(w.score, w.span().map(|s| s.duration()))),
    )
}

pub(crate) fn sentence_text(words: &[Word]) -> String {
    words
        .iter()
        .map(|w| w.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::inventory::Phone;
    use crate::types::{RawSpan, Span};

    fn raw_phoneme(symbol: &str, score: Option<f64>, span: Option<(f64, f64)>) -> RawPhoneme {
        RawPhoneme {
            symbol: symbol.to_string(),
            raw_score: score,
            span: span.map(|(s, e)| RawSpan { start: Some(s), end: Some(e) }),
            letter_group: None,
        }
    }

    fn better() -> RawWord {
        RawWord {
            text: "better".into(),
            phonemes: vec![
                raw_phoneme("b", Some(0.9), Some((10.0, 20.0))),
                raw_phoneme("ɛ", Some(0.7), Some((20.0, 40.0))),
                raw_phoneme("T", Some(0.8), Some((40.0, 50.0))),
                raw_phoneme("ɚ", Some(0.5), Some((50.0, 70.0))),
            ],
            letter_groups: Some(vec![
                LetterGroup::new("b", 1),
                LetterGroup::new("e", 1),
                LetterGroup::new("tt", 1),
                LetterGroup::new("er", 1),
            ]),
            raw_score: Some(99.0),
        }
    }

    #[test]
    fn test_analyze_better() {
        let word = analyze_word(&better(), &EngineConfig::default());
        let symbols: Vec<Phone> = word.phonemes.iter().map(|p| p.symbol.clone()).collect();
        assert_eq!(symbols, vec![Phone::B, Phone::Eh, Phone::T, Phone::Er]);

        assert_eq!(word.chunks.len(), 2);
        assert_eq!(word.chunks[0].phoneme_indices, vec![0, 1]);
        assert_eq!(word.chunks[0].letters, "be");
        assert_eq!(word.chunks[1].phoneme_indices, vec![2, 3]);
        assert_eq!(word.chunks[1].letters, "tter");
        assert_eq!(word.spelled(), "better");

        // (90*0.1 + 70*0.2) / 0.3
        assert_eq!(word.chunks[0].score, Some(77));
        // (90*0.1 + 70*0.2 + 80*0.1 + 50*0.2) / 0.6
        assert_eq!(word.score, Some(68));
        let span = word.chunks[1].user_span.unwrap();
        assert!((span.start - 0.4).abs() < 1e-9 && (span.end - 0.7).abs() < 1e-9);
        assert_eq!(word.weakest_chunk().map(|c| c.chunk_index), Some(1));
    }

    #[test]
    fn test_zero_phonemes() {
        let raw = RawWord {
            text: "hmm".into(),
            raw_score: Some(80.0),
            ..Default::default()
        };
        let word = analyze_word(&raw, &EngineConfig::default());
        assert!(word.chunks.is_empty());
        assert_eq!(word.score, None);
    }

    #[test]
    fn test_word_score_falls_back_to_provider() {
        let raw = RawWord {
            text: "ah".into(),
            phonemes: vec![raw_phoneme("AA", None, None)],
            letter_groups: None,
            raw_score: Some(0.64),
        };
        let word = analyze_word(&raw, &EngineConfig::default());
        assert_eq!(word.score, Some(64));
        assert_eq!(word.chunks[0].score, None);

        let unscored = RawWord { raw_score: None, ..raw };
        assert_eq!(analyze_word(&unscored, &EngineConfig::default()).score, None);
    }

    #[test]
    fn test_per_phoneme_letter_groups() {
        let mut raw = better();
        raw.letter_groups = None;
        for (p, letters) in raw.phonemes.iter_mut().zip(["b", "e", "tt", "er"]) {
            p.letter_group = Some(letters.to_string());
        }
        assert_eq!(word_letter_groups(&raw).map(|g| g.len()), Some(4));
        let word = analyze_word(&raw, &EngineConfig::default());
        assert_eq!(word.chunks[1].letters, "tter");

        // one phoneme without a group: no per-phoneme groups at all
        raw.phonemes[2].letter_group = None;
        assert!(word_letter_groups(&raw).is_none());
    }

    #[test]
    fn test_huge_letter_group_count_from_payload() {
        let root = serde_json::json!({"words": [{
            "word": "ab",
            "phonemes": ["AA", "B"],
            "letter_groups": [{"letters": "ab", "phone_count": 1e15}]
        }]});
        let words = crate::feedback::payload::words_from_value(&root).unwrap();
        let word = analyze_word(&words[0], &EngineConfig::default());
        assert_eq!(word.chunks.len(), 1);
        assert_eq!(word.spelled(), "ab");
    }

    #[test]
    fn test_missing_groups_split_evenly() {
        let mut raw = better();
        raw.letter_groups = None;
        let word = analyze_word(&raw, &EngineConfig::default());
        assert_eq!(word.spelled(), "better");
        assert!(word.chunks.iter().all(|c| !c.letters.is_empty()));
    }

    #[test]
    fn test_capitalized_word() {
        let mut raw = better();
        raw.text = "Better".into();
        let word = analyze_word(&raw, &EngineConfig::default());
        assert_eq!(word.chunks[0].letters, "Be");

        let config = EngineConfig { capitalize_letters: false, ..Default::default() };
        let word = analyze_word(&raw, &config);
        assert_eq!(word.chunks[0].letters, "be");
    }

    #[test]
    fn test_unit_scale() {
        let config = EngineConfig { unit_to_seconds: 0.001, ..Default::default() };
        let word = analyze_word(&better(), &config);
        let span: Span = word.span().unwrap();
        assert!((span.start - 0.01).abs() < 1e-9);
        assert!((span.end - 0.07).abs() < 1e-9);
    }

    #[test]
    fn test_coach_spans() {
        let mut coach = better();
        for p in coach.phonemes.iter_mut() {
            let span = p.span.as_mut().unwrap();
            span.start = span.start.map(|s| s + 100.0);
            span.end = span.end.map(|e| e + 100.0);
        }
        coach.phonemes.truncate(3);

        let word = analyze_word_with_coach(&better(), Some(&coach), &EngineConfig::default());
        let first = word.chunks[0].coach_span.unwrap();
        assert!((first.start - 1.1).abs() < 1e-9 && (first.end - 1.4).abs() < 1e-9);
        // coach word ends after index 2
        let second = word.chunks[1].coach_span.unwrap();
        assert!((second.start - 1.4).abs() < 1e-9 && (second.end - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_sentence_weighted_by_duration() {
        let long = RawWord {
            text: "ah".into(),
            phonemes: vec![raw_phoneme("AA", Some(100.0), Some((0.0, 30.0)))],
            letter_groups: None,
            raw_score: None,
        };
        let short = RawWord {
            text: " oh ".into(),
            phonemes: vec![raw_phoneme("OW", Some(0.0), Some((30.0, 40.0)))],
            letter_groups: None,
            raw_score: None,
        };
        let silent = RawWord {
            text: "uh".into(),
            phonemes: vec![raw_phoneme("AH", None, None)],
            letter_groups: None,
            raw_score: None,
        };
        let sentence = analyze_sentence(&[long, short, silent], None, &EngineConfig::default());
        assert_eq!(sentence.text, "ah oh uh");
        assert_eq!(sentence.words.len(), 3);
        assert_eq!(sentence.score, Some(75));
    }

    #[test]
    fn test_sentence_without_scores() {
        let sentence = analyze_sentence(&[], None, &EngineConfig::default());
        assert_eq!(sentence.score, None);
        assert!(sentence.text.is_empty());
    }
}
