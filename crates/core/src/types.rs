use serde::{Deserialize, Serialize};

use crate::config::SpanPadding;
use crate::language::inventory::Phone;
use crate::scoring::span::pad_span;

/// A time range within a recording, in seconds. Always `end > start`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Smallest span covering both.
    pub fn union(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Union of all spans, or `None` if there are none.
    pub fn cover<'a, I>(spans: I) -> Option<Span>
    where
        I: IntoIterator<Item = &'a Span>,
    {
        spans
            .into_iter()
            .fold(None, |acc: Option<Span>, s| Some(acc.map_or(*s, |a| a.union(s))))
    }
}

/// Start/end as sent by the provider, in provider units, not yet validated.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RawSpan {
    pub start: Option<f64>,
    pub end: Option<f64>,
}

/// One phoneme entry exactly as the scoring provider reported it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawPhoneme {
    pub symbol: String,
    pub raw_score: Option<f64>,
    pub span: Option<RawSpan>,
    /// Spelling fragment the provider attributes to this phoneme alone.
    pub letter_group: Option<String>,
}

/// A spelling fragment together with the number of phonemes it spans.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LetterGroup {
    pub letters: String,
    pub phoneme_count: usize,
}

impl LetterGroup {
    pub fn new(letters: &str, phoneme_count: usize) -> Self {
        Self {
            letters: letters.to_string(),
            phoneme_count,
        }
    }
}

/// One scored word from the provider, before canonicalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawWord {
    pub text: String,
    pub phonemes: Vec<RawPhoneme>,
    /// Word-level letter groups, in pronunciation order.
    pub letter_groups: Option<Vec<LetterGroup>>,
    /// The provider's own word score, used only when no phoneme is scored.
    pub raw_score: Option<f64>,
}

/// A phoneme after canonicalization, score normalization and span resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalPhoneme {
    /// Position in the word's phoneme sequence (`0..N`).
    pub index: usize,
    pub symbol: Phone,
    pub score: Option<u8>,
    pub start: Option<f64>,
    pub end: Option<f64>,
}

impl CanonicalPhoneme {
    pub fn span(&self) -> Option<Span> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(Span { start, end }),
            _ => None,
        }
    }
}

/// A pronounceable unit of a word: a contiguous run of phonemes and the
/// letters that spell it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    pub chunk_index: usize,
    /// Contiguous, increasing phoneme indices.
    pub phoneme_indices: Vec<usize>,
    /// Canonical symbols at those indices, for display.
    pub symbols: Vec<Phone>,
    pub letters: String,
    /// `None` when no contained phoneme has a score.
    pub score: Option<u8>,
    /// Location in the learner's recording.
    pub user_span: Option<Span>,
    /// Location in the reference recording, matched by phoneme index.
    pub coach_span: Option<Span>,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.phoneme_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phoneme_indices.is_empty()
    }

    /// User span widened for playback, clamped to the clip.
    pub fn playback_span(&self, padding: &SpanPadding, clip_duration: Option<f64>) -> Option<Span> {
        self.user_span.map(|s| pad_span(&s, padding, clip_duration))
    }

    /// Coach span widened for playback, clamped to the reference clip.
    pub fn coach_playback_span(
        &self,
        padding: &SpanPadding,
        clip_duration: Option<f64>,
    ) -> Option<Span> {
        self.coach_span.map(|s| pad_span(&s, padding, clip_duration))
    }
}

/// The full analysis of one word.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Word {
    pub text: String,
    pub phonemes: Vec<CanonicalPhoneme>,
    pub chunks: Vec<Chunk>,
    pub score: Option<u8>,
}

impl Word {
    /// First resolvable phoneme start to last resolvable phoneme end.
    pub fn span(&self) -> Option<Span> {
        let spans: Vec<Span> = self.phonemes.iter().filter_map(|p| p.span()).collect();
        Span::cover(&spans)
    }

    /// Lowest-scoring chunk; the earliest one wins ties.
    pub fn weakest_chunk(&self) -> Option<&Chunk> {
        self.chunks
            .iter()
            .filter(|c| c.score.is_some())
            .fold(None, |worst: Option<&Chunk>, c| match worst {
                Some(w) if w.score <= c.score => Some(w),
                _ => Some(c),
            })
    }

    /// Concatenated chunk letters.
    pub fn spelled(&self) -> String {
        self.chunks.iter().map(|c| c.letters.as_str()).collect()
    }
}

/// A scored sentence: every word plus the aggregate score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sentence {
    pub text: String,
    pub words: Vec<Word>,
    pub score: Option<u8>,
}
