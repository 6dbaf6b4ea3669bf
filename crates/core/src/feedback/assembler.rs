//! Chunk assembly: ranges + letters + scored phonemes → display chunks.
//!
//! After building one chunk per range, a cleanup pass folds every chunk
//! whose letters are blank into its nearest non-blank predecessor (or into
//! its successor when it leads the word). If nothing readable survives,
//! the bare word is spread over the remaining chunks.

use std::ops::Range;

use crate::language::align::split_evenly;
use crate::scoring::score::{blend_scores, weighted_average, ScoredItem};
use crate::types::{CanonicalPhoneme, Chunk, Span};

/// Build the final chunk list for one word.
///
/// `letters` and `phonemes` are indexed by phoneme index. `coach`, when
/// given, is the reference word's phoneme list; it is matched by index and
/// may be shorter or longer than `phonemes`.
pub fn assemble(
    ranges: &[Range<usize>],
    letters: &[String],
    phonemes: &[CanonicalPhoneme],
    coach: Option<&[CanonicalPhoneme]>,
    word: &str,
) -> Vec<Chunk> {
    let chunks: Vec<Chunk> = ranges
        .iter()
        .map(|range| build_chunk(range.clone(), letters, phonemes, coach))
        .collect();

    let mut chunks = merge_blank_chunks(chunks);
    if !chunks.is_empty() && chunks.iter().all(|c| is_blank(&c.letters)) {
        chunks = resplit_letters(chunks, word);
    }

    for (i, chunk) in chunks.iter_mut().enumerate() {
        chunk.chunk_index = i;
    }
    chunks
}

fn build_chunk(
    range: Range<usize>,
    letters: &[String],
    phonemes: &[CanonicalPhoneme],
    coach: Option<&[CanonicalPhoneme]>,
) -> Chunk {
    let members = &phonemes[range.clone()];

    let score = weighted_average(
        members
            .iter()
            .map(|p| ScoredItem::with_duration(p.score, p.span().map(|s| s.duration()))),
    );
    let user_spans: Vec<Span> = members.iter().filter_map(|p| p.span()).collect();
    let coach_span = coach.and_then(|coach| {
        let spans: Vec<Span> = range
            .clone()
            .filter_map(|i| coach.get(i).and_then(|p| p.span()))
            .collect();
        Span::cover(&spans)
    });

    Chunk {
        chunk_index: 0,
        phoneme_indices: range.clone().collect(),
        symbols: members.iter().map(|p| p.symbol.clone()).collect(),
        letters: range.map(|i| letters.get(i).map_or("", String::as_str)).collect(),
        score,
        user_span: Span::cover(&user_spans),
        coach_span,
    }
}

fn is_blank(letters: &str) -> bool {
    letters.trim().is_empty()
}

/// Fold blank chunks into their neighbours, keeping order.
fn merge_blank_chunks(chunks: Vec<Chunk>) -> Vec<Chunk> {
    let mut merged: Vec<Chunk> = Vec::with_capacity(chunks.len());
    // Blank chunks seen before the first non-blank one.
    let mut leading: Option<Chunk> = None;

    for chunk in chunks {
        if is_blank(&chunk.letters) {
            match merged.pop() {
                Some(prev) => merged.push(join(prev, chunk)),
                None => {
                    leading = Some(match leading.take() {
                        Some(lead) => join(lead, chunk),
                        None => chunk,
                    })
                }
            }
            continue;
        }
        let chunk = match leading.take() {
            Some(lead) => join(lead, chunk),
            None => chunk,
        };
        merged.push(chunk);
    }

    // Every chunk was blank: they all folded into one.
    if let Some(lead) = leading {
        merged.push(lead);
    }
    merged
}

/// Concatenate two adjacent chunks, `left` first.
fn join(left: Chunk, right: Chunk) -> Chunk {
    let score = blend_scores(left.score, left.len(), right.score, right.len());
    Chunk {
        chunk_index: left.chunk_index,
        phoneme_indices: left.phoneme_indices.into_iter().chain(right.phoneme_indices).collect(),
        symbols: left.symbols.into_iter().chain(right.symbols).collect(),
        letters: left.letters + &right.letters,
        score,
        user_span: union_opt(left.user_span, right.user_span),
        coach_span: union_opt(left.coach_span, right.coach_span),
    }
}

fn union_opt(a: Option<Span>, b: Option<Span>) -> Option<Span> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.union(&b)),
        (a, b) => a.or(b),
    }
}

/// Alignment produced nothing readable: spread the bare word over the chunks.
fn resplit_letters(mut chunks: Vec<Chunk>, word: &str) -> Vec<Chunk> {
    log::debug!(
        "No chunk of {:?} received letters; re-splitting across {} chunks",
        word,
        chunks.len()
    );
    let pieces = split_evenly(word.trim(), chunks.len());
    for (chunk, piece) in chunks.iter_mut().zip(pieces) {
        chunk.letters = piece;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::inventory::Phone;

    fn phoneme(index: usize, score: Option<u8>, span: Option<(f64, f64)>) -> CanonicalPhoneme {
        CanonicalPhoneme {
            index,
            symbol: Phone::Ah,
            score,
            start: span.map(|s| s.0),
            end: span.map(|s| s.1),
        }
    }

    fn letters(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn singletons(n: usize) -> Vec<Range<usize>> {
        (0..n).map(|i| i..i + 1).collect()
    }

    fn assert_partition(chunks: &[Chunk], n: usize) {
        let flat: Vec<usize> = chunks.iter().flat_map(|c| c.phoneme_indices.clone()).collect();
        assert_eq!(flat, (0..n).collect::<Vec<_>>());
        for (i, c) in chunks.iter().enumerate() {
            assert_eq!(c.chunk_index, i);
        }
    }

    #[test]
    fn test_builds_one_chunk_per_range() {
        let phonemes = vec![
            phoneme(0, Some(90), Some((0.0, 0.1))),
            phoneme(1, Some(70), Some((0.1, 0.4))),
            phoneme(2, Some(100), Some((0.4, 0.5))),
            phoneme(3, None, None),
        ];
        let chunks = assemble(&[0..2, 2..4], &letters(&["b", "e", "tt", "er"]), &phonemes, None, "better");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].letters, "be");
        assert_eq!(chunks[1].letters, "tter");
        // (90*0.1 + 70*0.3) / 0.4
        assert_eq!(chunks[0].score, Some(75));
        assert_eq!(chunks[1].score, Some(100));
        assert_eq!(chunks[0].user_span, Some(Span { start: 0.0, end: 0.4 }));
        assert_eq!(chunks[1].user_span, Some(Span { start: 0.4, end: 0.5 }));
        assert_eq!(chunks[1].coach_span, None);
        assert_partition(&chunks, 4);
    }

    #[test]
    fn test_blank_chunk_absorbed_backward() {
        let phonemes = vec![
            phoneme(0, Some(80), Some((0.0, 0.1))),
            phoneme(1, Some(20), Some((0.1, 0.2))),
            phoneme(2, Some(90), Some((0.2, 0.5))),
        ];
        let chunks = assemble(&singletons(3), &letters(&["b", "", "tter"]), &phonemes, None, "btter");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].phoneme_indices, vec![0, 1]);
        assert_eq!(chunks[0].letters, "b");
        assert_eq!(chunks[0].score, Some(50));
        assert_eq!(chunks[0].user_span, Some(Span { start: 0.0, end: 0.2 }));
        assert_eq!(chunks[1].letters, "tter");
        assert!(chunks.iter().all(|c| !c.letters.is_empty()));
        assert_partition(&chunks, 3);
    }

    #[test]
    fn test_leading_blank_merges_forward() {
        let phonemes = vec![phoneme(0, None, None), phoneme(1, None, None), phoneme(2, Some(70), None)];
        let chunks = assemble(&singletons(3), &letters(&["", " ", "ah"]), &phonemes, None, "ah");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].phoneme_indices, vec![0, 1, 2]);
        assert_eq!(chunks[0].letters.trim(), "ah");
        assert_eq!(chunks[0].score, Some(70));
    }

    #[test]
    fn test_blend_is_phoneme_count_weighted() {
        let phonemes = vec![
            phoneme(0, Some(100), Some((0.0, 0.9))),
            phoneme(1, Some(100), Some((0.9, 1.0))),
            phoneme(2, Some(40), Some((1.0, 1.1))),
        ];
        let chunks = assemble(&[0..2, 2..3], &letters(&["o", "k", ""]), &phonemes, None, "ok");
        assert_eq!(chunks.len(), 1);
        // (100*2 + 40*1) / 3
        assert_eq!(chunks[0].score, Some(80));
    }

    #[test]
    fn test_unscored_chunk_has_no_score() {
        let phonemes = vec![phoneme(0, None, Some((0.0, 0.1))), phoneme(1, None, None)];
        let chunks = assemble(&[0..2], &letters(&["h", "i"]), &phonemes, None, "hi");
        assert_eq!(chunks[0].score, None);
    }

    #[test]
    fn test_all_blank_collapses_then_takes_word() {
        let phonemes: Vec<CanonicalPhoneme> = (0..4).map(|i| phoneme(i, Some(50), None)).collect();
        let chunks = assemble(&[0..2, 2..4], &letters(&["", "", "", ""]), &phonemes, None, "Water");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].phoneme_indices, vec![0, 1, 2, 3]);
        assert_eq!(chunks[0].letters, "Water");
        assert_eq!(chunks[0].score, Some(50));
        assert_partition(&chunks, 4);
    }

    #[test]
    fn test_whitespace_only_word_resplit_after_merge() {
        let phonemes: Vec<CanonicalPhoneme> = (0..3).map(|i| phoneme(i, None, None)).collect();
        let chunks = assemble(&singletons(3), &letters(&[" ", "", " "]), &phonemes, None, " ox ");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].letters, "ox");
        assert_partition(&chunks, 3);
    }

    #[test]
    fn test_coach_spans_matched_by_index() {
        let phonemes = vec![phoneme(0, Some(90), None), phoneme(1, Some(90), None), phoneme(2, Some(90), None)];
        let coach = vec![phoneme(0, None, Some((1.0, 1.1))), phoneme(1, None, Some((1.1, 1.3)))];
        let chunks = assemble(&[0..1, 1..3], &letters(&["a", "b", "c"]), &phonemes, Some(&coach), "abc");
        assert_eq!(chunks[0].coach_span, Some(Span { start: 1.0, end: 1.1 }));
        // index 2 is beyond the coach word
        assert_eq!(chunks[1].coach_span, Some(Span { start: 1.1, end: 1.3 }));
        assert_eq!(chunks[0].user_span, None);
    }

    #[test]
    fn test_merge_unions_coach_spans() {
        let phonemes = vec![phoneme(0, Some(90), None), phoneme(1, Some(90), None)];
        let coach = vec![phoneme(0, None, Some((0.5, 0.6))), phoneme(1, None, Some((0.6, 0.8)))];
        let chunks = assemble(&singletons(2), &letters(&["x", ""]), &phonemes, Some(&coach), "x");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].coach_span, Some(Span { start: 0.5, end: 0.8 }));
    }

    #[test]
    fn test_empty_word() {
        assert!(assemble(&[], &[], &[], None, "").is_empty());
    }
}
