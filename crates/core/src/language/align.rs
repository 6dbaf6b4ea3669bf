//! Grapheme alignment: which letters of the word produced each phoneme.
//!
//! Provider letter groups are preferred. Each group's fragment is divided
//! evenly over the phonemes it spans; when the expansion does not produce
//! exactly one entry per phoneme, the bare word is split evenly instead.
//! Phonemes may end up with empty letters; the chunk assembler folds those
//! into their neighbours.

use crate::types::LetterGroup;

/// Split `text` into `parts` left-to-right pieces of near-equal length.
///
/// Earlier pieces take the remainder letters. When there are fewer letters
/// than parts, the trailing pieces are empty.
pub fn split_evenly(text: &str, parts: usize) -> Vec<String> {
    if parts == 0 {
        return vec![];
    }
    let chars: Vec<char> = text.chars().collect();
    let base = chars.len() / parts;
    let remainder = chars.len() % parts;

    let mut pieces = Vec::with_capacity(parts);
    let mut pos = 0;
    for i in 0..parts {
        let len = base + usize::from(i < remainder);
        pieces.push(chars[pos..pos + len].iter().collect());
        pos += len;
    }
    pieces
}

/// Expand letter groups to one letters-string per phoneme.
///
/// Allocates one entry per covered phoneme; [`align_letters`] checks the
/// total against the word before expanding.
///
/// Groups spanning no phoneme (silent letters) are appended to the previous
/// phoneme's letters, or prepended to the next one when nothing precedes.
pub fn expand_letter_groups(groups: &[LetterGroup]) -> Vec<String> {
    let mut letters: Vec<String> = Vec::new();
    let mut leading_silent = String::new();

    for group in groups {
        if group.phoneme_count == 0 {
            match letters.last_mut() {
                Some(last) => last.push_str(&group.letters),
                None => leading_silent.push_str(&group.letters),
            }
            continue;
        }
        let mut pieces = split_evenly(&group.letters, group.phoneme_count);
        if !leading_silent.is_empty() {
            pieces[0].insert_str(0, &leading_silent);
            leading_silent.clear();
        }
        letters.extend(pieces);
    }
    letters
}

/// Letters for each of `phoneme_count` phonemes of `word`.
///
/// Uses the provider's letter groups when their expansion matches the
/// phoneme count, otherwise an even split of the word. With `capitalize`,
/// a word starting with an uppercase letter gets its first non-empty
/// letters-string recapitalized.
pub fn align_letters(
    word: &str,
    phoneme_count: usize,
    groups: Option<&[LetterGroup]>,
    capitalize: bool,
) -> Vec<String> {
    if phoneme_count == 0 {
        return vec![];
    }
    let word = word.trim();

    let mut letters = match groups {
        Some(groups) if covered_phonemes(groups) == Some(phoneme_count) => expand_letter_groups(groups),
        Some(groups) => {
            log::debug!(
                "Letter groups for {:?} cover {:?} phonemes, expected {}; splitting evenly",
                word,
                covered_phonemes(groups),
                phoneme_count
            );
            split_evenly(word, phoneme_count)
        }
        None => split_evenly(word, phoneme_count),
    };

    if capitalize {
        recapitalize(word, &mut letters);
    }
    letters
}

/// Total phonemes spanned by the groups, `None` on overflow.
fn covered_phonemes(groups: &[LetterGroup]) -> Option<usize> {
    groups
        .iter()
        .try_fold(0usize, |total, g| total.checked_add(g.phoneme_count))
}

fn recapitalize(word: &str, letters: &mut [String]) {
    if !word.chars().next().is_some_and(char::is_uppercase) {
        return;
    }
    let Some(first) = letters.iter_mut().find(|l| !l.is_empty()) else {
        return;
    };
    let mut chars = first.chars();
    if let Some(c) = chars.next() {
        if c.is_lowercase() {
            *first = c.to_uppercase().chain(chars).collect();
        }
    }
}
