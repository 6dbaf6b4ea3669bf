//! Vowel-nucleus chunking: canonical phones → contiguous index ranges.
//!
//! Each vowel anchors one chunk. Consonants between two vowels are split
//! so that the last consonant of the run becomes the onset of the next
//! chunk and any earlier ones stay as coda of the previous chunk:
//!
//! - `B EH | T ER` ("better"): a single consonant starts the next chunk.
//! - `AE K | T ER`: in a cluster only the final consonant moves on.
//!
//! Clusters like `S T R` are not kept together as a single onset.

use std::ops::Range;

use super::inventory::Phone;

/// Partition `0..phones.len()` into chunk ranges.
///
/// Ranges are ordered, contiguous and cover every index exactly once.
/// An empty input yields no ranges; a consonant-only input yields one.
pub fn chunk_phonemes(phones: &[Phone]) -> Vec<Range<usize>> {
    let n = phones.len();
    if n == 0 {
        return vec![];
    }

    let nuclei: Vec<usize> = phones
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_vowel())
        .map(|(i, _)| i)
        .collect();

    if nuclei.is_empty() {
        return vec![0..n];
    }

    find_boundaries(&nuclei, n)
}

fn find_boundaries(nuclei: &[usize], n: usize) -> Vec<Range<usize>> {
    let mut ranges = Vec::with_capacity(nuclei.len());
    let mut start = 0;

    for pair in nuclei.windows(2) {
        let end = split_cluster(pair[0], pair[1]);
        ranges.push(start..end);
        start = end;
    }

    // The last chunk always absorbs trailing consonants.
    ranges.push(start..n);
    ranges
}

/// Index where the chunk after `nucleus` begins, given the next nucleus.
fn split_cluster(nucleus: usize, next_nucleus: usize) -> usize {
    let run = next_nucleus - nucleus - 1;
    if run == 0 {
        next_nucleus
    } else {
        next_nucleus - 1
    }
}

/// Chunk ranges as inclusive `(first, last)` index pairs.
pub fn chunk_bounds(phones: &[Phone]) -> Vec<(usize, usize)> {
    chunk_phonemes(phones)
        .into_iter()
        .map(|r| (r.start, r.end - 1))
        .collect()
}
