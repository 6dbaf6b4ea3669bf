//! Cut one playback clip per chunk out of a learner recording.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::audio::io::{extract_range, write_wav};
use crate::config::SpanPadding;
use crate::types::{Span, Word};

/// A chunk clip written to disk.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChunkClip {
    pub word_index: usize,
    pub chunk_index: usize,
    pub letters: String,
    /// Padded span actually written, in seconds.
    pub span: Span,
    pub path: PathBuf,
}

/// Write a WAV per chunk with a resolvable user span.
///
/// Spans are padded and clamped to the recording, so every clip lies
/// within it. Chunks without timing, or whose span falls outside the
/// recording, are skipped.
pub fn write_chunk_clips(
    words: &[Word],
    samples: &[f64],
    sample_rate: u32,
    padding: &SpanPadding,
    output_dir: &Path,
) -> Result<Vec<ChunkClip>> {
    let clip_duration = samples.len() as f64 / sample_rate as f64;
    let mut clips = Vec::new();

    for (word_index, word) in words.iter().enumerate() {
        for chunk in &word.chunks {
            let Some(span) = chunk.playback_span(padding, Some(clip_duration)) else {
                log::debug!(
                    "No timing for chunk {} of {:?}; skipping",
                    chunk.chunk_index,
                    word.text
                );
                continue;
            };
            let chunk_samples = extract_range(samples, sample_rate, span.start, span.end);
            if chunk_samples.is_empty() {
                log::warn!(
                    "Chunk {} of {:?} lies outside the recording ({:.3}s); skipping",
                    chunk.chunk_index,
                    word.text,
                    clip_duration
                );
                continue;
            }

            let filename = format!(
                "{:03}_{:02}_{}.wav",
                word_index + 1,
                chunk.chunk_index + 1,
                file_stem(&chunk.letters)
            );
            let path = output_dir.join(filename);
            write_wav(&path, &chunk_samples, sample_rate)?;

            clips.push(ChunkClip {
                word_index,
                chunk_index: chunk.chunk_index,
                letters: chunk.letters.clone(),
                span,
                path,
            });
        }
    }
    Ok(clips)
}

/// Letters reduced to something safe in a file name.
fn file_stem(letters: &str) -> String {
    let stem: String = letters
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    if stem.is_empty() {
        "chunk".to_string()
    } else {
        stem
    }
}
