//! Caller-owned memo for word analyses.
//!
//! Entries are keyed by the SHA-256 of the serialized inputs (user word,
//! coach word, engine config), so identical provider payloads are analyzed
//! once per cache. Nothing here is global: each caller decides the cache's
//! lifetime.

use std::collections::HashMap;

use anyhow::Result;
use sha2::{Digest, Sha256};

use crate::config::EngineConfig;
use crate::feedback::analyze::{analyze_word_with_coach, sentence_score, sentence_text};
use crate::types::{RawWord, Sentence, Word};

/// Hex SHA-256 of the inputs to one word analysis.
///
/// Returns a 64-character hex string.
pub fn analysis_key(user: &RawWord, coach: Option<&RawWord>, config: &EngineConfig) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(user)?);
    hasher.update(b"\0");
    hasher.update(serde_json::to_vec(&coach)?);
    hasher.update(b"\0");
    hasher.update(serde_json::to_vec(config)?);
    Ok(format!("{:x}", hasher.finalize()))
}

#[derive(Debug, Default)]
pub struct AnalysisCache {
    entries: HashMap<String, Word>,
    hits: usize,
    misses: usize,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze a word, or return the stored result for identical inputs.
    pub fn analyze_word(&mut self, user: &RawWord, coach: Option<&RawWord>, config: &EngineConfig) -> Result<Word> {
        let key = analysis_key(user, coach, config)?;
        if let Some(word) = self.entries.get(&key) {
            self.hits += 1;
            log::debug!("Cache hit: {:?} ({}...)", user.text, &key[..12]);
            return Ok(word.clone());
        }
        self.misses += 1;
        let word = analyze_word_with_coach(user, coach, config);
        self.entries.insert(key, word.clone());
        Ok(word)
    }

    /// Sentence analysis through the cache, word by word.
    pub fn analyze_sentence(
        &mut self,
        words: &[RawWord],
        coach_words: Option<&[RawWord]>,
        config: &EngineConfig,
    ) -> Result<Sentence> {
        let words = words
            .iter()
            .enumerate()
            .map(|(i, raw)| self.analyze_word(raw, coach_words.and_then(|c| c.get(i)), config))
            .collect::<Result<Vec<_>>>()?;
        Ok(Sentence {
            text: sentence_text(&words),
            score: sentence_score(&words),
            words,
        })
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
