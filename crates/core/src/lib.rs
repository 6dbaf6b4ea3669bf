//! Phoneme normalization, scoring and chunking for pronunciation feedback.
//!
//! Turns a scoring provider's per-phoneme output into learner-facing
//! chunks: canonical symbols, 0–100 scores, timed spans and the letters
//! that spell each chunk.

pub mod audio;
pub mod cache;
pub mod config;
pub mod error;
pub mod feedback;
pub mod language;
pub mod scoring;
pub mod types;

pub use cache::AnalysisCache;
pub use config::{EngineConfig, SpanPadding};
pub use error::PayloadError;
pub use language::inventory::Phone;
pub use types::{CanonicalPhoneme, Chunk, LetterGroup, RawPhoneme, RawSpan, RawWord, Sentence, Span, Word};
