pub mod analyze;
pub mod assembler;
pub mod payload;

pub use analyze::{analyze_sentence, analyze_word, analyze_word_with_coach};
pub use payload::{parse_words, words_from_value};
