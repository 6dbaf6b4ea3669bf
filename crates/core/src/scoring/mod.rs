pub mod score;
pub mod span;
