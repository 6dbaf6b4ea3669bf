pub mod align;
pub mod canonicalize;
pub mod inventory;
pub mod syllabify;
