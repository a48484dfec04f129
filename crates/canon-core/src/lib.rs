#![deny(missing_docs)]
#![doc = "Core error taxonomy and machine word definitions shared by the canon crates."]

pub mod errors;
pub mod word;

pub use errors::{CanonError, ErrorInfo};
pub use word::{verify_word_width, words_for, Word, WordWidth, MSB, WORD_BITS};
