//! Native machine word used to pack adjacency rows.
//!
//! Rows are packed most-significant-bit first: column `w` of a row lives in
//! word `w / WORD_BITS` at mask `MSB >> (w % WORD_BITS)`. Engines consume this
//! layout directly, so the width they were built for has to match [`WORD_BITS`].

use crate::errors::{CanonError, ErrorInfo};

/// Unsigned machine word holding one packed run of adjacency bits.
pub type Word = usize;

/// Bit width of [`Word`].
pub const WORD_BITS: u32 = Word::BITS;

/// Mask selecting the top bit of a [`Word`], which holds column 0 of the word.
pub const MSB: Word = 1 << (WORD_BITS - 1);

/// Returns how many words hold a row of `n` columns, i.e. `ceil(n / WORD_BITS)`.
pub const fn words_for(n: usize) -> usize {
    n.div_ceil(WORD_BITS as usize)
}

/// Proof that the local word width matched an engine's expected width.
///
/// Obtained once through [`verify_word_width`] before any engine call runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordWidth {
    bits: u32,
}

impl WordWidth {
    /// Returns the verified width in bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }
}

/// Checks that an engine compiled for `engine_bits`-wide words can read the
/// matrices packed by this process.
pub fn verify_word_width(engine_bits: u32) -> Result<WordWidth, CanonError> {
    if engine_bits != WORD_BITS {
        return Err(CanonError::WordWidthMismatch(
            ErrorInfo::new(
                "word-width-mismatch",
                format!("native word width {WORD_BITS} does not match engine word width {engine_bits}"),
            )
            .with_context("native_bits", WORD_BITS.to_string())
            .with_context("engine_bits", engine_bits.to_string())
            .with_hint("rebuild the engine for the native word size"),
        ));
    }
    Ok(WordWidth { bits: engine_bits })
}
