#![deny(missing_docs)]

//! Word-packed dense adjacency matrices for directed graphs.
//!
//! Row `v` of an `n` vertex graph occupies words `[v * m, v * m + m)` where
//! `m = ceil(n / WORD_BITS)`, and column `w` is stored most-significant-bit
//! first. Canonicalization engines read this layout without conversion.

mod dense;
mod hash;
mod serialization;

pub use dense::{AdjacentVertices, BitPackedDiGraph, MAX_ORDER};
pub use hash::structural_hash;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};
