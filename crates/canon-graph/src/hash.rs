use sha2::{Digest, Sha256};

use crate::dense::BitPackedDiGraph;

/// Computes a SHA-256 fingerprint of the vertex count and packed adjacency words.
///
/// Two graphs share a fingerprint exactly when their matrices are identical, so
/// applying it to canonical forms yields an isomorphism certificate.
pub fn structural_hash(graph: &BitPackedDiGraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update((graph.order() as u64).to_le_bytes());
    hasher.update((graph.words_per_row() as u64).to_le_bytes());
    for word in graph.words() {
        hasher.update((*word as u64).to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}
