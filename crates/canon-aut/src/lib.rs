#![deny(missing_docs)]
#![doc = "Triad symmetry canonicalization, the canonical labeling engine contract, \
and the conformance check relating the two."]

/// Conversion between triads and three vertex packed graphs.
pub mod bridge;
/// Two-bit edge states between an ordered vertex pair.
pub mod direction;
/// Canonical labeling engine contract and initialized engine handle.
pub mod engine;
/// Exhaustive reference backend for the engine contract.
pub mod exhaustive;
/// Cross-check of engine canonical forms against triad symmetry enumeration.
pub mod oracle;
/// JSON helpers for engine options and conformance reports.
#[path = "serde.rs"]
pub mod serde_io;
/// Finite symmetry groups acting on values by explicit element lists.
pub mod symmetry;
/// Six-bit encoding of the edges among three labeled vertices.
pub mod triad;

pub use bridge::{from_graph, to_graph};
pub use direction::EdgeDirection;
pub use engine::{CanonEngine, Engine, EngineOptions, EngineOutput, EngineStats, ToCanonical};
pub use exhaustive::{ExhaustiveConfig, ExhaustiveEngine};
pub use oracle::{
    run_conformance, ClassRecord, Collision, ConformanceReport, Mismatch, TriadFailure,
};
pub use symmetry::{SymmetryGroup, Transform};
pub use triad::Triad;
