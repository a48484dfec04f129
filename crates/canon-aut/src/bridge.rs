use canon_core::errors::{CanonError, ErrorInfo};
use canon_graph::BitPackedDiGraph;

use crate::direction::EdgeDirection;
use crate::triad::Triad;

/// Vertex pairs backing slots `a`, `b` and `c`; `Forward` is `pair.0 -> pair.1`.
const SLOT_PAIRS: [(usize, usize); 3] = [(0, 1), (1, 2), (2, 0)];

/// Builds the three vertex graph whose edges are described by `triad`.
pub fn to_graph(triad: Triad) -> Result<BitPackedDiGraph, CanonError> {
    let (a, b, c) = triad.edges();
    let mut graph = BitPackedDiGraph::new(3)?;
    for ((low, high), slot) in SLOT_PAIRS.into_iter().zip([a, b, c]) {
        if slot.contains(EdgeDirection::Forward) {
            graph.add_edge(low, high)?;
        }
        if slot.contains(EdgeDirection::Backward) {
            graph.add_edge(high, low)?;
        }
    }
    Ok(graph)
}

/// Reads the triad back out of a three vertex graph.
///
/// Loops are not representable and are ignored.
pub fn from_graph(graph: &BitPackedDiGraph) -> Result<Triad, CanonError> {
    if graph.order() != 3 {
        return Err(CanonError::UnsupportedSize(
            ErrorInfo::new(
                "triad-order",
                format!("triads need exactly 3 vertices, graph has {}", graph.order()),
            )
            .with_context("order", graph.order().to_string()),
        ));
    }
    let mut slots = [EdgeDirection::None; 3];
    for (slot, (low, high)) in slots.iter_mut().zip(SLOT_PAIRS) {
        if graph.has_edge(low, high)? {
            *slot |= EdgeDirection::Forward;
        }
        if graph.has_edge(high, low)? {
            *slot |= EdgeDirection::Backward;
        }
    }
    let [a, b, c] = slots;
    Ok(Triad::new(a, b, c))
}

impl TryFrom<&BitPackedDiGraph> for Triad {
    type Error = CanonError;

    fn try_from(graph: &BitPackedDiGraph) -> Result<Self, Self::Error> {
        from_graph(graph)
    }
}

impl TryFrom<Triad> for BitPackedDiGraph {
    type Error = CanonError;

    fn try_from(triad: Triad) -> Result<Self, Self::Error> {
        to_graph(triad)
    }
}
