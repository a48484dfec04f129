use canon_core::errors::{CanonError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::dense::BitPackedDiGraph;

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &BitPackedDiGraph) -> Result<Vec<u8>, CanonError> {
    let serializable = SerializableGraph::from_graph(graph)?;
    bincode::serialize(&serializable)
        .map_err(|err| CanonError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<BitPackedDiGraph, CanonError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| CanonError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &BitPackedDiGraph) -> Result<String, CanonError> {
    let serializable = SerializableGraph::from_graph(graph)?;
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| CanonError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string.
pub fn graph_from_json(json: &str) -> Result<BitPackedDiGraph, CanonError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| CanonError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

/// Word-size independent form: adjacency lists rather than packed words.
#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    order: usize,
    adjacency: Vec<Vec<usize>>,
    lab: Vec<usize>,
    ptn: Vec<usize>,
}

impl SerializableGraph {
    fn from_graph(graph: &BitPackedDiGraph) -> Result<Self, CanonError> {
        let mut adjacency = Vec::with_capacity(graph.order());
        for v in 0..graph.order() {
            adjacency.push(graph.adjacent_vertices(v)?.collect());
        }
        Ok(Self {
            order: graph.order(),
            adjacency,
            lab: graph.lab().to_vec(),
            ptn: graph.ptn().to_vec(),
        })
    }

    fn into_graph(self) -> Result<BitPackedDiGraph, CanonError> {
        if self.adjacency.len() != self.order {
            return Err(CanonError::Serde(
                ErrorInfo::new("adjacency-length", "one adjacency list is required per vertex")
                    .with_context("order", self.order.to_string())
                    .with_context("lists", self.adjacency.len().to_string()),
            ));
        }
        let mut graph = BitPackedDiGraph::new(self.order)?;
        for (v, targets) in self.adjacency.into_iter().enumerate() {
            for w in targets {
                graph.add_edge(v, w)?;
            }
        }
        graph.set_partition(self.lab, self.ptn)?;
        Ok(graph)
    }
}
