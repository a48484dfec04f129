use canon_core::errors::{CanonError, ErrorInfo};
use canon_core::{verify_word_width, WordWidth};
use canon_graph::BitPackedDiGraph;
use serde::{Deserialize, Serialize};

/// Options understood by a canonical labeling engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Produce the canonically labeled graph.
    pub compute_canonical_form: bool,
    /// Treat the matrix as directed (required for asymmetric edges or loops).
    pub is_directed: bool,
    /// Emit each automorphism group generator.
    pub emit_automorphisms: bool,
    /// Emit a summary marker after the search.
    pub emit_markers: bool,
    /// Ignore the graph's `lab`/`ptn` hints and start from a single cell.
    pub use_default_partition: bool,
    /// Print automorphisms as image lists instead of cycles.
    pub use_cartesian_automorphism_format: bool,
    /// Wrap emitted lines at this many characters; 0 disables wrapping.
    pub max_output_line_length: usize,
    /// Maximum level for smart target cell selection.
    pub target_cell_level: i32,
    /// Minimum level at which vertex invariants are applied.
    pub min_invariant_level: i32,
    /// Maximum level at which vertex invariants are applied.
    pub max_invariant_level: i32,
    /// Argument passed to the vertex invariant.
    pub invariant_argument: i32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            compute_canonical_form: false,
            is_directed: false,
            emit_automorphisms: false,
            emit_markers: false,
            use_default_partition: true,
            use_cartesian_automorphism_format: false,
            max_output_line_length: 78,
            target_cell_level: 100,
            min_invariant_level: 0,
            max_invariant_level: 1,
            invariant_argument: 0,
        }
    }
}

impl EngineOptions {
    /// Directed canonical form from the default partition.
    pub fn canonical_digraph() -> Self {
        Self {
            compute_canonical_form: true,
            is_directed: true,
            ..Self::default()
        }
    }
}

/// Search statistics reported by an engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Group order is `group_size_mantissa * 10^group_size_exponent`.
    pub group_size_mantissa: f64,
    /// Decimal exponent of the group order.
    pub group_size_exponent: i32,
    /// Number of vertex orbits.
    pub orbit_count: usize,
    /// Number of automorphism generators found.
    pub generator_count: usize,
    /// Non-zero when the run could not complete.
    pub error_status: i32,
    /// Search tree nodes visited.
    pub node_count: u64,
    /// Leaves that neither improved the canonical candidate nor yielded an automorphism.
    pub bad_leaf_count: u64,
    /// Deepest search level reached.
    pub max_search_depth: usize,
    /// Total size of all target cells.
    pub target_cell_total: u64,
    /// Number of times the best canonical candidate changed.
    pub canonical_update_count: u64,
    /// Applications of the vertex invariant.
    pub invariant_application_count: u64,
    /// Applications of the vertex invariant that split a cell.
    pub invariant_success_count: u64,
    /// Least level where the vertex invariant succeeded.
    pub least_successful_invariant_level: i32,
}

impl Default for EngineStats {
    fn default() -> Self {
        Self {
            group_size_mantissa: 1.0,
            group_size_exponent: 0,
            orbit_count: 0,
            generator_count: 0,
            error_status: 0,
            node_count: 0,
            bad_leaf_count: 0,
            max_search_depth: 0,
            target_cell_total: 0,
            canonical_update_count: 0,
            invariant_application_count: 0,
            invariant_success_count: 0,
            least_successful_invariant_level: 0,
        }
    }
}

impl EngineStats {
    /// Returns the automorphism group order.
    pub fn group_size(&self) -> f64 {
        self.group_size_mantissa * 10f64.powi(self.group_size_exponent)
    }
}

/// Result of one engine run.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    /// Orbit identifier per vertex; vertices in one orbit share it.
    pub orbits: Vec<usize>,
    /// Search statistics, including the error status.
    pub stats: EngineStats,
    /// Automorphism generators as vertex image lists.
    pub generators: Vec<Vec<usize>>,
    /// Canonical labeling: canonical vertex `i` is input vertex `labeling[i]`.
    pub canonical_labeling: Option<Vec<usize>>,
    /// Canonically labeled graph when requested.
    pub canonical: Option<BitPackedDiGraph>,
}

/// Canonical labeling backend reading word-packed adjacency matrices.
pub trait CanonEngine: Send + Sync {
    /// Word width the backend expects packed rows to use.
    fn word_bits(&self) -> u32;

    /// Runs one search. Failures are reported through `stats.error_status`.
    fn run(&self, graph: &BitPackedDiGraph, options: &EngineOptions) -> EngineOutput;
}

/// Backend whose word width has been verified against the native word.
#[derive(Debug, Clone)]
pub struct Engine<E> {
    backend: E,
    width: WordWidth,
}

impl<E: CanonEngine> Engine<E> {
    /// Verifies the backend's word width; a mismatch is fatal for the backend.
    pub fn initialize(backend: E) -> Result<Self, CanonError> {
        let width = verify_word_width(backend.word_bits())?;
        Ok(Self { backend, width })
    }

    /// Returns the wrapped backend.
    pub fn backend(&self) -> &E {
        &self.backend
    }

    /// Returns the verified word width.
    pub fn word_width(&self) -> WordWidth {
        self.width
    }

    /// Runs the backend and converts a non-zero error status into an error.
    pub fn run(
        &self,
        graph: &BitPackedDiGraph,
        options: &EngineOptions,
    ) -> Result<EngineOutput, CanonError> {
        let output = self.backend.run(graph, options);
        let status = output.stats.error_status;
        if status != 0 {
            tracing::warn!(order = graph.order(), status, "engine run failed");
            return Err(CanonError::EngineFailure(
                ErrorInfo::new("engine-status", format!("engine returned error status {status}"))
                    .with_context("status", status.to_string())
                    .with_context("order", graph.order().to_string()),
            ));
        }
        if output.orbits.len() != graph.order() {
            return Err(malformed("orbits", graph.order(), output.orbits.len()));
        }
        if let Some(canonical) = &output.canonical {
            if canonical.order() != graph.order() {
                return Err(malformed("canonical", graph.order(), canonical.order()));
            }
        }
        tracing::debug!(
            order = graph.order(),
            orbits = output.stats.orbit_count,
            group_size = output.stats.group_size(),
            "engine run complete"
        );
        Ok(output)
    }

    /// Returns the canonical form of `graph` under [`EngineOptions::canonical_digraph`].
    pub fn canonicalize(&self, graph: &BitPackedDiGraph) -> Result<BitPackedDiGraph, CanonError> {
        self.run(graph, &EngineOptions::canonical_digraph())?
            .canonical
            .ok_or_else(|| {
                CanonError::EngineFailure(ErrorInfo::new(
                    "canonical-missing",
                    "engine did not produce a canonical graph",
                ))
            })
    }
}

fn malformed(part: &str, expected: usize, found: usize) -> CanonError {
    CanonError::EngineFailure(
        ErrorInfo::new(
            "engine-output-shape",
            format!("engine {part} sized {found}, expected {expected}"),
        )
        .with_context("expected", expected.to_string())
        .with_context("found", found.to_string()),
    )
}

/// Conversion of a graph into its canonical form through an engine.
pub trait ToCanonical: Sized {
    /// Returns the canonically labeled copy of `self`.
    fn to_canonical<E: CanonEngine>(&self, engine: &Engine<E>) -> Result<Self, CanonError>;
}

impl ToCanonical for BitPackedDiGraph {
    fn to_canonical<E: CanonEngine>(&self, engine: &Engine<E>) -> Result<Self, CanonError> {
        engine.canonicalize(self)
    }
}
