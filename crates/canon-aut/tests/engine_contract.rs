use canon_aut::exhaustive::status;
use canon_aut::serde_io::{options_from_json, options_to_json};
use canon_aut::{
    CanonEngine, Engine, EngineOptions, EngineOutput, ExhaustiveConfig, ExhaustiveEngine,
    ToCanonical,
};
use canon_core::{CanonError, WORD_BITS};
use canon_graph::BitPackedDiGraph;
use proptest::prelude::*;

struct ForeignWidthEngine;

impl CanonEngine for ForeignWidthEngine {
    fn word_bits(&self) -> u32 {
        if WORD_BITS == 64 {
            32
        } else {
            64
        }
    }

    fn run(&self, _graph: &BitPackedDiGraph, _options: &EngineOptions) -> EngineOutput {
        unreachable!("an engine with a foreign word width is never initialized")
    }
}

fn engine() -> Result<Engine<ExhaustiveEngine>, CanonError> {
    Engine::initialize(ExhaustiveEngine::default())
}

fn graph_from_edges(order: usize, edges: &[(usize, usize)]) -> Result<BitPackedDiGraph, CanonError> {
    let mut graph = BitPackedDiGraph::new(order)?;
    for &(v, w) in edges {
        graph.add_edge(v, w)?;
    }
    Ok(graph)
}

fn directed() -> EngineOptions {
    EngineOptions {
        is_directed: true,
        ..EngineOptions::default()
    }
}

#[test]
fn foreign_word_width_is_rejected_at_initialization() {
    assert!(matches!(
        Engine::initialize(ForeignWidthEngine),
        Err(CanonError::WordWidthMismatch(_))
    ));
}

#[test]
fn directed_cycle_has_rotational_symmetry() -> Result<(), CanonError> {
    let engine = engine()?;
    assert_eq!(engine.word_width().bits(), WORD_BITS);
    let cycle = graph_from_edges(3, &[(0, 1), (1, 2), (2, 0)])?;
    let output = engine.run(&cycle, &directed())?;
    assert_eq!(output.stats.group_size(), 3.0);
    assert_eq!(output.orbits, vec![0, 0, 0]);
    assert_eq!(output.stats.orbit_count, 1);
    assert_eq!(output.stats.generator_count, 1);
    assert_eq!(output.stats.node_count, 6);
    assert_eq!(output.stats.max_search_depth, 3);
    assert!(output.canonical.is_none());
    Ok(())
}

#[test]
fn directed_path_is_rigid() -> Result<(), CanonError> {
    let path = graph_from_edges(3, &[(0, 1), (1, 2)])?;
    let output = engine()?.run(&path, &directed())?;
    assert_eq!(output.stats.group_size(), 1.0);
    assert_eq!(output.orbits, vec![0, 1, 2]);
    assert!(output.generators.is_empty());
    Ok(())
}

#[test]
fn explicit_partition_restricts_automorphisms() -> Result<(), CanonError> {
    let engine = engine()?;
    let mut graph = BitPackedDiGraph::new(4)?;
    let default_run = engine.run(&graph, &directed())?;
    assert_eq!(default_run.stats.group_size(), 24.0);
    assert_eq!(default_run.orbits, vec![0, 0, 0, 0]);

    graph.set_partition(vec![0, 1, 2, 3], vec![1, 0, 1, 0])?;
    let options = EngineOptions {
        use_default_partition: false,
        ..directed()
    };
    let split_run = engine.run(&graph, &options)?;
    assert_eq!(split_run.stats.group_size(), 4.0);
    assert_eq!(split_run.orbits, vec![0, 0, 2, 2]);
    assert_eq!(split_run.stats.node_count, 4);
    assert_eq!(split_run.stats.target_cell_total, 4);
    Ok(())
}

#[test]
fn undirected_runs_reject_asymmetric_matrices() -> Result<(), CanonError> {
    let engine = engine()?;
    let symmetric = graph_from_edges(3, &[(0, 1), (1, 0)])?;
    let output = engine.run(&symmetric, &EngineOptions::default())?;
    assert_eq!(output.orbits, vec![0, 0, 2]);

    let arc = graph_from_edges(3, &[(0, 1)])?;
    let err = engine.run(&arc, &EngineOptions::default()).unwrap_err();
    assert!(matches!(err, CanonError::EngineFailure(ref info) if info.code == "engine-status"));
    assert_eq!(err.info().context.get("status"), Some(&status::NOT_UNDIRECTED.to_string()));

    let looped = graph_from_edges(2, &[(1, 1)])?;
    assert!(engine.run(&looped, &EngineOptions::default()).is_err());
    Ok(())
}

#[test]
fn oversized_graphs_fail_without_retry() -> Result<(), CanonError> {
    let engine = Engine::initialize(ExhaustiveEngine::new(ExhaustiveConfig { max_order: 2 }))?;
    let graph = BitPackedDiGraph::new(3)?;
    let err = engine.canonicalize(&graph).unwrap_err();
    assert_eq!(
        err.info().context.get("status"),
        Some(&status::ORDER_TOO_LARGE.to_string())
    );
    Ok(())
}

#[test]
fn canonical_labeling_reproduces_canonical_graph() -> Result<(), CanonError> {
    let engine = engine()?;
    let graph = graph_from_edges(5, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 3), (0, 3)])?;
    let output = engine.run(&graph, &EngineOptions::canonical_digraph())?;
    let labeling = output.canonical_labeling.expect("labeling requested");
    let canonical = output.canonical.expect("canonical graph requested");
    assert_eq!(graph.permuted(&labeling)?, canonical);
    assert_eq!(canonical.edge_count(), graph.edge_count());
    assert_eq!(graph.to_canonical(&engine)?, canonical);
    Ok(())
}

#[test]
fn empty_graph_canonicalizes_to_itself() -> Result<(), CanonError> {
    let graph = BitPackedDiGraph::new(0)?;
    let output = engine()?.run(&graph, &EngineOptions::canonical_digraph())?;
    assert!(output.orbits.is_empty());
    assert_eq!(output.canonical, Some(graph));
    Ok(())
}

#[test]
fn emitting_automorphisms_does_not_change_results() -> Result<(), CanonError> {
    let engine = engine()?;
    let graph = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)])?;
    let quiet = engine.run(&graph, &EngineOptions::canonical_digraph())?;
    let verbose = EngineOptions {
        emit_automorphisms: true,
        emit_markers: true,
        use_cartesian_automorphism_format: true,
        max_output_line_length: 4,
        ..EngineOptions::canonical_digraph()
    };
    assert_eq!(engine.run(&graph, &verbose)?, quiet);
    Ok(())
}

#[test]
fn options_json_fills_defaults() -> Result<(), CanonError> {
    let options = options_from_json(r#"{ "compute_canonical_form": true, "is_directed": true }"#)?;
    assert_eq!(options, EngineOptions::canonical_digraph());
    assert_eq!(options_from_json(&options_to_json(&options)?)?, options);
    assert!(matches!(options_from_json("{"), Err(CanonError::Serde(_))));
    Ok(())
}

fn edges_and_relabeling() -> impl Strategy<Value = (Vec<(usize, usize)>, Vec<usize>)> {
    (
        proptest::collection::vec((0usize..6, 0usize..6), 0..14),
        Just((0..6).collect::<Vec<usize>>()).prop_shuffle(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn isomorphic_graphs_share_canonical_form((edges, relabeling) in edges_and_relabeling()) {
        let engine = engine().unwrap();
        let graph = graph_from_edges(6, &edges).unwrap();
        let relabeled = graph.permuted(&relabeling).unwrap();
        let left = engine.canonicalize(&graph).unwrap();
        let right = engine.canonicalize(&relabeled).unwrap();
        prop_assert_eq!(left, right);
    }
}
