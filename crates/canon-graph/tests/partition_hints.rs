use canon_core::CanonError;
use canon_graph::BitPackedDiGraph;

fn path_graph() -> Result<BitPackedDiGraph, CanonError> {
    let mut graph = BitPackedDiGraph::new(4)?;
    graph.add_edge(0, 1)?;
    graph.add_edge(1, 2)?;
    graph.add_edge(2, 3)?;
    Ok(graph)
}

#[test]
fn default_hints_form_one_cell() -> Result<(), CanonError> {
    let graph = path_graph()?;
    assert_eq!(graph.lab(), &[0, 1, 2, 3]);
    assert_eq!(graph.ptn(), &[1, 1, 1, 0]);
    assert_eq!(graph.cells(), vec![vec![0, 1, 2, 3]]);
    Ok(())
}

#[test]
fn explicit_hints_split_cells() -> Result<(), CanonError> {
    let mut graph = path_graph()?;
    graph.set_partition(vec![3, 0, 2, 1], vec![1, 0, 1, 0])?;
    assert_eq!(graph.cells(), vec![vec![3, 0], vec![2, 1]]);
    Ok(())
}

#[test]
fn malformed_hints_are_rejected() -> Result<(), CanonError> {
    let mut graph = path_graph()?;
    assert!(matches!(
        graph.set_partition(vec![0, 1, 2], vec![1, 1, 0]),
        Err(CanonError::InvalidSize(info)) if info.code == "labeling-length"
    ));
    assert!(matches!(
        graph.set_partition(vec![0, 1, 1, 3], vec![1, 1, 1, 0]),
        Err(CanonError::OutOfRange(info)) if info.code == "labeling-repeats-vertex"
    ));
    assert!(matches!(
        graph.set_partition(vec![0, 1, 2, 4], vec![1, 1, 1, 0]),
        Err(CanonError::OutOfRange(info)) if info.code == "vertex-out-of-range"
    ));
    assert!(matches!(
        graph.set_partition(vec![0, 1, 2, 3], vec![1, 1, 1, 1]),
        Err(CanonError::OutOfRange(info)) if info.code == "partition-unterminated"
    ));
    assert!(matches!(
        graph.set_partition(vec![0, 1, 2, 3], vec![0, 0]),
        Err(CanonError::InvalidSize(info)) if info.code == "partition-length"
    ));
    assert_eq!(graph.cells().len(), 1);
    Ok(())
}

#[test]
fn permuted_relabels_vertices() -> Result<(), CanonError> {
    let graph = path_graph()?;
    let reversed = graph.permuted(&[3, 2, 1, 0])?;
    assert!(reversed.has_edge(1, 0)?);
    assert!(reversed.has_edge(2, 1)?);
    assert!(reversed.has_edge(3, 2)?);
    assert_eq!(reversed.edge_count(), 3);
    assert_eq!(graph.permuted(&[0, 1, 2, 3])?, graph);
    assert!(graph.permuted(&[0, 0, 1, 2]).is_err());
    Ok(())
}

#[test]
fn equality_ignores_partition_hints() -> Result<(), CanonError> {
    let graph = path_graph()?;
    let mut hinted = graph.clone();
    hinted.set_partition(vec![1, 0, 3, 2], vec![0, 1, 1, 0])?;
    assert_eq!(graph, hinted);
    Ok(())
}
