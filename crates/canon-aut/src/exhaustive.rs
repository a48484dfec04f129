use std::collections::{BTreeSet, VecDeque};

use canon_core::{CanonError, WORD_BITS};
use canon_graph::BitPackedDiGraph;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::engine::{CanonEngine, EngineOptions, EngineOutput, EngineStats};

/// Error statuses reported by [`ExhaustiveEngine`].
pub mod status {
    /// Relabeling failed on a graph the engine accepted.
    pub const INTERNAL: i32 = 1;
    /// The graph has more vertices than the configured limit.
    pub const ORDER_TOO_LARGE: i32 = 2;
    /// An undirected run was given asymmetric edges or loops.
    pub const NOT_UNDIRECTED: i32 = 3;
}

/// Limits applied by [`ExhaustiveEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhaustiveConfig {
    /// Largest vertex count searched; every labeling of the cells is visited.
    pub max_order: usize,
}

impl Default for ExhaustiveConfig {
    fn default() -> Self {
        Self { max_order: 8 }
    }
}

/// Reference backend that visits every labeling compatible with the partition.
///
/// The canonical graph is the relabeling with the lexicographically smallest
/// packed words, and the automorphisms are the relabelings that reproduce the
/// input. No refinement or invariants are used, so the invariant counters stay 0.
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveEngine {
    config: ExhaustiveConfig,
}

impl ExhaustiveEngine {
    /// Creates an engine with the provided limits.
    pub fn new(config: ExhaustiveConfig) -> Self {
        Self { config }
    }

    /// Returns the configured limits.
    pub fn config(&self) -> &ExhaustiveConfig {
        &self.config
    }
}

impl CanonEngine for ExhaustiveEngine {
    fn word_bits(&self) -> u32 {
        WORD_BITS
    }

    fn run(&self, graph: &BitPackedDiGraph, options: &EngineOptions) -> EngineOutput {
        let order = graph.order();
        let status = if order > self.config.max_order {
            status::ORDER_TOO_LARGE
        } else if !options.is_directed && !is_undirected(graph) {
            status::NOT_UNDIRECTED
        } else {
            match search(graph, options) {
                Ok(output) => return output,
                Err(err) => {
                    tracing::warn!(error = %err, "exhaustive search failed");
                    status::INTERNAL
                }
            }
        };
        failed(order, status)
    }
}

fn search(graph: &BitPackedDiGraph, options: &EngineOptions) -> Result<EngineOutput, CanonError> {
    let order = graph.order();
    if order == 0 {
        return Ok(EngineOutput {
            orbits: Vec::new(),
            stats: EngineStats::default(),
            generators: Vec::new(),
            canonical_labeling: options.compute_canonical_form.then(Vec::new),
            canonical: options.compute_canonical_form.then(|| graph.clone()),
        });
    }
    let cells = if options.use_default_partition {
        vec![(0..order).collect::<Vec<_>>()]
    } else {
        graph.cells()
    };
    let base_lab = cells.concat();
    let base = graph.permuted(&base_lab)?;

    let mut stats = EngineStats {
        max_search_depth: order,
        target_cell_total: cells
            .iter()
            .filter(|cell| cell.len() > 1)
            .map(|cell| cell.len() as u64)
            .sum(),
        ..EngineStats::default()
    };
    let mut best: Option<(BitPackedDiGraph, Vec<usize>)> = None;
    let mut automorphisms = Vec::new();

    for lab in labelings(&cells) {
        stats.node_count += 1;
        let candidate = graph.permuted(&lab)?;
        let mut useful = false;
        if candidate == base {
            let mut image = vec![0; order];
            for (&from, &to) in base_lab.iter().zip(&lab) {
                image[from] = to;
            }
            automorphisms.push(image);
            useful = true;
        }
        let improves = match &best {
            None => true,
            Some((current, _)) => candidate.words() < current.words(),
        };
        if improves {
            if best.is_some() {
                stats.canonical_update_count += 1;
                useful = true;
            }
            best = Some((candidate, lab));
        }
        if !useful {
            stats.bad_leaf_count += 1;
        }
    }

    let generators = generating_set(order, &automorphisms);
    let orbits = orbits_of(order, &automorphisms);
    stats.orbit_count = orbits.iter().collect::<BTreeSet<_>>().len();
    stats.generator_count = generators.len();
    let (mantissa, exponent) = decimal_size(automorphisms.len());
    stats.group_size_mantissa = mantissa;
    stats.group_size_exponent = exponent;

    if options.emit_automorphisms {
        for generator in &generators {
            let text = if options.use_cartesian_automorphism_format {
                cartesian_notation(generator)
            } else {
                cycle_notation(generator)
            };
            for line in wrap(&text, options.max_output_line_length) {
                tracing::info!(target: "canon_aut::automorphisms", "{line}");
            }
        }
    }
    if options.emit_markers {
        tracing::info!(
            target: "canon_aut::markers",
            orbits = stats.orbit_count,
            generators = stats.generator_count,
            group_size = stats.group_size(),
            nodes = stats.node_count,
            "search finished"
        );
    }

    let (canonical, canonical_labeling) = match (options.compute_canonical_form, best) {
        (true, Some((best_graph, lab))) => (Some(best_graph), Some(lab)),
        _ => (None, None),
    };
    Ok(EngineOutput {
        orbits,
        stats,
        generators,
        canonical_labeling,
        canonical,
    })
}

/// Every vertex sequence that permutes each cell within its own positions.
fn labelings(cells: &[Vec<usize>]) -> impl Iterator<Item = Vec<usize>> + '_ {
    cells
        .iter()
        .map(|cell| cell.iter().copied().permutations(cell.len()))
        .multi_cartesian_product()
        .map(|parts| parts.concat())
}

fn is_undirected(graph: &BitPackedDiGraph) -> bool {
    (0..graph.order()).all(|v| {
        (0..graph.order()).all(|w| match (graph.has_edge(v, w), graph.has_edge(w, v)) {
            (Ok(forward), Ok(backward)) => forward == backward && !(v == w && forward),
            _ => false,
        })
    })
}

fn failed(order: usize, error_status: i32) -> EngineOutput {
    EngineOutput {
        orbits: (0..order).collect(),
        stats: EngineStats {
            error_status,
            orbit_count: order,
            ..EngineStats::default()
        },
        generators: Vec::new(),
        canonical_labeling: None,
        canonical: None,
    }
}

/// Orbit id per vertex: the smallest vertex sharing its orbit.
fn orbits_of(order: usize, automorphisms: &[Vec<usize>]) -> Vec<usize> {
    let mut parent: Vec<usize> = (0..order).collect();
    for image in automorphisms {
        for (vertex, &mapped) in image.iter().enumerate() {
            union(&mut parent, vertex, mapped);
        }
    }
    (0..order).map(|vertex| find(&mut parent, vertex)).collect()
}

fn find(parent: &mut [usize], idx: usize) -> usize {
    if parent[idx] != idx {
        let root = find(parent, parent[idx]);
        parent[idx] = root;
    }
    parent[idx]
}

fn union(parent: &mut [usize], a: usize, b: usize) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    // Keep the smaller vertex as root so it doubles as the orbit id.
    match ra.cmp(&rb) {
        std::cmp::Ordering::Less => parent[rb] = ra,
        std::cmp::Ordering::Greater => parent[ra] = rb,
        std::cmp::Ordering::Equal => {}
    }
}

/// Greedily keeps each automorphism not already generated by earlier picks.
fn generating_set(order: usize, automorphisms: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut generated: BTreeSet<Vec<usize>> = BTreeSet::from([(0..order).collect()]);
    let mut generators = Vec::new();
    for image in automorphisms {
        if generated.contains(image) {
            continue;
        }
        generators.push(image.clone());
        generated = closure(order, &generators);
    }
    generators
}

fn closure(order: usize, generators: &[Vec<usize>]) -> BTreeSet<Vec<usize>> {
    let identity: Vec<usize> = (0..order).collect();
    let mut seen = BTreeSet::from([identity.clone()]);
    let mut queue = VecDeque::from([identity]);
    while let Some(element) = queue.pop_front() {
        for generator in generators {
            let product: Vec<usize> = element.iter().map(|&v| generator[v]).collect();
            if seen.insert(product.clone()) {
                queue.push_back(product);
            }
        }
    }
    seen
}

fn decimal_size(count: usize) -> (f64, i32) {
    let mut mantissa = count as f64;
    let mut exponent = 0;
    while mantissa >= 1e10 {
        mantissa /= 10.0;
        exponent += 1;
    }
    (mantissa, exponent)
}

fn cycle_notation(image: &[usize]) -> String {
    let mut visited = vec![false; image.len()];
    let mut text = String::new();
    for start in 0..image.len() {
        if visited[start] || image[start] == start {
            continue;
        }
        let mut cycle = Vec::new();
        let mut vertex = start;
        while !visited[vertex] {
            visited[vertex] = true;
            cycle.push(vertex.to_string());
            vertex = image[vertex];
        }
        text.push('(');
        text.push_str(&cycle.join(" "));
        text.push(')');
    }
    text
}

fn cartesian_notation(image: &[usize]) -> String {
    image.iter().join(" ")
}

/// Splits `text` at spaces so no line exceeds `width`, unless a single token does.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.len() <= width {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for token in text.split(' ') {
        if !current.is_empty() && current.len() + 1 + token.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(token);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
