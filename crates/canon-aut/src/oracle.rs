use std::collections::BTreeMap;

use canon_core::CanonError;
use canon_graph::structural_hash;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bridge::{from_graph, to_graph};
use crate::engine::{CanonEngine, Engine, ToCanonical};
use crate::triad::Triad;

/// One equivalence class of triads under relabeling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Canonical form from the symmetry group enumeration.
    pub symmetry_canonical: Triad,
    /// Engine canonical form of the first member, read back as a triad.
    pub engine_canonical: Triad,
    /// Structural hash of the first member's engine canonical graph.
    pub certificate: String,
    /// Whether the engine and the symmetry group picked the same representative.
    pub representatives_agree: bool,
    /// Members in ascending order whose engine run succeeded.
    pub members: Vec<Triad>,
}

/// A triad whose engine canonical form disagrees with its class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// The offending triad.
    pub triad: Triad,
    /// Its canonical form from the symmetry group.
    pub symmetry_canonical: Triad,
    /// Engine canonical form recorded for the class.
    pub expected: Triad,
    /// Engine canonical form produced for this triad.
    pub found: Triad,
}

/// A triad whose engine round trip failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriadFailure {
    /// The triad being canonicalized.
    pub triad: Triad,
    /// Error raised on the engine path.
    pub error: CanonError,
}

/// An engine canonical form shared by several symmetry classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    /// The shared engine canonical form.
    pub engine_canonical: Triad,
    /// Symmetry canonical forms of the merged classes, ascending.
    pub symmetry_classes: Vec<Triad>,
}

/// Outcome of checking an engine against the symmetry group canonicalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Classes keyed by ascending symmetry canonical form.
    pub classes: Vec<ClassRecord>,
    /// Triads that left their class's engine form.
    pub mismatches: Vec<Mismatch>,
    /// Engine forms that merge distinct classes.
    pub collisions: Vec<Collision>,
    /// Every triad whose engine path errored.
    pub failures: Vec<TriadFailure>,
}

impl ConformanceReport {
    /// Returns whether both canonicalizers induced the same classes on every triad.
    pub fn is_conforming(&self) -> bool {
        self.mismatches.is_empty() && self.collisions.is_empty() && self.failures.is_empty()
    }

    /// Number of classes observed.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

/// Canonicalizes every triad through the symmetry group and through `engine`
/// and reports where the induced classes disagree.
///
/// Triads are evaluated in parallel; classes are formed in ascending triad
/// order, so the first member of a class sets its expected engine form.
/// Classes are then grouped by engine form, and any form reached from two
/// classes is reported as a collision.
pub fn run_conformance<E: CanonEngine>(engine: &Engine<E>) -> ConformanceReport {
    let triads: Vec<Triad> = Triad::all().collect();
    let outcomes: Vec<_> = triads
        .into_par_iter()
        .map(|triad| (triad, triad.canonical_form(), engine_canonical(engine, triad)))
        .collect();

    let mut classes: BTreeMap<Triad, ClassRecord> = BTreeMap::new();
    let mut mismatches = Vec::new();
    let mut failures = Vec::new();
    for (triad, symmetry_canonical, outcome) in outcomes {
        let (found, certificate) = match outcome {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(%triad, %error, "engine canonicalization failed");
                failures.push(TriadFailure { triad, error });
                continue;
            }
        };
        let class = classes
            .entry(symmetry_canonical)
            .or_insert_with(|| ClassRecord {
                symmetry_canonical,
                engine_canonical: found,
                certificate,
                representatives_agree: found == symmetry_canonical,
                members: Vec::new(),
            });
        class.members.push(triad);
        if class.engine_canonical != found {
            tracing::warn!(
                %triad,
                %symmetry_canonical,
                expected = %class.engine_canonical,
                %found,
                "canonical forms disagree"
            );
            mismatches.push(Mismatch {
                triad,
                symmetry_canonical,
                expected: class.engine_canonical,
                found,
            });
        }
    }

    let collisions = merged_classes(classes.values());

    tracing::info!(
        classes = classes.len(),
        mismatches = mismatches.len(),
        collisions = collisions.len(),
        failures = failures.len(),
        "triad conformance finished"
    );
    ConformanceReport {
        classes: classes.into_values().collect(),
        mismatches,
        collisions,
        failures,
    }
}

fn merged_classes<'a>(classes: impl Iterator<Item = &'a ClassRecord>) -> Vec<Collision> {
    let mut by_engine_form: BTreeMap<Triad, Vec<Triad>> = BTreeMap::new();
    for class in classes {
        by_engine_form
            .entry(class.engine_canonical)
            .or_default()
            .push(class.symmetry_canonical);
    }
    by_engine_form
        .into_iter()
        .filter(|(_, symmetry_classes)| symmetry_classes.len() > 1)
        .map(|(engine_canonical, symmetry_classes)| {
            tracing::warn!(
                %engine_canonical,
                classes = symmetry_classes.len(),
                "engine form merges distinct classes"
            );
            Collision {
                engine_canonical,
                symmetry_classes,
            }
        })
        .collect()
}

fn engine_canonical<E: CanonEngine>(
    engine: &Engine<E>,
    triad: Triad,
) -> Result<(Triad, String), CanonError> {
    let canonical = to_graph(triad)?.to_canonical(engine)?;
    Ok((from_graph(&canonical)?, structural_hash(&canonical)))
}
