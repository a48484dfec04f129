use std::collections::BTreeSet;

use crate::triad::Triad;

/// A single group element acting on values of type `T`.
pub type Transform<T> = fn(T) -> T;

/// Finite symmetry group given by the explicit list of its elements.
///
/// The list must contain the identity and be closed under composition;
/// [`SymmetryGroup::is_closed_on`] checks the latter over a finite domain.
#[derive(Debug, Clone)]
pub struct SymmetryGroup<T> {
    elements: Vec<Transform<T>>,
}

impl<T: Copy + Ord> SymmetryGroup<T> {
    /// Wraps an enumerated element list.
    pub fn new(elements: Vec<Transform<T>>) -> Self {
        Self { elements }
    }

    /// Number of group elements.
    pub fn order(&self) -> usize {
        self.elements.len()
    }

    /// Returns the element list.
    pub fn elements(&self) -> &[Transform<T>] {
        &self.elements
    }

    /// Applies every element to `value`, in element order.
    pub fn images(&self, value: T) -> impl Iterator<Item = T> + '_ {
        self.elements.iter().map(move |element| element(value))
    }

    /// Distinct values reachable from `value`.
    pub fn orbit(&self, value: T) -> BTreeSet<T> {
        self.images(value).collect()
    }

    /// Minimum over the orbit of `value`.
    pub fn canonical(&self, value: T) -> T {
        self.images(value).fold(value, T::min)
    }

    /// Returns whether every composition of two elements acts on `domain`
    /// like some listed element.
    pub fn is_closed_on(&self, domain: &[T]) -> bool {
        let tables: BTreeSet<Vec<T>> = self
            .elements
            .iter()
            .map(|element| action_table(domain, element))
            .collect();
        self.elements.iter().all(|outer| {
            self.elements
                .iter()
                .all(|inner| tables.contains(&action_table(domain, |v| outer(inner(v)))))
        })
    }
}

fn action_table<T: Copy>(domain: &[T], transform: impl Fn(T) -> T) -> Vec<T> {
    domain.iter().map(|&value| transform(value)).collect()
}

impl SymmetryGroup<Triad> {
    /// Relabelings of three cyclically arranged vertices: three rotations,
    /// each optionally preceded by the orientation reversal.
    pub fn dihedral() -> Self {
        let elements: [Transform<Triad>; 6] = [
            |t| t,
            |t| t.rotate(),
            |t| t.rotate().rotate(),
            |t| t.reverse(),
            |t| t.reverse().rotate(),
            |t| t.reverse().rotate().rotate(),
        ];
        Self::new(elements.to_vec())
    }
}
