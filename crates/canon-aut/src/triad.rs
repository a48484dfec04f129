use std::fmt;

use canon_core::errors::{CanonError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::direction::EdgeDirection;

/// Directed edge state among three labeled vertices arranged in a cycle.
///
/// The value packs three [`EdgeDirection`] slots, most significant first:
/// slot `a` holds the pair `(0, 1)`, slot `b` the pair `(1, 2)` and slot `c`
/// the pair `(2, 0)`. The packed value is also the ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Triad(u8);

impl Triad {
    /// Number of distinct triads.
    pub const COUNT: u8 = 64;

    /// The triad without any edge.
    pub const EMPTY: Triad = Triad(0);

    /// Packs three slots into a triad.
    pub const fn new(a: EdgeDirection, b: EdgeDirection, c: EdgeDirection) -> Self {
        Triad(a.bits() << 4 | b.bits() << 2 | c.bits())
    }

    /// Iterates over all triads in ascending order.
    pub fn all() -> impl Iterator<Item = Triad> + Clone {
        (0..Self::COUNT).map(Triad)
    }

    /// Returns the packed six-bit value used as the ordering key.
    pub const fn ordering_key(self) -> u8 {
        self.0
    }

    /// Unpacks the `(a, b, c)` slots.
    pub const fn edges(self) -> (EdgeDirection, EdgeDirection, EdgeDirection) {
        (
            EdgeDirection::from_bits(self.0 >> 4),
            EdgeDirection::from_bits(self.0 >> 2),
            EdgeDirection::from_bits(self.0),
        )
    }

    /// Relabels vertices `0 -> 1 -> 2 -> 0`, moving slots `(a, b, c)` to `(c, a, b)`.
    pub const fn rotate(self) -> Self {
        let (a, b, c) = self.edges();
        Triad::new(c, a, b)
    }

    /// Reverses the cyclic orientation: `(a, b, c)` becomes
    /// `(a', c', b')` where `'` flips the edge direction.
    ///
    /// Equivalent to swapping vertices 0 and 1.
    pub const fn reverse(self) -> Self {
        let (a, b, c) = self.edges();
        Triad::new(a.reverse(), c.reverse(), b.reverse())
    }

    /// Smallest triad reachable by rotation alone.
    pub fn rotation_minimum(self) -> Self {
        let once = self.rotate();
        self.min(once).min(once.rotate())
    }

    /// Smallest triad in the orbit under all six relabelings of the three vertices.
    ///
    /// Two triads describe the same unlabeled digraph exactly when their
    /// canonical forms are equal.
    pub fn canonical_form(self) -> Self {
        self.rotation_minimum().min(self.reverse().rotation_minimum())
    }
}

impl TryFrom<u8> for Triad {
    type Error = CanonError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value >= Self::COUNT {
            return Err(CanonError::OutOfRange(
                ErrorInfo::new("triad-out-of-range", format!("triad value {value} exceeds six bits"))
                    .with_context("value", value.to_string()),
            ));
        }
        Ok(Triad(value))
    }
}

impl From<Triad> for u8 {
    fn from(triad: Triad) -> Self {
        triad.0
    }
}

impl fmt::Display for Triad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b, c) = self.edges();
        write!(f, "[{} {} {}]", a.bits(), b.bits(), c.bits())
    }
}
