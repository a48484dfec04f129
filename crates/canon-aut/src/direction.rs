use std::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Edge state between an ordered vertex pair `(low, high)`, stored in two bits.
///
/// `Forward` is the edge `low -> high`, `Backward` the edge `high -> low`;
/// `Both` is their union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EdgeDirection {
    /// No edge in either direction.
    None = 0,
    /// Edge from the first vertex to the second.
    Forward = 1,
    /// Edge from the second vertex to the first.
    Backward = 2,
    /// Edges in both directions.
    Both = 3,
}

impl EdgeDirection {
    /// Every direction in ascending bit order.
    pub const ALL: [EdgeDirection; 4] = [
        EdgeDirection::None,
        EdgeDirection::Forward,
        EdgeDirection::Backward,
        EdgeDirection::Both,
    ];

    /// Decodes the two low bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => EdgeDirection::None,
            1 => EdgeDirection::Forward,
            2 => EdgeDirection::Backward,
            _ => EdgeDirection::Both,
        }
    }

    /// Returns the two-bit encoding.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Swaps `Forward` and `Backward`; `None` and `Both` are unchanged.
    pub const fn reverse(self) -> Self {
        match self {
            EdgeDirection::Forward => EdgeDirection::Backward,
            EdgeDirection::Backward => EdgeDirection::Forward,
            other => other,
        }
    }

    /// Returns whether every edge in `other` is also present in `self`.
    pub const fn contains(self, other: EdgeDirection) -> bool {
        self.bits() & other.bits() == other.bits()
    }
}

impl BitOr for EdgeDirection {
    type Output = EdgeDirection;

    fn bitor(self, rhs: Self) -> Self::Output {
        EdgeDirection::from_bits(self.bits() | rhs.bits())
    }
}

impl BitOrAssign for EdgeDirection {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl BitAnd for EdgeDirection {
    type Output = EdgeDirection;

    fn bitand(self, rhs: Self) -> Self::Output {
        EdgeDirection::from_bits(self.bits() & rhs.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_and_intersection_are_bitwise() {
        use EdgeDirection::*;
        assert_eq!(Forward | Backward, Both);
        assert_eq!(Both & Backward, Backward);
        assert_eq!(Forward & Backward, None);
        assert!(Both.contains(Forward));
        assert!(!Forward.contains(Backward));
        assert!(Forward.contains(None));
    }

    #[test]
    fn reverse_swaps_only_single_edges() {
        for direction in EdgeDirection::ALL {
            assert_eq!(direction.reverse().reverse(), direction);
        }
        assert_eq!(EdgeDirection::Forward.reverse(), EdgeDirection::Backward);
        assert_eq!(EdgeDirection::Both.reverse(), EdgeDirection::Both);
        assert_eq!(EdgeDirection::None.reverse(), EdgeDirection::None);
    }
}
