use std::fmt;

use canon_core::errors::{CanonError, ErrorInfo};
use canon_core::{words_for, Word, MSB, WORD_BITS};

/// Largest vertex count an engine can index with its 32-bit labels.
pub const MAX_ORDER: usize = i32::MAX as usize;

const BITS: usize = WORD_BITS as usize;

/// Dense directed adjacency matrix with rows packed into machine words.
///
/// The vertex count is fixed at construction and edges can only be added.
/// `lab` and `ptn` carry the labeling and partition hints handed to an engine
/// when the default partition is not requested; a zero in `ptn[i]` closes the
/// cell containing `lab[i]`.
#[derive(Debug, Clone)]
pub struct BitPackedDiGraph {
    order: usize,
    words_per_row: usize,
    words: Vec<Word>,
    lab: Vec<usize>,
    ptn: Vec<usize>,
}

impl BitPackedDiGraph {
    /// Creates a graph on `order` vertices with no edges.
    pub fn new(order: usize) -> Result<Self, CanonError> {
        let words_per_row = words_for(order);
        let total = checked_matrix_len(order, words_per_row)?;
        Ok(Self {
            order,
            words_per_row,
            words: vec![0; total],
            lab: (0..order).collect(),
            ptn: single_cell_ptn(order),
        })
    }

    /// Rebuilds a graph from a packed word matrix, as produced by an engine.
    pub fn from_words(order: usize, words: Vec<Word>) -> Result<Self, CanonError> {
        let mut graph = Self::new(order)?;
        if words.len() != graph.words.len() {
            return Err(CanonError::InvalidSize(
                ErrorInfo::new(
                    "word-count-mismatch",
                    format!(
                        "expected {} words for order {order}, found {}",
                        graph.words.len(),
                        words.len()
                    ),
                )
                .with_context("order", order.to_string())
                .with_context("words", words.len().to_string()),
            ));
        }
        let padding = padding_mask(order);
        if padding != 0 {
            for v in 0..order {
                let last = words[v * graph.words_per_row + graph.words_per_row - 1];
                if last & padding != 0 {
                    return Err(CanonError::OutOfRange(
                        ErrorInfo::new("padding-bit-set", "bit set beyond the last column")
                            .with_context("row", v.to_string())
                            .with_context("order", order.to_string()),
                    ));
                }
            }
        }
        graph.words = words;
        Ok(graph)
    }

    /// Returns the number of vertices.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the number of words used by each packed row.
    pub fn words_per_row(&self) -> usize {
        self.words_per_row
    }

    /// Returns the full packed matrix in row-major order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Returns the packed words of row `v`.
    pub fn row(&self, v: usize) -> Result<&[Word], CanonError> {
        self.check_range(v)?;
        let start = v * self.words_per_row;
        Ok(&self.words[start..start + self.words_per_row])
    }

    /// Returns the number of directed edges stored in the matrix.
    pub fn edge_count(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Adds the directed edge `v -> w`.
    pub fn add_edge(&mut self, v: usize, w: usize) -> Result<(), CanonError> {
        let (index, mask) = self.locate(v, w)?;
        self.words[index] |= mask;
        Ok(())
    }

    /// Returns whether the directed edge `v -> w` is present.
    pub fn has_edge(&self, v: usize, w: usize) -> Result<bool, CanonError> {
        let (index, mask) = self.locate(v, w)?;
        Ok(self.words[index] & mask != 0)
    }

    /// Returns the out-neighbours of `v` in ascending order.
    ///
    /// The iterator reads the packed row on every pass; clone it to restart.
    pub fn adjacent_vertices(&self, v: usize) -> Result<AdjacentVertices<'_>, CanonError> {
        Ok(AdjacentVertices::new(self.row(v)?))
    }

    /// Returns the labeling hint.
    pub fn lab(&self) -> &[usize] {
        &self.lab
    }

    /// Returns the partition hint.
    pub fn ptn(&self) -> &[usize] {
        &self.ptn
    }

    /// Replaces the labeling and partition hints.
    pub fn set_partition(&mut self, lab: Vec<usize>, ptn: Vec<usize>) -> Result<(), CanonError> {
        self.check_labeling(&lab)?;
        if ptn.len() != self.order {
            return Err(CanonError::InvalidSize(
                ErrorInfo::new(
                    "partition-length",
                    format!("ptn has {} entries for order {}", ptn.len(), self.order),
                )
                .with_context("order", self.order.to_string()),
            ));
        }
        if ptn.last().is_some_and(|&last| last != 0) {
            return Err(CanonError::OutOfRange(
                ErrorInfo::new("partition-unterminated", "last ptn entry must close its cell")
                    .with_hint("set the final ptn entry to 0"),
            ));
        }
        self.lab = lab;
        self.ptn = ptn;
        Ok(())
    }

    /// Returns the cells described by the `lab`/`ptn` hints, in `lab` order.
    pub fn cells(&self) -> Vec<Vec<usize>> {
        let mut cells = Vec::new();
        let mut current = Vec::new();
        for (&vertex, &marker) in self.lab.iter().zip(&self.ptn) {
            current.push(vertex);
            if marker == 0 {
                cells.push(std::mem::take(&mut current));
            }
        }
        cells
    }

    /// Returns the relabeled graph whose vertex `i` is vertex `lab[i]` of `self`.
    pub fn permuted(&self, lab: &[usize]) -> Result<Self, CanonError> {
        self.check_labeling(lab)?;
        let mut inverse = vec![0; self.order];
        for (position, &vertex) in lab.iter().enumerate() {
            inverse[vertex] = position;
        }
        let mut relabeled = Self::new(self.order)?;
        for (position, &vertex) in lab.iter().enumerate() {
            for target in self.adjacent_vertices(vertex)? {
                relabeled.add_edge(position, inverse[target])?;
            }
        }
        Ok(relabeled)
    }

    fn check_range(&self, v: usize) -> Result<(), CanonError> {
        if v >= self.order {
            return Err(CanonError::vertex_out_of_range(v, self.order));
        }
        Ok(())
    }

    fn locate(&self, v: usize, w: usize) -> Result<(usize, Word), CanonError> {
        self.check_range(v)?;
        self.check_range(w)?;
        Ok((v * self.words_per_row + w / BITS, MSB >> (w % BITS)))
    }

    fn check_labeling(&self, lab: &[usize]) -> Result<(), CanonError> {
        if lab.len() != self.order {
            return Err(CanonError::InvalidSize(
                ErrorInfo::new(
                    "labeling-length",
                    format!("labeling has {} entries for order {}", lab.len(), self.order),
                )
                .with_context("order", self.order.to_string()),
            ));
        }
        let mut seen = vec![false; self.order];
        for &vertex in lab {
            self.check_range(vertex)?;
            if std::mem::replace(&mut seen[vertex], true) {
                return Err(CanonError::OutOfRange(
                    ErrorInfo::new("labeling-repeats-vertex", "labeling is not a permutation")
                        .with_context("vertex", vertex.to_string()),
                ));
            }
        }
        Ok(())
    }
}

/// Graphs compare by vertex count and adjacency; partition hints are ignored.
impl PartialEq for BitPackedDiGraph {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order && self.words == other.words
    }
}

impl Eq for BitPackedDiGraph {}

impl fmt::Display for BitPackedDiGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in 0..self.order {
            write!(f, "{v} -> {{ ")?;
            let start = v * self.words_per_row;
            for w in AdjacentVertices::new(&self.words[start..start + self.words_per_row]) {
                write!(f, "{w} ")?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}

/// Ascending iterator over the set columns of one packed row.
#[derive(Debug, Clone)]
pub struct AdjacentVertices<'a> {
    row: &'a [Word],
    index: usize,
    pending: Word,
}

impl<'a> AdjacentVertices<'a> {
    fn new(row: &'a [Word]) -> Self {
        Self {
            row,
            index: 0,
            pending: row.first().copied().unwrap_or(0),
        }
    }
}

impl Iterator for AdjacentVertices<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.pending == 0 {
            self.index += 1;
            self.pending = *self.row.get(self.index)?;
        }
        let offset = self.pending.leading_zeros() as usize;
        self.pending &= !(MSB >> offset);
        Some(self.index * BITS + offset)
    }
}

fn checked_matrix_len(order: usize, words_per_row: usize) -> Result<usize, CanonError> {
    let too_large = || {
        CanonError::InvalidSize(
            ErrorInfo::new("order-too-large", format!("cannot pack {order} vertices"))
                .with_context("order", order.to_string())
                .with_context("max_order", MAX_ORDER.to_string()),
        )
    };
    if order > MAX_ORDER {
        return Err(too_large());
    }
    order.checked_mul(words_per_row).ok_or_else(too_large)
}

fn single_cell_ptn(order: usize) -> Vec<usize> {
    let mut ptn = vec![1; order];
    if let Some(last) = ptn.last_mut() {
        *last = 0;
    }
    ptn
}

/// Bits of the final row word that lie beyond column `order - 1`.
fn padding_mask(order: usize) -> Word {
    match order % BITS {
        0 => 0,
        used => Word::MAX >> used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_mask_covers_unused_columns() {
        assert_eq!(padding_mask(0), 0);
        assert_eq!(padding_mask(BITS), 0);
        assert_eq!(padding_mask(1), Word::MAX >> 1);
        assert_eq!(padding_mask(3).count_ones() as usize, BITS - 3);
    }

    #[test]
    fn single_cell_closes_last_vertex() {
        assert!(single_cell_ptn(0).is_empty());
        assert_eq!(single_cell_ptn(3), vec![1, 1, 0]);
    }

    #[test]
    fn oversized_order_is_rejected() {
        assert!(matches!(
            checked_matrix_len(MAX_ORDER + 1, 1),
            Err(CanonError::InvalidSize(info)) if info.code == "order-too-large"
        ));
    }
}
