//! Logical sentences: "exactly `count` of these cells are mines".

use crate::error::{InferenceError, Result};
use crate::Cell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A set of still-undetermined cells together with the number of mines among them.
///
/// Cells live in a `BTreeSet`, so equality and hashing only depend on the
/// (cell set, count) pair, never on insertion order. The constructor and both
/// reductions keep `count <= cells.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    /// Build a sentence, rejecting one that claims more mines than cells.
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Result<Self> {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        if count > cells.len() {
            return Err(InferenceError::Inconsistent {
                count: count as isize,
                cells: cells.len(),
            });
        }
        Ok(Self { cells, count })
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// The degenerate sentence `{} = 0`, which carries no information
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// All cells are mines when their number matches the count.
    pub fn known_mines(&self) -> Option<&BTreeSet<Cell>> {
        (self.count > 0 && self.cells.len() == self.count).then_some(&self.cells)
    }

    /// All cells are safe when the count is zero.
    pub fn known_safes(&self) -> Option<&BTreeSet<Cell>> {
        (self.count == 0 && !self.cells.is_empty()).then_some(&self.cells)
    }

    /// Drop `cell` and one from the count. Returns whether the sentence changed.
    pub fn reduce_for_known_mine(&mut self, cell: Cell) -> Result<bool> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        if self.count == 0 {
            return Err(InferenceError::Inconsistent {
                count: -1,
                cells: self.cells.len() - 1,
            });
        }
        self.cells.remove(&cell);
        self.count -= 1;
        Ok(true)
    }

    /// Drop `cell`, keeping the count. Returns whether the sentence changed.
    pub fn reduce_for_known_safe(&mut self, cell: Cell) -> Result<bool> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        if self.count == self.cells.len() {
            return Err(InferenceError::Inconsistent {
                count: self.count as isize,
                cells: self.cells.len() - 1,
            });
        }
        self.cells.remove(&cell);
        Ok(true)
    }

    pub fn is_strict_subset_of(&self, other: &Sentence) -> bool {
        self.cells.len() < other.cells.len() && self.cells.is_subset(&other.cells)
    }

    /// Subset rule: if `self` is a strict subset of `other`, the cells only
    /// `other` has hold exactly `other.count - self.count` mines.
    pub fn difference(&self, other: &Sentence) -> Result<Option<Sentence>> {
        if !self.is_strict_subset_of(other) {
            return Ok(None);
        }
        let remaining = other.cells.difference(&self.cells).copied();
        let count = other.count.checked_sub(self.count).ok_or(InferenceError::Inconsistent {
            count: other.count as isize - self.count as isize,
            cells: other.cells.len() - self.cells.len(),
        })?;
        Sentence::new(remaining, count).map(Some)
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell)?;
        }
        write!(f, "}} = {}", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn cells(list: &[(usize, usize)]) -> Vec<Cell> {
        list.iter().copied().map(Cell::from).collect()
    }

    #[test]
    fn test_rejects_overfull_sentence() {
        let err = Sentence::new(cells(&[(0, 0)]), 2).unwrap_err();
        assert_eq!(err, InferenceError::Inconsistent { count: 2, cells: 1 });
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = Sentence::new(cells(&[(0, 0), (0, 1), (1, 1)]), 1).unwrap();
        let b = Sentence::new(cells(&[(1, 1), (0, 0), (0, 1)]), 1).unwrap();
        let c = Sentence::new(cells(&[(1, 1), (0, 0), (0, 1)]), 2).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Sentence> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_known_mines() {
        let full = Sentence::new(cells(&[(0, 0), (0, 1)]), 2).unwrap();
        assert_eq!(full.known_mines().map(|s| s.len()), Some(2));
        assert!(full.known_safes().is_none());

        let partial = Sentence::new(cells(&[(0, 0), (0, 1)]), 1).unwrap();
        assert!(partial.known_mines().is_none());
        assert!(partial.known_safes().is_none());
    }

    #[test]
    fn test_known_safes() {
        let clear = Sentence::new(cells(&[(0, 0), (0, 1)]), 0).unwrap();
        assert_eq!(clear.known_safes().map(|s| s.len()), Some(2));
        assert!(clear.known_mines().is_none());
    }

    #[test]
    fn test_empty_sentence_concludes_nothing() {
        let empty = Sentence::new(Vec::new(), 0).unwrap();
        assert!(empty.is_empty());
        assert!(empty.known_mines().is_none());
        assert!(empty.known_safes().is_none());
    }

    #[test]
    fn test_reduce_for_known_mine() {
        let mut s = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 2).unwrap();
        assert!(s.reduce_for_known_mine(Cell::new(0, 1)).unwrap());
        assert_eq!(s.count(), 1);
        assert_eq!(s.len(), 2);
        assert!(!s.contains(Cell::new(0, 1)));

        // Absent cell is a no-op
        assert!(!s.reduce_for_known_mine(Cell::new(5, 5)).unwrap());
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn test_reduce_for_known_mine_underflow_is_error() {
        let mut s = Sentence::new(cells(&[(0, 0), (0, 1)]), 0).unwrap();
        assert!(s.reduce_for_known_mine(Cell::new(0, 0)).is_err());
        // Unchanged after the rejected reduction
        assert_eq!(s.len(), 2);
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn test_reduce_for_known_safe() {
        let mut s = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 1).unwrap();
        assert!(s.reduce_for_known_safe(Cell::new(0, 0)).unwrap());
        assert_eq!(s.count(), 1);
        assert_eq!(s.len(), 2);
        assert!(!s.reduce_for_known_safe(Cell::new(0, 0)).unwrap());
    }

    #[test]
    fn test_reduce_for_known_safe_overflow_is_error() {
        let mut s = Sentence::new(cells(&[(0, 0), (0, 1)]), 2).unwrap();
        assert!(s.reduce_for_known_safe(Cell::new(0, 0)).is_err());
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_difference_subset_rule() {
        let a = Sentence::new(cells(&[(0, 0), (0, 1)]), 1).unwrap();
        let b = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 2).unwrap();

        let derived = a.difference(&b).unwrap().unwrap();
        assert_eq!(derived, Sentence::new(cells(&[(0, 2)]), 1).unwrap());

        // Not a subset in the other direction
        assert!(b.difference(&a).unwrap().is_none());
        // Equal cell sets are not a strict subset
        assert!(a.difference(&a).unwrap().is_none());
    }

    #[test]
    fn test_difference_with_negative_count_is_error() {
        let a = Sentence::new(cells(&[(0, 0), (0, 1)]), 2).unwrap();
        let b = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 1).unwrap();
        assert!(matches!(
            a.difference(&b),
            Err(InferenceError::Inconsistent { count: -1, cells: 1 })
        ));
    }

    #[test]
    fn test_display() {
        let s = Sentence::new(cells(&[(1, 0), (0, 2)]), 1).unwrap();
        assert_eq!(s.to_string(), "{(0, 2), (1, 0)} = 1");
    }
}
