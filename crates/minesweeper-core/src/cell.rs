use serde::{Deserialize, Serialize};

/// A position on the board (row, column), zero-indexed from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether this cell lies on a `height` x `width` board
    pub fn in_bounds(&self, height: usize, width: usize) -> bool {
        self.row < height && self.col < width
    }

    /// The up-to-8 adjacent cells, clipped to the board and excluding `self`.
    pub fn neighbors(self, height: usize, width: usize) -> impl Iterator<Item = Cell> {
        let rows = self.row.saturating_sub(1)..(self.row + 2).min(height);
        rows.flat_map(move |row| {
            let cols = self.col.saturating_sub(1)..(self.col + 2).min(width);
            cols.map(move |col| Cell::new(row, col))
        })
        .filter(move |&cell| cell != self)
    }

    /// Every cell of a `height` x `width` board in row-major order
    pub fn all(height: usize, width: usize) -> impl Iterator<Item = Cell> {
        (0..height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    #[rustfmt::skip]
    fn test_interior_neighbors() {
        let neighbors: BTreeSet<Cell> = Cell::new(2, 2).neighbors(5, 5).collect();
        let expected: BTreeSet<Cell> = [
            (1, 1), (1, 2), (1, 3),
            (2, 1),         (2, 3),
            (3, 1), (3, 2), (3, 3),
        ]
        .into_iter()
        .map(Cell::from)
        .collect();
        assert_eq!(neighbors, expected);
    }

    #[test]
    fn test_corner_neighbors_are_clipped() {
        let neighbors: Vec<Cell> = Cell::new(0, 0).neighbors(3, 3).collect();
        assert_eq!(
            neighbors,
            vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
        );

        let far: Vec<Cell> = Cell::new(2, 2).neighbors(3, 3).collect();
        assert_eq!(far.len(), 3);
        assert!(far.iter().all(|c| c.in_bounds(3, 3)));
    }

    #[test]
    fn test_single_cell_board_has_no_neighbors() {
        assert_eq!(Cell::new(0, 0).neighbors(1, 1).count(), 0);
    }

    #[test]
    fn test_all_cells_row_major() {
        let cells: Vec<Cell> = Cell::all(2, 3).collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[3], Cell::new(1, 0));
        assert_eq!(cells[5], Cell::new(1, 2));
    }

    #[test]
    fn test_bounds_and_display() {
        assert!(Cell::new(2, 4).in_bounds(3, 5));
        assert!(!Cell::new(3, 0).in_bounds(3, 5));
        assert!(!Cell::new(0, 5).in_bounds(3, 5));
        assert_eq!(Cell::new(1, 7).to_string(), "(1, 7)");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Cell::new(3, 4)).unwrap();
        assert_eq!(json, r#"{"row":3,"col":4}"#);
    }
}
