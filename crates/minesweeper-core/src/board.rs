//! The board the engine plays against.
//!
//! The engine itself only needs [`Board`]; [`Minefield`] is a plain in-memory
//! implementation with random or fixed mine layouts.

use crate::error::MinefieldError;
use crate::Cell;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What a player can learn from, and report to, a Minesweeper board.
pub trait Board {
    fn height(&self) -> usize;

    fn width(&self) -> usize;

    /// Total number of mines hidden on the board
    fn mine_count(&self) -> usize;

    fn is_mine(&self, cell: Cell) -> bool;

    /// Mines adjacent to `cell`. Only meaningful for a cell that is not a mine.
    fn neighbor_count(&self, cell: Cell) -> usize;

    /// Report `cell` as a found mine
    fn flag(&mut self, cell: Cell);

    /// True iff the flagged cells are exactly the mines
    fn is_complete(&self) -> bool;
}

/// Standard board presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub fn all_levels() -> &'static [Difficulty] {
        &[
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Expert,
        ]
    }

    pub fn config(&self) -> MinefieldConfig {
        match self {
            Difficulty::Beginner => MinefieldConfig::beginner(),
            Difficulty::Intermediate => MinefieldConfig::intermediate(),
            Difficulty::Expert => MinefieldConfig::expert(),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Expert => write!(f, "Expert"),
        }
    }
}

/// Dimensions and mine count for a generated minefield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinefieldConfig {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
}

impl Default for MinefieldConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            mines: 8,
        }
    }
}

impl MinefieldConfig {
    pub fn beginner() -> Self {
        Self {
            height: 9,
            width: 9,
            mines: 10,
        }
    }

    pub fn intermediate() -> Self {
        Self {
            height: 16,
            width: 16,
            mines: 40,
        }
    }

    pub fn expert() -> Self {
        Self {
            height: 16,
            width: 30,
            mines: 99,
        }
    }

    pub fn cells(&self) -> usize {
        self.height * self.width
    }

    /// Reject empty boards and boards without a single safe cell.
    pub fn validate(&self) -> Result<(), MinefieldError> {
        if self.height == 0 || self.width == 0 {
            return Err(MinefieldError::EmptyBoard {
                height: self.height,
                width: self.width,
            });
        }
        if self.mines >= self.cells() {
            return Err(MinefieldError::TooManyMines {
                mines: self.mines,
                cells: self.cells(),
            });
        }
        Ok(())
    }
}

/// In-memory board with a fixed mine layout
#[derive(Debug, Clone)]
pub struct Minefield {
    height: usize,
    width: usize,
    mines: HashSet<Cell>,
    flagged: HashSet<Cell>,
}

impl Minefield {
    /// Place `config.mines` distinct mines uniformly at random.
    pub fn generate<R: Rng + ?Sized>(
        config: MinefieldConfig,
        rng: &mut R,
    ) -> Result<Self, MinefieldError> {
        config.validate()?;
        let mut cells: Vec<Cell> = Cell::all(config.height, config.width).collect();
        cells.shuffle(rng);
        Ok(Self {
            height: config.height,
            width: config.width,
            mines: cells.into_iter().take(config.mines).collect(),
            flagged: HashSet::new(),
        })
    }

    /// Build a board with mines exactly at `mines`.
    pub fn from_mines(
        height: usize,
        width: usize,
        mines: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, MinefieldError> {
        let mines: HashSet<Cell> = mines.into_iter().collect();
        MinefieldConfig {
            height,
            width,
            mines: mines.len(),
        }
        .validate()?;
        if let Some(&cell) = mines.iter().find(|c| !c.in_bounds(height, width)) {
            return Err(MinefieldError::MineOutOfBounds {
                cell,
                height,
                width,
            });
        }
        Ok(Self {
            height,
            width,
            mines,
            flagged: HashSet::new(),
        })
    }

    pub fn mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    pub fn flagged(&self) -> &HashSet<Cell> {
        &self.flagged
    }
}

impl Board for Minefield {
    fn height(&self) -> usize {
        self.height
    }

    fn width(&self) -> usize {
        self.width
    }

    fn mine_count(&self) -> usize {
        self.mines.len()
    }

    fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    fn neighbor_count(&self, cell: Cell) -> usize {
        cell.neighbors(self.height, self.width)
            .filter(|c| self.mines.contains(c))
            .count()
    }

    fn flag(&mut self, cell: Cell) {
        self.flagged.insert(cell);
    }

    fn is_complete(&self) -> bool {
        self.flagged == self.mines
    }
}

impl std::fmt::Display for Minefield {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = format!("{}-", "--".repeat(self.width));
        for row in 0..self.height {
            writeln!(f, "{}", rule)?;
            for col in 0..self.width {
                if self.mines.contains(&Cell::new(row, col)) {
                    write!(f, "|X")?;
                } else {
                    write!(f, "| ")?;
                }
            }
            writeln!(f, "|")?;
        }
        write!(f, "{}", rule)
    }
}
