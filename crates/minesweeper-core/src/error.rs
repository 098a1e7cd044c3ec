//! Error types for the inference engine and the reference minefield.

use crate::Cell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the knowledge base already knows about a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Safe,
    Mine,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Safe => write!(f, "safe"),
            Verdict::Mine => write!(f, "a mine"),
        }
    }
}

/// Faults raised by [`KnowledgeBase`](crate::KnowledgeBase) and [`Sentence`](crate::Sentence).
///
/// All of them mean the caller fed inconsistent evidence; the engine never
/// recovers from them on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    #[error("contradiction: {cell} is already known to be {known}")]
    Contradiction { cell: Cell, known: Verdict },

    #[error("{cell} is outside the {height}x{width} board")]
    OutOfBounds {
        cell: Cell,
        height: usize,
        width: usize,
    },

    #[error("clue {count} at {cell} exceeds its {max} neighbors")]
    CountOutOfRange { cell: Cell, count: usize, max: usize },

    #[error("inconsistent sentence: {count} mines cannot fit in {cells} cells")]
    Inconsistent { count: isize, cells: usize },

    #[error("conflicting sentences: the same {cells} cells hold both {first} and {second} mines")]
    ConflictingCounts {
        cells: usize,
        first: usize,
        second: usize,
    },
}

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Faults raised while building a [`Minefield`](crate::Minefield).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinefieldError {
    #[error("board dimensions must be non-zero, got {height}x{width}")]
    EmptyBoard { height: usize, width: usize },

    #[error("{mines} mines leave no safe cell on a board of {cells} cells")]
    TooManyMines { mines: usize, cells: usize },

    #[error("mine at {cell} is outside the {height}x{width} board")]
    MineOutOfBounds {
        cell: Cell,
        height: usize,
        width: usize,
    },
}
