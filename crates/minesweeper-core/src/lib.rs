//! Knowledge-based Minesweeper engine.
//!
//! A [`KnowledgeBase`] turns revealed clues into [`Sentence`]s, resolves
//! every cell it can prove safe or mined, and recommends the next move.
//! [`Minefield`] and [`Autoplayer`] let it play complete games.

mod board;
mod cell;
mod error;
mod knowledge;
mod play;
mod sentence;

pub use board::{Board, Difficulty, Minefield, MinefieldConfig};
pub use cell::Cell;
pub use error::{InferenceError, MinefieldError, Result, Verdict};
pub use knowledge::KnowledgeBase;
pub use play::{Autoplayer, GameOutcome, GameResult, Turn};
pub use sentence::Sentence;
