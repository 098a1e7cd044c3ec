//! Non-interactive driver that lets a [`KnowledgeBase`] play a [`Board`].

use crate::error::Result;
use crate::{Board, Cell, KnowledgeBase};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
    /// No unplayed, non-mine cell is left but the board is not complete
    Stuck,
}

/// Summary of one finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub result: GameResult,
    /// Cells revealed, including a losing move
    pub moves: usize,
    /// Moves taken without a known-safe cell available
    pub guesses: usize,
    pub mines_flagged: usize,
    /// The mine that ended the game, if any
    pub detonated: Option<Cell>,
}

/// A single move taken by [`Autoplayer::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Revealed { cell: Cell, count: usize, guessed: bool },
    Finished(GameResult),
}

pub struct Autoplayer<B: Board> {
    board: B,
    agent: KnowledgeBase,
    moves: usize,
    guesses: usize,
    detonated: Option<Cell>,
    result: Option<GameResult>,
}

impl<B: Board> Autoplayer<B> {
    pub fn new(board: B) -> Self {
        let agent = KnowledgeBase::new(board.height(), board.width());
        Self::with_agent(board, agent)
    }

    /// Reproducible play: the seed drives every guess.
    pub fn with_seed(board: B, seed: u64) -> Self {
        let agent = KnowledgeBase::with_seed(board.height(), board.width(), seed);
        Self::with_agent(board, agent)
    }

    fn with_agent(board: B, agent: KnowledgeBase) -> Self {
        Self {
            board,
            agent,
            moves: 0,
            guesses: 0,
            detonated: None,
            result: None,
        }
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn agent(&self) -> &KnowledgeBase {
        &self.agent
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Reveal one cell, preferring a known-safe one over a guess.
    pub fn step(&mut self) -> Result<Turn> {
        if let Some(result) = self.result {
            return Ok(Turn::Finished(result));
        }

        let (cell, guessed) = match self.agent.safe_move() {
            Some(cell) => (cell, false),
            None => match self.agent.random_move() {
                Some(cell) => (cell, true),
                None => return Ok(self.finish(GameResult::Stuck)),
            },
        };
        self.moves += 1;
        if guessed {
            self.guesses += 1;
            debug!(%cell, "no safe move known, guessing");
        }

        if self.board.is_mine(cell) {
            self.detonated = Some(cell);
            return Ok(self.finish(GameResult::Loss));
        }

        let count = self.board.neighbor_count(cell);
        self.agent.observe(cell, count)?;
        for &mine in self.agent.mines() {
            self.board.flag(mine);
        }

        let safe_cells = self.board.height() * self.board.width() - self.board.mine_count();
        if self.board.is_complete() || self.agent.moves_made().len() == safe_cells {
            return Ok(self.finish(GameResult::Win));
        }
        Ok(Turn::Revealed {
            cell,
            count,
            guessed,
        })
    }

    fn finish(&mut self, result: GameResult) -> Turn {
        info!(
            ?result,
            moves = self.moves,
            guesses = self.guesses,
            mines = self.agent.mines().len(),
            "game over"
        );
        self.result = Some(result);
        Turn::Finished(result)
    }

    /// Play until the game ends.
    pub fn play(&mut self) -> Result<GameOutcome> {
        loop {
            if let Turn::Finished(result) = self.step()? {
                return Ok(GameOutcome {
                    result,
                    moves: self.moves,
                    guesses: self.guesses,
                    mines_flagged: self.agent.mines().len(),
                    detonated: self.detonated,
                });
            }
        }
    }
}
