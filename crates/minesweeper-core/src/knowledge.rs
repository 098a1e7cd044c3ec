//! The inference agent.
//!
//! Clues arrive through [`KnowledgeBase::observe`]. Each clue becomes a
//! [`Sentence`] over the clue cell's undetermined neighbors; the agent then
//! alternates two rules until neither produces anything new:
//!
//! 1. local resolution: a sentence with count 0 makes its cells safe, and a
//!    sentence with as many mines as cells makes its cells mines;
//! 2. subset inference: if `A.cells ⊂ B.cells` then `B.cells - A.cells`
//!    holds `B.count - A.count` mines.
//!
//! Marking a cell purges it from every stored sentence immediately, so stored
//! sentences only ever mention undetermined cells.

use crate::error::{InferenceError, Result, Verdict};
use crate::{Cell, Sentence};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, trace};

/// Accumulated knowledge about one board.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    height: usize,
    width: usize,
    /// Cells already played
    moves_made: HashSet<Cell>,
    /// Cells proven safe (includes every played cell)
    safes: HashSet<Cell>,
    /// Cells proven to be mines
    mines: HashSet<Cell>,
    /// Unresolved sentences, no two equal
    knowledge: Vec<Sentence>,
    rng: StdRng,
}

impl KnowledgeBase {
    /// Create an empty knowledge base for a `height` x `width` board.
    pub fn new(height: usize, width: usize) -> Self {
        Self::with_rng(height, width, StdRng::from_entropy())
    }

    /// Same as [`new`](Self::new) but with a reproducible `random_move` sequence.
    pub fn with_seed(height: usize, width: usize, seed: u64) -> Self {
        Self::with_rng(height, width, StdRng::seed_from_u64(seed))
    }

    fn with_rng(height: usize, width: usize, rng: StdRng) -> Self {
        Self {
            height,
            width,
            moves_made: HashSet::new(),
            safes: HashSet::new(),
            mines: HashSet::new(),
            knowledge: Vec::new(),
            rng,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn moves_made(&self) -> &HashSet<Cell> {
        &self.moves_made
    }

    pub fn safes(&self) -> &HashSet<Cell> {
        &self.safes
    }

    pub fn mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    /// Cells whose status is still unknown.
    pub fn undetermined(&self) -> impl Iterator<Item = Cell> + '_ {
        Cell::all(self.height, self.width)
            .filter(move |c| !self.safes.contains(c) && !self.mines.contains(c))
    }

    /// True once every cell is known to be either safe or a mine.
    pub fn is_resolved(&self) -> bool {
        self.safes.len() + self.mines.len() == self.height * self.width
    }

    // ==================== Clue ingestion ====================

    /// Record that `cell` was revealed safe with `count` adjacent mines, then
    /// deduce everything that follows.
    ///
    /// A rejected clue leaves the knowledge base exactly as it was.
    pub fn observe(&mut self, cell: Cell, count: usize) -> Result<()> {
        self.check_bounds(cell)?;
        let neighbors: BTreeSet<Cell> = cell.neighbors(self.height, self.width).collect();
        if count > neighbors.len() {
            return Err(InferenceError::CountOutOfRange {
                cell,
                count,
                max: neighbors.len(),
            });
        }
        if self.mines.contains(&cell) {
            return Err(InferenceError::Contradiction {
                cell,
                known: Verdict::Mine,
            });
        }
        debug!(%cell, count, "observing clue");

        self.rollback_on_error(|kb| {
            kb.mark_safe(cell)?;
            kb.moves_made.insert(cell);
            kb.incorporate(neighbors, count)?;
            kb.saturate()?;
            Ok(())
        })
    }

    /// Assert an arbitrary sentence about in-bounds cells and deduce its
    /// consequences. Used for externally known constraints and tests.
    pub fn add_sentence(
        &mut self,
        cells: impl IntoIterator<Item = Cell>,
        count: usize,
    ) -> Result<()> {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        for &cell in &cells {
            self.check_bounds(cell)?;
        }
        if count > cells.len() {
            return Err(InferenceError::Inconsistent {
                count: count as isize,
                cells: cells.len(),
            });
        }
        self.rollback_on_error(|kb| {
            kb.incorporate(cells, count)?;
            kb.saturate()?;
            Ok(())
        })
    }

    /// Run `apply`, restoring every set and sentence if it fails partway.
    fn rollback_on_error<T>(&mut self, apply: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let moves_made = self.moves_made.clone();
        let safes = self.safes.clone();
        let mines = self.mines.clone();
        let knowledge = self.knowledge.clone();
        let result = apply(self);
        if let Err(err) = &result {
            debug!(%err, "rejected evidence, restoring knowledge base");
            self.moves_made = moves_made;
            self.safes = safes;
            self.mines = mines;
            self.knowledge = knowledge;
        }
        result
    }

    fn check_bounds(&self, cell: Cell) -> Result<()> {
        if cell.in_bounds(self.height, self.width) {
            Ok(())
        } else {
            Err(InferenceError::OutOfBounds {
                cell,
                height: self.height,
                width: self.width,
            })
        }
    }

    // ==================== Mark propagation ====================

    /// Record `cell` as a mine and purge it from every sentence.
    ///
    /// Returns `Ok(false)` when the cell was already a known mine.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<bool> {
        self.check_bounds(cell)?;
        if self.safes.contains(&cell) {
            return Err(InferenceError::Contradiction {
                cell,
                known: Verdict::Safe,
            });
        }
        if self.mines.contains(&cell) {
            return Ok(false);
        }
        // A rejected mark leaves every sentence untouched
        if let Some(s) = self
            .knowledge
            .iter()
            .find(|s| s.contains(cell) && s.count() == 0)
        {
            return Err(InferenceError::Inconsistent {
                count: -1,
                cells: s.len() - 1,
            });
        }

        trace!(%cell, "marking mine");
        self.mines.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.reduce_for_known_mine(cell)?;
        }
        self.compact();
        Ok(true)
    }

    /// Record `cell` as safe and purge it from every sentence.
    ///
    /// Returns `Ok(false)` when the cell was already known safe.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<bool> {
        self.check_bounds(cell)?;
        if self.mines.contains(&cell) {
            return Err(InferenceError::Contradiction {
                cell,
                known: Verdict::Mine,
            });
        }
        if self.safes.contains(&cell) {
            return Ok(false);
        }
        if let Some(s) = self
            .knowledge
            .iter()
            .find(|s| s.contains(cell) && s.count() == s.len())
        {
            return Err(InferenceError::Inconsistent {
                count: s.count() as isize,
                cells: s.len() - 1,
            });
        }

        trace!(%cell, "marking safe");
        self.safes.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.reduce_for_known_safe(cell)?;
        }
        self.compact();
        Ok(true)
    }

    /// Drop sentences emptied by a reduction and any duplicates it created.
    fn compact(&mut self) {
        let mut seen = HashSet::with_capacity(self.knowledge.len());
        self.knowledge.retain(|s| !s.is_empty() && seen.insert(s.clone()));
    }

    /// Clean `cells`/`count` against what is already known, then either
    /// resolve it on the spot or store it.
    ///
    /// Returns whether anything changed.
    fn incorporate(&mut self, cells: BTreeSet<Cell>, count: usize) -> Result<bool> {
        let mut remaining = BTreeSet::new();
        let mut count = count as isize;
        for cell in cells {
            if self.mines.contains(&cell) {
                count -= 1;
            } else if !self.safes.contains(&cell) {
                remaining.insert(cell);
            }
        }
        if count < 0 || count as usize > remaining.len() {
            return Err(InferenceError::Inconsistent {
                count,
                cells: remaining.len(),
            });
        }
        let count = count as usize;

        if remaining.is_empty() {
            return Ok(false);
        }

        let mut changed = false;
        if count == 0 {
            for cell in remaining {
                changed |= self.mark_safe(cell)?;
            }
        } else if count == remaining.len() {
            for cell in remaining {
                changed |= self.mark_mine(cell)?;
            }
        } else {
            let sentence = Sentence::new(remaining, count)?;
            if !self.knowledge.contains(&sentence) {
                trace!(%sentence, "new sentence");
                self.knowledge.push(sentence);
                changed = true;
            }
        }
        Ok(changed)
    }

    // ==================== Fixed point ====================

    /// Apply local resolution and subset inference until a pass changes
    /// nothing. Returns whether any pass changed the knowledge base.
    ///
    /// Calling this again without new evidence is a no-op. On error nothing
    /// derived during the call is kept.
    pub fn deduce(&mut self) -> Result<bool> {
        self.rollback_on_error(Self::saturate)
    }

    fn saturate(&mut self) -> Result<bool> {
        let mut passes = 0usize;
        let mut changed_any = false;
        loop {
            passes += 1;
            let mut changed = self.resolve_local()?;
            changed |= self.infer_from_subsets()?;
            if !changed {
                break;
            }
            changed_any = true;
        }
        debug!(
            passes,
            sentences = self.knowledge.len(),
            safes = self.safes.len(),
            mines = self.mines.len(),
            "deduction reached fixed point"
        );
        Ok(changed_any)
    }

    fn resolve_local(&mut self) -> Result<bool> {
        let mut new_safes = Vec::new();
        let mut new_mines = Vec::new();
        for sentence in &self.knowledge {
            if let Some(cells) = sentence.known_safes() {
                new_safes.extend(cells.iter().copied());
            } else if let Some(cells) = sentence.known_mines() {
                new_mines.extend(cells.iter().copied());
            }
        }

        let mut changed = false;
        for cell in new_safes {
            changed |= self.mark_safe(cell)?;
        }
        for cell in new_mines {
            changed |= self.mark_mine(cell)?;
        }
        Ok(changed)
    }

    fn infer_from_subsets(&mut self) -> Result<bool> {
        let mut derived = Vec::new();
        for (i, a) in self.knowledge.iter().enumerate() {
            for b in &self.knowledge[i + 1..] {
                if a.is_empty() || b.is_empty() || a == b {
                    continue;
                }
                if a.cells() == b.cells() {
                    return Err(InferenceError::ConflictingCounts {
                        cells: a.len(),
                        first: a.count(),
                        second: b.count(),
                    });
                }
                if let Some(s) = a.difference(b)? {
                    derived.push(s);
                } else if let Some(s) = b.difference(a)? {
                    derived.push(s);
                }
            }
        }

        let mut changed = false;
        for sentence in derived {
            trace!(%sentence, "inferred from subset");
            let count = sentence.count();
            changed |= self.incorporate(sentence.cells().clone(), count)?;
        }
        Ok(changed)
    }

    // ==================== Move selection ====================

    /// A known-safe cell that has not been played yet.
    ///
    /// Picks the smallest such cell so repeated calls agree.
    pub fn safe_move(&self) -> Option<Cell> {
        self.safes.difference(&self.moves_made).min().copied()
    }

    /// Any cell that is neither played nor a known mine.
    pub fn random_move(&mut self) -> Option<Cell> {
        let candidates: Vec<Cell> = Cell::all(self.height, self.width)
            .filter(|c| !self.moves_made.contains(c) && !self.mines.contains(c))
            .collect();
        candidates.choose(&mut self.rng).copied()
    }
}
