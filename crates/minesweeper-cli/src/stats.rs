use minesweeper_core::{Cell, GameOutcome, GameResult, MinefieldConfig};
use serde::Serialize;

/// Record of a single played game
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    /// Game index within the run
    pub id: usize,
    /// Seed for both the minefield and the player's guesses
    pub seed: u64,
    pub result: GameResult,
    pub moves: usize,
    pub guesses: usize,
    pub mines_flagged: usize,
    pub detonated: Option<Cell>,
}

impl GameRecord {
    pub fn new(id: usize, seed: u64, outcome: &GameOutcome) -> Self {
        Self {
            id,
            seed,
            result: outcome.result,
            moves: outcome.moves,
            guesses: outcome.guesses,
            mines_flagged: outcome.mines_flagged,
            detonated: outcome.detonated,
        }
    }
}

/// Aggregate statistics for a batch of games on one board configuration
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub stuck: usize,
    pub total_moves: usize,
    pub total_guesses: usize,
    pub records: Vec<GameRecord>,
}

impl RunStats {
    pub fn new(config: MinefieldConfig) -> Self {
        Self {
            height: config.height,
            width: config.width,
            mines: config.mines,
            ..Default::default()
        }
    }

    pub fn record(&mut self, record: GameRecord) {
        self.total_games += 1;
        match record.result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Stuck => self.stuck += 1,
        }
        self.total_moves += record.moves;
        self.total_guesses += record.guesses;
        self.records.push(record);
    }

    pub fn win_rate(&self) -> f32 {
        if self.total_games > 0 {
            self.wins as f32 / self.total_games as f32 * 100.0
        } else {
            0.0
        }
    }

    pub fn avg_guesses(&self) -> f32 {
        if self.total_games > 0 {
            self.total_guesses as f32 / self.total_games as f32
        } else {
            0.0
        }
    }

    pub fn avg_moves(&self) -> f32 {
        if self.total_games > 0 {
            self.total_moves as f32 / self.total_games as f32
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Board:      {}x{} with {} mines",
            self.height, self.width, self.mines
        )?;
        writeln!(f, "Games:      {}", self.total_games)?;
        writeln!(f, "Wins:       {} ({:.1}%)", self.wins, self.win_rate())?;
        writeln!(f, "Losses:     {}", self.losses)?;
        if self.stuck > 0 {
            writeln!(f, "Stuck:      {}", self.stuck)?;
        }
        writeln!(f, "Avg moves:  {:.1}", self.avg_moves())?;
        write!(f, "Avg guess:  {:.2}", self.avg_guesses())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(result: GameResult, moves: usize, guesses: usize) -> GameOutcome {
        GameOutcome {
            result,
            moves,
            guesses,
            mines_flagged: 0,
            detonated: None,
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = RunStats::new(MinefieldConfig::default());
        assert_eq!(stats.win_rate(), 0.0);
        assert_eq!(stats.avg_guesses(), 0.0);
        assert_eq!(stats.height, 8);
    }

    #[test]
    fn test_record_tallies() {
        let mut stats = RunStats::new(MinefieldConfig::beginner());
        stats.record(GameRecord::new(0, 10, &outcome(GameResult::Win, 20, 1)));
        stats.record(GameRecord::new(1, 11, &outcome(GameResult::Loss, 4, 2)));
        stats.record(GameRecord::new(2, 12, &outcome(GameResult::Win, 30, 3)));
        stats.record(GameRecord::new(3, 13, &outcome(GameResult::Stuck, 6, 2)));

        assert_eq!(stats.total_games, 4);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.stuck, 1);
        assert_eq!(stats.win_rate(), 50.0);
        assert_eq!(stats.avg_guesses(), 2.0);
        assert_eq!(stats.avg_moves(), 15.0);
        assert_eq!(stats.records[1].seed, 11);
    }

    #[test]
    fn test_json_summary() {
        let mut stats = RunStats::new(MinefieldConfig::default());
        stats.record(GameRecord::new(0, 7, &outcome(GameResult::Win, 10, 0)));
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["wins"], 1);
        assert_eq!(json["records"][0]["result"], "Win");
        assert_eq!(json["records"][0]["seed"], 7);
    }

    #[test]
    fn test_display_mentions_win_rate() {
        let mut stats = RunStats::new(MinefieldConfig::default());
        stats.record(GameRecord::new(0, 1, &outcome(GameResult::Win, 10, 0)));
        let text = stats.to_string();
        assert!(text.contains("8x8 with 8 mines"));
        assert!(text.contains("(100.0%)"));
        assert!(!text.contains("Stuck"));
    }
}
