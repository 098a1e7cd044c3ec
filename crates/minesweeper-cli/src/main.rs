//! Let the inference engine play batches of Minesweeper games.
//!
//! ```bash
//! minesweeper-ai --difficulty expert --games 500 --seed 42
//! RUST_LOG=minesweeper_core=debug minesweeper-ai --games 1
//! ```

mod stats;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use minesweeper_core::{Autoplayer, Difficulty, GameResult, Minefield, MinefieldConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use stats::{GameRecord, RunStats};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Beginner => Difficulty::Beginner,
            Level::Intermediate => Difficulty::Intermediate,
            Level::Expert => Difficulty::Expert,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "minesweeper-ai",
    about = "Play Minesweeper with a knowledge-based inference engine"
)]
struct Args {
    /// Board preset
    #[arg(long, value_enum, default_value_t = Level::Beginner)]
    difficulty: Level,

    /// Override the preset's height
    #[arg(long)]
    height: Option<usize>,

    /// Override the preset's width
    #[arg(long)]
    width: Option<usize>,

    /// Override the preset's mine count
    #[arg(long)]
    mines: Option<usize>,

    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,

    /// Base seed; game i uses seed + i. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print the layout of every lost board
    #[arg(long)]
    show_boards: bool,

    /// Log engine decisions (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> MinefieldConfig {
        let preset = Difficulty::from(self.difficulty).config();
        MinefieldConfig {
            height: self.height.unwrap_or(preset.height),
            width: self.width.unwrap_or(preset.width),
            mines: self.mines.unwrap_or(preset.mines),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = args.config();
    config.validate().context("invalid board configuration")?;
    let base_seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(?config, base_seed, games = args.games, "starting run");

    let stats = run(&args, config, base_seed)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Seed:       {}", base_seed);
        println!("{}", stats);
    }
    Ok(())
}

fn run(args: &Args, config: MinefieldConfig, base_seed: u64) -> Result<RunStats> {
    let mut stats = RunStats::new(config);
    for id in 0..args.games {
        let seed = base_seed.wrapping_add(id as u64);
        let field = Minefield::generate(config, &mut StdRng::seed_from_u64(seed))?;
        let mut player = Autoplayer::with_seed(field, seed);
        let outcome = player
            .play()
            .with_context(|| format!("game {} (seed {}) hit an inconsistent clue", id, seed))?;

        if args.show_boards && outcome.result == GameResult::Loss {
            if let Some(cell) = outcome.detonated {
                eprintln!("Game {} (seed {}) lost at {}:", id, seed, cell);
            }
            eprintln!("{}", player.board());
        }
        stats.record(GameRecord::new(id, seed, &outcome));
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from([
            "minesweeper-ai",
            "--difficulty",
            "expert",
            "--mines",
            "50",
        ]);
        let config = args.config();
        assert_eq!(config.height, 16);
        assert_eq!(config.width, 30);
        assert_eq!(config.mines, 50);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["minesweeper-ai"]);
        assert_eq!(args.config(), MinefieldConfig::beginner());
        assert_eq!(args.games, 100);
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_run_is_reproducible() {
        let args = Args::parse_from(["minesweeper-ai", "--games", "5", "--seed", "9"]);
        let config = args.config();
        let a = run(&args, config, 9).unwrap();
        let b = run(&args, config, 9).unwrap();
        assert_eq!(a.total_games, 5);
        assert_eq!(a.wins, b.wins);
        assert_eq!(a.total_moves, b.total_moves);
        assert_eq!(a.total_guesses, b.total_guesses);
    }
}
