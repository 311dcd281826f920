//! Command-line interface for unbeatable.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use unbeatable::Opponent;
use unbeatable_core::Side;

/// Unbeatable - tic-tac-toe engine that never misses a win or a block
#[derive(Parser, Debug)]
#[command(name = "unbeatable")]
#[command(about = "Tiered tic-tac-toe engine with a terminal UI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to unbeatable.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the engine in the terminal
    Play {
        /// Let the engine open every game as X
        #[arg(long)]
        engine_first: bool,

        /// Seed for the engine's fallback orders
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the engine's move for a board
    Suggest {
        /// Nine cells, row by row: X, O, and _ or . for empty (| separators allowed)
        board: String,

        /// Side to move
        #[arg(long, value_enum, ignore_case = true)]
        side: SideArg,

        /// Shuffle the fallback order with this seed instead of using the base order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play a batch of games and report the tallies
    Selfplay {
        /// Number of games (defaults to selfplay_games from config)
        #[arg(short, long)]
        games: Option<usize>,

        /// Who the engine plays against
        #[arg(long, value_enum, default_value_t = Opponent::Random)]
        opponent: Opponent,

        /// Switch the engine's side every game
        #[arg(long)]
        alternate: bool,

        /// Seed for the whole batch
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Enumerate every opponent line against the engine
    Audit {
        /// Number of fallback orders to audit, base order first
        #[arg(long, default_value = "10")]
        orders: usize,

        /// Seed for the shuffled orders
        #[arg(long)]
        seed: Option<u64>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Side as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    /// Cross
    X,
    /// Nought
    O,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::X => Side::X,
            SideArg::O => Side::O,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_accepts_uppercase_side() {
        let cli = Cli::try_parse_from(["unbeatable", "suggest", "XX_|_O_|___", "--side", "O"]).unwrap();
        match cli.command {
            Command::Suggest { board, side, seed } => {
                assert_eq!(board, "XX_|_O_|___");
                assert_eq!(Side::from(side), Side::O);
                assert_eq!(seed, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_selfplay_defaults() {
        let cli = Cli::try_parse_from(["unbeatable", "selfplay", "--json"]).unwrap();
        match cli.command {
            Command::Selfplay { games, opponent, alternate, json, .. } => {
                assert_eq!(games, None);
                assert_eq!(opponent, Opponent::Random);
                assert!(!alternate);
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli = Cli::try_parse_from(["unbeatable", "audit", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }
}
