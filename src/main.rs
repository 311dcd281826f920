//! Unbeatable - Unified CLI
//!
//! Terminal play, one-off suggestions, batch matches and exhaustive audits.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;
use unbeatable::{
    analyze, selfplay, AppConfig, Board, FallbackOrder, MatchPlan, Opponent, Player, Side,
};
use unbeatable_core::rules;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Play { engine_first, seed } => {
            let config = config.with_overrides(engine_first, seed);
            initialize_tracing(&config, true)?;
            tui::run(&config)
        }
        Command::Suggest { board, side, seed } => {
            initialize_tracing(&config, false)?;
            run_suggest(&board, side.into(), seed)
        }
        Command::Selfplay {
            games,
            opponent,
            alternate,
            seed,
            json,
        } => {
            initialize_tracing(&config, false)?;
            let plan = MatchPlan {
                games: games.unwrap_or(*config.selfplay_games()),
                opponent,
                alternate,
                seed: seed.or(*config.seed()),
            };
            run_selfplay(plan, json)
        }
        Command::Audit { orders, seed, json } => {
            initialize_tracing(&config, false)?;
            run_audit(orders, seed.or(*config.seed()), json)
        }
    }
}

/// Prints the engine's move for a typed board.
#[instrument]
fn run_suggest(cells: &str, side: Side, seed: Option<u64>) -> Result<()> {
    let board = Board::from_cells(cells)?;
    if !board.is_consistent(Side::X) && !board.is_consistent(Side::O) {
        warn!(%board, "Board cannot arise from legal play");
    }
    println!("{board}\n");

    if let Some(winner) = rules::winner(&board) {
        println!("{winner} has already won");
        return Ok(());
    }

    let player = match seed {
        Some(seed) => Player::seeded(side, seed),
        None => Player::with_order(side, FallbackOrder::default()),
    };
    let decision = player.decide(&board)?;
    info!(position = %decision.position, tier = %decision.tier, "Suggestion ready");
    println!(
        "{} plays {} (cell {}) by {}",
        side,
        decision.position.label(),
        decision.position.index() + 1,
        decision.tier
    );
    Ok(())
}

/// Plays a batch and prints its tallies.
fn run_selfplay(plan: MatchPlan, json: bool) -> Result<()> {
    info!(games = plan.games, opponent = %plan.opponent, "Starting batch");
    let report = selfplay(plan)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    if plan.opponent == Opponent::Random && report.engine_losses > 0 {
        warn!(losses = report.engine_losses, "Engine lost to random play");
    }
    Ok(())
}

/// Audits the engine under several fallback orders.
fn run_audit(orders: usize, seed: Option<u64>, json: bool) -> Result<()> {
    let summary = analyze(orders, seed);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}

/// Installs the global subscriber.
///
/// The terminal UI owns the screen, so `to_file` sends logs to the configured
/// file without ANSI colors.
fn initialize_tracing(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    if to_file {
        let log_file = std::fs::File::create(config.log_file())?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Arc::new(log_file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    info!("Tracing initialized");
    Ok(())
}
