//! Unbeatable - host for the tic-tac-toe decision engine
//!
//! The game logic lives in [`unbeatable_core`]; this crate binds it to a
//! person and to batch runs.
//!
//! # Architecture
//!
//! - **Orchestrator**: sequences human and engine turns onto a [`Presenter`]
//! - **Matches**: batches of engine games against another engine or random moves
//! - **Analysis**: exhaustive audits over many fallback orders
//! - **Config**: optional TOML settings with command-line overrides
//!
//! # Example
//!
//! ```
//! use unbeatable::{BoardView, Orchestrator, SessionState};
//!
//! let mut game = Orchestrator::new(BoardView::new(), Some(3));
//! let state = game.select_cell(4)?;
//! assert_eq!(state, SessionState::InProgress);
//! assert_eq!(game.session().history().len(), 2);
//! # Ok::<(), unbeatable::SessionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod analysis;
mod config;
mod matches;
mod orchestrator;
mod presenter;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_PATH};

// Crate-level exports - Turn sequencing
pub use orchestrator::{Control, Orchestrator, IDLE_PROMPT};
pub use presenter::{BoardView, Presenter};

// Crate-level exports - Batch runs
pub use analysis::{analyze, AnalysisSummary, OrderAudit};
pub use matches::{play_one, selfplay, MatchPlan, MatchReport, Opponent};

// Crate-level exports - Core types
pub use unbeatable_core::{
    Board, Decision, FallbackOrder, GameSession, Move, Player, Position, SessionError,
    SessionState, Side, Tier,
};
