//! Tic-tac-toe decision engine.
//!
//! A pure, synchronous core: board and line primitives, a tiered move oracle,
//! an automated [`Player`] holding a shuffle-once fallback order, and the
//! [`GameSession`] state machine the oracle plays against.
//!
//! ```
//! use unbeatable_core::{GameSession, Player, Side, SessionState};
//!
//! let engine = Player::seeded(Side::X, 7);
//! let mut session = GameSession::start(Side::X);
//! let pos = session.request_move(&engine)?;
//! assert_eq!(session.apply_move(pos.index(), Side::X)?, SessionState::InProgress);
//! # Ok::<(), unbeatable_core::SessionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod audit;
pub mod oracle;
mod player;
mod position;
pub mod rules;
mod session;
mod types;

pub use action::{InvalidMove, Move, OracleError, SessionError};
pub use audit::{audit, AuditReport};
pub use oracle::{decide, next_move, Decision, Tier};
pub use player::{FallbackOrder, InvalidFallbackOrder, Player, BASE_ORDER};
pub use position::Position;
pub use session::{GameSession, SessionState};
pub use types::{Board, BoardParseError, Side, Square};
