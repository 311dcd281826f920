//! Moves and the error taxonomy for applying them.
//!
//! Every failure is reported through a `Result`; a failed operation never
//! leaves the board partially mutated.

use super::{Position, Side};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a side placing its mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The side making the move.
    pub side: Side,
    /// The position where the mark is placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(side: Side, position: Position) -> Self {
        Self { side, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.side, self.position.label())
    }
}

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidMove {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    Occupied(Position),

    /// The index is outside 0-8.
    #[display("Index {} is out of range (must be 0-8)", _0)]
    OutOfRange(usize),

    /// The side is not the one to move.
    #[display("It's not {}'s turn", _0)]
    OutOfTurn(Side),

    /// The session has not been started.
    #[display("Game has not started")]
    NotStarted,
}

impl std::error::Error for InvalidMove {}

/// Error that can occur when driving a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// The move was rejected; the session is unchanged.
    #[display("Invalid move: {}", _0)]
    InvalidMove(InvalidMove),

    /// The session already reached a terminal state.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// The oracle was asked to move on a full board.
    #[display("No move available")]
    NoMoveAvailable,
}

impl std::error::Error for SessionError {}

impl From<InvalidMove> for SessionError {
    fn from(err: InvalidMove) -> Self {
        SessionError::InvalidMove(err)
    }
}

/// Error returned by the move oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum OracleError {
    /// Every square is occupied.
    #[display("No move available: the board is full")]
    NoMoveAvailable,
}

impl std::error::Error for OracleError {}

impl From<OracleError> for SessionError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::NoMoveAvailable => SessionError::NoMoveAvailable,
        }
    }
}
