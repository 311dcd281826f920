//! Game session state machine.
//!
//! ```text
//! NotStarted --begin--> InProgress --apply_move--> InProgress | Won(side) | Drawn
//! ```
//!
//! `Won` and `Drawn` are terminal. A session is owned by one caller and
//! mutated only through [`GameSession::apply_move`]; rejected moves leave it
//! untouched.

use super::action::{InvalidMove, Move, SessionError};
use super::player::Player;
use super::rules;
use super::{Board, Position, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// No game has begun.
    NotStarted,
    /// Moves are being accepted.
    InProgress,
    /// A side completed a line.
    Won(Side),
    /// The board filled with no line completed.
    Drawn,
}

impl SessionState {
    /// Whether no further moves are accepted.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Won(_) | SessionState::Drawn)
    }

    /// The winning side, if any.
    pub fn winner(self) -> Option<Side> {
        match self {
            SessionState::Won(side) => Some(side),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "Not started"),
            SessionState::InProgress => write!(f, "In progress"),
            SessionState::Won(side) => write!(f, "{} Wins", side),
            SessionState::Drawn => write!(f, "Drawn Game!!"),
        }
    }
}

/// One game of tic-tac-toe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    first: Side,
    to_move: Side,
    state: SessionState,
    history: Vec<Move>,
}

impl GameSession {
    /// Creates a session that has not started.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            first: Side::X,
            to_move: Side::X,
            state: SessionState::NotStarted,
            history: Vec::new(),
        }
    }

    /// Creates a session already in progress with `first` to move.
    #[instrument]
    pub fn start(first: Side) -> Self {
        let mut session = Self::new();
        session.begin(first);
        session
    }

    /// Begins a fresh game on an empty board with `first` to move.
    #[instrument(skip(self))]
    pub fn begin(&mut self, first: Side) {
        *self = Self {
            first,
            to_move: first,
            state: SessionState::InProgress,
            ..Self::new()
        };
        info!(%first, "Session started");
    }

    /// Returns to `NotStarted`, discarding the board.
    pub fn restart(&mut self) {
        debug!("Session reset");
        *self = Self::new();
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side that moved first.
    pub fn first(&self) -> Side {
        self.first
    }

    /// Side to move, while the game is in progress.
    pub fn to_move(&self) -> Option<Side> {
        (self.state == SessionState::InProgress).then_some(self.to_move)
    }

    /// Moves applied so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Places `side` at board index `index` (0-8).
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, index: usize, side: Side) -> Result<SessionState, SessionError> {
        self.check_accepting()?;
        let position = Position::try_from_index(index).inspect_err(|err| warn!(%err, "Move rejected"))?;
        self.play(Move::new(side, position))
    }

    /// Applies a typed move.
    #[instrument(skip(self), fields(side = %action.side, position = %action.position))]
    pub fn play(&mut self, action: Move) -> Result<SessionState, SessionError> {
        self.check_accepting()?;
        if action.side != self.to_move {
            warn!("Move rejected: out of turn");
            return Err(InvalidMove::OutOfTurn(action.side).into());
        }

        let board = self
            .board
            .place(action.position, action.side)
            .inspect_err(|err| warn!(%err, "Move rejected"))?;

        self.board = board;
        self.history.push(action);

        self.state = if rules::has_winning_line(&self.board, action.side) {
            SessionState::Won(action.side)
        } else if rules::is_full(&self.board) {
            SessionState::Drawn
        } else {
            self.to_move = action.side.opponent();
            SessionState::InProgress
        };

        if self.state.is_terminal() {
            info!(state = %self.state, moves = self.history.len(), "Session finished");
        } else {
            debug!(next = %self.to_move, "Move applied");
        }
        Ok(self.state)
    }

    /// Asks `player` for its move in the current position.
    ///
    /// Does not apply the move.
    #[instrument(skip(self, player), fields(side = %player.side()))]
    pub fn request_move(&self, player: &Player) -> Result<Position, SessionError> {
        self.check_accepting()?;
        if player.side() != self.to_move {
            return Err(InvalidMove::OutOfTurn(player.side()).into());
        }

        // A full board is always terminal, so an empty oracle answer is a bug upstream.
        debug_assert!(!rules::is_full(&self.board), "oracle asked to move on a full in-progress board");
        let position = player
            .next_move(&self.board)
            .inspect_err(|err| warn!(%err, "Oracle had no move"))?;
        Ok(position)
    }

    fn check_accepting(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::InProgress => Ok(()),
            SessionState::NotStarted => Err(InvalidMove::NotStarted.into()),
            SessionState::Won(_) | SessionState::Drawn => {
                warn!(state = %self.state, "Move attempted after game over");
                Err(SessionError::GameAlreadyOver)
            }
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
