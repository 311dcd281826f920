//! Turn sequencing between a human and the engine.
//!
//! A click on a cell before any game is running starts one with the human as
//! X. The control button instead lets the engine open as X. Once a game ends
//! the control button clears the board for the next one.

use crate::presenter::Presenter;
use tracing::{debug, info, instrument};
use unbeatable_core::{GameSession, Player, Position, SessionError, SessionState, Side};

/// Prompt shown while no game is running.
pub const IDLE_PROMPT: &str = "Pick a square to play X, or Switch to let the engine start";

/// What the control button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Control {
    /// Engine opens a new game as X.
    #[display("Switch")]
    Switch,
    /// Game running; the button is inert.
    #[display("Play")]
    Play,
    /// Game over; clears the board.
    #[display("Again")]
    Again,
}

/// Drives a [`GameSession`] between a human and an automated [`Player`].
#[derive(Debug)]
pub struct Orchestrator<P> {
    session: GameSession,
    engine: Option<Player>,
    presenter: P,
    seed: Option<u64>,
    engine_first: bool,
    games_started: u64,
}

impl<P: Presenter> Orchestrator<P> {
    /// Creates an idle orchestrator.
    ///
    /// With a seed, each game's engine order is derived from it so runs are
    /// reproducible.
    pub fn new(presenter: P, seed: Option<u64>) -> Self {
        let mut orchestrator = Self {
            session: GameSession::new(),
            engine: None,
            presenter,
            seed,
            engine_first: false,
            games_started: 0,
        };
        orchestrator.presenter.show_status(IDLE_PROMPT);
        orchestrator
    }

    /// Makes every fresh board start with the engine's opening move.
    pub fn with_engine_first(mut self, engine_first: bool) -> Self {
        self.engine_first = engine_first;
        if engine_first && self.session.state() == SessionState::NotStarted {
            self.start_engine_first();
        }
        self
    }

    /// The session being played.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The presentation surface.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The engine of the current game.
    pub fn engine(&self) -> Option<&Player> {
        self.engine.as_ref()
    }

    /// Side the human plays in the current game.
    pub fn human_side(&self) -> Option<Side> {
        self.engine.as_ref().map(Player::opponent)
    }

    /// Current meaning of the control button.
    pub fn control(&self) -> Control {
        match self.session.state() {
            SessionState::NotStarted => Control::Switch,
            SessionState::InProgress => Control::Play,
            SessionState::Won(_) | SessionState::Drawn => Control::Again,
        }
    }

    /// Handles the control button.
    #[instrument(skip(self))]
    pub fn press_control(&mut self) -> SessionState {
        match self.control() {
            Control::Switch => self.start_engine_first(),
            Control::Play => debug!("Control ignored while a game is running"),
            Control::Again => self.reset(),
        }
        self.session.state()
    }

    /// Handles a human selecting the cell at board index `index`.
    ///
    /// Rejected moves leave the session unchanged and put the reason in the
    /// status line.
    #[instrument(skip(self))]
    pub fn select_cell(&mut self, index: usize) -> Result<SessionState, SessionError> {
        if self.session.state() == SessionState::NotStarted {
            self.begin(Side::O);
        }
        // Set by begin() above or by an earlier game start.
        let human = self.human_side().unwrap_or(Side::X);

        let result = Position::try_from_index(index)
            .map_err(SessionError::from)
            .and_then(|position| self.apply(position, human));
        let state = match result {
            Ok(state) => state,
            Err(err) => {
                let hint = if err == SessionError::GameAlreadyOver {
                    format!("{err}. Press {} for a new game.", Control::Again)
                } else {
                    format!("{err}. Try again.")
                };
                self.presenter.show_status(&hint);
                return Err(err);
            }
        };

        if state == SessionState::InProgress {
            self.engine_turn()
        } else {
            Ok(state)
        }
    }

    /// Clears the board and returns to the idle state.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.session.restart();
        self.engine = None;
        self.presenter.clear();
        self.presenter.show_status(IDLE_PROMPT);
        if self.engine_first {
            self.start_engine_first();
        }
    }

    fn start_engine_first(&mut self) {
        self.begin(Side::X);
        // The opening reply cannot fail on an empty, running board.
        if let Err(err) = self.engine_turn() {
            self.presenter.show_status(&err.to_string());
        }
    }

    fn begin(&mut self, engine_side: Side) {
        let engine = match self.seed {
            Some(seed) => Player::seeded(engine_side, seed.wrapping_add(self.games_started)),
            None => Player::new(engine_side),
        };
        self.games_started += 1;
        info!(
            game = self.games_started,
            engine = %engine_side,
            fallback = %engine.fallback(),
            "New game"
        );

        self.session.begin(Side::X);
        self.engine = Some(engine);
        self.presenter.clear();
        self.presenter.show_status("Your move");
    }

    fn engine_turn(&mut self) -> Result<SessionState, SessionError> {
        let Some(engine) = self.engine.as_ref() else {
            return Ok(self.session.state());
        };
        let side = engine.side();
        let decision = engine.decide(self.session.board())?;
        debug!(position = %decision.position, tier = %decision.tier, "Engine reply");
        self.apply(decision.position, side)
    }

    fn apply(&mut self, position: Position, side: Side) -> Result<SessionState, SessionError> {
        let state = self.session.apply_move(position.index(), side)?;
        self.presenter.render_mark(position, side);
        match state {
            SessionState::InProgress => self.presenter.show_status("Your move"),
            SessionState::Won(_) | SessionState::Drawn => {
                self.presenter.show_status(&state.to_string())
            }
            SessionState::NotStarted => {}
        }
        Ok(state)
    }
}
