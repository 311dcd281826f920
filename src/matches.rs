//! Batch games between the engine and an opponent.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use unbeatable_core::{Board, GameSession, Player, Position, SessionError, SessionState, Side};

/// Who the engine plays against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    /// A second engine with its own fallback order.
    #[display("engine")]
    Engine,
    /// Uniformly random legal moves.
    #[display("random")]
    Random,
}

/// Tallies over a batch of games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Opponent the engine faced.
    pub opponent: Opponent,
    /// Games played.
    pub games: usize,
    /// Games won by X.
    pub x_wins: usize,
    /// Games won by O.
    pub o_wins: usize,
    /// Games that filled the board.
    pub draws: usize,
    /// Games won by the side opposing the engine.
    pub engine_losses: usize,
}

impl MatchReport {
    fn new(opponent: Opponent) -> Self {
        Self {
            opponent,
            games: 0,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
            engine_losses: 0,
        }
    }

    fn record(&mut self, state: SessionState, engine: Side) {
        self.games += 1;
        match state {
            SessionState::Won(Side::X) => self.x_wins += 1,
            SessionState::Won(Side::O) => self.o_wins += 1,
            SessionState::Drawn => self.draws += 1,
            SessionState::NotStarted | SessionState::InProgress => {}
        }
        if state.winner() == Some(engine.opponent()) {
            self.engine_losses += 1;
        }
    }
}

impl std::fmt::Display for MatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} games against {}", self.games, self.opponent)?;
        writeln!(f, "  X wins:        {}", self.x_wins)?;
        writeln!(f, "  O wins:        {}", self.o_wins)?;
        writeln!(f, "  Draws:         {}", self.draws)?;
        write!(f, "  Engine losses: {}", self.engine_losses)
    }
}

/// Options for a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPlan {
    /// Games to play.
    pub games: usize,
    /// Opponent for every game.
    pub opponent: Opponent,
    /// Whether the engine switches sides each game instead of always playing X.
    pub alternate: bool,
    /// Seed for every random choice in the batch.
    pub seed: Option<u64>,
}

/// Plays every game in `plan` and tallies the results.
#[instrument]
pub fn selfplay(plan: MatchPlan) -> Result<MatchReport, SessionError> {
    let mut rng = match plan.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut report = MatchReport::new(plan.opponent);
    for game in 0..plan.games {
        let side = if plan.alternate && game % 2 == 1 {
            Side::O
        } else {
            Side::X
        };
        let engine = Player::with_rng(side, &mut rng);
        let state = play_one(&engine, plan.opponent, &mut rng)?;
        debug!(game, engine = %side, result = %state, "Game finished");
        report.record(state, side);
    }

    info!(
        games = report.games,
        x_wins = report.x_wins,
        o_wins = report.o_wins,
        draws = report.draws,
        engine_losses = report.engine_losses,
        "Batch complete"
    );
    Ok(report)
}

/// Plays one game from the empty board with X to move.
pub fn play_one<R: Rng + ?Sized>(
    engine: &Player,
    opponent: Opponent,
    rng: &mut R,
) -> Result<SessionState, SessionError> {
    let rival = match opponent {
        Opponent::Engine => Some(Player::with_rng(engine.opponent(), rng)),
        Opponent::Random => None,
    };

    let mut session = GameSession::start(Side::X);
    while let Some(side) = session.to_move() {
        let position = if side == engine.side() {
            session.request_move(engine)?
        } else if let Some(rival) = &rival {
            session.request_move(rival)?
        } else {
            random_move(session.board(), rng)?
        };
        session.apply_move(position.index(), side)?;
    }
    Ok(session.state())
}

fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<Position, SessionError> {
    board
        .empty_squares()
        .choose(rng)
        .copied()
        .ok_or(SessionError::NoMoveAvailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_engine_losses_by_side() {
        let mut report = MatchReport::new(Opponent::Random);
        report.record(SessionState::Won(Side::X), Side::O);
        report.record(SessionState::Won(Side::X), Side::X);
        report.record(SessionState::Drawn, Side::X);
        assert_eq!(report.games, 3);
        assert_eq!(report.x_wins, 2);
        assert_eq!(report.draws, 1);
        assert_eq!(report.engine_losses, 1);
    }

    #[test]
    fn test_random_move_is_empty_square() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = Board::from_cells("XOX|OXO|_XO").unwrap();
        assert_eq!(random_move(&board, &mut rng), Ok(Position::BottomLeft));
    }

    #[test]
    fn test_seeded_batches_repeat() {
        let plan = MatchPlan {
            games: 20,
            opponent: Opponent::Random,
            alternate: true,
            seed: Some(9),
        };
        assert_eq!(selfplay(plan), selfplay(plan));
    }
}
