//! Automated player: a side plus its fixed fallback ordering.

use super::action::OracleError;
use super::oracle::{self, Decision};
use super::{Board, Position, Side};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Order the fallback permutation starts from before shuffling.
pub const BASE_ORDER: [Position; 9] = [
    Position::BottomRight,
    Position::TopLeft,
    Position::TopRight,
    Position::BottomLeft,
    Position::Center,
    Position::TopCenter,
    Position::MiddleLeft,
    Position::MiddleRight,
    Position::BottomCenter,
];

/// Error returned when a fallback order is not a permutation of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("Fallback order must list every square exactly once")]
pub struct InvalidFallbackOrder;

impl std::error::Error for InvalidFallbackOrder {}

/// Permutation of all 9 positions consulted when no forcing move exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FallbackOrder([Position; 9]);

impl FallbackOrder {
    /// Wraps an explicit order, rejecting repeats.
    pub fn new(order: [Position; 9]) -> Result<Self, InvalidFallbackOrder> {
        let mut seen = [false; 9];
        for pos in order {
            if std::mem::replace(&mut seen[pos.index()], true) {
                return Err(InvalidFallbackOrder);
            }
        }
        Ok(Self(order))
    }

    /// Builds an order from raw board indices.
    pub fn from_indices(indices: [usize; 9]) -> Result<Self, InvalidFallbackOrder> {
        let mut order = BASE_ORDER;
        for (slot, index) in order.iter_mut().zip(indices) {
            *slot = Position::from_index(index).ok_or(InvalidFallbackOrder)?;
        }
        Self::new(order)
    }

    /// Shuffles [`BASE_ORDER`] once with the given generator.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut order = BASE_ORDER;
        order.shuffle(rng);
        Self(order)
    }

    /// The positions in preference order.
    pub fn positions(&self) -> &[Position; 9] {
        &self.0
    }

    /// First position in this order that is empty on `board`.
    pub fn first_empty(&self, board: &Board) -> Option<Position> {
        self.0.iter().copied().find(|pos| board.is_empty(*pos))
    }
}

impl Default for FallbackOrder {
    fn default() -> Self {
        Self(BASE_ORDER)
    }
}

impl std::fmt::Display for FallbackOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let indices: Vec<String> = self.0.iter().map(|p| p.index().to_string()).collect();
        write!(f, "[{}]", indices.join(", "))
    }
}

/// An automated player.
///
/// The fallback order is fixed at construction and never reshuffled, so a
/// player's positional preferences stay stable for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    side: Side,
    fallback: FallbackOrder,
}

impl Player {
    /// Creates a player whose fallback order is shuffled from thread randomness.
    #[instrument]
    pub fn new(side: Side) -> Self {
        Self::with_rng(side, &mut rand::rng())
    }

    /// Creates a player with a reproducible shuffle.
    #[instrument]
    pub fn seeded(side: Side, seed: u64) -> Self {
        Self::with_rng(side, &mut StdRng::seed_from_u64(seed))
    }

    /// Creates a player shuffling its order with `rng`.
    pub fn with_rng<R: Rng + ?Sized>(side: Side, rng: &mut R) -> Self {
        let fallback = FallbackOrder::shuffled(rng);
        debug!(%side, %fallback, "Player created");
        Self { side, fallback }
    }

    /// Creates a player with an explicit fallback order.
    pub fn with_order(side: Side, fallback: FallbackOrder) -> Self {
        Self { side, fallback }
    }

    /// The side this player marks.
    pub fn side(&self) -> Side {
        self.side
    }

    /// The side this player plays against.
    pub fn opponent(&self) -> Side {
        self.side.opponent()
    }

    /// The fixed fallback order.
    pub fn fallback(&self) -> &FallbackOrder {
        &self.fallback
    }

    /// Chooses this player's move on `board`.
    pub fn next_move(&self, board: &Board) -> Result<Position, OracleError> {
        oracle::next_move(board, self.side, &self.fallback)
    }

    /// Chooses a move and reports which tier selected it.
    pub fn decide(&self, board: &Board) -> Result<Decision, OracleError> {
        oracle::decide(board, self.side, &self.fallback)
    }
}
