//! Tiered move selection.
//!
//! Tiers are tried in strict priority order and the first one that yields a
//! square decides the move:
//!
//! 1. last remaining square
//! 2. complete one of our lines
//! 3. block the opponent's completing square
//! 4. create a fork (two simultaneous threats)
//! 5. answer an opponent fork with a counter-threat off the fork square,
//!    or occupy the fork square itself
//! 6. first empty square in the player's fallback order
//!
//! Ties inside a tier go to the lowest empty index, then to the earliest
//! line in [`LINES`](crate::rules::LINES).

use super::action::OracleError;
use super::player::FallbackOrder;
use super::rules::{line_mark_count, lines_through};
use super::{Board, Position, Side, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Which tier produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Tier {
    /// Only one square was left.
    #[display("last square")]
    LastSquare,
    /// The move completes a line.
    #[display("win")]
    Win,
    /// The move denies the opponent's completing square.
    #[display("block")]
    Block,
    /// The move creates two threats at once.
    #[display("fork")]
    Fork,
    /// The move starts a threat on a line clear of the opponent's fork square.
    #[display("block fork")]
    BlockFork,
    /// The move takes the opponent's fork square directly.
    #[display("occupy fork square")]
    OccupyTrap,
    /// No forcing move; the fallback order decided.
    #[display("fallback")]
    Fallback,
}

/// A chosen move together with the tier that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Square to play.
    pub position: Position,
    /// Tier that selected the square.
    pub tier: Tier,
}

impl Decision {
    fn new(position: Position, tier: Tier) -> Self {
        Self { position, tier }
    }
}

/// Empty square that completes a line for `side`, if any.
pub fn winning_square(board: &Board, side: Side) -> Option<Position> {
    let mark = Square::Occupied(side);
    board.empty_squares().into_iter().find(|&pos| {
        lines_through(pos).any(|line| {
            line_mark_count(board, line, mark) == 2 && line_mark_count(board, line, Square::Empty) == 1
        })
    })
}

/// Lines through `pos` holding one `side` mark and two empty squares.
///
/// Placing `side` at `pos` turns each such line into a one-move threat.
fn open_lines_through(board: &Board, pos: Position, side: Side) -> impl Iterator<Item = &'static [Position; 3]> + '_ {
    let mark = Square::Occupied(side);
    lines_through(pos).filter(move |line| {
        line_mark_count(board, line, mark) == 1 && line_mark_count(board, line, Square::Empty) == 2
    })
}

/// First empty square where `side` would open two threats at once.
pub fn fork_square(board: &Board, side: Side) -> Option<Position> {
    board
        .empty_squares()
        .into_iter()
        .find(|&pos| open_lines_through(board, pos, side).count() >= 2)
}

/// First empty square that starts a `side` threat on a line avoiding `trap`.
///
/// This does not check whether the opponent's forced reply lands on another
/// fork square; positions exist where it does.
pub fn fork_blocker_square(board: &Board, side: Side, trap: Position) -> Option<Position> {
    board.empty_squares().into_iter().find(|&pos| {
        open_lines_through(board, pos, side).any(|line| !line.contains(&trap))
    })
}

/// Chooses a move for `side` and reports the deciding tier.
#[instrument(skip(board, fallback), fields(cells = %board.to_string().replace('\n', "/")))]
pub fn decide(board: &Board, side: Side, fallback: &FallbackOrder) -> Result<Decision, OracleError> {
    let empty = board.empty_squares();
    let decision = match empty.as_slice() {
        [] => return Err(OracleError::NoMoveAvailable),
        [only] => Decision::new(*only, Tier::LastSquare),
        _ => forcing_move(board, side)
            .or_else(|| fallback.first_empty(board).map(|pos| Decision::new(pos, Tier::Fallback)))
            .ok_or(OracleError::NoMoveAvailable)?,
    };

    debug!(position = %decision.position, tier = %decision.tier, "Oracle decided");
    Ok(decision)
}

/// Tiers 2 through 5.
fn forcing_move(board: &Board, side: Side) -> Option<Decision> {
    let opponent = side.opponent();

    if let Some(pos) = winning_square(board, side) {
        return Some(Decision::new(pos, Tier::Win));
    }
    if let Some(pos) = winning_square(board, opponent) {
        return Some(Decision::new(pos, Tier::Block));
    }
    if let Some(pos) = fork_square(board, side) {
        return Some(Decision::new(pos, Tier::Fork));
    }
    let trap = fork_square(board, opponent)?;
    Some(match fork_blocker_square(board, side, trap) {
        Some(pos) => Decision::new(pos, Tier::BlockFork),
        None => Decision::new(trap, Tier::OccupyTrap),
    })
}

/// Chooses a move for `side`.
///
/// Never returns an occupied square; fails only when the board is full.
pub fn next_move(board: &Board, side: Side, fallback: &FallbackOrder) -> Result<Position, OracleError> {
    decide(board, side, fallback).map(|decision| decision.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::has_winning_line;
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::{Rng, SeedableRng};

    fn board(cells: &str) -> Board {
        Board::from_cells(cells).unwrap()
    }

    fn decide_default(cells: &str, side: Side) -> Decision {
        decide(&board(cells), side, &FallbackOrder::default()).unwrap()
    }

    #[test]
    fn test_last_square_short_circuits() {
        let decision = decide_default("XOX|OX_|OXO", Side::O);
        assert_eq!(decision, Decision::new(Position::MiddleRight, Tier::LastSquare));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let result = decide(&board("XOX|XOO|OXX"), Side::X, &FallbackOrder::default());
        assert_eq!(result, Err(OracleError::NoMoveAvailable));
    }

    #[test]
    fn test_win_outranks_block() {
        let decision = decide_default("XX_|OO_|___", Side::X);
        assert_eq!(decision, Decision::new(Position::TopRight, Tier::Win));

        let decision = decide_default("XX_|OO_|X__", Side::O);
        assert_eq!(decision, Decision::new(Position::MiddleRight, Tier::Win));
    }

    #[test]
    fn test_blocks_opponent_line() {
        let decision = decide_default("XX_|_O_|___", Side::O);
        assert_eq!(decision, Decision::new(Position::TopRight, Tier::Block));
    }

    #[test]
    fn test_fork_square_detected() {
        let b = board("X__|_O_|__X");
        assert_eq!(fork_square(&b, Side::X), Some(Position::TopRight));
        assert_eq!(decide_default("X__|_O_|__X", Side::X), Decision::new(Position::TopRight, Tier::Fork));

        // Both corners open a row and a column for X.
        let after_top_right = b.place(Position::TopRight, Side::X).unwrap();
        assert!(winning_square(&after_top_right, Side::X).is_some());
        let after_bottom_left = b.place(Position::BottomLeft, Side::X).unwrap();
        assert_eq!(open_lines_through(&b, Position::BottomLeft, Side::X).count(), 2);
        assert!(winning_square(&after_bottom_left, Side::X).is_some());
    }

    #[test]
    fn test_two_adjacent_marks_are_a_win_not_a_fork() {
        // X already has a completing square, so no square opens two fresh threats.
        let b = board("XX_|_O_|___");
        assert_eq!(fork_square(&b, Side::X), None);
        assert_eq!(decide_default("XX_|_O_|___", Side::X), Decision::new(Position::TopRight, Tier::Win));
    }

    #[test]
    fn test_blocks_fork_with_counter_threat() {
        let decision = decide_default("X__|_O_|__X", Side::O);
        assert_eq!(decision, Decision::new(Position::TopCenter, Tier::BlockFork));
    }

    #[test]
    fn test_occupies_fork_square_without_counter_threat() {
        let b = board("XO_|___|_X_");
        assert_eq!(fork_square(&b, Side::X), Some(Position::BottomLeft));
        assert_eq!(fork_blocker_square(&b, Side::O, Position::BottomLeft), None);
        let decision = decide_default("XO_|___|_X_", Side::O);
        assert_eq!(decision, Decision::new(Position::BottomLeft, Tier::OccupyTrap));
    }

    #[test]
    fn test_fallback_follows_order() {
        let order = FallbackOrder::from_indices([4, 0, 2, 6, 8, 1, 3, 5, 7]).unwrap();
        let empty = Board::new();
        assert_eq!(
            decide(&empty, Side::X, &order).unwrap(),
            Decision::new(Position::Center, Tier::Fallback)
        );
        let taken = board("____X____");
        assert_eq!(next_move(&taken, Side::O, &order), Ok(Position::TopLeft));
    }

    /// Plays random legal moves from the empty board and stops at a random
    /// non-terminal position.
    fn random_position(rng: &mut StdRng) -> (Board, Side) {
        let mut b = Board::new();
        let mut to_move = Side::X;
        let depth = rng.random_range(0..9);
        for _ in 0..depth {
            let empty = b.empty_squares();
            let pos = *empty.choose(rng).unwrap();
            let next = b.place(pos, to_move).unwrap();
            if has_winning_line(&next, to_move) || next.empty_squares().is_empty() {
                break;
            }
            b = next;
            to_move = to_move.opponent();
        }
        (b, to_move)
    }

    #[test]
    fn test_random_positions_respect_tier_contracts() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..2000 {
            let (b, side) = random_position(&mut rng);
            let order = FallbackOrder::shuffled(&mut rng);
            let decision = decide(&b, side, &order).unwrap();

            assert!(b.empty_squares().contains(&decision.position), "{b}");

            let after = b.place(decision.position, side).unwrap();
            if winning_square(&b, side).is_some() {
                assert!(has_winning_line(&after, side), "missed win on\n{b}");
            } else if let Some(threat) = winning_square(&b, side.opponent()) {
                if b.empty_squares().len() > 1 {
                    assert_eq!(decision.tier, Tier::Block);
                    assert_eq!(decision.position, threat);
                }
            }
        }
    }
}
