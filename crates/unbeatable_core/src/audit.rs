//! Exhaustive game-tree audit of an automated player.
//!
//! The player's replies are deterministic once its fallback order is fixed,
//! so every game it can take part in is enumerated by branching only on the
//! opponent's moves. X always moves first.

use super::action::Move;
use super::player::Player;
use super::rules;
use super::{Board, Position, Side, Square};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Outcome counts over every game against every opponent line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Side the audited player marked.
    pub side: Side,
    /// Games the player won.
    pub wins: usize,
    /// Games that filled the board.
    pub draws: usize,
    /// Games the opponent won.
    pub losses: usize,
    /// Losses where the player had faced at most one threat on its last turn.
    ///
    /// Blocking is a higher tier than anything positional, so this stays zero
    /// unless the tier ordering is broken.
    pub single_threat_losses: usize,
    /// First losing game found, in move order.
    pub first_loss: Option<Vec<Move>>,
}

impl AuditReport {
    fn new(side: Side) -> Self {
        Self {
            side,
            wins: 0,
            draws: 0,
            losses: 0,
            single_threat_losses: 0,
            first_loss: None,
        }
    }

    /// Total games enumerated.
    pub fn games(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    /// Whether no opponent line beats the player.
    pub fn is_unbeaten(&self) -> bool {
        self.losses == 0
    }
}

impl std::fmt::Display for AuditReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} over {} games: {} wins, {} draws, {} losses",
            self.side,
            self.games(),
            self.wins,
            self.draws,
            self.losses
        )
    }
}

/// Enumerates every game `player` can play and tallies the outcomes.
#[instrument(skip(player), fields(side = %player.side(), fallback = %player.fallback()))]
pub fn audit(player: &Player) -> AuditReport {
    let mut report = AuditReport::new(player.side());
    let mut line = Vec::with_capacity(9);
    explore(&Board::new(), Side::X, player, 0, &mut line, &mut report);
    info!(
        wins = report.wins,
        draws = report.draws,
        losses = report.losses,
        "Audit complete"
    );
    report
}

/// Number of distinct empty squares that complete a line for `side`.
pub fn threat_count(board: &Board, side: Side) -> usize {
    let mark = Square::Occupied(side);
    board
        .empty_squares()
        .into_iter()
        .filter(|&pos| {
            rules::lines_through(pos).any(|line| {
                rules::line_mark_count(board, line, mark) == 2
                    && rules::line_mark_count(board, line, Square::Empty) == 1
            })
        })
        .count()
}

fn explore(
    board: &Board,
    to_move: Side,
    player: &Player,
    threats_faced: usize,
    line: &mut Vec<Move>,
    report: &mut AuditReport,
) {
    if to_move == player.side() {
        let threats = threat_count(board, player.opponent());
        // Every non-terminal board has an empty square.
        let Ok(pos) = player.next_move(board) else {
            return;
        };
        step(board, pos, to_move, player, threats, line, report);
    } else {
        for pos in board.empty_squares() {
            step(board, pos, to_move, player, threats_faced, line, report);
        }
    }
}

fn step(
    board: &Board,
    pos: Position,
    side: Side,
    player: &Player,
    threats_faced: usize,
    line: &mut Vec<Move>,
    report: &mut AuditReport,
) {
    let Ok(next) = board.place(pos, side) else {
        return;
    };
    line.push(Move::new(side, pos));

    if rules::has_winning_line(&next, side) {
        if side == player.side() {
            report.wins += 1;
        } else {
            report.losses += 1;
            if threats_faced <= 1 {
                report.single_threat_losses += 1;
            }
            if report.first_loss.is_none() {
                report.first_loss = Some(line.clone());
            }
        }
    } else if rules::is_full(&next) {
        report.draws += 1;
    } else {
        explore(&next, side.opponent(), player, threats_faced, line, report);
    }

    line.pop();
}
