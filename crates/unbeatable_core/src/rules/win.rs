//! Win detection and line counting.

use super::super::{Board, Position, Side, Square};
use tracing::instrument;

/// Three positions that win when held by one side.
pub type Line = [Position; 3];

/// The 8 winning lines: rows, then columns, then diagonals.
///
/// Tier searches scan this table in order, so the order is part of the
/// oracle's tie-breaking.
pub const LINES: [Line; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Lines passing through `pos`, in table order.
pub fn lines_through(pos: Position) -> impl Iterator<Item = &'static Line> {
    let lines: &'static [Line; 8] = &LINES;
    lines.iter().filter(move |line| line.contains(&pos))
}

/// Counts the squares of `line` equal to `mark` (0-3).
pub fn line_mark_count(board: &Board, line: &Line, mark: Square) -> usize {
    line.iter().filter(|pos| board.get(**pos) == mark).count()
}

/// Whether `side` holds all three squares of any line.
pub fn has_winning_line(board: &Board, side: Side) -> bool {
    LINES
        .iter()
        .any(|line| line_mark_count(board, line, Square::Occupied(side)) == 3)
}

/// Returns the side with a completed line, if any.
///
/// Boards reachable by legal play never have two winners; X is reported
/// first if one is handed in anyway.
#[instrument]
pub fn winner(board: &Board) -> Option<Side> {
    [Side::X, Side::O]
        .into_iter()
        .find(|side| has_winning_line(board, *side))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(winner(&board), None);
        assert!(!has_winning_line(&board, Side::X));
    }

    #[test]
    fn test_winner_top_row() {
        let board = Board::from_cells("XXX|OO_|___").unwrap();
        assert_eq!(winner(&board), Some(Side::X));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = Board::from_cells("XXO|XO_|O__").unwrap();
        assert!(has_winning_line(&board, Side::O));
        assert!(!has_winning_line(&board, Side::X));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = Board::from_cells("XX_|___|___").unwrap();
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_line_mark_count_counts_each_mark() {
        let board = Board::from_cells("XO_|___|___").unwrap();
        let top = &LINES[0];
        assert_eq!(line_mark_count(&board, top, Square::Occupied(Side::X)), 1);
        assert_eq!(line_mark_count(&board, top, Square::Occupied(Side::O)), 1);
        assert_eq!(line_mark_count(&board, top, Square::Empty), 1);
    }

    #[test]
    fn test_lines_through_counts() {
        assert_eq!(lines_through(Position::Center).count(), 4);
        assert_eq!(lines_through(Position::TopLeft).count(), 3);
        assert_eq!(lines_through(Position::TopCenter).count(), 2);
    }

    #[test]
    fn test_win_check_is_idempotent() {
        let board = Board::from_cells("O_X|_X_|X_O").unwrap();
        let first = has_winning_line(&board, Side::X);
        assert_eq!(first, has_winning_line(&board, Side::X));
        assert!(first);
    }
}
