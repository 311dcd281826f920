//! Draw detection.

use super::super::{Board, Square};
use super::win::winner;

/// Checks if the board is full (all squares occupied).
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A full board with no completed line.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let board = Board::from_cells("____X____").unwrap();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        let board = Board::from_cells("XOX|XOO|OXX").unwrap();
        assert!(is_full(&board));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let board = Board::from_cells("XXX|OOX|OXO").unwrap();
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
