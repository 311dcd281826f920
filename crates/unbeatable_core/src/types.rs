//! Core domain types for tic-tac-toe.

use super::action::InvalidMove;
use super::position::Position;
use super::rules;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Side in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, strum::EnumIter)]
pub enum Side {
    /// Side X (moves first in a default session).
    X,
    /// Side O.
    O,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square marked by a side.
    Occupied(Side),
}

impl Square {
    /// Character used for this square in compact board notation.
    fn symbol(self) -> char {
        match self {
            Square::Empty => ' ',
            Square::Occupied(Side::X) => 'X',
            Square::Occupied(Side::O) => 'O',
        }
    }
}

impl From<Side> for Square {
    fn from(side: Side) -> Self {
        Square::Occupied(side)
    }
}

/// Error returned when a compact board string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BoardParseError {
    /// The string did not contain exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(usize),
    /// A character was not a mark or an empty marker.
    #[display("Unknown cell character {:?} at index {}", ch, index)]
    UnknownCell {
        /// Offending character.
        ch: char,
        /// Cell index of the character.
        index: usize,
    },
}

impl std::error::Error for BoardParseError {}

/// 3x3 tic-tac-toe board.
///
/// Squares are stored row-major, so `index = row * 3 + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Parses a compact nine-cell board such as `"XX__O____"`.
    ///
    /// `X` and `O` (either case) are marks; `_`, `.`, `-` and space are empty.
    /// Row separators `|` and newlines are skipped, so `"XO_|_X_|___"` works.
    #[instrument]
    pub fn from_cells(cells: &str) -> Result<Self, BoardParseError> {
        let chars: Vec<char> = cells.chars().filter(|c| !matches!(c, '|' | '\n' | '\r')).collect();
        if chars.len() != 9 {
            return Err(BoardParseError::WrongLength(chars.len()));
        }

        let mut board = Self::new();
        for (index, ch) in chars.into_iter().enumerate() {
            board.squares[index] = match ch {
                'X' | 'x' => Square::Occupied(Side::X),
                'O' | 'o' => Square::Occupied(Side::O),
                '_' | '.' | '-' | ' ' => Square::Empty,
                other => return Err(BoardParseError::UnknownCell { ch: other, index }),
            };
        }
        Ok(board)
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns every empty position in ascending index order.
    pub fn empty_squares(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Returns the board with `side` placed at `pos`.
    ///
    /// The receiver is never modified, so a rejected placement leaves no trace.
    pub fn place(&self, pos: Position, side: Side) -> Result<Self, InvalidMove> {
        if !self.is_empty(pos) {
            return Err(InvalidMove::Occupied(pos));
        }
        let mut next = *self;
        next.squares[pos.index()] = Square::Occupied(side);
        Ok(next)
    }

    /// Number of squares held by X and by O.
    pub fn mark_counts(&self) -> (usize, usize) {
        self.squares.iter().fold((0, 0), |(x, o), sq| match sq {
            Square::Occupied(Side::X) => (x + 1, o),
            Square::Occupied(Side::O) => (x, o + 1),
            Square::Empty => (x, o),
        })
    }

    /// Whether this board can arise from legal play with `first` moving first.
    ///
    /// The first side leads by zero or one mark and at most one side owns a
    /// completed line.
    pub fn is_consistent(&self, first: Side) -> bool {
        let (x, o) = self.mark_counts();
        let (lead, trail) = match first {
            Side::X => (x, o),
            Side::O => (o, x),
        };
        let balanced = lead == trail || lead == trail + 1;
        let both_won = rules::has_winning_line(self, Side::X) && rules::has_winning_line(self, Side::O);
        balanced && !both_won
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            let s = &self.squares[row * 3..row * 3 + 3];
            writeln!(f, " {} | {} | {} ", s[0].symbol(), s[1].symbol(), s[2].symbol())?;
            if row < 2 {
                writeln!(f, "---+---+---")?;
            }
        }
        Ok(())
    }
}
