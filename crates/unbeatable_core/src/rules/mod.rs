//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board): the fixed winning-line
//! table, line counting, and terminal checks. The oracle and the session
//! both build on these.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{has_winning_line, line_mark_count, lines_through, winner, Line, LINES};
