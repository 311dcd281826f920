//! Keyboard and mouse mapping.

use super::app::App;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position as ScreenPosition;
use unbeatable_core::Position;

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Play the given cell.
    Select(Position),
    /// Play the cell under the cursor.
    SelectCursor,
    /// Move the cursor one cell in an arrow direction.
    MoveCursor(KeyCode),
    /// Press the control button (Switch or Again).
    Control,
    /// Abandon the current game.
    Restart,
    /// Leave the program.
    Quit,
}

/// Maps a key press to an action.
pub fn key_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10)? as usize - 1;
            Position::from_index(index).map(Action::Select)
        }
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => Some(Action::MoveCursor(key)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::SelectCursor),
        KeyCode::Char('s') | KeyCode::Char('a') => Some(Action::Control),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Maps a left click to the cell or button under it.
pub fn mouse_action(mouse: MouseEvent, app: &App) -> Option<Action> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let point = ScreenPosition::new(mouse.column, mouse.row);
    if app.control_area().contains(point) {
        return Some(Action::Control);
    }
    app.cell_at(point).map(Action::Select)
}

/// Moves cursor based on arrow keys.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_select_cells() {
        assert_eq!(key_action(KeyCode::Char('1')), Some(Action::Select(Position::TopLeft)));
        assert_eq!(key_action(KeyCode::Char('9')), Some(Action::Select(Position::BottomRight)));
        assert_eq!(key_action(KeyCode::Char('0')), None);
    }

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Right), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Down), Position::BottomCenter);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Right), Position::BottomRight);
    }
}
