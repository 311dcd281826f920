//! Application state and logic.

use super::input::{move_cursor, Action};
use ratatui::layout::{Position as ScreenPosition, Rect};
use tracing::debug;
use unbeatable::{BoardView, Orchestrator};
use unbeatable_core::Position;

/// Main application state.
pub struct App {
    orchestrator: Orchestrator<BoardView>,
    cursor: Position,
    cell_areas: [Rect; 9],
    control_area: Rect,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(seed: Option<u64>, engine_first: bool) -> Self {
        Self {
            orchestrator: Orchestrator::new(BoardView::new(), seed).with_engine_first(engine_first),
            cursor: Position::Center,
            cell_areas: [Rect::default(); 9],
            control_area: Rect::default(),
            should_quit: false,
        }
    }

    /// The game driver.
    pub fn orchestrator(&self) -> &Orchestrator<BoardView> {
        &self.orchestrator
    }

    /// Highlighted cell.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Screen area of the control button from the last draw.
    pub fn control_area(&self) -> Rect {
        self.control_area
    }

    /// Records where the last draw put each cell and the control button.
    pub fn set_layout(&mut self, cell_areas: [Rect; 9], control_area: Rect) {
        self.cell_areas = cell_areas;
        self.control_area = control_area;
    }

    /// Cell drawn under `point`, if any.
    pub fn cell_at(&self, point: ScreenPosition) -> Option<Position> {
        Position::ALL
            .into_iter()
            .find(|pos| self.cell_areas[pos.index()].contains(point))
    }

    /// Applies a user action.
    pub fn handle(&mut self, action: Action) {
        debug!(?action, "Handling action");
        match action {
            Action::Select(pos) => self.select(pos),
            Action::SelectCursor => self.select(self.cursor),
            Action::MoveCursor(key) => self.cursor = move_cursor(self.cursor, key),
            Action::Control => {
                self.orchestrator.press_control();
            }
            Action::Restart => self.orchestrator.reset(),
            Action::Quit => self.should_quit = true,
        }
    }

    fn select(&mut self, pos: Position) {
        self.cursor = pos;
        // Rejections are already shown in the status line.
        let _ = self.orchestrator.select_cell(pos.index());
    }
}
