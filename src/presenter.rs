//! Presentation surface driven by the orchestrator.

use unbeatable_core::{Position, Side};

/// Something that can show the game to a person.
///
/// Only the [`Orchestrator`](crate::Orchestrator) calls these; the core never
/// does.
pub trait Presenter {
    /// Draws `side`'s mark in the cell at `position`.
    fn render_mark(&mut self, position: Position, side: Side);

    /// Removes every drawn mark.
    fn clear(&mut self);

    /// Shows a short status or result line.
    fn show_status(&mut self, message: &str);
}

/// Presenter that records marks and the latest status in memory.
///
/// Backs the terminal UI and is handy for driving the orchestrator headless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    marks: [Option<Side>; 9],
    status: String,
}

impl BoardView {
    /// Creates an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark drawn at `position`, if any.
    pub fn mark(&self, position: Position) -> Option<Side> {
        self.marks[position.index()]
    }

    /// Latest status line.
    pub fn status(&self) -> &str {
        &self.status
    }
}

impl Presenter for BoardView {
    fn render_mark(&mut self, position: Position, side: Side) {
        self.marks[position.index()] = Some(side);
    }

    fn clear(&mut self) {
        self.marks = [None; 9];
    }

    fn show_status(&mut self, message: &str) {
        self.status = message.to_string();
    }
}
