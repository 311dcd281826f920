//! Terminal UI for playing against the engine.

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tracing::{error, info, instrument};
use unbeatable::AppConfig;

use app::App;

/// Runs the interactive game until the user quits.
#[instrument(skip(config))]
pub fn run(config: &AppConfig) -> Result<()> {
    info!(engine_first = *config.engine_first(), "Starting terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(*config.seed(), *config.engine_first());
    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Terminal UI error");
    }
    info!("Terminal UI closed");
    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit() {
            return Ok(());
        }

        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => input::key_action(key.code),
            Event::Mouse(mouse) => input::mouse_action(mouse, &app),
            _ => None,
        };
        if let Some(action) = action {
            app.handle(action);
        }
    }
}
