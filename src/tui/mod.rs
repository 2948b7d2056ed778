//! Terminal User Interface (TUI) for sleeptrack.
//!
//! Binds the tracker and rating view-models to an interactive screen.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, Screen};

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::cli::AppContext;
use crate::error::SleepError;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(ctx: &AppContext) -> Result<(), SleepError> {
    enable_raw_mode()
        .map_err(|e| SleepError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| SleepError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| SleepError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(ctx);
    let result = run_app(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<'_>) -> Result<(), SleepError> {
    while !app.should_quit {
        app.navigate();

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| SleepError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(app)? {
            apply(app, action);
        }
    }

    Ok(())
}

fn apply(app: &mut App<'_>, action: event::Action) {
    match action {
        event::Action::Quit => app.should_quit = true,
        event::Action::Start => app.start(),
        event::Action::Stop => app.stop(),
        event::Action::Clear => app.clear(),
        event::Action::Rate(rating) => app.rate(rating),
        event::Action::Skip => app.skip_rating(),
    }
}
