//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::error::SleepError;
use crate::tui::app::{App, Screen};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start tracking tonight.
    Start,
    /// Stop tracking tonight.
    Stop,
    /// Clear every night.
    Clear,
    /// Rate with an explicit value, or the selected one.
    Rate(Option<i32>),
    /// Leave the rating screen without rating.
    Skip,
}

/// Poll for terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App<'_>) -> Result<Option<Action>, SleepError> {
    if event::poll(Duration::from_millis(100))
        .map_err(|e| SleepError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| SleepError::Terminal(format!("Event read failed: {e}")))?
        {
            return Ok(handle_key(app, key));
        }
    }

    Ok(None)
}

/// Map a key press to an action for the current screen.
pub fn handle_key(app: &mut App<'_>, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match app.screen {
        Screen::Tracker => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('s') => Some(Action::Start),
            KeyCode::Char('t') => Some(Action::Stop),
            KeyCode::Char('c') => Some(Action::Clear),
            KeyCode::Char('?') => {
                app.status = Some("s:start | t:stop | c:clear | q:quit".to_string());
                None
            }
            _ => None,
        },
        Screen::Quality { .. } => match key.code {
            KeyCode::Esc => Some(Action::Skip),
            KeyCode::Char('j') | KeyCode::Down => {
                app.select_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.select_previous();
                None
            }
            KeyCode::Enter => Some(Action::Rate(None)),
            KeyCode::Char(c @ '0'..='5') => c
                .to_digit(10)
                .and_then(|d| i32::try_from(d).ok())
                .map(|d| Action::Rate(Some(d))),
            KeyCode::Char('?') => {
                app.status = Some("j/k:select | Enter or 0-5:rate | Esc:skip".to_string());
                None
            }
            _ => None,
        },
    }
}
