//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::format::format_hms;
use crate::night::Quality;
use crate::tui::app::{App, Screen};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App<'_>) {
    // Create layout: header, buttons, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Buttons
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    match &app.screen {
        Screen::Tracker => {
            render_buttons(frame, app, chunks[1]);
            render_nights(frame, app, chunks[2]);
        }
        Screen::Quality {
            night, selected, ..
        } => {
            let slept = format!(" Slept {} ", format_hms(night.duration()));
            frame.render_widget(
                Paragraph::new(slept).style(Style::default().fg(Color::DarkGray)),
                chunks[1],
            );
            render_quality(frame, app, *selected, chunks[2]);
        }
    }
    render_status_bar(frame, app, chunks[3]);
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let title = match &app.screen {
        Screen::Tracker => " Sleep Tracker ".to_string(),
        Screen::Quality { night, .. } => format!(" How did you sleep? (night #{}) ", night.night_id),
    };

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Render the start/stop/clear buttons, greyed out when hidden.
fn render_buttons(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let button = |key: &'static str, label: &'static str, visible: bool| {
        let style = if visible {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!(" [{key}] {label} "), style)
    };

    let line = Line::from(vec![
        button("s", "Start", *app.tracker.start_button_visible().borrow()),
        button("t", "Stop", *app.tracker.stop_button_visible().borrow()),
        button("c", "Clear", *app.tracker.clear_button_visible().borrow()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the formatted nights.
fn render_nights(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let text = app.tracker.nights_string().borrow().clone();

    let body = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(body, area);
}

/// Render the quality choices.
fn render_quality(frame: &mut Frame<'_>, app: &App<'_>, selected: usize, area: Rect) {
    let labels = app.labels();
    let items: Vec<ListItem<'_>> = Quality::ALL
        .iter()
        .map(|q| {
            let rating = q.rating();
            let color = match rating {
                0 | 1 => Color::Red,
                2 | 3 => Color::Yellow,
                _ => Color::Green,
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{rating} "), Style::default().fg(Color::DarkGray)),
                Span::styled(labels.quality_name(rating), Style::default().fg(color)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let status = app.status.as_deref().unwrap_or("");

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(bar, area);
}
