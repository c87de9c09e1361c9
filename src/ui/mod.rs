// UI module for rendering the TUI.
// Contains widgets for tabs, breed lists, overlays, and the status bar.

mod list;
mod modal;
mod tabs;

use pawdex::SyncStatus;
use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    if let Some(picker) = &app.picker {
        modal::draw_kind_picker(frame, picker);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Search input or status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);
    draw_content(frame, app, chunks[1]);

    if let Some(input) = &app.search_input {
        draw_search_input(frame, input, chunks[2]);
    } else {
        draw_status_bar(frame, app, chunks[2]);
    }

    // Overlays (rendered last, on top of everything)
    if let Some(detail) = &app.detail {
        modal::draw_detail(frame, detail);
    }
    if app.show_help {
        modal::draw_help(frame);
    }
}

/// Draw the main content area based on active tab.
fn draw_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let tab = app.active_tab;
    let Some(catalog) = app.catalog.as_mut() else {
        list::render_empty(frame, area, "No pet kind selected");
        return;
    };

    let title = match tab {
        Tab::Breeds => format!(" {} - {} ", catalog.kind.title(), catalog.location()),
        Tab::Favorites => format!(" Favorite {} ", catalog.kind.title()),
    };
    let (list, empty) = match tab {
        Tab::Breeds => (&mut catalog.breeds, "No breeds cached yet. Press r to refresh"),
        Tab::Favorites => (&mut catalog.favorites, "No favorites yet. Press f on a breed"),
    };
    list::render_breeds_list(frame, list, area, &title, empty);
}

/// Draw the search prompt.
fn draw_search_input(frame: &mut Frame, input: &str, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" Search: ", Style::default().fg(Color::Yellow)),
        Span::raw(input),
        Span::styled("█", Style::default().fg(Color::Yellow)),
        Span::styled(
            "  (Enter = search, empty = pages, Esc = cancel)",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the one-line status bar.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let Some(catalog) = &app.catalog else {
        return;
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", catalog.kind.title()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(format!(" {} ", catalog.location())),
        Span::styled(
            format!("{} breeds ", catalog.breeds.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if app.sync_status() == Some(SyncStatus::Refreshing) {
        spans.push(Span::styled("⏳ syncing ", Style::default().fg(Color::Yellow)));
    } else if let Some(synced) = &catalog.last_synced {
        spans.push(Span::styled(
            format!("synced {} ", list::format_relative_time(synced)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(error) = &catalog.last_error {
        spans.push(Span::styled(
            format!("❌ {} ", error),
            Style::default().fg(Color::Red),
        ));
    }

    spans.push(Span::styled(
        " ? help  q quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
