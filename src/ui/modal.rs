// Modal UI components.
// Kind picker, breed detail overlay, and key help.

use pawdex::Kind;
use ratatui::{prelude::*, widgets::*};

use crate::state::{DetailState, KindPicker, LoadingState};

/// Centered rectangle clamped to the frame.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Draw the first-launch kind picker.
pub fn draw_kind_picker(frame: &mut Frame, picker: &KindPicker) {
    let modal_area = centered(frame.area(), 44, 9);
    frame.render_widget(Clear, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Choices
            Constraint::Length(1), // Instructions
        ])
        .split(modal_area);

    let items: Vec<ListItem> = Kind::ALL
        .iter()
        .map(|kind| {
            let icon = match kind {
                Kind::Cat => "🐱",
                Kind::Dog => "🐶",
            };
            ListItem::new(format!("{} {}", icon, kind.title()))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(picker.selection));

    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Which pets do you want to browse? "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list_widget, chunks[0], &mut list_state);

    let instructions = Line::from(vec![
        Span::styled(" Enter", Style::default().fg(Color::Yellow)),
        Span::styled(" = Choose  ", Style::default().fg(Color::DarkGray)),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::styled(" = Navigate  ", Style::default().fg(Color::DarkGray)),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::styled(" = Quit ", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(
        Paragraph::new(instructions).alignment(Alignment::Center),
        chunks[1],
    );
}

/// Draw the detail overlay for one breed.
pub fn draw_detail(frame: &mut Frame, detail: &DetailState) {
    let area = frame.area();
    let modal_area = centered(
        area,
        area.width.saturating_sub(8).max(40),
        area.height.saturating_sub(4).max(12),
    );
    frame.render_widget(Clear, modal_area);

    let breed = &detail.breed;
    let label = Style::default().fg(Color::DarkGray);
    let value = |text: &str| {
        if text.is_empty() {
            Span::styled("-", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(text.to_string())
        }
    };

    let mut lines = vec![
        Line::from(vec![Span::styled("Origin:      ", label), value(&breed.origin)]),
        Line::from(vec![Span::styled("Life span:   ", label), value(&breed.life_span)]),
        Line::from(vec![Span::styled("Temperament: ", label), value(&breed.temperament)]),
        Line::from(vec![
            Span::styled("Image:       ", label),
            value(breed.image_url.as_deref().unwrap_or_default()),
        ]),
        Line::default(),
        Line::from(value(&breed.description)),
        Line::default(),
        Line::from(Span::styled(
            "More images",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    match &detail.images {
        LoadingState::Idle | LoadingState::Loading => lines.push(Line::from(Span::styled(
            "⏳ Loading images...",
            Style::default().fg(Color::Yellow),
        ))),
        LoadingState::Error(e) => lines.push(Line::from(Span::styled(
            format!("❌ {}", e),
            Style::default().fg(Color::Red),
        ))),
        LoadingState::Loaded(urls) if urls.is_empty() => {
            lines.push(Line::from(Span::styled("No images", label)))
        }
        LoadingState::Loaded(urls) => {
            lines.extend(urls.iter().map(|url| Line::from(format!("  {}", url))))
        }
    }

    let star = if breed.is_favorite { "★" } else { "☆" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} {} ", star, breed.name))
        .title_bottom(Line::from(" f = favorite  Esc = close ").centered());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, modal_area);
}

/// Draw the key help overlay.
pub fn draw_help(frame: &mut Frame) {
    let bindings = [
        ("Tab", "Switch Breeds / Favorites"),
        ("↑↓ j k", "Move selection"),
        ("Enter", "Open breed details"),
        ("f", "Toggle favorite"),
        ("r", "Refresh current page"),
        ("n / p", "Next / previous page"),
        ("/", "Search breeds"),
        ("K", "Change pet kind"),
        ("q", "Quit"),
    ];

    let modal_area = centered(frame.area(), 46, bindings.len() as u16 + 2);
    frame.render_widget(Clear, modal_area);

    let lines: Vec<Line> = bindings
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!(" {:<8}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Keys "),
    );
    frame.render_widget(paragraph, modal_area);
}
