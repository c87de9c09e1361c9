// Breed list rendering.
// Provides styled list views with loading, error, and empty states.

use chrono::{DateTime, Utc};
use pawdex::Breed;
use ratatui::{prelude::*, widgets::*};

use crate::state::{LoadingState, SelectableList};

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

/// One list row: favorite marker, name, origin, first traits.
fn breed_line(breed: &Breed) -> Line<'_> {
    let marker = if breed.is_favorite { "★ " } else { "  " };
    let traits = breed.traits();
    let traits = traits.iter().take(3).copied().collect::<Vec<_>>().join(", ");

    Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(breed.name.as_str(), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("  {}", breed.origin),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(format!("  {}", traits), Style::default().fg(Color::DarkGray)),
    ])
}

/// Render a list of breeds.
pub fn render_breeds_list(
    frame: &mut Frame,
    list: &mut SelectableList<Breed>,
    area: Rect,
    title: &str,
    empty_message: &str,
) {
    match &list.data {
        LoadingState::Idle => render_empty(frame, area, empty_message),
        LoadingState::Loading => render_loading(frame, area, "Loading breeds"),
        LoadingState::Error(e) => render_error(frame, area, e),
        LoadingState::Loaded(breeds) => {
            if breeds.is_empty() {
                render_empty(frame, area, empty_message);
            } else {
                let items: Vec<ListItem> = breeds
                    .iter()
                    .map(|breed| ListItem::new(breed_line(breed)))
                    .collect();

                let list_widget = List::new(items)
                    .block(Block::default().borders(Borders::ALL).title(title))
                    .highlight_style(
                        Style::default()
                            .bg(Color::DarkGray)
                            .add_modifier(Modifier::BOLD),
                    )
                    .highlight_symbol("> ");

                frame.render_stateful_widget(list_widget, area, &mut list.list_state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(&now), "just now");
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::minutes(5))),
            "5m ago"
        );
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::hours(3))),
            "3h ago"
        );
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::days(2))),
            "2d ago"
        );
    }
}
