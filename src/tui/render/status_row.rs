use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the bottom status row: search input, confirm prompt, transient
/// message, or a key hint.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = if let Some(confirm) = &app.confirm {
        Line::from(Span::styled(
            format!(" {}", confirm.prompt),
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.error)
                .add_modifier(Modifier::BOLD),
        ))
    } else if app.mode == Mode::Search {
        Line::from(vec![
            Span::styled(" /", Style::default().fg(theme.highlight)),
            Span::styled(
                app.search_input.clone(),
                Style::default().fg(theme.text_bright),
            ),
            Span::styled("▏", Style::default().fg(theme.dim)),
        ])
    } else if let Some(message) = &app.status_message {
        Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(theme.text_bright),
        ))
    } else if let Some(filter) = &app.filter {
        Line::from(vec![
            Span::styled(
                format!(" filter: {filter}"),
                Style::default()
                    .fg(theme.search_match_fg)
                    .bg(theme.search_match_bg),
            ),
            Span::styled("  esc clears", Style::default().fg(theme.dim)),
        ])
    } else if app.drag.is_active() {
        Line::from(Span::styled(
            " drop on a lane to move · esc cancels",
            Style::default().fg(theme.dim),
        ))
    } else {
        Line::from(Span::styled(
            " ? help · / search · q quit",
            Style::default().fg(theme.dim),
        ))
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}
