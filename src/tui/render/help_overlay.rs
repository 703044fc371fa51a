use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::centered_rect;

const BINDINGS: &[(&str, &str)] = &[
    ("1/2/3, tab", "switch view"),
    ("← → ↑ ↓, hjkl", "move around the board"),
    ("enter / click", "open task details"),
    ("drag card", "move between lanes"),
    ("m / right-click", "quick move to adjacent lane"),
    ("space", "toggle subtask (in details)"),
    ("x / d", "delete task or contact"),
    ("/", "search title and description"),
    ("r", "reload from the store"),
    ("esc", "close / cancel / clear filter"),
    ("q", "quit"),
];

/// Render the key binding overlay. Any key dismisses it.
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let height = (BINDINGS.len() as u16) + 4;
    let overlay = centered_rect(area, 52, height);
    frame.render_widget(Clear, overlay);

    let mut lines = vec![Line::default()];
    for (keys, action) in BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {keys:>16}  "),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(*action, Style::default().fg(theme.text)),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Help ", Style::default().fg(theme.highlight)))
        .border_style(Style::default().fg(theme.highlight))
        .style(Style::default().bg(theme.background));
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}
