use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::centered_rect;

/// Render the quick "Move to" popup. Options are only the statuses
/// adjacent to the task's current lane.
pub fn render_move_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(popup) = &app.move_popup else {
        return;
    };
    let theme = &app.theme;

    let height = (popup.options.len() as u16) + 2;
    let overlay = centered_rect(area, 24, height);
    frame.render_widget(Clear, overlay);

    let current = app.tasks.get(&popup.task_id).map(|t| t.status);
    let mut lines: Vec<Line> = Vec::new();
    for (i, status) in popup.options.iter().enumerate() {
        let arrow = match current {
            Some(from) if status.index() < from.index() => "↑",
            _ => "↓",
        };
        let style = if i == popup.cursor {
            Style::default()
                .fg(theme.text_bright)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        lines.push(Line::from(Span::styled(
            format!(" {arrow} {}", status.label()),
            style,
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Move to ",
            Style::default().fg(theme.highlight),
        ))
        .border_style(Style::default().fg(theme.highlight))
        .style(Style::default().bg(theme.background));
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}
