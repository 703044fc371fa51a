use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, View};

/// Render the top tab bar and its separator line.
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let tabs = [
        (View::Board, format!("Board ({})", app.tasks.len())),
        (View::Contacts, format!("Contacts ({})", app.contacts.len())),
        (View::Summary, "Summary".to_string()),
    ];

    let mut spans = vec![Span::styled(
        " kanri ",
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD),
    )];
    for (i, (view, label)) in tabs.iter().enumerate() {
        let style = if app.view == *view {
            Style::default()
                .fg(theme.text_bright)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.dim)
        };
        spans.push(Span::styled(format!(" {} {label} ", i + 1), style));
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.background));
    frame.render_widget(bar, Rect { height: 1, ..area });

    if area.height > 1 {
        let separator = Paragraph::new(Line::from(Span::styled(
            "─".repeat(area.width as usize),
            Style::default().fg(theme.lane_border),
        )))
        .style(Style::default().bg(theme.background));
        frame.render_widget(
            separator,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}
