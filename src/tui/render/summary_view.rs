use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::stats;
use crate::tui::app::App;

/// Render the board summary figures.
pub fn render_summary_view(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let figures = stats::compute(app.tasks.tasks(), Local::now().date_naive());

    let number = |n: usize| {
        Span::styled(
            format!("{n:>4}"),
            Style::default()
                .fg(theme.text_bright)
                .add_modifier(Modifier::BOLD),
        )
    };
    let label = |text: &str| Span::styled(format!("  {text}"), Style::default().fg(theme.text));

    let mut lines = vec![
        Line::default(),
        Line::from(vec![number(figures.todo), label("to do")]),
        Line::from(vec![number(figures.progress), label("in progress")]),
        Line::from(vec![number(figures.feedback), label("awaiting feedback")]),
        Line::from(vec![number(figures.done), label("done")]),
        Line::default(),
        Line::from(vec![number(figures.total), label("tasks on the board")]),
        Line::from(vec![
            Span::styled(
                format!("{:>4}", figures.urgent),
                Style::default()
                    .fg(theme.urgent)
                    .add_modifier(Modifier::BOLD),
            ),
            label("urgent"),
        ]),
    ];

    lines.push(Line::default());
    match figures.next_urgent_due {
        Some(due) => lines.push(Line::from(vec![
            Span::styled("  Upcoming deadline: ", Style::default().fg(theme.dim)),
            Span::styled(
                due.format("%B %-d, %Y").to_string(),
                Style::default().fg(theme.text_bright),
            ),
        ])),
        None => lines.push(Line::from(Span::styled(
            "  No urgent tasks",
            Style::default().fg(theme.dim),
        ))),
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}
