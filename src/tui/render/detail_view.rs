use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::App;

use super::helpers::{avatar_spans, centered_rect, truncate};

/// Render the task detail overlay: a pure read of the cached entry.
pub fn render_detail_view(frame: &mut Frame, app: &App, area: Rect) {
    let Some(detail) = &app.detail else {
        return;
    };
    let Some(task) = app.tasks.get(&detail.task_id) else {
        return;
    };
    let theme = &app.theme;

    let width = (area.width * 3 / 5).clamp(30, 70).min(area.width);
    let height = (area.height * 4 / 5).clamp(12, 32).min(area.height);
    let overlay = centered_rect(area, width, height);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let inner_width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    let badge = if task.category.trim().is_empty() {
        "Task".to_string()
    } else {
        task.category.clone()
    };
    lines.push(Line::from(Span::styled(
        format!(" {badge} "),
        Style::default()
            .fg(theme.text_bright)
            .bg(theme.category_color(&badge)),
    )));
    lines.push(Line::from(Span::styled(
        truncate(&task.title, inner_width),
        Style::default()
            .fg(theme.text_bright)
            .add_modifier(Modifier::BOLD),
    )));
    if !task.description.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            task.description.clone(),
            Style::default().fg(theme.text),
        )));
    }
    lines.push(Line::default());

    let due = task
        .due_date
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "—".to_string());
    lines.push(Line::from(vec![
        Span::styled("Due date: ", Style::default().fg(theme.dim)),
        Span::styled(due, Style::default().fg(theme.text)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Priority: ", Style::default().fg(theme.dim)),
        Span::styled(
            format!("{} {}", task.priority.label(), task.priority.glyph()),
            Style::default().fg(theme.priority_color(task.priority)),
        ),
    ]));

    lines.push(Line::from(Span::styled(
        "Assigned to:",
        Style::default().fg(theme.dim),
    )));
    if task.assigned_to.is_empty() {
        lines.push(Line::from(Span::styled(
            "  nobody",
            Style::default().fg(theme.dim),
        )));
    } else {
        let avatars = avatar_spans(&task.assigned_to, |id| app.contacts.get(id), theme);
        let mut spans = vec![Span::raw("  ")];
        spans.extend(avatars);
        lines.push(Line::from(spans));
        for contact_id in &task.assigned_to {
            let name = app
                .contacts
                .get(contact_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| format!("({contact_id})"));
            lines.push(Line::from(Span::styled(
                format!("  {name}"),
                Style::default().fg(theme.text),
            )));
        }
    }

    lines.push(Line::from(Span::styled(
        "Subtasks:",
        Style::default().fg(theme.dim),
    )));
    if task.subtasks.is_empty() {
        lines.push(Line::from(Span::styled(
            "  none",
            Style::default().fg(theme.dim),
        )));
    } else {
        for (i, subtask) in task.subtasks.iter().enumerate() {
            let mark = if subtask.done { "[x]" } else { "[ ]" };
            let is_cursor = i == detail.subtask_cursor;
            let style = if is_cursor {
                Style::default()
                    .fg(theme.text_bright)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            let prefix = if is_cursor { "> " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!(
                    "{prefix}{mark} {}",
                    truncate(&subtask.text, inner_width.saturating_sub(8))
                ),
                style,
            )));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "space toggle subtask · m move · d delete · esc close",
        Style::default().fg(theme.dim),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}
