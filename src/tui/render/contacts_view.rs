use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::helpers::truncate;

/// Render the contacts directory, sorted by name.
pub fn render_contacts_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme.clone();
    let contacts = app.contacts.sorted_by_name();

    if contacts.is_empty() {
        let empty = Paragraph::new(" No contacts")
            .style(Style::default().fg(theme.dim).bg(theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let cursor = app.contacts_cursor.min(contacts.len() - 1);
    let visible = area.height as usize;
    let mut scroll = app.contacts_scroll.min(cursor);
    if cursor >= scroll + visible {
        scroll = cursor + 1 - visible;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(visible);
    let end = contacts.len().min(scroll + visible);
    for (row, contact) in contacts[scroll..end].iter().zip(scroll..end) {
        let is_cursor = row == cursor;
        let marker = if is_cursor { "> " } else { "  " };
        let base = if is_cursor {
            Style::default()
                .fg(theme.text_bright)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        let phone = contact.phone.as_deref().unwrap_or("");
        let task_count = contact.tasks.len();
        let mut spans = vec![
            Span::styled(marker, base),
            Span::styled(
                format!(" {} ", contact.initials),
                Style::default()
                    .fg(theme.text_bright)
                    .bg(theme.contact_color(&contact.color)),
            ),
            Span::styled(format!("  {}", truncate(&contact.name, 24)), base),
            Span::styled(
                format!("  {}", truncate(&contact.email, 28)),
                Style::default().fg(theme.dim),
            ),
        ];
        if !phone.is_empty() {
            spans.push(Span::styled(
                format!("  {phone}"),
                Style::default().fg(theme.dim),
            ));
        }
        if task_count > 0 {
            let plural = if task_count == 1 { "task" } else { "tasks" };
            spans.push(Span::styled(
                format!("  {task_count} {plural}"),
                Style::default().fg(theme.highlight),
            ));
        }
        lines.push(Line::from(spans));
    }

    app.contacts_cursor = cursor;
    app.contacts_scroll = scroll;
    let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}
