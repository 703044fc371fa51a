use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::model::Contact;
use crate::tui::theme::Theme;

/// Truncate to a display width, appending `…` when something was cut.
pub(super) fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Avatars are capped at this many; the rest collapse into a `+N` chip.
pub(super) const MAX_AVATARS: usize = 5;

/// Build avatar spans for an assignee list: up to [`MAX_AVATARS`] colored
/// initials chips plus an overflow count. Unknown ids (contact deleted,
/// cache not yet converged) render as a dim placeholder chip.
pub(super) fn avatar_spans<'a>(
    assigned_to: &[String],
    lookup: impl Fn(&str) -> Option<&'a Contact>,
    theme: &Theme,
) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for contact_id in assigned_to.iter().take(MAX_AVATARS) {
        match lookup(contact_id) {
            Some(contact) => {
                spans.push(Span::styled(
                    format!(" {} ", contact.initials),
                    Style::default()
                        .fg(theme.text_bright)
                        .bg(theme.contact_color(&contact.color)),
                ));
            }
            None => {
                spans.push(Span::styled(
                    " ? ",
                    Style::default().fg(theme.text_bright).bg(theme.dim),
                ));
            }
        }
        spans.push(Span::raw(" "));
    }
    let overflow = assigned_to.len().saturating_sub(MAX_AVATARS);
    if overflow > 0 {
        spans.push(Span::styled(
            format!(" +{overflow} "),
            Style::default().fg(theme.text_bright).bg(theme.lane_border),
        ));
    }
    spans
}

/// A centered popup rectangle of the given size, clamped to the frame.
pub(super) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 8), "a longe…");
        assert_eq!(truncate("日本語のテキスト", 7), "日本語…");
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 10, 10);
        let rect = centered_rect(area, 40, 4);
        assert_eq!(rect.width, 10);
        assert_eq!(rect.y, 3);
    }
}
