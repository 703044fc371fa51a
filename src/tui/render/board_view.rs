use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::model::{Priority, Status, Task};
use crate::tui::app::App;
use crate::tui::drag::{BoardHits, CardHit, LaneHit};
use crate::tui::theme::Theme;

use super::helpers::{avatar_spans, truncate};

/// Everything needed to draw one card, precomputed so the borrow of the
/// caches is released before scroll state and hit rects are written back.
struct CardPlan {
    task_id: String,
    badge: String,
    badge_color: Color,
    title: String,
    description: String,
    progress: Option<(usize, usize)>,
    avatars: Vec<Span<'static>>,
    due: Option<String>,
    priority: Priority,
    height: u16,
}

fn plan_card(app: &App, task: &Task) -> CardPlan {
    let description = task.description.trim().to_string();
    let progress = (!task.subtasks.is_empty()).then(|| task.subtask_progress());
    let avatars = avatar_spans(&task.assigned_to, |id| app.contacts.get(id), &app.theme);
    let due = task.due_date.map(|d| d.format("%d/%m/%Y").to_string());
    let has_footer = !avatars.is_empty() || due.is_some();

    let mut height = 2 + 2; // borders + badge row + title row
    if !description.is_empty() {
        height += 1;
    }
    if progress.is_some() {
        height += 1;
    }
    if has_footer {
        height += 1;
    }

    let badge = if task.category.trim().is_empty() {
        "Task".to_string()
    } else {
        task.category.clone()
    };
    CardPlan {
        task_id: task.id.clone(),
        badge_color: app.theme.category_color(&badge),
        badge,
        title: task.title.clone(),
        description,
        progress,
        avatars,
        due,
        priority: task.priority,
        height,
    }
}

/// Render the four lanes, the cards, and — mid-drag — the placeholder.
/// Records every lane body and card rectangle into `app.hits` for the
/// drag engine's hit testing on the next pointer event.
pub fn render_board_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let plans: [Vec<CardPlan>; 4] = {
        let lanes = app.lanes();
        lanes.map(|lane| lane.into_iter().map(|task| plan_card(app, task)).collect())
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let hover = app.drag.hover();
    let dragged = app.drag.dragged_id().map(str::to_string);
    let grab_height = app.drag.grab_height().max(3);
    let filtering = app.is_filtering();

    let mut hits = BoardHits::default();
    for (i, status) in Status::ALL.into_iter().enumerate() {
        let lane_plans = &plans[i];
        let lane_hover = hover.filter(|h| h.status == status);

        let border_color = if lane_hover.is_some() {
            app.theme.drop_active
        } else {
            app.theme.lane_border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(
                format!(" {} ({}) ", status.label(), lane_plans.len()),
                Style::default().fg(app.theme.text),
            ))
            .style(Style::default().bg(app.theme.background));
        let body = block.inner(chunks[i]);
        frame.render_widget(block, chunks[i]);

        // Keep the cursor's card in view for its lane.
        let scroll = {
            let scroll = &mut app.lane_scroll[i];
            *scroll = (*scroll).min(lane_plans.len().saturating_sub(1));
            if app.board_cursor.lane == i && !lane_plans.is_empty() {
                let cursor = app.board_cursor.card.min(lane_plans.len() - 1);
                app.board_cursor.card = cursor;
                if cursor < *scroll {
                    *scroll = cursor;
                }
                while *scroll < cursor {
                    let total: u16 = lane_plans[*scroll..=cursor].iter().map(|p| p.height).sum();
                    if total <= body.height {
                        break;
                    }
                    *scroll += 1;
                }
            }
            *scroll
        };

        let mut lane_hit = LaneHit {
            status,
            area: body,
            cards: Vec::new(),
        };

        if lane_plans.is_empty() {
            if lane_hover.is_some() {
                let height = grab_height.min(body.height);
                draw_placeholder(frame, &app.theme, Rect::new(body.x, body.y, body.width, height));
            } else {
                render_empty_lane(frame, &app.theme, status, body, filtering);
            }
            hits.lanes.push(lane_hit);
            continue;
        }

        let placeholder_at = lane_hover.map(|h| h.insert_index);
        let mut placeholder_drawn = false;
        // Insertion slots count non-dragged cards from the lane top.
        let mut slot = lane_plans[..scroll]
            .iter()
            .filter(|p| dragged.as_deref() != Some(p.task_id.as_str()))
            .count();

        let bottom = body.y + body.height;
        let mut y = body.y;
        for (idx, plan) in lane_plans.iter().enumerate().skip(scroll) {
            let is_dragged = dragged.as_deref() == Some(plan.task_id.as_str());
            if !is_dragged && !placeholder_drawn && placeholder_at == Some(slot) {
                if y + grab_height > bottom {
                    break;
                }
                draw_placeholder(frame, &app.theme, Rect::new(body.x, y, body.width, grab_height));
                y += grab_height;
                placeholder_drawn = true;
            }
            if y + plan.height > bottom {
                break;
            }
            let card_area = Rect::new(body.x, y, body.width, plan.height);
            let is_cursor = app.board_cursor.lane == i && app.board_cursor.card == idx;
            draw_card(frame, &app.theme, plan, card_area, is_cursor, is_dragged);
            lane_hit.cards.push(CardHit {
                task_id: plan.task_id.clone(),
                area: card_area,
            });
            y += plan.height;
            if !is_dragged {
                slot += 1;
            }
        }
        if placeholder_at.is_some() && !placeholder_drawn && y + grab_height <= bottom {
            draw_placeholder(frame, &app.theme, Rect::new(body.x, y, body.width, grab_height));
        }

        hits.lanes.push(lane_hit);
    }
    app.hits = hits;
}

fn render_empty_lane(frame: &mut Frame, theme: &Theme, status: Status, body: Rect, filtering: bool) {
    if body.height < 3 {
        return;
    }
    let area = Rect::new(body.x, body.y, body.width, 3);
    let (message, color) = if filtering {
        (format!("No tasks found in {}", status.label()), theme.error)
    } else {
        (format!("No tasks in {}", status.label()), theme.dim)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let text = Paragraph::new(Line::from(Span::styled(
        truncate(&message, body.width.saturating_sub(2) as usize),
        Style::default().fg(color),
    )))
    .block(block)
    .style(Style::default().bg(theme.background));
    frame.render_widget(text, area);
}

fn draw_placeholder(frame: &mut Frame, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.placeholder))
        .style(Style::default().bg(theme.background));
    frame.render_widget(block, area);
}

fn draw_card(
    frame: &mut Frame,
    theme: &Theme,
    plan: &CardPlan,
    area: Rect,
    is_cursor: bool,
    is_dragged: bool,
) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = Vec::new();

    // Badge row with the priority glyph right-aligned
    let badge = format!(" {} ", truncate(&plan.badge, inner_width.saturating_sub(4)));
    let glyph = plan.priority.glyph();
    let pad = inner_width.saturating_sub(badge.width() + glyph.width());
    lines.push(Line::from(vec![
        Span::styled(
            badge,
            Style::default().fg(theme.text_bright).bg(plan.badge_color),
        ),
        Span::raw(" ".repeat(pad)),
        Span::styled(
            glyph,
            Style::default().fg(theme.priority_color(plan.priority)),
        ),
    ]));

    lines.push(Line::from(Span::styled(
        truncate(&plan.title, inner_width),
        Style::default()
            .fg(theme.text_bright)
            .add_modifier(Modifier::BOLD),
    )));

    if !plan.description.is_empty() {
        lines.push(Line::from(Span::styled(
            truncate(&plan.description, inner_width),
            Style::default().fg(theme.dim),
        )));
    }

    if let Some((done, total)) = plan.progress {
        let bar_width = inner_width.saturating_sub(8).clamp(4, 12);
        let filled = if total == 0 { 0 } else { done * bar_width / total };
        let bar: String = "▰".repeat(filled) + &"▱".repeat(bar_width - filled);
        lines.push(Line::from(vec![
            Span::styled(bar, Style::default().fg(theme.progress_done)),
            Span::styled(
                format!(" {done}/{total}"),
                Style::default().fg(theme.text),
            ),
        ]));
    }

    if !plan.avatars.is_empty() || plan.due.is_some() {
        let mut spans = plan.avatars.clone();
        if let Some(due) = &plan.due {
            spans.push(Span::styled(
                format!(" {due}"),
                Style::default().fg(theme.dim),
            ));
        }
        lines.push(Line::from(spans));
    }

    let border = if is_dragged {
        Style::default().fg(theme.placeholder)
    } else if is_cursor {
        Style::default().fg(theme.selection_border)
    } else {
        Style::default().fg(theme.lane_border)
    };
    let card_style = if is_dragged {
        Style::default()
            .bg(theme.background)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default().bg(theme.background)
    };
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(border))
        .style(card_style);
    frame.render_widget(paragraph, area);
}
