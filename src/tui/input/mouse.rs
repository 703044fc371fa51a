use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::tui::app::{App, Effect, View};
use crate::tui::drag::Settle;

/// Handle a mouse event. The board is the only mouse surface: grab on a
/// card starts a drag, release resolves it, a plain click opens the
/// detail overlay, right-click opens the quick-move popup.
pub(super) fn handle(app: &mut App, event: MouseEvent) {
    if app.view != View::Board {
        return;
    }
    // Overlays swallow mouse input; Esc/keys drive them.
    if app.detail.is_some() || app.move_popup.is_some() || app.confirm.is_some() {
        return;
    }
    let (column, row) = (event.column, event.row);

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(card) = app.hits.card_at(column, row) {
                let (task_id, height) = (card.task_id.clone(), card.area.height);
                // A grab while another drag is active is rejected.
                app.drag.begin(task_id, height);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.drag.update(&app.hits, column, row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            match app.drag.settle(&app.hits, column, row) {
                Some(Settle::Click { task_id }) => {
                    move_cursor_to(app, &task_id);
                    app.open_detail(&task_id);
                }
                Some(Settle::Drop {
                    task_id,
                    status,
                    insert_index,
                }) => {
                    // Optimistic: reorder + restatus the cache now, persist
                    // only the status, re-render from the cache either way.
                    let before = app
                        .hits
                        .lane(status)
                        .and_then(|lane| lane.card_id_at(&task_id, insert_index))
                        .map(str::to_string);
                    app.tasks
                        .reposition_before(&task_id, status, before.as_deref());
                    move_cursor_to(app, &task_id);
                    app.queue(Effect::PersistStatus { task_id, status });
                }
                Some(Settle::Cancelled) | None => {}
            }
        }
        MouseEventKind::Down(MouseButton::Right) => {
            if !app.drag.is_active() {
                if let Some(card) = app.hits.card_at(column, row) {
                    let task_id = card.task_id.clone();
                    move_cursor_to(app, &task_id);
                    app.open_move_popup(&task_id);
                }
            }
        }
        MouseEventKind::ScrollDown => scroll_lane(app, column, row, 1),
        MouseEventKind::ScrollUp => scroll_lane(app, column, row, -1),
        _ => {}
    }
}

/// Put the board cursor on the given task so keyboard focus follows the
/// pointer interaction.
fn move_cursor_to(app: &mut App, task_id: &str) {
    let lanes = app.lanes();
    let mut found = None;
    for (lane, tasks) in lanes.iter().enumerate() {
        if let Some(card) = tasks.iter().position(|t| t.id == task_id) {
            found = Some((lane, card));
            break;
        }
    }
    if let Some((lane, card)) = found {
        app.board_cursor.lane = lane;
        app.board_cursor.card = card;
    }
}

fn scroll_lane(app: &mut App, column: u16, row: u16, delta: i32) {
    let Some(lane) = app.hits.lane_at(column, row) else {
        return;
    };
    let index = lane.status.index();
    let lens = app.lane_lens();
    let max = lens[index].saturating_sub(1);
    let next = app.lane_scroll[index] as i32 + delta;
    app.lane_scroll[index] = next.clamp(0, max as i32) as usize;
}
