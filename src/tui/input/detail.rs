use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, ConfirmAction, Effect};

/// Handle a key while the task detail overlay is open.
pub(super) fn handle(app: &mut App, key: KeyEvent) {
    let Some(detail) = &app.detail else {
        return;
    };
    let task_id = detail.task_id.clone();
    let subtask_count = app
        .tasks
        .get(&task_id)
        .map(|t| t.subtasks.len())
        .unwrap_or(0);

    match key.code {
        KeyCode::Esc => {
            app.detail = None;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(detail) = &mut app.detail {
                detail.subtask_cursor = detail.subtask_cursor.saturating_sub(1);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(detail) = &mut app.detail {
                detail.subtask_cursor =
                    (detail.subtask_cursor + 1).min(subtask_count.saturating_sub(1));
            }
        }
        // Toggle the subtask under the cursor and persist the whole task
        // record, without closing the overlay.
        KeyCode::Char(' ') => {
            let cursor = app.detail.as_ref().map(|d| d.subtask_cursor).unwrap_or(0);
            let subtask_id = app
                .tasks
                .get(&task_id)
                .and_then(|t| t.subtasks.get(cursor))
                .map(|s| s.id);
            if let Some(subtask_id) = subtask_id {
                if app.tasks.toggle_subtask(&task_id, subtask_id).is_some() {
                    app.queue(Effect::PersistTask { task_id });
                }
            }
        }
        KeyCode::Char('m') => {
            app.open_move_popup(&task_id);
        }
        KeyCode::Char('d') | KeyCode::Char('x') => {
            let title = app
                .tasks
                .get(&task_id)
                .map(|t| t.title.clone())
                .unwrap_or_default();
            app.ask_confirm(
                format!("Delete task \"{title}\"? (y/n)"),
                ConfirmAction::DeleteTask(task_id),
            );
        }
        _ => {}
    }
}
