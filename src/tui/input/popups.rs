use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Effect};

/// Handle a key while the quick "move to" popup is open. Confirming goes
/// through the same optimistic-set + status-persist path as a drop.
pub(super) fn handle_move_popup(app: &mut App, key: KeyEvent) {
    let Some(mut popup) = app.move_popup.take() else {
        return;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Char('m') => {}
        KeyCode::Up | KeyCode::Char('k') => {
            popup.cursor = popup.cursor.saturating_sub(1);
            app.move_popup = Some(popup);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            popup.cursor = (popup.cursor + 1).min(popup.options.len().saturating_sub(1));
            app.move_popup = Some(popup);
        }
        KeyCode::Enter => {
            if let Some(status) = popup.options.get(popup.cursor).copied() {
                app.tasks.set_status(&popup.task_id, status);
                app.clamp_board_cursor();
                app.queue(Effect::PersistStatus {
                    task_id: popup.task_id,
                    status,
                });
            }
        }
        _ => app.move_popup = Some(popup),
    }
}
