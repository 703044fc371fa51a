use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, ConfirmAction, Effect};

/// Handle a key while a destructive action awaits confirmation.
pub(super) fn handle(app: &mut App, key: KeyEvent) {
    let Some(state) = app.confirm.take() else {
        return;
    };
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => match state.action {
            ConfirmAction::DeleteTask(task_id) => {
                // Close a detail overlay showing the doomed task.
                if app.detail.as_ref().is_some_and(|d| d.task_id == task_id) {
                    app.detail = None;
                }
                app.tasks.remove(&task_id);
                app.clamp_board_cursor();
                app.queue(Effect::DeleteTask { task_id });
            }
            ConfirmAction::DeleteContact(contact_id) => {
                app.contacts.remove(&contact_id);
                let count = app.contacts.len();
                app.contacts_cursor = app.contacts_cursor.min(count.saturating_sub(1));
                app.queue(Effect::DeleteContact { contact_id });
            }
        },
        // Anything else keeps the prompt open, except an explicit no.
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
        _ => app.confirm = Some(state),
    }
}
