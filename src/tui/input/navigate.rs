use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, ConfirmAction, Effect, Mode, View};

/// Handle a key in Navigate mode.
pub(super) fn handle(app: &mut App, key: KeyEvent) {
    // Global keys first
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
            app.should_quit = true;
            return;
        }
        (_, KeyCode::Char('?')) => {
            app.show_help = true;
            return;
        }
        (_, KeyCode::Char('1')) => {
            app.view = View::Board;
            return;
        }
        (_, KeyCode::Char('2')) => {
            app.view = View::Contacts;
            return;
        }
        (_, KeyCode::Char('3')) => {
            app.view = View::Summary;
            return;
        }
        (_, KeyCode::Tab) => {
            app.view = match app.view {
                View::Board => View::Contacts,
                View::Contacts => View::Summary,
                View::Summary => View::Board,
            };
            return;
        }
        (_, KeyCode::Char('r')) => {
            app.queue(Effect::ReloadAll);
            return;
        }
        _ => {}
    }

    match app.view {
        View::Board => handle_board(app, key),
        View::Contacts => handle_contacts(app, key),
        View::Summary => {}
    }
}

fn handle_board(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            app.board_cursor.lane = app.board_cursor.lane.saturating_sub(1);
            app.clamp_board_cursor();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.board_cursor.lane = (app.board_cursor.lane + 1).min(3);
            app.clamp_board_cursor();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.board_cursor.card = app.board_cursor.card.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.board_cursor.card += 1;
            app.clamp_board_cursor();
        }
        KeyCode::Enter => {
            if let Some(task_id) = app.cursor_task_id() {
                app.open_detail(&task_id);
            }
        }
        KeyCode::Char('m') => {
            if let Some(task_id) = app.cursor_task_id() {
                app.open_move_popup(&task_id);
            }
        }
        KeyCode::Char('x') => {
            if let Some(task_id) = app.cursor_task_id() {
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
        }
        KeyCode::Char('/') => {
            app.mode = Mode::Search;
            app.search_input.clear();
        }
        KeyCode::Esc => {
            if app.filter.take().is_some() {
                app.clamp_board_cursor();
            }
        }
        _ => {}
    }
}

fn handle_contacts(app: &mut App, key: KeyEvent) {
    let count = app.contacts.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.contacts_cursor = app.contacts_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if count > 0 {
                app.contacts_cursor = (app.contacts_cursor + 1).min(count - 1);
            }
        }
        KeyCode::Char('x') => {
            let sorted = app.contacts.sorted_by_name();
            if let Some(contact) = sorted.get(app.contacts_cursor) {
                let id = contact.id.clone();
                let name = contact.name.clone();
                app.ask_confirm(
                    format!("Delete contact \"{name}\" and unassign their tasks? (y/n)"),
                    ConfirmAction::DeleteContact(id),
                );
            }
        }
        _ => {}
    }
}
