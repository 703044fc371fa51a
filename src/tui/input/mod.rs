mod confirm;
mod detail;
mod mouse;
mod navigate;
mod popups;
mod search;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};

use super::app::{App, Mode};

/// Handle a key event in the current mode. Overlays take the key first.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status_message = None;

    if app.show_help {
        app.show_help = false;
        return;
    }
    // Mid-drag, the keyboard can only abort the gesture.
    if app.drag.is_active() {
        if key.code == KeyCode::Esc {
            app.drag.cancel();
        }
        return;
    }
    if app.confirm.is_some() {
        confirm::handle(app, key);
        return;
    }
    if app.move_popup.is_some() {
        popups::handle_move_popup(app, key);
        return;
    }
    if app.detail.is_some() {
        detail::handle(app, key);
        return;
    }
    match app.mode {
        Mode::Navigate => navigate::handle(app, key),
        Mode::Search => search::handle(app, key),
    }
}

/// Handle a mouse event (board drag-and-drop, wheel scrolling).
pub fn handle_mouse(app: &mut App, event: MouseEvent) {
    mouse::handle(app, event);
}
