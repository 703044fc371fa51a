use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Handle a key while typing a search query. The filter is live: the board
/// redraws against the partial input on every keystroke.
pub(super) fn handle(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            // Abandon the search and any previous filter.
            app.search_input.clear();
            app.filter = None;
            app.mode = Mode::Navigate;
            app.clamp_board_cursor();
        }
        KeyCode::Enter => {
            let query = app.search_input.trim().to_string();
            app.filter = if query.is_empty() { None } else { Some(query) };
            app.search_input.clear();
            app.mode = Mode::Navigate;
            app.clamp_board_cursor();
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.clamp_board_cursor();
        }
        _ => {}
    }
}
