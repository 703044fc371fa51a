pub mod board_view;
pub mod contacts_view;
pub mod detail_view;
pub mod help_overlay;
mod helpers;
pub mod move_popup;
pub mod status_row;
pub mod summary_view;
pub mod tab_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, View};

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match app.view {
        View::Board => board_view::render_board_view(frame, app, chunks[1]),
        View::Contacts => contacts_view::render_contacts_view(frame, app, chunks[1]),
        View::Summary => summary_view::render_summary_view(frame, app, chunks[1]),
    }

    // Overlays, innermost last
    if app.detail.is_some() {
        detail_view::render_detail_view(frame, app, chunks[1]);
    }
    if app.move_popup.is_some() {
        move_popup::render_move_popup(frame, app, chunks[1]);
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[2]);
}
