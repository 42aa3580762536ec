use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

/// Rows of the settings screen, in display order.
const SETTINGS_ROWS: usize = 2;

pub fn handle_settings_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up => {
            app.settings_selection_index =
                wrap_decrement(app.settings_selection_index, SETTINGS_ROWS);
        }
        KeyCode::Down => {
            app.settings_selection_index =
                wrap_increment(app.settings_selection_index, SETTINGS_ROWS);
        }
        KeyCode::Enter | KeyCode::Char(' ') => toggle_selected(app),
        KeyCode::Esc | KeyCode::Char('s') => app.screen = AppScreen::Dashboard,
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

fn toggle_selected(app: &mut App) {
    match app.settings_selection_index {
        0 => {
            let checked = app.current_theme().is_dark();
            app.set_dark_mode(!checked);
        }
        1 => {
            let show = !app.shows_co();
            app.set_show_co(show);
            app.status_message = if show {
                "CO card shown".to_string()
            } else {
                "CO card hidden".to_string()
            };
        }
        _ => {}
    }
}
