use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_notifications_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('c') => app.clear_notifications(),
        KeyCode::Char('n') | KeyCode::Esc => app.monitor.notifications_mut().close_dropdown(),
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}
