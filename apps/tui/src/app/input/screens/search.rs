use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) => app.search.input.push(c),
        KeyCode::Backspace => {
            app.search.input.pop();
        }
        KeyCode::Enter => {
            app.submit_search();
        }
        KeyCode::Esc => app.close_search(),
        _ => {}
    }
}
