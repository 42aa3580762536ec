use crate::app::state::App;
use crossterm::event::KeyCode;

/// Any key acknowledges the alert; the key itself is not acted on.
pub fn handle_alert_input(app: &mut App, _key: KeyCode) {
    app.dismiss_alert();
}
