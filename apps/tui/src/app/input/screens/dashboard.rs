use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen, Panel};
use crossterm::event::KeyCode;

pub fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('n') => app.toggle_notifications(),
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Char('s') => {
            app.settings_selection_index = 0;
            app.screen = AppScreen::Settings;
        }
        KeyCode::Char('c') => app.chart.toggle_kind(),
        KeyCode::Char('a') => {
            app.chart.select("all");
        }
        KeyCode::Char(digit @ '1'..='9') => {
            let index = digit as usize - '1' as usize;
            app.chart.select(&index.to_string());
        }
        KeyCode::Tab => {
            app.focus = Panel::from_index(wrap_increment(app.focus.index(), Panel::ALL.len()));
        }
        KeyCode::BackTab => {
            app.focus = Panel::from_index(wrap_decrement(app.focus.index(), Panel::ALL.len()));
        }
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            handle_panel_arrows(app, key);
        }
        _ => {}
    }
}

fn handle_panel_arrows(app: &mut App, key: KeyCode) {
    match (app.focus, key) {
        (Panel::Chart, KeyCode::Left) => app.chart.prev_filter(),
        (Panel::Chart, KeyCode::Right) => app.chart.next_filter(),
        (Panel::Heatmap, KeyCode::Left) => app.heat_cursor.left(),
        (Panel::Heatmap, KeyCode::Right) => app.heat_cursor.right(),
        (Panel::Heatmap, KeyCode::Up) => app.heat_cursor.up(),
        (Panel::Heatmap, KeyCode::Down) => app.heat_cursor.down(),
        _ => {}
    }
}
