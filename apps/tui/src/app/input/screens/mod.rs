use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod alert;
mod dashboard;
mod help;
mod notifications;
mod search;
mod settings;

/// Routes a key to whatever currently owns the keyboard. Overlays come first:
/// a blocking alert, then the search box, then help, then the dropdown.
pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if app.alert.is_some() {
        alert::handle_alert_input(app, key);
        return;
    }

    if app.search.active {
        search::handle_search_input(app, key);
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    if app.monitor.notifications().is_dropdown_open() {
        notifications::handle_notifications_input(app, key);
        return;
    }

    match app.screen {
        AppScreen::Dashboard => dashboard::handle_dashboard_input(app, key),
        AppScreen::Settings => settings::handle_settings_input(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Panel;
    use airwatch_core::chart::{ChartKind, SensorFilter};
    use airwatch_core::heatmap::{HeatCursor, Heatmap};
    use airwatch_core::theme::MemoryThemeStore;
    use airwatch_core::{Reading, Theme, ThemeController};
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_app() -> App {
        let theme = ThemeController::load(Box::new(MemoryThemeStore::new()));
        App::new(theme, Heatmap::generate(&mut StdRng::seed_from_u64(5)), false)
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            dispatch_input(app, *key);
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            dispatch_input(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn q_quits_from_dashboard() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(!app.running);
    }

    #[test]
    fn typed_q_goes_into_search_box() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('/')]);
        type_text(&mut app, "quarry");

        assert!(app.running);
        assert_eq!(app.search.input, "quarry");
        press(&mut app, &[KeyCode::Enter]);
        assert!(app.map.loading);
        assert_eq!(app.pending_search.as_ref().map(|r| r.query()), Some("quarry"));
    }

    #[test]
    fn escape_cancels_search_without_sending() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('/')]);
        type_text(&mut app, "mylapore");
        press(&mut app, &[KeyCode::Esc]);

        assert!(!app.search.active);
        assert!(app.pending_search.is_none());
    }

    #[test]
    fn alert_swallows_the_next_key() {
        let mut app = test_app();
        app.alert = Some("Error searching for location.".to_string());

        press(&mut app, &[KeyCode::Char('q')]);

        assert!(app.alert.is_none());
        assert!(app.running);
    }

    #[test]
    fn theme_key_toggles_theme() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('t')]);
        assert_eq!(app.current_theme(), Theme::Light);
    }

    #[test]
    fn notifications_dropdown_clear_all() {
        let mut app = test_app();
        app.apply_refresh(Ok(vec![Reading::new(150, 30.0, 50.0)]), Utc::now());

        press(&mut app, &[KeyCode::Char('n')]);
        assert!(app.monitor.notifications().is_dropdown_open());
        press(&mut app, &[KeyCode::Char('c')]);

        assert!(app.monitor.notifications().is_empty());
        assert!(!app.monitor.notifications().badge_visible());
        press(&mut app, &[KeyCode::Esc]);
        assert!(!app.monitor.notifications().is_dropdown_open());
    }

    #[test]
    fn chart_keys_change_kind_and_filter() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('c'), KeyCode::Right, KeyCode::Right]);

        assert_eq!(app.chart.kind, ChartKind::Bar);
        assert_eq!(app.chart.filter, SensorFilter::Only(1));

        press(&mut app, &[KeyCode::Char('a')]);
        assert_eq!(app.chart.filter, SensorFilter::All);
    }

    #[test]
    fn arrows_move_heat_cursor_when_heatmap_focused() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Tab, KeyCode::Tab]);
        assert_eq!(app.focus, Panel::Heatmap);

        press(&mut app, &[KeyCode::Down, KeyCode::Right, KeyCode::Right]);
        assert_eq!(app.heat_cursor, HeatCursor { day: 1, hour: 2 });

        press(&mut app, &[KeyCode::BackTab]);
        assert_eq!(app.focus, Panel::Map);
    }

    #[test]
    fn settings_switch_sets_theme_and_co_card() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('s')]);
        assert_eq!(app.screen, AppScreen::Settings);

        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.current_theme(), Theme::Light);

        press(&mut app, &[KeyCode::Down, KeyCode::Char(' ')]);
        assert!(app.shows_co());

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.screen, AppScreen::Dashboard);
    }

    #[test]
    fn help_overlay_blocks_dashboard_keys() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::F(1), KeyCode::Char('q')]);
        assert!(app.show_help);
        assert!(app.running);

        press(&mut app, &[KeyCode::Esc]);
        assert!(!app.show_help);
    }
}
