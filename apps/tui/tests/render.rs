use airwatch_core::heatmap::Heatmap;
use airwatch_core::theme::MemoryThemeStore;
use airwatch_core::{FetchError, Reading, ThemeController};
use airwatch_tui::app::{handle_input, App};
use airwatch_tui::ui::ui;
use chrono::{TimeZone, Utc};
use crossterm::event::KeyCode;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn test_app() -> App {
    let theme = ThemeController::load(Box::new(MemoryThemeStore::new()));
    App::new(theme, Heatmap::generate(&mut StdRng::seed_from_u64(11)), false)
}

fn draw(app: &App) -> String {
    let backend = TestBackend::new(140, 48);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui(app, f)).unwrap();

    let buffer = terminal.backend().buffer().clone();
    let mut screen = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            screen.push_str(buffer[(x, y)].symbol());
        }
        screen.push('\n');
    }
    screen
}

fn refresh(app: &mut App, result: Result<Vec<Reading>, FetchError>) {
    app.apply_refresh(result, Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap());
}

#[test]
fn empty_dashboard_shows_placeholders() {
    let app = test_app();
    let screen = draw(&app);

    assert!(screen.contains("Air Quality Index"));
    assert!(screen.contains("--"));
    assert!(screen.contains("STREET VIEW: CHENNAI"));
    assert!(screen.contains("Weekly AQI Heatmap"));
}

#[test]
fn poor_reading_fills_cards_and_status() {
    let mut app = test_app();
    refresh(&mut app, Ok(vec![Reading::new(120, 31.5, 70.0)]));

    let screen = draw(&app);

    assert!(screen.contains("120"));
    assert!(screen.contains("POOR"));
    assert!(screen.contains("31.5°C"));
    assert!(screen.contains("70%"));
    assert!(screen.contains("Critical Warning: High AQI (120) detected!"));
}

#[test]
fn notification_dropdown_lists_alerts_then_empties() {
    let mut app = test_app();
    refresh(&mut app, Ok(vec![Reading::new(150, 33.0, 45.0)]));

    handle_input(&mut app, KeyCode::Char('n'));
    let screen = draw(&app);
    assert!(screen.contains("Notifications"));
    assert!(screen.contains("High AQI Alert"));

    handle_input(&mut app, KeyCode::Char('c'));
    let screen = draw(&app);
    assert!(screen.contains("No new alerts"));
}

#[test]
fn failed_refresh_keeps_cards_and_shows_error() {
    let mut app = test_app();
    refresh(&mut app, Ok(vec![Reading::new(60, 29.0, 65.0)]));
    refresh(&mut app, Err(FetchError::Status(502)));

    let screen = draw(&app);

    assert!(screen.contains("MODERATE"));
    assert!(screen.contains("Error fetching readings: HTTP error: 502"));
}

#[test]
fn search_alert_blocks_the_screen() {
    let mut app = test_app();
    app.alert = Some("Location not found in Chennai. Please try another specific area name.".to_string());

    let screen = draw(&app);

    assert!(screen.contains("Location not found in Chennai"));
    assert!(screen.contains("Press any key"));
}

#[test]
fn settings_screen_shows_toggles() {
    let mut app = test_app();
    handle_input(&mut app, KeyCode::Char('s'));

    let screen = draw(&app);

    assert!(screen.contains("[x] Dark mode"));
    assert!(screen.contains("[ ] Show CO level card"));
}
