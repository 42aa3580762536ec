use std::time::Instant;

use airwatch_core::chart::AnalyticsChart;
use airwatch_core::display::DEFAULT_BINDINGS;
use airwatch_core::geocode::GeocodeRequest;
use airwatch_core::heatmap::{HeatCursor, Heatmap};
use airwatch_core::map::MapView;
use airwatch_core::{
    apply_fetch_result, render_reading, FetchError, Monitor, Reading, RefreshOutcome, Slot,
    SlotBoard, Theme, ThemeChanged, ThemeController,
};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AppConfig;
use crate::geocoder::SearchResult;
use crate::prefs::FileThemeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Dashboard,
    Settings,
}

/// Dashboard panel that receives the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Chart,
    Map,
    Heatmap,
}

impl Panel {
    pub const ALL: [Self; 3] = [Self::Chart, Self::Map, Self::Heatmap];

    pub const fn index(self) -> usize {
        match self {
            Self::Chart => 0,
            Self::Map => 1,
            Self::Heatmap => 2,
        }
    }

    pub const fn from_index(index: usize) -> Self {
        match index {
            1 => Self::Map,
            2 => Self::Heatmap,
            _ => Self::Chart,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchBox {
    pub active: bool,
    pub input: String,
}

/// Where the dashboard gets its data from, for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub api_url: String,
    pub poll_secs: u64,
    pub theme_file: String,
}

pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub focus: Panel,
    pub show_help: bool,
    pub status_message: String,
    pub animation_counter: f64,
    last_tick: Instant,
    pub monitor: Monitor,
    pub board: SlotBoard,
    pub theme: ThemeController,
    pub chart: AnalyticsChart,
    pub heatmap: Heatmap,
    pub heat_cursor: HeatCursor,
    pub map: MapView,
    pub search: SearchBox,
    /// Submitted search waiting to be handed to the geocoder.
    pub pending_search: Option<GeocodeRequest>,
    /// Blocking alert; every key dismisses it.
    pub alert: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_error: Option<FetchError>,
    pub source: Option<SourceInfo>,
    pub settings_selection_index: usize,
}

impl App {
    pub fn new(theme: ThemeController, heatmap: Heatmap, show_co: bool) -> Self {
        let map = MapView::chennai(theme.theme());
        Self {
            running: true,
            screen: AppScreen::Dashboard,
            focus: Panel::Chart,
            show_help: false,
            status_message: String::new(),
            animation_counter: 0.0,
            last_tick: Instant::now(),
            monitor: Monitor::new(),
            board: SlotBoard::standard(show_co),
            theme,
            chart: AnalyticsChart::sample(),
            heatmap,
            heat_cursor: HeatCursor::default(),
            map,
            search: SearchBox::default(),
            pending_search: None,
            alert: None,
            last_updated: None,
            last_error: None,
            source: None,
            settings_selection_index: 0,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let theme = ThemeController::load(Box::new(FileThemeStore::new(&config.theme_file)));
        let mut rng = config
            .heatmap_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let mut app = Self::new(theme, Heatmap::generate(&mut rng), config.show_co);
        app.source = Some(SourceInfo {
            api_url: config.api_url.clone(),
            poll_secs: config.poll_interval.as_secs(),
            theme_file: config.theme_file.display().to_string(),
        });
        app
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick);
        self.last_tick = now;

        // Blink phase for the search cursor, wraps at 2*PI
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }
    }

    pub const fn current_theme(&self) -> Theme {
        self.theme.theme()
    }

    /// Applies one poll result to the cards and the notification log.
    pub fn apply_refresh(
        &mut self,
        result: Result<Vec<Reading>, FetchError>,
        now: DateTime<Utc>,
    ) -> RefreshOutcome {
        let outcome = apply_fetch_result(result, &mut self.monitor, &mut self.board, now);
        match &outcome {
            RefreshOutcome::Updated(report) => {
                self.last_updated = Some(now);
                self.last_error = None;
                self.status_message = report.alert.as_ref().map_or_else(
                    || format!("Updated {}", now.format("%H:%M:%S")),
                    Clone::clone,
                );
            }
            RefreshOutcome::Empty => {
                self.last_error = None;
                self.status_message = "No readings available yet".to_string();
            }
            RefreshOutcome::Failed(err) => {
                self.last_error = Some(err.clone());
                self.status_message = format!("Error fetching readings: {err}");
            }
        }
        outcome
    }

    pub fn toggle_theme(&mut self) {
        let event = self.theme.toggle();
        self.on_theme_changed(event);
    }

    pub fn set_dark_mode(&mut self, checked: bool) {
        let event = self.theme.set_dark(checked);
        self.on_theme_changed(event);
    }

    fn on_theme_changed(&mut self, event: ThemeChanged) {
        self.map.set_theme(event.theme);
        self.status_message = format!("Theme: {}", event.theme.as_str());
    }

    pub fn open_search(&mut self) {
        self.search.active = true;
        self.search.input.clear();
    }

    pub fn close_search(&mut self) {
        self.search.active = false;
    }

    /// Queues the typed query. Queries that are too short are ignored and the
    /// box stays open, as does a submit while another search is in flight.
    pub fn submit_search(&mut self) -> bool {
        if self.map.loading {
            return false;
        }
        let Some(request) = GeocodeRequest::new(&self.search.input) else {
            return false;
        };
        self.map.begin_search();
        self.pending_search = Some(request);
        self.search.active = false;
        self.status_message = format!("Searching for {}...", self.search.input);
        true
    }

    pub fn take_pending_search(&mut self) -> Option<GeocodeRequest> {
        self.pending_search.take()
    }

    pub fn finish_search(&mut self, result: SearchResult) {
        match self.map.apply_search(result) {
            Some(message) => {
                self.alert = Some(message.to_string());
                self.status_message.clear();
            }
            None => {
                self.status_message = self.map.label.clone();
            }
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Rebuilds the card row with or without the CO card and redraws the
    /// last reading into it.
    pub fn set_show_co(&mut self, show_co: bool) {
        self.board = SlotBoard::standard(show_co);
        if let Some(reading) = self.monitor.last_reading() {
            render_reading(reading, DEFAULT_BINDINGS, &mut self.board);
        }
    }

    pub fn shows_co(&self) -> bool {
        self.board.has(Slot::Co)
    }

    pub fn toggle_notifications(&mut self) {
        self.monitor.notifications_mut().toggle_dropdown();
    }

    pub fn clear_notifications(&mut self) {
        self.monitor.notifications_mut().clear();
        self.status_message = "Notifications cleared".to_string();
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airwatch_core::geocode::{GeocodeResult, NOT_FOUND_ALERT};
    use airwatch_core::map::GeoPoint;
    use airwatch_core::theme::MemoryThemeStore;
    use chrono::TimeZone;

    fn test_app() -> App {
        let theme = ThemeController::load(Box::new(MemoryThemeStore::new()));
        App::new(theme, Heatmap::generate(&mut StdRng::seed_from_u64(3)), false)
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap()
    }

    #[test]
    fn refresh_failure_keeps_cards_and_reports() {
        let mut app = test_app();
        app.apply_refresh(Ok(vec![Reading::new(60, 29.0, 65.0)]), fixed_now());

        app.apply_refresh(Err(FetchError::Status(500)), fixed_now());

        assert_eq!(app.board.text(Slot::Aqi), Some("60"));
        assert_eq!(app.last_updated, Some(fixed_now()));
        assert_eq!(app.last_error, Some(FetchError::Status(500)));
        assert_eq!(app.status_message, "Error fetching readings: HTTP error: 500");
    }

    #[test]
    fn dangerous_refresh_surfaces_alert_in_status() {
        let mut app = test_app();
        app.apply_refresh(Ok(vec![Reading::new(140, 33.0, 45.0)]), fixed_now());
        assert_eq!(app.status_message, "Critical Warning: High AQI (140) detected!");
        assert!(app.monitor.notifications().badge_visible());
    }

    #[test]
    fn theme_toggle_updates_map_tiles() {
        let mut app = test_app();
        assert_eq!(app.current_theme(), Theme::Dark);

        app.toggle_theme();

        assert_eq!(app.current_theme(), Theme::Light);
        assert_eq!(app.map.tiles.name(), "light_all");
    }

    #[test]
    fn short_query_is_not_submitted() {
        let mut app = test_app();
        app.open_search();
        app.search.input = "ab".to_string();

        assert!(!app.submit_search());
        assert!(app.search.active);
        assert!(app.pending_search.is_none());
        assert!(!app.map.loading);
    }

    #[test]
    fn submitted_search_round_trip() {
        let mut app = test_app();
        app.open_search();
        app.search.input = "Adyar".to_string();

        assert!(app.submit_search());
        assert!(app.map.loading);
        assert_eq!(app.take_pending_search().map(|r| r.query().to_string()), Some("Adyar".to_string()));

        app.finish_search(Ok(Some(GeocodeResult {
            point: GeoPoint::new(13.0012, 80.2565),
            label: "STREET VIEW: ADYAR".to_string(),
        })));
        assert!(!app.map.loading);
        assert_eq!(app.map.zoom, 15);
        assert!(app.alert.is_none());
    }

    #[test]
    fn empty_search_raises_blocking_alert() {
        let mut app = test_app();
        app.open_search();
        app.search.input = "Atlantis".to_string();
        app.submit_search();

        app.finish_search(Ok(None));

        assert_eq!(app.alert.as_deref(), Some(NOT_FOUND_ALERT));
    }

    #[test]
    fn co_card_can_be_added_after_the_fact() {
        let mut app = test_app();
        app.apply_refresh(Ok(vec![Reading::new(40, 25.0, 55.0).with_co(0.6)]), fixed_now());
        assert!(!app.shows_co());

        app.set_show_co(true);

        assert!(app.shows_co());
        assert_eq!(app.board.text(Slot::Co), Some("0.6"));
        assert_eq!(app.board.text(Slot::Aqi), Some("40"));
    }
}
