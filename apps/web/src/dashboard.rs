//! Page state and the key bindings that change it. Nothing here touches the
//! browser; the caller carries out the returned [`KeyEffect`].

use airwatch_core::chart::AnalyticsChart;
use airwatch_core::display::DEFAULT_BINDINGS;
use airwatch_core::geocode::{GeocodeRequest, GeocodeResult};
use airwatch_core::heatmap::{HeatCursor, Heatmap};
use airwatch_core::map::MapView;
use airwatch_core::{
    apply_fetch_result, render_reading, FetchError, GeocodeError, Monitor, Reading,
    RefreshOutcome, SlotBoard, ThemeChanged, ThemeController, ThemeStore,
};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratzilla::event::KeyCode;

use crate::schedule::PollSchedule;

/// Work a key press leaves for the browser side.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyEffect {
    None,
    ThemeChanged(ThemeChanged),
    Search(GeocodeRequest),
}

/// Everything the page shows. Shared between the draw loop, the key handler
/// and the fetch futures; each borrows it only between two awaits.
pub struct Dashboard {
    pub monitor: Monitor,
    pub board: SlotBoard,
    pub show_co: bool,
    pub theme: ThemeController,
    pub chart: AnalyticsChart,
    pub heatmap: Heatmap,
    pub heat_cursor: HeatCursor,
    pub map: MapView,
    pub search: Option<String>,
    pub status: String,
    pub schedule: PollSchedule,
}

impl Dashboard {
    pub fn new(store: Box<dyn ThemeStore>, heatmap_seed: u64) -> Self {
        let theme = ThemeController::load(store);
        let mut rng = StdRng::seed_from_u64(heatmap_seed);
        Self {
            monitor: Monitor::new(),
            board: SlotBoard::standard(false),
            show_co: false,
            map: MapView::chennai(theme.theme()),
            theme,
            chart: AnalyticsChart::sample(),
            heatmap: Heatmap::generate(&mut rng),
            heat_cursor: HeatCursor::default(),
            search: None,
            status: String::new(),
            schedule: PollSchedule::default(),
        }
    }

    /// Applies one poll result. Returns the error text when the fetch failed.
    pub fn apply(
        &mut self,
        result: Result<Vec<Reading>, FetchError>,
        now: DateTime<Utc>,
    ) -> Option<String> {
        match apply_fetch_result(result, &mut self.monitor, &mut self.board, now) {
            RefreshOutcome::Updated(report) => {
                self.status = report
                    .alert
                    .unwrap_or_else(|| format!("Updated {}", now.format("%H:%M:%S")));
                None
            }
            RefreshOutcome::Empty => {
                self.status = "No readings available yet".to_string();
                None
            }
            RefreshOutcome::Failed(err) => {
                self.status = format!("Error fetching readings: {err}");
                Some(self.status.clone())
            }
        }
    }

    /// Ends a place search. Returns the alert to raise, if any.
    pub fn finish_search(
        &mut self,
        result: Result<Option<GeocodeResult>, GeocodeError>,
    ) -> Option<&'static str> {
        self.map.apply_search(result)
    }

    pub fn toggle_theme(&mut self) -> ThemeChanged {
        let event = self.theme.toggle();
        self.map.set_theme(event.theme);
        event
    }

    /// Adds or removes the CO card and redraws the last reading on the new board.
    pub fn toggle_co(&mut self) {
        self.show_co = !self.show_co;
        self.board = SlotBoard::standard(self.show_co);
        if let Some(reading) = self.monitor.last_reading().cloned() {
            render_reading(&reading, DEFAULT_BINDINGS, &mut self.board);
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> KeyEffect {
        if self.search.is_some() {
            return self.handle_search_key(code);
        }

        if self.monitor.notifications().is_dropdown_open() {
            match code {
                KeyCode::Char('c') => self.monitor.notifications_mut().clear(),
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.monitor.notifications_mut().close_dropdown();
                }
                _ => {}
            }
            return KeyEffect::None;
        }

        match code {
            KeyCode::Char('t') => return KeyEffect::ThemeChanged(self.toggle_theme()),
            KeyCode::Char('n') => self.monitor.notifications_mut().toggle_dropdown(),
            KeyCode::Char('/') => self.search = Some(String::new()),
            KeyCode::Char('c') => self.chart.toggle_kind(),
            KeyCode::Char('o') => self.toggle_co(),
            KeyCode::Char('a') => {
                self.chart.select("all");
            }
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as usize - '1' as usize;
                self.chart.select(&index.to_string());
            }
            KeyCode::Left => self.heat_cursor.left(),
            KeyCode::Right => self.heat_cursor.right(),
            KeyCode::Up => self.heat_cursor.up(),
            KeyCode::Down => self.heat_cursor.down(),
            _ => {}
        }
        KeyEffect::None
    }

    fn handle_search_key(&mut self, code: KeyCode) -> KeyEffect {
        let Some(input) = self.search.as_mut() else {
            return KeyEffect::None;
        };
        match code {
            KeyCode::Char(c) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Esc => self.search = None,
            KeyCode::Enter => {
                // Too short, or a search is still running: keep the box open.
                let Some(request) = GeocodeRequest::new(input) else {
                    return KeyEffect::None;
                };
                if self.map.loading {
                    return KeyEffect::None;
                }
                self.map.begin_search();
                self.search = None;
                return KeyEffect::Search(request);
            }
            _ => {}
        }
        KeyEffect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airwatch_core::chart::{ChartKind, SensorFilter};
    use airwatch_core::theme::MemoryThemeStore;
    use airwatch_core::{Slot, Theme};
    use chrono::TimeZone;

    fn dashboard() -> Dashboard {
        Dashboard::new(Box::new(MemoryThemeStore::new()), 7)
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn type_text(dashboard: &mut Dashboard, text: &str) {
        for c in text.chars() {
            dashboard.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn dangerous_reading_sets_status_and_alert() {
        let mut dashboard = dashboard();
        let error = dashboard.apply(Ok(vec![Reading::new(150, 30.0, 60.0)]), fixed_now());

        assert_eq!(error, None);
        assert_eq!(dashboard.status, "Critical Warning: High AQI (150) detected!");
        assert_eq!(dashboard.monitor.notifications().len(), 1);
    }

    #[test]
    fn failed_fetch_is_reported_and_keeps_cards() {
        let mut dashboard = dashboard();
        dashboard.apply(Ok(vec![Reading::new(42, 25.0, 50.0)]), fixed_now());

        let error = dashboard.apply(Err(FetchError::Status(502)), fixed_now());

        assert!(error.is_some_and(|text| text.starts_with("Error fetching readings")));
        assert_eq!(dashboard.board.text(Slot::Aqi), Some("42"));
    }

    #[test]
    fn open_dropdown_captures_keys_and_clears() {
        let mut dashboard = dashboard();
        dashboard.apply(Ok(vec![Reading::new(130, 30.0, 60.0)]), fixed_now());

        dashboard.handle_key(KeyCode::Char('n'));
        assert!(dashboard.monitor.notifications().is_dropdown_open());

        // Keys other than clear and close do nothing while it is open.
        dashboard.handle_key(KeyCode::Char('t'));
        assert_eq!(dashboard.theme.theme(), Theme::Dark);

        dashboard.handle_key(KeyCode::Char('c'));
        assert_eq!(dashboard.monitor.notifications().len(), 0);
        assert!(!dashboard.monitor.notifications().badge_visible());
        assert_eq!(dashboard.chart.kind, ChartKind::Line);

        dashboard.handle_key(KeyCode::Esc);
        assert!(!dashboard.monitor.notifications().is_dropdown_open());
    }

    #[test]
    fn theme_key_reports_the_switch() {
        let mut dashboard = dashboard();
        let effect = dashboard.handle_key(KeyCode::Char('t'));

        assert_eq!(
            effect,
            KeyEffect::ThemeChanged(ThemeChanged { theme: Theme::Light })
        );
        assert_eq!(dashboard.theme.theme(), Theme::Light);
    }

    #[test]
    fn search_submits_once_while_loading() {
        let mut dashboard = dashboard();
        dashboard.handle_key(KeyCode::Char('/'));
        type_text(&mut dashboard, "Adyar");

        let effect = dashboard.handle_key(KeyCode::Enter);
        assert!(matches!(effect, KeyEffect::Search(_)));
        assert!(dashboard.map.loading);
        assert_eq!(dashboard.search, None);

        dashboard.handle_key(KeyCode::Char('/'));
        type_text(&mut dashboard, "Guindy");
        assert_eq!(dashboard.handle_key(KeyCode::Enter), KeyEffect::None);
        assert_eq!(dashboard.search.as_deref(), Some("Guindy"));

        assert!(dashboard.finish_search(Ok(None)).is_some());
        assert!(!dashboard.map.loading);
        assert!(matches!(dashboard.handle_key(KeyCode::Enter), KeyEffect::Search(_)));
    }

    #[test]
    fn short_query_keeps_the_box_open() {
        let mut dashboard = dashboard();
        dashboard.handle_key(KeyCode::Char('/'));
        type_text(&mut dashboard, "ab");

        assert_eq!(dashboard.handle_key(KeyCode::Enter), KeyEffect::None);
        assert_eq!(dashboard.search.as_deref(), Some("ab"));
        assert!(!dashboard.map.loading);

        dashboard.handle_key(KeyCode::Backspace);
        dashboard.handle_key(KeyCode::Esc);
        assert_eq!(dashboard.search, None);
    }

    #[test]
    fn co_toggle_redraws_the_last_reading() {
        let mut dashboard = dashboard();
        dashboard.apply(Ok(vec![Reading::new(40, 25.0, 55.0).with_co(0.6)]), fixed_now());
        assert!(!dashboard.board.has(Slot::Co));

        dashboard.handle_key(KeyCode::Char('o'));
        assert!(dashboard.show_co);
        assert!(dashboard.board.has(Slot::Co));
        assert_eq!(dashboard.board.text(Slot::Aqi), Some("40"));

        dashboard.handle_key(KeyCode::Char('o'));
        assert!(!dashboard.board.has(Slot::Co));
    }

    #[test]
    fn digits_pick_a_sensor_and_a_shows_all() {
        let mut dashboard = dashboard();
        dashboard.handle_key(KeyCode::Char('2'));
        assert_eq!(dashboard.chart.filter, SensorFilter::Only(1));

        dashboard.handle_key(KeyCode::Char('a'));
        assert_eq!(dashboard.chart.filter, SensorFilter::All);
    }
}
