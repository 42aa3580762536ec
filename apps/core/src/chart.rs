//! Hourly per-sensor AQI series shown in the analytics panel.

use serde::Serialize;

use crate::color::{Rgb, Rgba};
use crate::theme::Theme;

pub const HOUR_LABELS: [&str; 10] = [
    "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: &'static str,
    pub color: Rgb,
    pub values: Vec<f64>,
}

impl Series {
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

impl ChartKind {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Line => Self::Bar,
            Self::Bar => Self::Line,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
        }
    }
}

/// Which series are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SensorFilter {
    #[default]
    All,
    Only(usize),
}

impl SensorFilter {
    /// Parses a filter selector value: `"all"` or a series index.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value == "all" {
            return Some(Self::All);
        }
        value.parse().ok().map(Self::Only)
    }

    pub const fn shows(self, index: usize) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == index,
        }
    }

    /// Steps through `All, 0, 1, .. len-1` and back to `All`.
    pub const fn next(self, len: usize) -> Self {
        match self {
            Self::All if len > 0 => Self::Only(0),
            Self::Only(i) if i + 1 < len => Self::Only(i + 1),
            _ => Self::All,
        }
    }

    pub const fn prev(self, len: usize) -> Self {
        match self {
            Self::All if len > 0 => Self::Only(len - 1),
            Self::Only(i) if i > 0 => Self::Only(i - 1),
            _ => Self::All,
        }
    }
}

/// Text and grid colours of the chart for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartStyle {
    pub text: Rgb,
    pub grid: Rgba,
}

impl ChartStyle {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Rgb::WHITE,
                grid: Rgb::WHITE.with_alpha(0.1),
            },
            Theme::Light => Self {
                text: Rgb::new(0x33, 0x33, 0x33),
                grid: Rgb::BLACK.with_alpha(0.1),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsChart {
    pub labels: Vec<&'static str>,
    pub series: Vec<Series>,
    pub kind: ChartKind,
    pub filter: SensorFilter,
}

impl AnalyticsChart {
    /// The three-sensor sample the dashboard ships with.
    pub fn sample() -> Self {
        Self {
            labels: HOUR_LABELS.to_vec(),
            series: vec![
                Series {
                    label: "Sensor A (Dwntwn)",
                    color: Rgb::new(0x00, 0xE3, 0x96),
                    values: vec![42.0, 45.0, 48.0, 55.0, 60.0, 58.0, 52.0, 48.0, 50.0, 55.0],
                },
                Series {
                    label: "Sensor B (Park)",
                    color: Rgb::new(0x00, 0x8F, 0xFB),
                    values: vec![30.0, 32.0, 35.0, 38.0, 40.0, 38.0, 35.0, 32.0, 30.0, 32.0],
                },
                Series {
                    label: "Sensor C (Indstryl)",
                    color: Rgb::new(0xFE, 0xB0, 0x19),
                    values: vec![65.0, 70.0, 75.0, 80.0, 85.0, 90.0, 85.0, 80.0, 75.0, 70.0],
                },
            ],
            kind: ChartKind::Line,
            filter: SensorFilter::All,
        }
    }

    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggled();
    }

    /// Applies a selector value. Returns `false` and keeps the current filter
    /// when the value does not parse.
    pub fn select(&mut self, value: &str) -> bool {
        match SensorFilter::parse(value) {
            Some(filter) => {
                self.filter = filter;
                true
            }
            None => {
                tracing::debug!(value, "ignoring unknown sensor filter");
                false
            }
        }
    }

    pub fn next_filter(&mut self) {
        self.filter = self.filter.next(self.series.len());
    }

    pub fn prev_filter(&mut self) {
        self.filter = self.filter.prev(self.series.len());
    }

    pub fn visible_series(&self) -> impl Iterator<Item = &Series> {
        let filter = self.filter;
        self.series
            .iter()
            .enumerate()
            .filter(move |(index, _)| filter.shows(*index))
            .map(|(_, series)| series)
    }

    /// Upper bound for the y axis, which always starts at zero.
    pub fn y_max(&self) -> f64 {
        self.series.iter().map(Series::max).fold(0.0, f64::max)
    }

    pub fn filter_label(&self) -> &'static str {
        match self.filter {
            SensorFilter::All => "All sensors",
            SensorFilter::Only(index) => self
                .series
                .get(index)
                .map_or("No sensor", |series| series.label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_three_aligned_series() {
        let chart = AnalyticsChart::sample();
        assert_eq!(chart.series.len(), 3);
        for series in &chart.series {
            assert_eq!(series.values.len(), chart.labels.len());
        }
        assert_eq!(chart.series[0].color.to_string(), "#00e396");
        assert_eq!(chart.y_max(), 90.0);
    }

    #[test]
    fn filter_parse_accepts_all_and_indices() {
        assert_eq!(SensorFilter::parse("all"), Some(SensorFilter::All));
        assert_eq!(SensorFilter::parse("2"), Some(SensorFilter::Only(2)));
        assert_eq!(SensorFilter::parse("sensor"), None);
    }

    #[test]
    fn single_sensor_hides_the_others() {
        let mut chart = AnalyticsChart::sample();
        assert!(chart.select("1"));

        let labels: Vec<_> = chart.visible_series().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Sensor B (Park)"]);
        assert_eq!(chart.filter_label(), "Sensor B (Park)");
    }

    #[test]
    fn invalid_selection_keeps_current_filter() {
        let mut chart = AnalyticsChart::sample();
        chart.select("0");

        assert!(!chart.select("bogus"));
        assert_eq!(chart.filter, SensorFilter::Only(0));
    }

    #[test]
    fn out_of_range_index_shows_nothing() {
        let mut chart = AnalyticsChart::sample();
        chart.select("7");
        assert_eq!(chart.visible_series().count(), 0);
    }

    #[test]
    fn filter_cycles_through_every_sensor() {
        let mut filter = SensorFilter::All;
        let mut seen = Vec::new();
        for _ in 0..4 {
            filter = filter.next(3);
            seen.push(filter);
        }
        assert_eq!(
            seen,
            vec![
                SensorFilter::Only(0),
                SensorFilter::Only(1),
                SensorFilter::Only(2),
                SensorFilter::All,
            ]
        );
        assert_eq!(SensorFilter::All.prev(3), SensorFilter::Only(2));
    }

    #[test]
    fn kind_toggles() {
        let mut chart = AnalyticsChart::sample();
        chart.toggle_kind();
        assert_eq!(chart.kind, ChartKind::Bar);
        chart.toggle_kind();
        assert_eq!(chart.kind, ChartKind::Line);
    }

    #[test]
    fn style_follows_theme() {
        let dark = ChartStyle::for_theme(Theme::Dark);
        assert_eq!(dark.text.to_string(), "#ffffff");
        assert_eq!(dark.grid.to_string(), "rgba(255, 255, 255, 0.1)");

        let light = ChartStyle::for_theme(Theme::Light);
        assert_eq!(light.text.to_string(), "#333333");
        assert_eq!(light.grid.to_string(), "rgba(0, 0, 0, 0.1)");
    }
}
