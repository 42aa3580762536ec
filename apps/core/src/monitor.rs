use chrono::{DateTime, Utc};

use crate::air_quality::AirQuality;
use crate::display::{render_reading, Binding, DisplaySink, RenderReport, DEFAULT_BINDINGS};
use crate::notifier::NotificationLog;
use crate::reading::Reading;

/// Result of projecting one reading onto the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    pub quality: AirQuality,
    pub render: RenderReport,
    /// Message of the alert added by this update, if any.
    pub alert: Option<String>,
}

/// Renderer and notifier for the stat cards: owns the binding table, the
/// notification log and the last reading it displayed.
#[derive(Debug, Clone)]
pub struct Monitor {
    bindings: Vec<Binding>,
    notifications: NotificationLog,
    last_reading: Option<Reading>,
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Monitor {
    pub fn new() -> Self {
        Self::with_bindings(DEFAULT_BINDINGS.to_vec())
    }

    pub const fn with_bindings(bindings: Vec<Binding>) -> Self {
        Self {
            bindings,
            notifications: NotificationLog::new(),
            last_reading: None,
        }
    }

    /// Writes `reading` into `sink`, then raises an alert if it is dangerous.
    pub fn update<S: DisplaySink + ?Sized>(
        &mut self,
        reading: &Reading,
        sink: &mut S,
        now: DateTime<Utc>,
    ) -> UpdateReport {
        let render = render_reading(reading, &self.bindings, sink);
        if !render.skipped.is_empty() {
            tracing::debug!(skipped = ?render.skipped, "display slots not present");
        }

        let quality = AirQuality::classify(reading.aqi);
        let alert = self
            .notifications
            .check_danger_level(reading, now)
            .map(|notification| notification.message.clone());

        self.last_reading = Some(reading.clone());

        UpdateReport {
            quality,
            render,
            alert,
        }
    }

    pub const fn notifications(&self) -> &NotificationLog {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationLog {
        &mut self.notifications
    }

    pub const fn last_reading(&self) -> Option<&Reading> {
        self.last_reading.as_ref()
    }

    pub fn quality(&self) -> Option<AirQuality> {
        self.last_reading
            .as_ref()
            .map(|reading| AirQuality::classify(reading.aqi))
    }
}
