//! In-memory alert log behind the notification dropdown.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::air_quality::MODERATE_MAX_AQI;
use crate::reading::Reading;

/// Title every alert item is shown under.
pub const ALERT_TITLE: &str = "High AQI Alert";

/// Shown in place of the list when the log is empty.
pub const EMPTY_STATE: &str = "No new alerts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Relative age for display; the timestamp never expires an entry.
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let minutes = (now - self.created_at).num_minutes();
        match minutes {
            i64::MIN..=0 => "Just now".to_string(),
            1 => "1 min ago".to_string(),
            2..=59 => format!("{minutes} min ago"),
            _ => format!("{} h ago", minutes / 60),
        }
    }
}

/// Alert text for a dangerous AQI. The exact string is the de-duplication key.
pub fn danger_message(aqi: i64) -> String {
    format!("Critical Warning: High AQI ({aqi}) detected!")
}

/// Newest-first log of threshold breaches, plus the state of its dropdown view.
///
/// No two entries ever share a message. Entries leave only through [`clear`].
///
/// [`clear`]: NotificationLog::clear
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationLog {
    entries: Vec<Notification>,
    badge_visible: bool,
    #[serde(skip)]
    dropdown_open: bool,
}

impl NotificationLog {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            badge_visible: false,
            dropdown_open: false,
        }
    }

    /// Records an alert for `reading` if its AQI is above the moderate band and
    /// the same message is not already in the log.
    ///
    /// Returns the new entry when one was added.
    pub fn check_danger_level(
        &mut self,
        reading: &Reading,
        now: DateTime<Utc>,
    ) -> Option<&Notification> {
        if reading.aqi <= MODERATE_MAX_AQI {
            return None;
        }

        let message = danger_message(reading.aqi);
        if self.contains_message(&message) {
            tracing::debug!(aqi = reading.aqi, "alert already in log");
            return None;
        }

        tracing::info!(aqi = reading.aqi, "raising high AQI alert");
        Some(self.push(message, Severity::Danger, now))
    }

    /// Prepends an entry and shows the unread badge.
    pub fn push(&mut self, message: String, severity: Severity, now: DateTime<Utc>) -> &Notification {
        self.entries.insert(
            0,
            Notification {
                message,
                severity,
                created_at: now,
            },
        );
        self.badge_visible = true;
        &self.entries[0]
    }

    /// Empties the log and hides the badge.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.badge_visible = false;
    }

    pub fn contains_message(&self, message: &str) -> bool {
        self.entries.iter().any(|entry| entry.message == message)
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn badge_visible(&self) -> bool {
        self.badge_visible
    }

    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown_open = false;
    }

    pub const fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }
}
