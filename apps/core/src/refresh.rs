//! The step every poll cycle ends with, whatever transport fetched the data.

use chrono::{DateTime, Utc};

use crate::display::DisplaySink;
use crate::error::FetchError;
use crate::monitor::{Monitor, UpdateReport};
use crate::reading::{latest, Reading};

/// Default period between two refreshes.
pub const POLL_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The latest reading was displayed.
    Updated(UpdateReport),
    /// The source answered with an empty list; nothing was touched.
    Empty,
    /// The cycle failed; the display keeps its previous values.
    Failed(FetchError),
}

impl RefreshOutcome {
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Applies one fetch result to the dashboard.
///
/// Failures are logged and swallowed: the next cycle is the only retry.
pub fn apply_fetch_result<S: DisplaySink + ?Sized>(
    result: Result<Vec<Reading>, FetchError>,
    monitor: &mut Monitor,
    sink: &mut S,
    now: DateTime<Utc>,
) -> RefreshOutcome {
    let readings = match result {
        Ok(readings) => readings,
        Err(err) => {
            tracing::warn!(error = %err, "error fetching readings, keeping previous values");
            return RefreshOutcome::Failed(err);
        }
    };

    let Some(reading) = latest(&readings) else {
        tracing::debug!("readings source returned an empty list");
        return RefreshOutcome::Empty;
    };

    tracing::debug!(aqi = reading.aqi, count = readings.len(), "applying latest reading");
    RefreshOutcome::Updated(monitor.update(reading, sink, now))
}
