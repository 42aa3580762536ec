//! Platform-free core of the AirWatch dashboard.
//!
//! Everything here is plain data and synchronous logic so that the terminal
//! and browser front-ends share one definition of how a reading is shown,
//! classified and turned into an alert. Transport (HTTP, timers, storage)
//! stays in the front-ends.

pub mod air_quality;
pub mod chart;
pub mod color;
pub mod display;
pub mod error;
pub mod geocode;
pub mod heatmap;
pub mod map;
pub mod monitor;
pub mod notifier;
pub mod reading;
pub mod refresh;
pub mod theme;

pub use air_quality::{AirQuality, Tone};
pub use display::{render_reading, Binding, DisplaySink, RenderReport, Slot, SlotBoard, SlotValue};
pub use error::{FetchError, GeocodeError, PreferencesError};
pub use monitor::{Monitor, UpdateReport};
pub use notifier::{Notification, NotificationLog, Severity};
pub use reading::Reading;
pub use refresh::{apply_fetch_result, RefreshOutcome};
pub use theme::{Theme, ThemeChanged, ThemeController, ThemeStore};
