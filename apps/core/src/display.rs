//! Declarative binding of reading fields to display slots.
//!
//! A front-end exposes whatever slots its layout has through [`DisplaySink`];
//! [`render_reading`] walks a binding table and writes each formatted value.
//! Slots the sink does not have are skipped, so a layout without (say) a CO
//! card degrades to showing the remaining fields.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::air_quality::{AirQuality, Tone};
use crate::reading::Reading;

/// Text shown in a slot that has not received a reading yet.
pub const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Aqi,
    AqiStatus,
    Temperature,
    Humidity,
    Co,
}

impl Slot {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aqi => "Air Quality Index",
            Self::AqiStatus => "Status",
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::Co => "CO Level",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotValue {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
}

impl SlotValue {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone: Some(tone),
        }
    }
}

/// Receiver of slot writes.
pub trait DisplaySink {
    /// Writes `value` into `slot`. Returns `false` when the sink has no such slot.
    fn write(&mut self, slot: Slot, value: SlotValue) -> bool;
}

/// One row of the binding table: a target slot and how to format it.
///
/// `format` returns `None` when the reading carries no value for the slot.
#[derive(Clone, Copy)]
pub struct Binding {
    pub slot: Slot,
    pub format: fn(&Reading) -> Option<SlotValue>,
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding").field("slot", &self.slot).finish_non_exhaustive()
    }
}

fn format_aqi(reading: &Reading) -> Option<SlotValue> {
    Some(SlotValue::plain(reading.aqi.to_string()))
}

fn format_status(reading: &Reading) -> Option<SlotValue> {
    let quality = AirQuality::classify(reading.aqi);
    Some(SlotValue::toned(quality.label(), quality.tone()))
}

fn format_temperature(reading: &Reading) -> Option<SlotValue> {
    Some(SlotValue::plain(format!("{}°C", reading.temperature)))
}

fn format_humidity(reading: &Reading) -> Option<SlotValue> {
    Some(SlotValue::plain(format!("{}%", reading.humidity)))
}

fn format_co(reading: &Reading) -> Option<SlotValue> {
    reading.co.map(|co| SlotValue::plain(co.to_string()))
}

/// The dashboard's binding table.
pub const DEFAULT_BINDINGS: &[Binding] = &[
    Binding {
        slot: Slot::Aqi,
        format: format_aqi,
    },
    Binding {
        slot: Slot::AqiStatus,
        format: format_status,
    },
    Binding {
        slot: Slot::Co,
        format: format_co,
    },
    Binding {
        slot: Slot::Temperature,
        format: format_temperature,
    },
    Binding {
        slot: Slot::Humidity,
        format: format_humidity,
    },
];

/// What one render pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub written: Vec<Slot>,
    /// Slots with a value that the sink does not have.
    pub skipped: Vec<Slot>,
}

/// Writes every bound field of `reading` into `sink`.
pub fn render_reading<S: DisplaySink + ?Sized>(
    reading: &Reading,
    bindings: &[Binding],
    sink: &mut S,
) -> RenderReport {
    let mut report = RenderReport::default();

    for binding in bindings {
        let Some(value) = (binding.format)(reading) else {
            continue;
        };

        if sink.write(binding.slot, value) {
            report.written.push(binding.slot);
        } else {
            report.skipped.push(binding.slot);
        }
    }

    report
}

/// A fixed set of display slots, each holding its current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotBoard {
    slots: BTreeMap<Slot, SlotValue>,
}

impl SlotBoard {
    pub fn new(slots: &[Slot]) -> Self {
        Self {
            slots: slots
                .iter()
                .map(|slot| (*slot, SlotValue::plain(PLACEHOLDER)))
                .collect(),
        }
    }

    /// Slots of the stat-card row. The CO card only exists in the extended layout.
    pub fn standard(show_co: bool) -> Self {
        let mut slots = vec![Slot::Aqi, Slot::AqiStatus, Slot::Temperature, Slot::Humidity];
        if show_co {
            slots.push(Slot::Co);
        }
        Self::new(&slots)
    }

    pub fn has(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn get(&self, slot: Slot) -> Option<&SlotValue> {
        self.slots.get(&slot)
    }

    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.get(slot).map(|value| value.text.as_str())
    }

    pub fn tone(&self, slot: Slot) -> Option<Tone> {
        self.get(slot).and_then(|value| value.tone)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &SlotValue)> {
        self.slots.iter().map(|(slot, value)| (*slot, value))
    }
}

impl DisplaySink for SlotBoard {
    fn write(&mut self, slot: Slot, value: SlotValue) -> bool {
        match self.slots.get_mut(&slot) {
            Some(current) => {
                *current = value;
                true
            }
            None => false,
        }
    }
}
