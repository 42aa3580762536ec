//! One-shot fetch for pipes and scripts.

use airwatch_core::{
    apply_fetch_result, Monitor, Notification, RefreshOutcome, Slot, SlotBoard, Tone,
};
use chrono::{DateTime, Utc};
use color_eyre::Result;
use serde::Serialize;

use crate::config::AppConfig;
use crate::poller::{HttpReadingSource, ReadingSource};

#[derive(Debug, Serialize)]
pub struct HeadlessSlot {
    pub slot: Slot,
    pub label: &'static str,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
}

/// What a single refresh cycle left on the dashboard.
#[derive(Debug, Serialize)]
pub struct HeadlessReport {
    pub source: String,
    /// `updated`, `empty` or `failed`.
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub slots: Vec<HeadlessSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    pub notifications: Vec<Notification>,
}

pub fn build_report(
    source: &str,
    outcome: &RefreshOutcome,
    board: &SlotBoard,
    monitor: &Monitor,
) -> HeadlessReport {
    let (outcome_name, error) = match outcome {
        RefreshOutcome::Updated(_) => ("updated", None),
        RefreshOutcome::Empty => ("empty", None),
        RefreshOutcome::Failed(err) => ("failed", Some(err.to_string())),
    };

    HeadlessReport {
        source: source.to_string(),
        outcome: outcome_name,
        error,
        slots: board
            .iter()
            .map(|(slot, value)| HeadlessSlot {
                slot,
                label: slot.label(),
                text: value.text.clone(),
                tone: value.tone,
            })
            .collect(),
        status: monitor.quality().map(|quality| quality.label()),
        notifications: monitor.notifications().entries().to_vec(),
    }
}

/// Fetches once, prints the dashboard and returns. A failed fetch is
/// reported in the output; it is not an error of the command itself.
pub async fn run_headless(config: &AppConfig, json: bool) -> Result<()> {
    let source = HttpReadingSource::new(config.api_url.clone(), config.timeout)?;
    let mut monitor = Monitor::new();
    let mut board = SlotBoard::standard(config.show_co);

    let result = source.fetch().await;
    let outcome = apply_fetch_result(result, &mut monitor, &mut board, Utc::now());
    let report = build_report(source.url(), &outcome, &board, &monitor);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report, Utc::now()));
    }
    Ok(())
}

fn render_text(report: &HeadlessReport, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str("\nAirWatch\n");
    out.push_str("========\n");
    out.push_str(&format!("Source: {}\n", report.source));

    match (&report.error, report.outcome) {
        (Some(error), _) => out.push_str(&format!("Error fetching readings: {error}\n")),
        (None, "empty") => out.push_str("No readings available yet\n"),
        _ => {}
    }

    out.push('\n');
    for slot in &report.slots {
        out.push_str(&format!("{}: {}\n", slot.label, slot.text));
    }

    if !report.notifications.is_empty() {
        out.push_str("\nAlerts:\n");
        for entry in &report.notifications {
            out.push_str(&format!("- {} ({})\n", entry.message, entry.age_label(now)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use airwatch_core::{FetchError, Reading};
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap()
    }

    fn refresh(result: Result<Vec<Reading>, FetchError>) -> HeadlessReport {
        let mut monitor = Monitor::new();
        let mut board = SlotBoard::standard(false);
        let outcome = apply_fetch_result(result, &mut monitor, &mut board, fixed_now());
        build_report("http://sensors.local/api/readings/", &outcome, &board, &monitor)
    }

    #[test]
    fn poor_reading_report_carries_alert() {
        let report = refresh(Ok(vec![Reading::new(120, 31.5, 70.0)]));

        assert_eq!(report.outcome, "updated");
        assert_eq!(report.status, Some("POOR"));
        assert_eq!(report.slots[0].text, "120");
        assert_eq!(report.notifications.len(), 1);

        let text = render_text(&report, fixed_now());
        assert!(text.contains("Air Quality Index: 120"));
        assert!(text.contains("- Critical Warning: High AQI (120) detected! (Just now)"));
    }

    #[test]
    fn failed_fetch_is_reported_not_raised() {
        let report = refresh(Err(FetchError::Status(503)));

        assert_eq!(report.outcome, "failed");
        assert_eq!(report.error.as_deref(), Some("HTTP error: 503"));
        assert!(report.status.is_none());
        assert!(report.slots.iter().all(|slot| slot.text == "--"));
        assert!(render_text(&report, fixed_now()).contains("Error fetching readings: HTTP error: 503"));
    }

    #[test]
    fn json_report_names_slots_in_snake_case() {
        let report = refresh(Ok(vec![Reading::new(42, 24.0, 50.0)]));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["outcome"], "updated");
        assert_eq!(json["status"], "EXCELLENT");
        assert_eq!(json["slots"][1]["slot"], "aqi_status");
        assert_eq!(json["slots"][1]["tone"], "success");
        assert!(json.get("error").is_none());
    }
}
