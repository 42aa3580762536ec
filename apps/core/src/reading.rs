use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Default path of the readings resource, relative to the dashboard origin.
pub const DEFAULT_READINGS_PATH: &str = "/api/readings/";

/// One snapshot of sensor measurements as served by the readings endpoint.
///
/// Fields the dashboard does not display (ids, sensor names, timestamps) are
/// ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub aqi: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co: Option<f64>,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
}

impl Reading {
    pub const fn new(aqi: i64, temperature: f64, humidity: f64) -> Self {
        Self {
            aqi,
            co: None,
            temperature,
            humidity,
        }
    }

    #[must_use]
    pub const fn with_co(mut self, co: f64) -> Self {
        self.co = Some(co);
        self
    }
}

/// Decodes a readings response body.
///
/// The endpoint returns newest-first by convention; the order is kept as-is.
pub fn decode_readings(body: &str) -> Result<Vec<Reading>, FetchError> {
    serde_json::from_str(body).map_err(FetchError::from)
}

/// The entry treated as "latest". Recency is not verified: index 0 wins.
pub fn latest(readings: &[Reading]) -> Option<&Reading> {
    readings.first()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_minimal_payload() {
        let readings = decode_readings(r#"[{"aqi":120,"temperature":31,"humidity":70}]"#)
            .expect("payload should decode");

        assert_eq!(readings, vec![Reading::new(120, 31.0, 70.0)]);
    }

    #[test]
    fn ignores_unknown_fields_and_keeps_co() {
        let body = r#"[
            {"id": 9, "sensor": "A", "timestamp": "2024-05-01T12:00:00Z",
             "aqi": 42, "co": 0.4, "temperature": 28.5, "humidity": 61}
        ]"#;
        let readings = decode_readings(body).expect("payload should decode");

        assert_eq!(readings[0].co, Some(0.4));
        assert_eq!(readings[0].aqi, 42);
    }

    #[test]
    fn empty_array_is_not_an_error() {
        let readings = decode_readings("[]").expect("empty array should decode");
        assert!(readings.is_empty());
        assert!(latest(&readings).is_none());
    }

    #[test]
    fn object_instead_of_array_is_a_decode_error() {
        let result = decode_readings(r#"{"aqi": 10}"#);
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[test]
    fn latest_is_first_element_regardless_of_values() {
        let readings = vec![Reading::new(10, 20.0, 30.0), Reading::new(300, 40.0, 50.0)];
        assert_eq!(latest(&readings).map(|r| r.aqi), Some(10));
    }
}
