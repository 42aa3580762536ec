use thiserror::Error;

/// Failures of one readings refresh cycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (DNS, refused, timeout...).
    #[error("request failed: {0}")]
    Transport(String),
    /// Non-2xx response from the readings endpoint.
    #[error("HTTP error: {0}")]
    Status(u16),
    /// The body was not a JSON array of readings.
    #[error("Parse error: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP error: {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Decode(String),
    /// A result came back but its `lat`/`lon` were not numbers.
    #[error("invalid coordinate {field}: {value:?}")]
    Coordinate { field: &'static str, value: String },
}

impl From<serde_json::Error> for GeocodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Reading or writing the stored theme preference failed.
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("preference storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference file is malformed: {0}")]
    Format(String),
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
}
