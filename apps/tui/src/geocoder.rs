use std::time::Duration;

use airwatch_core::geocode::{GeocodeRequest, GeocodeResult};
use airwatch_core::GeocodeError;
use reqwest::header::{ACCEPT, USER_AGENT};

const CLIENT_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub type SearchResult = Result<Option<GeocodeResult>, GeocodeError>;

/// Place search client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: reqwest::Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// One search, no retry.
    pub async fn search(&self, request: &GeocodeRequest) -> SearchResult {
        tracing::info!(query = request.query(), "searching location");

        let response = self
            .client
            .get(&self.base_url)
            .query(&request.params())
            .header(USER_AGENT, CLIENT_AGENT)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;
        request.parse_response(&body)
    }
}
