//! Periodic readings fetch, running on its own task.
//!
//! The poller never touches dashboard state: it sends each fetch result to the
//! UI loop, which applies it with [`airwatch_core::apply_fetch_result`].

use std::future::Future;
use std::time::Duration;

use airwatch_core::reading::decode_readings;
use airwatch_core::{FetchError, Reading};
use reqwest::header::ACCEPT;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

pub type PollResult = Result<Vec<Reading>, FetchError>;

/// Anything that can produce the current list of readings.
pub trait ReadingSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = PollResult> + Send;
}

/// Readings over HTTP: `GET {url}`, JSON array body.
#[derive(Debug, Clone)]
pub struct HttpReadingSource {
    client: reqwest::Client,
    url: String,
}

impl HttpReadingSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ReadingSource for HttpReadingSource {
    async fn fetch(&self) -> PollResult {
        tracing::debug!(url = %self.url, "fetching readings");

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        decode_readings(&body)
    }
}

/// Spawns the poll loop: one fetch immediately, then one per `period`.
///
/// A fetch is always awaited before the next tick is taken, so at most one
/// request is in flight; ticks missed while a slow request was running are
/// dropped. The loop ends when the receiver is gone or the task is aborted.
pub fn spawn_poller<S: ReadingSource>(
    source: S,
    period: Duration,
    results: mpsc::Sender<PollResult>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let result = source.fetch().await;
            if let Err(e) = &result {
                tracing::warn!(error = %e, "poll cycle failed");
            }
            if results.send(result).await.is_err() {
                tracing::debug!("dashboard gone, stopping poller");
                break;
            }
        }
    })
}
