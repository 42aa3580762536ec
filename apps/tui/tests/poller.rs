use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use airwatch_core::{FetchError, Reading};
use airwatch_tui::poller::{spawn_poller, PollResult, ReadingSource};
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Replays `script` in order, then keeps failing.
struct ScriptedSource {
    calls: Arc<AtomicUsize>,
    script: Vec<PollResult>,
}

impl ScriptedSource {
    fn new(script: Vec<PollResult>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
                script,
            },
            calls,
        )
    }
}

impl ReadingSource for ScriptedSource {
    async fn fetch(&self) -> PollResult {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .get(call)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Transport("script exhausted".to_string())))
    }
}

#[tokio::test(start_paused = true)]
async fn first_fetch_is_immediate_then_every_period() {
    let (source, calls) = ScriptedSource::new(vec![
        Ok(vec![Reading::new(40, 25.0, 55.0)]),
        Ok(vec![Reading::new(120, 31.5, 70.0)]),
    ]);
    let (tx, mut rx) = mpsc::channel(4);
    let started = Instant::now();

    let handle = spawn_poller(source, Duration::from_secs(30), tx);

    let first = rx.recv().await.unwrap();
    assert_eq!(first.unwrap()[0].aqi, 40);
    assert!(started.elapsed() < Duration::from_secs(1));

    let second = rx.recv().await.unwrap();
    assert_eq!(second.unwrap()[0].aqi, 120);
    assert!(started.elapsed() >= Duration::from_secs(30));
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn failures_do_not_stop_the_loop() {
    let (source, calls) = ScriptedSource::new(vec![
        Err(FetchError::Status(500)),
        Err(FetchError::Decode("bad".to_string())),
        Ok(vec![Reading::new(60, 29.0, 65.0)]),
    ]);
    let (tx, mut rx) = mpsc::channel(4);

    let handle = spawn_poller(source, Duration::from_secs(30), tx);

    assert_eq!(rx.recv().await, Some(Err(FetchError::Status(500))));
    assert!(matches!(rx.recv().await, Some(Err(FetchError::Decode(_)))));
    assert!(matches!(rx.recv().await, Some(Ok(readings)) if readings[0].aqi == 60));
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn poller_stops_when_dashboard_is_gone() {
    let (source, calls) = ScriptedSource::new(Vec::new());
    let (tx, rx) = mpsc::channel(4);
    drop(rx);

    let handle = spawn_poller(source, Duration::from_secs(30), tx);
    handle.await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
