use std::io::Stdout;
use std::time::Duration;

use chrono::Utc;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::app::{handle_input, App};
use crate::config::AppConfig;
use crate::geocoder::{Geocoder, SearchResult};
use crate::poller::{spawn_poller, HttpReadingSource, PollResult};
use crate::ui;

// Event poll timeout (ms); also the redraw period while idle.
const EVENT_POLL_TIMEOUT: u64 = 50;
const CHANNEL_CAPACITY: usize = 8;

/// Run the dashboard until the user quits.
///
/// Poll results and search results arrive over channels and are applied
/// between two frames, so `App` is only ever touched from this loop.
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    config: &AppConfig,
) -> Result<()> {
    let source = HttpReadingSource::new(config.api_url.clone(), config.timeout)?;
    let geocoder = Geocoder::new(config.geocoder_url.clone(), config.timeout)?;

    let (poll_tx, mut poll_rx) = mpsc::channel::<PollResult>(CHANNEL_CAPACITY);
    let (search_tx, mut search_rx) = mpsc::channel::<SearchResult>(CHANNEL_CAPACITY);

    tracing::info!(url = %config.api_url, every = ?config.poll_interval, "starting poller");
    let poller = spawn_poller(source, config.poll_interval, poll_tx);

    let result = event_loop(terminal, app, &geocoder, &search_tx, &mut poll_rx, &mut search_rx);

    poller.abort();
    tracing::info!("dashboard closed");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    geocoder: &Geocoder,
    search_tx: &mpsc::Sender<SearchResult>,
    poll_rx: &mut mpsc::Receiver<PollResult>,
    search_rx: &mut mpsc::Receiver<SearchResult>,
) -> Result<()> {
    while app.running {
        app.update();

        while let Ok(result) = poll_rx.try_recv() {
            app.apply_refresh(result, Utc::now());
        }
        while let Ok(result) = search_rx.try_recv() {
            app.finish_search(result);
        }

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) | Err(_) => {}
            }
        }

        if let Some(request) = app.take_pending_search() {
            let geocoder = geocoder.clone();
            let tx = search_tx.clone();
            tokio::spawn(async move {
                let result = geocoder.search(&request).await;
                if tx.send(result).await.is_err() {
                    tracing::debug!("dashboard gone, dropping search result");
                }
            });
        }
    }
    Ok(())
}
