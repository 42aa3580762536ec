use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
pub const fn default_directive(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(debug)))
}

/// Logs to stderr. Used when no alternate screen is active.
pub fn init_stderr(debug: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre!("Failed to install logger: {e}"))
}

/// Logs to `path`, appending. The interactive dashboard owns the terminal, so
/// nothing may be written to stdout or stderr while it runs.
pub fn init_file(path: &Path, debug: bool) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| eyre!("Failed to install logger: {e}"))
}
