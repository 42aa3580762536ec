use airwatch_tui::cli::CliArgs;
use airwatch_tui::{event, logging, terminal, App, AppConfig};
use clap::Parser;
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = AppConfig::from_env()?;

    // Without a terminal on stdout there is nothing to draw on
    let headless = args.headless || !is_terminal();
    if headless {
        logging::init_stderr(config.debug)?;
        return event::run_headless(&config, args.json).await;
    }

    logging::init_file(&config.log_file, config.debug)?;
    tracing::info!(api_url = %config.api_url, "starting dashboard");

    let mut app = App::from_config(&config);

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app, &config).await;
    terminal::cleanup(true, true);

    if let Err(e) = &result {
        tracing::error!(error = %e, "dashboard exited with an error");
    }
    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
