use clap::{CommandFactory, Parser};

#[derive(Debug, Default, Parser)]
#[command(name = "airwatch", version, about = "Live air quality dashboard")]
pub struct CliArgs {
    /// Fetch once, print the dashboard and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless dashboard as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Readings endpoint
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Seconds between two refreshes
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Place search endpoint
    #[arg(long = "geocoder-url", value_name = "URL")]
    pub geocoder_url: Option<String>,

    /// Where the theme preference is stored
    #[arg(long = "theme-file", value_name = "PATH")]
    pub theme_file: Option<String>,

    /// Log file for the interactive dashboard
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Fixed seed for the weekly heatmap
    #[arg(long = "heatmap-seed", value_name = "N")]
    pub heatmap_seed: Option<u64>,

    /// Show the CO level card
    #[arg(long = "show-co")]
    pub show_co: bool,
}

impl CliArgs {
    /// Copies every flag that was given into the environment, so that
    /// [`AppConfig::from_env`](crate::config::AppConfig::from_env) sees one
    /// source of truth.
    pub fn apply_env_overrides(&self) {
        for (key, value) in self.env_overrides() {
            std::env::set_var(key, value);
        }
    }

    pub fn env_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();
        if let Some(url) = &self.api_url {
            overrides.push(("AIRWATCH_API_URL", url.clone()));
        }
        if let Some(secs) = self.interval {
            overrides.push(("AIRWATCH_POLL_SECS", secs.to_string()));
        }
        if let Some(secs) = self.timeout {
            overrides.push(("AIRWATCH_TIMEOUT_SECS", secs.to_string()));
        }
        if let Some(url) = &self.geocoder_url {
            overrides.push(("AIRWATCH_GEOCODER_URL", url.clone()));
        }
        if let Some(path) = &self.theme_file {
            overrides.push(("AIRWATCH_THEME_FILE", path.clone()));
        }
        if let Some(path) = &self.log_file {
            overrides.push(("AIRWATCH_LOG_FILE", path.clone()));
        }
        if let Some(seed) = self.heatmap_seed {
            overrides.push(("AIRWATCH_HEATMAP_SEED", seed.to_string()));
        }
        if self.show_co {
            overrides.push(("AIRWATCH_SHOW_CO", "1".to_string()));
        }
        if self.debug {
            overrides.push(("DEBUG", "1".to_string()));
        }
        overrides
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_no_overrides() {
        let args = CliArgs::parse_from(["airwatch"]);
        assert!(args.env_overrides().is_empty());
        assert!(!args.headless);
    }

    #[test]
    fn flags_map_to_env_keys() {
        let args = CliArgs::parse_from([
            "airwatch",
            "--api-url",
            "http://sensors.local/api/readings/",
            "--interval",
            "10",
            "--show-co",
            "--debug",
        ]);

        assert_eq!(
            args.env_overrides(),
            vec![
                ("AIRWATCH_API_URL", "http://sensors.local/api/readings/".to_string()),
                ("AIRWATCH_POLL_SECS", "10".to_string()),
                ("AIRWATCH_SHOW_CO", "1".to_string()),
                ("DEBUG", "1".to_string()),
            ]
        );
    }

    #[test]
    fn help_mentions_headless() {
        assert!(CliArgs::help_text().contains("--headless"));
    }
}
