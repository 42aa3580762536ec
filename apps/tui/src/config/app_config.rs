use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use airwatch_core::geocode::DEFAULT_GEOCODER_URL;
use airwatch_core::refresh::POLL_INTERVAL_SECS;
use dotenv::dotenv;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/readings/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_THEME_FILE: &str = "airwatch_prefs.toml";
pub const DEFAULT_LOG_FILE: &str = "airwatch.log";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Runtime settings, resolved from `.env`, the environment and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub poll_interval: Duration,
    pub timeout: Duration,
    pub geocoder_url: String,
    pub theme_file: PathBuf,
    pub log_file: PathBuf,
    pub heatmap_seed: Option<u64>,
    pub show_co: bool,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval: Duration::from_secs(POLL_INTERVAL_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            theme_file: PathBuf::from(DEFAULT_THEME_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            heatmap_seed: None,
            show_co: false,
            debug: false,
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Unset or blank keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let poll_secs = positive_secs("AIRWATCH_POLL_SECS", get("AIRWATCH_POLL_SECS"), POLL_INTERVAL_SECS)?;
        let timeout_secs = positive_secs(
            "AIRWATCH_TIMEOUT_SECS",
            get("AIRWATCH_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
        )?;
        let heatmap_seed = get("AIRWATCH_HEATMAP_SEED")
            .map(|value| parse("AIRWATCH_HEATMAP_SEED", &value, "an unsigned integer"))
            .transpose()?;

        Ok(Self {
            api_url: get("AIRWATCH_API_URL").unwrap_or(defaults.api_url),
            poll_interval: Duration::from_secs(poll_secs),
            timeout: Duration::from_secs(timeout_secs),
            geocoder_url: get("AIRWATCH_GEOCODER_URL").unwrap_or(defaults.geocoder_url),
            theme_file: get("AIRWATCH_THEME_FILE").map_or(defaults.theme_file, PathBuf::from),
            log_file: get("AIRWATCH_LOG_FILE").map_or(defaults.log_file, PathBuf::from),
            heatmap_seed,
            show_co: get("AIRWATCH_SHOW_CO").is_some_and(|value| is_truthy(&value)),
            debug: get("DEBUG").is_some_and(|value| is_truthy(&value)),
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str, expected: &'static str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
        expected,
    })
}

fn parse_or<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.map_or(Ok(default), |value| parse(key, &value, expected))
}

/// Parses a number of seconds, rejecting 0.
fn positive_secs(key: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let secs = parse_or(key, value.clone(), default, "a whole number of seconds")?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: value.unwrap_or_default(),
            expected: "at least 1 second",
        });
    }
    Ok(secs)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
