use serde::Deserialize;
use std::env;
use std::error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_PATH_ENV_VAR: &str = "PICKET_CONFIG_FILE";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Inclusive upper bound on the day count of a committed range.
    pub max_span_days: u32,
    /// Commit on the first click instead of anchoring a range.
    pub single_day: bool,
    /// `chrono` format string for dates on the trigger line.
    pub date_format: String,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            max_span_days: 7,
            single_day: false,
            date_format: "%b %d %Y".to_owned(),
            tick_rate_ms: 500,
        }
    }
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    fn validate(self) -> Result<Config, ConfigError> {
        if self.max_span_days == 0 {
            return Err(ConfigError::Invalid(
                "max_span_days must be at least 1".to_owned(),
            ));
        }

        if self.date_format.is_empty() {
            return Err(ConfigError::Invalid(
                "date_format must not be empty".to_owned(),
            ));
        }

        Ok(self)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "could not read config file: {}", err),
            ConfigError::Parse(err) => write!(f, "could not parse config file: {}", err),
            ConfigError::Invalid(message) => write!(f, "invalid config: {}", message),
        }
    }
}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

fn parse(raw: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(raw)?)
}

fn parse_file(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path)?;
    parse(&raw)
}

fn candidate_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("picket").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".picket.toml"));
    }

    locations
}

/// Loads the config from the explicitly given path, or from the first
/// existing well-known location, or falls back to the built-in defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config = if let Some(path) = path {
        parse_file(path)?
    } else if let Some(path) = candidate_locations().iter().find(|path| path.is_file()) {
        log::info!("using config file {}", path.display());
        parse_file(path)?
    } else {
        log::info!("no config file found, using defaults");
        Config::default()
    };

    config.validate()
}
