use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Port used when `SERVER_PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the roster server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub server_host: IpAddr,
    /// Port the HTTP listener binds to.
    pub server_port: u16,
    /// Optional file that receives a copy of the log stream.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: IpAddr::from([0, 0, 0, 0]),
            server_port: DEFAULT_PORT,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            server_host: get("SERVER_HOST")
                .map(|value| parse_value("SERVER_HOST", &value))
                .transpose()?
                .unwrap_or(defaults.server_host),
            server_port: get("SERVER_PORT")
                .map(|value| parse_value("SERVER_PORT", &value))
                .transpose()?
                .unwrap_or(defaults.server_port),
            log_file: get("ROSTER_LOG_FILE").map(PathBuf::from),
        })
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Load configuration from the environment, honoring a `.env` file.
pub fn load_config() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();
    Config::from_env()
}
