use std::{env, fmt, time::Duration};

/// Environment variable holding the Google Maps API key.
pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

/// Environment variable holding the per-request timeout in seconds.
pub const TIMEOUT_VAR: &str = "ADDRESS_VALIDATION_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Config represents the credentials and limits used to reach the validation service.
///
/// `Debug` redacts the api key.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Key appended to every request as the `key` query parameter.
    pub api_key: String,
    /// Upper bound for a single validation request, connect to last body byte.
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// - `GOOGLE_MAPS_API_KEY` (required)
    /// - `ADDRESS_VALIDATION_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let timeout = match env::var(TIMEOUT_VAR) {
            Ok(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidTimeout(raw))?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self { api_key, timeout })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GOOGLE_MAPS_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("invalid ADDRESS_VALIDATION_TIMEOUT_SECS value: '{0}'")]
    InvalidTimeout(String),
}
