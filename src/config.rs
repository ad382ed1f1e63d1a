//! Process configuration, read once at startup
//!
//! # Environment Variables
//!
//! * `AUCTION_INTERVAL` - Closure delay as a human duration, e.g. `2s`, `500ms`, `5m` (default: 30s)
//! * `DATABASE_URL` - Database connection string (required by the server)
//! * `BIND_ADDRESS` - HTTP listen address (default: 0.0.0.0:8080)

use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Default closure delay when `AUCTION_INTERVAL` is absent or malformed
pub const DEFAULT_AUCTION_INTERVAL: Duration = Duration::from_secs(30);

const ENV_AUCTION_INTERVAL: &str = "AUCTION_INTERVAL";
const ENV_DATABASE_URL: &str = "DATABASE_URL";
const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid auction interval '{raw}': {source}")]
    InvalidInterval {
        raw: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Parse a duration such as `2s`, `1m 30s` or `250ms`
pub fn parse_auction_interval(raw: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(raw.trim()).map_err(|source| ConfigError::InvalidInterval {
        raw: raw.to_string(),
        source,
    })
}

/// Settings of the lifecycle scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Delay between arming a closure and attempting it
    pub auction_interval: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            auction_interval: DEFAULT_AUCTION_INTERVAL,
        }
    }
}

impl LifecycleConfig {
    pub fn new(auction_interval: Duration) -> Self {
        Self { auction_interval }
    }

    pub fn from_env() -> Self {
        Self::from_raw(env::var(ENV_AUCTION_INTERVAL).ok().as_deref())
    }

    /// Build from the raw setting. A malformed or absent value never fails,
    /// it falls back to [`DEFAULT_AUCTION_INTERVAL`].
    pub fn from_raw(raw: Option<&str>) -> Self {
        let auction_interval = match raw.map(parse_auction_interval) {
            Some(Ok(interval)) => interval,
            Some(Err(e)) => {
                warn!(
                    error = %e,
                    default_secs = DEFAULT_AUCTION_INTERVAL.as_secs(),
                    "Falling back to default auction interval"
                );
                DEFAULT_AUCTION_INTERVAL
            }
            None => {
                info!(
                    default_secs = DEFAULT_AUCTION_INTERVAL.as_secs(),
                    "{} not set, using default auction interval", ENV_AUCTION_INTERVAL
                );
                DEFAULT_AUCTION_INTERVAL
            }
        };

        Self { auction_interval }
    }
}

/// Server settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    pub lifecycle: LifecycleConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var(ENV_DATABASE_URL).map_err(|_| ConfigError::Missing(ENV_DATABASE_URL))?;
        let bind_address =
            env::var(ENV_BIND_ADDRESS).unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());

        Ok(Self {
            database_url,
            bind_address,
            lifecycle: LifecycleConfig::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval() {
        assert_eq!(DEFAULT_AUCTION_INTERVAL, Duration::from_secs(30));
        assert_eq!(LifecycleConfig::default().auction_interval, DEFAULT_AUCTION_INTERVAL);
    }

    #[test]
    fn test_parse_durations() {
        assert_eq!(parse_auction_interval("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_auction_interval("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_auction_interval(" 1m ").unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn test_malformed_interval_falls_back() {
        assert!(parse_auction_interval("soon").is_err());
        assert_eq!(
            LifecycleConfig::from_raw(Some("soon")).auction_interval,
            DEFAULT_AUCTION_INTERVAL
        );
        assert_eq!(
            LifecycleConfig::from_raw(Some("")).auction_interval,
            DEFAULT_AUCTION_INTERVAL
        );
    }

    #[test]
    fn test_absent_interval_falls_back() {
        assert_eq!(LifecycleConfig::from_raw(None).auction_interval, DEFAULT_AUCTION_INTERVAL);
    }

    #[test]
    fn test_configured_interval() {
        assert_eq!(
            LifecycleConfig::from_raw(Some("2s")).auction_interval,
            Duration::from_secs(2)
        );
    }
}
