//! Server configuration from environment variables.

use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tournaments not accessed for this long are dropped.
    pub inactivity_timeout: Duration,
    /// How often the inactivity sweep runs.
    pub cleanup_interval: Duration,
    /// Fixed shuffle seed for replayable brackets; entropy when unset.
    pub bracket_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            inactivity_timeout: Duration::from_secs(12 * 3600),
            cleanup_interval: Duration::from_secs(30 * 60),
            bracket_seed: None,
        }
    }
}

/// Parse `key`'s value, warning and returning `None` when it does not parse.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring invalid {key}={raw:?}; using default");
            None
        }
    }
}

/// `value * unit` seconds, or `None` with a warning if that overflows.
fn scaled_secs(key: &str, value: u64, unit: u64) -> Option<Duration> {
    match value.checked_mul(unit) {
        Some(secs) => Some(Duration::from_secs(secs)),
        None => {
            log::warn!("Ignoring {key}={value}: too large; using default");
            None
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `INACTIVITY_HOURS`, `CLEANUP_MINUTES` and `BRACKET_SEED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reading from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = lookup("HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT").unwrap_or(defaults.port);
        let inactivity_timeout = parse_var::<u64>(&lookup, "INACTIVITY_HOURS")
            .filter(|&h| h > 0)
            .and_then(|h| scaled_secs("INACTIVITY_HOURS", h, 3600))
            .unwrap_or(defaults.inactivity_timeout);
        let cleanup_interval = parse_var::<u64>(&lookup, "CLEANUP_MINUTES")
            .filter(|&m| m > 0)
            .and_then(|m| scaled_secs("CLEANUP_MINUTES", m, 60))
            .unwrap_or(defaults.cleanup_interval);
        let bracket_seed = parse_var(&lookup, "BRACKET_SEED");

        Self {
            host,
            port,
            inactivity_timeout,
            cleanup_interval,
            bracket_seed,
        }
    }

    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
