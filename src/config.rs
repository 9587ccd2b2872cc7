//! Configuration Module
//!
//! Handles loading and validating server configuration from environment
//! variables.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Server configuration parameters.
///
/// All values except the API token can be configured via environment
/// variables with sensible defaults. Durations accept plain seconds (`"60"`)
/// or one or more `<number><unit>` terms (`"500ms"`, `"1.5s"`, `"1m30s"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TTL applied to writes without an explicit TTL
    pub default_ttl: Duration,
    /// Interval between eviction sweeps
    pub cleanup_interval: Duration,
    /// HTTP server port
    pub server_port: u16,
    /// Bearer token required on API routes; None disables auth, which only
    /// configs built in code can do
    pub api_token: Option<String>,
    /// Deadline for a single HTTP request
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORE_DEFAULT_TTL` - Default TTL (default: 60s)
    /// - `CLEANUP_INTERVAL` - Eviction sweep interval (default: 300s)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `STORE_API_TOKEN` - Bearer token (required)
    /// - `REQUEST_TIMEOUT` - Per-request deadline (default: 30s)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            default_ttl: duration_var("STORE_DEFAULT_TTL")?.unwrap_or(defaults.default_ttl),
            cleanup_interval: duration_var("CLEANUP_INTERVAL")?
                .unwrap_or(defaults.cleanup_interval),
            server_port: match env::var("SERVER_PORT") {
                Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    name: "SERVER_PORT",
                    value: raw.clone(),
                    reason: "expected a port number".to_string(),
                })?,
                Err(_) => defaults.server_port,
            },
            api_token: Some(
                env::var("STORE_API_TOKEN")
                    .ok()
                    .filter(|token| !token.is_empty())
                    .ok_or(ConfigError::Missing("STORE_API_TOKEN"))?,
            ),
            request_timeout: duration_var("REQUEST_TIMEOUT")?
                .unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks that every duration is strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_ttl.is_zero() {
            return Err(ConfigError::NotPositive("STORE_DEFAULT_TTL"));
        }
        if self.cleanup_interval.is_zero() {
            return Err(ConfigError::NotPositive("CLEANUP_INTERVAL"));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::NotPositive("REQUEST_TIMEOUT"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(60),
            cleanup_interval: Duration::from_secs(300),
            server_port: 8080,
            api_token: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

fn duration_var(name: &'static str) -> Result<Option<Duration>, ConfigError> {
    match env::var(name) {
        Ok(raw) => parse_duration(&raw)
            .map(Some)
            .map_err(|reason| ConfigError::InvalidValue {
                name,
                value: raw,
                reason,
            }),
        Err(_) => Ok(None),
    }
}

/// Parses plain seconds (`"90"`) or a sequence of decimal numbers with
/// units (`"250ms"`, `"1.5s"`, `"1h30m"`). Units are `ns`, `us`, `µs`, `ms`,
/// `s`, `m` and `h`.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("expected a duration".to_string());
    }
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| "number out of range".to_string());
    }

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut total_nanos = 0f64;
    let mut rest = raw;

    while !rest.is_empty() {
        let number_end = rest.find(|c: char| !is_number(c)).unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);
        let amount: f64 = number
            .parse()
            .map_err(|_| format!("expected a number before {tail:?}"))?;

        let unit_end = tail.find(is_number).unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_end);
        let nanos_per_unit = match unit {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            "" => return Err(format!("missing unit after {number:?}")),
            other => return Err(format!("unknown unit {other:?}")),
        };

        total_nanos += amount * nanos_per_unit;
        rest = next;
    }

    // Float to int casts saturate
    Ok(Duration::from_nanos(total_nanos.round() as u64))
}
