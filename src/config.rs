//! Configuration management for the fit bridge.
//!
//! Configuration can be set via environment variables:
//! - `SAM_GATEWAY_URL` - Optional. Base URL of the agent-mesh gateway. Defaults to `http://localhost:8000`.
//! - `SAM_AGENT_NAME` - Optional. Agent the prompt is addressed to. Defaults to `OrchestratorAgent`.
//! - `SAM_POLL_INTERVAL_SECONDS` - Optional. Spacing between event polls. Defaults to `1.0`.
//! - `SAM_POLL_TIMEOUT_SECONDS` - Optional. Total polling budget per request. Defaults to `300.0`.
//! - `SAM_REQUEST_TIMEOUT_SECONDS` - Optional. Timeout for each gateway call. Defaults to `60.0`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8000";
pub const DEFAULT_AGENT_NAME: &str = "OrchestratorAgent";
pub const DEFAULT_POLL_INTERVAL_SECONDS: f64 = 1.0;
pub const DEFAULT_POLL_TIMEOUT_SECONDS: f64 = 300.0;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: f64 = 60.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Polling configuration for one scoring session.
///
/// Field names on the wire follow the gateway bridge's option names
/// (`pollIntervalSeconds`, `pollTimeoutSeconds`).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawPollSettings")]
pub struct PollSettings {
    /// Wait between two poll ticks
    pub interval: Duration,

    /// Total budget, measured from the first tick
    pub timeout: Duration,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPollSettings {
    #[serde(default = "default_poll_interval")]
    poll_interval_seconds: f64,
    #[serde(default = "default_poll_timeout")]
    poll_timeout_seconds: f64,
}

fn default_poll_interval() -> f64 {
    DEFAULT_POLL_INTERVAL_SECONDS
}

fn default_poll_timeout() -> f64 {
    DEFAULT_POLL_TIMEOUT_SECONDS
}

impl TryFrom<RawPollSettings> for PollSettings {
    type Error = ConfigError;

    fn try_from(raw: RawPollSettings) -> Result<Self, Self::Error> {
        PollSettings::from_secs(raw.poll_interval_seconds, raw.poll_timeout_seconds)
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs_f64(DEFAULT_POLL_INTERVAL_SECONDS),
            timeout: Duration::from_secs_f64(DEFAULT_POLL_TIMEOUT_SECONDS),
        }
    }
}

impl PollSettings {
    /// Build settings from fractional seconds, rejecting a zero interval.
    pub fn from_secs(interval: f64, timeout: f64) -> Result<Self, ConfigError> {
        let interval = parse_seconds("pollIntervalSeconds", interval)?;
        if interval.is_zero() {
            return Err(ConfigError::InvalidValue(
                "pollIntervalSeconds".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let timeout = parse_seconds("pollTimeoutSeconds", timeout)?;
        Ok(Self { interval, timeout })
    }
}

/// Bridge configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gateway base URL, without trailing slash
    pub gateway_url: String,

    /// Agent the envelope is addressed to
    pub agent_name: String,

    /// Poll spacing and deadline
    pub poll: PollSettings,

    /// Per-call timeout for submit and every poll tick
    pub request_timeout: Duration,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric variable does not parse
    /// or a duration is negative.
    pub fn from_env() -> Result<Self, ConfigError> {
        let gateway_url = std::env::var("SAM_GATEWAY_URL")
            .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let agent_name =
            std::env::var("SAM_AGENT_NAME").unwrap_or_else(|_| DEFAULT_AGENT_NAME.to_string());

        let poll = PollSettings::from_secs(
            env_seconds("SAM_POLL_INTERVAL_SECONDS", DEFAULT_POLL_INTERVAL_SECONDS)?,
            env_seconds("SAM_POLL_TIMEOUT_SECONDS", DEFAULT_POLL_TIMEOUT_SECONDS)?,
        )?;

        let request_timeout = parse_seconds(
            "SAM_REQUEST_TIMEOUT_SECONDS",
            env_seconds("SAM_REQUEST_TIMEOUT_SECONDS", DEFAULT_REQUEST_TIMEOUT_SECONDS)?,
        )?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        Ok(Self {
            gateway_url,
            agent_name,
            poll,
            request_timeout,
            host,
            port,
        })
    }

    /// Create a config pointing at `gateway_url` with defaults everywhere else
    /// (useful for testing).
    pub fn new(gateway_url: impl Into<String>) -> Self {
        Self {
            gateway_url: gateway_url.into().trim_end_matches('/').to_string(),
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            poll: PollSettings::default(),
            request_timeout: Duration::from_secs_f64(DEFAULT_REQUEST_TIMEOUT_SECONDS),
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

fn env_seconds(name: &str, default: f64) -> Result<f64, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}

fn parse_seconds(name: &str, secs: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|e| {
        ConfigError::InvalidValue(name.to_string(), format!("{} ({})", e, secs))
    })
}
