//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Environment variable holding the upstream API key.
pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";

/// Legacy name of the API key variable, still honored when the primary one is unset.
pub const LEGACY_API_KEY_ENV: &str = "REACT_APP_RAPID_API_KEY";

/// Environment variable overriding the listener bind address.
pub const BIND_ADDRESS_ENV: &str = "EDGE_BIND_ADDRESS";

/// Root configuration for the edge router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream API definitions and the shared credential.
    pub upstreams: UpstreamsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Log filter and output format.
    pub logging: LoggingConfig,
}

impl EdgeConfig {
    /// Apply overrides taken from the process environment.
    ///
    /// The API key is never expected in the config file in production, so the
    /// environment always wins when it carries a value.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Same as [`EdgeConfig::apply_env`] with an injectable lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup(API_KEY_ENV)
            .filter(|v| !v.is_empty())
            .or_else(|| lookup(LEGACY_API_KEY_ENV).filter(|v| !v.is_empty()));
        if let Some(key) = key {
            self.upstreams.api_key = Some(key);
        }

        if let Some(addr) = lookup(BIND_ADDRESS_ENV).filter(|v| !v.is_empty()) {
            self.listener.bind_address = addr;
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Both upstreams plus the credential they share.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamsConfig {
    /// Value sent as `x-rapidapi-key` to every upstream.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// News feed provider.
    pub news: UpstreamConfig,

    /// Currency exchange-rate provider.
    pub exchange_rate: UpstreamConfig,
}

impl Default for UpstreamsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            news: UpstreamConfig::rapidapi("crypto-news-live3.p.rapidapi.com"),
            exchange_rate: UpstreamConfig::rapidapi("alpha-vantage.p.rapidapi.com"),
        }
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for UpstreamsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("news", &self.news)
            .field("exchange_rate", &self.exchange_rate)
            .finish()
    }
}

/// A single upstream API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Scheme and authority requests are sent to (e.g., "https://api.example.com").
    pub base_url: String,

    /// Value sent as `x-rapidapi-host`.
    pub host: String,
}

impl UpstreamConfig {
    /// An upstream reached directly at `https://{host}`.
    pub fn rapidapi(host: &str) -> Self {
        Self {
            base_url: format!("https://{host}"),
            host: host.to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Deadline for a whole upstream call (connect, headers and body) in seconds.
    ///
    /// Kept below `request_secs` so a stalled upstream surfaces as 502.
    pub upstream_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            upstream_secs: 20,
            request_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "edge_router=info,tower_http=info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
