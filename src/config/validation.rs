//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check that both upstreams are reachable URLs and the credential is set
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{EdgeConfig, UpstreamConfig};

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("upstreams.{name}.base_url `{url}` is not an absolute http(s) URL")]
    InvalidBaseUrl { name: &'static str, url: String },

    #[error("upstreams.{0}.host must not be empty")]
    EmptyHost(&'static str),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.upstream_secs ({upstream}) must be below timeouts.request_secs ({request})")]
    UpstreamTimeoutNotBelowRequest { upstream: u64, request: u64 },

    #[error("upstream API key is not configured")]
    MissingApiKey,
}

/// Validate a loaded configuration.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    validate_upstream("news", &config.upstreams.news, &mut errors);
    validate_upstream("exchange_rate", &config.upstreams.exchange_rate, &mut errors);

    if config.upstreams.api_key.as_deref().map_or(true, str::is_empty) {
        errors.push(ValidationError::MissingApiKey);
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    } else if config.timeouts.upstream_secs >= config.timeouts.request_secs {
        errors.push(ValidationError::UpstreamTimeoutNotBelowRequest {
            upstream: config.timeouts.upstream_secs,
            request: config.timeouts.request_secs,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_upstream(name: &'static str, upstream: &UpstreamConfig, errors: &mut Vec<ValidationError>) {
    let valid = Url::parse(&upstream.base_url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false);
    if !valid {
        errors.push(ValidationError::InvalidBaseUrl {
            name,
            url: upstream.base_url.clone(),
        });
    }

    if upstream.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost(name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> EdgeConfig {
        let mut config = EdgeConfig::default();
        config.upstreams.api_key = Some("key".into());
        config
    }

    #[test]
    fn test_default_with_key_is_valid() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_key_rejected() {
        let config = EdgeConfig::default();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingApiKey]);
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = valid_config();
        config.listener.bind_address = "not-an-addr".into();
        config.upstreams.news.base_url = "ftp://news.example.com".into();
        config.upstreams.exchange_rate.host = " ".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::InvalidBindAddress("not-an-addr".into())));
        assert!(errors.contains(&ValidationError::EmptyHost("exchange_rate")));
        assert!(errors.contains(&ValidationError::ZeroTimeout("request_secs")));
    }

    #[test]
    fn test_upstream_deadline_must_fit_request_deadline() {
        let mut config = valid_config();
        config.timeouts.upstream_secs = 30;
        config.timeouts.request_secs = 30;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UpstreamTimeoutNotBelowRequest {
                upstream: 30,
                request: 30
            }]
        );
    }

    #[test]
    fn test_relative_base_url_rejected() {
        let mut config = valid_config();
        config.upstreams.exchange_rate.base_url = "/query".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::InvalidBaseUrl { name: "exchange_rate", .. }]
        ));
    }
}
