//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::EdgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a TOML file into an [`EdgeConfig`] without validating it.
pub fn read_config(path: &Path) -> Result<EdgeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load configuration from an optional file, apply environment and command-line
/// overrides, then validate.
///
/// Without a path the built-in defaults are used, so a deployment only has to
/// supply the API key through the environment. `bind_address` wins over both
/// the file and the environment.
pub fn load_config(path: Option<&Path>, bind_address: Option<String>) -> Result<EdgeConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => EdgeConfig::default(),
    };
    config.apply_env();
    if let Some(bind_address) = bind_address {
        config.listener.bind_address = bind_address;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
