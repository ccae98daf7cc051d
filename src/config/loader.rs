//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
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

/// Parse configuration from a TOML string without touching the environment.
pub fn parse_config(content: &str) -> Result<ProxyConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
}

impl Overrides {
    fn apply(self, config: &mut ProxyConfig) {
        if let Some(bind_address) = self.bind_address {
            config.listener.bind_address = bind_address;
        }
    }
}

/// Load, resolve and validate configuration.
///
/// With no path the built-in defaults are used. Provider base URLs are
/// resolved against the process environment exactly once, here. Overrides
/// are applied before validation so they are checked like file values.
pub fn load_config(path: Option<&Path>, overrides: Overrides) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => ProxyConfig::default(),
    };

    overrides.apply(&mut config);
    config.apply_env(|key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
