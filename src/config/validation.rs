//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect conflicting provider names and mounts
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no providers configured")]
    NoProviders,

    #[error("duplicate provider name '{0}'")]
    DuplicateProvider(String),

    #[error("duplicate mount '{0}'")]
    DuplicateMount(String),

    #[error("provider '{provider}': mount '{mount}' must start with '/' and not end with '/'")]
    InvalidMount { provider: String, mount: String },

    #[error("provider '{provider}': api_path '{api_path}' must be empty or start with '/'")]
    InvalidApiPath { provider: String, api_path: String },

    #[error("provider '{provider}': base_url '{base_url}' is not an http(s) URL")]
    InvalidBaseUrl { provider: String, base_url: String },

    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("listener.max_connections must be greater than zero")]
    ZeroMaxConnections,

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
}

pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.providers.is_empty() {
        errors.push(ValidationError::NoProviders);
    }

    let mut names = HashSet::new();
    let mut mounts = HashSet::new();
    for provider in &config.providers {
        if !names.insert(provider.name.as_str()) {
            errors.push(ValidationError::DuplicateProvider(provider.name.clone()));
        }

        let mount = provider.mount_path();
        if !mount.starts_with('/') || mount.ends_with('/') {
            errors.push(ValidationError::InvalidMount {
                provider: provider.name.clone(),
                mount: mount.clone(),
            });
        }
        if !mounts.insert(mount.clone()) {
            errors.push(ValidationError::DuplicateMount(mount));
        }

        if !provider.api_path.is_empty() && !provider.api_path.starts_with('/') {
            errors.push(ValidationError::InvalidApiPath {
                provider: provider.name.clone(),
                api_path: provider.api_path.clone(),
            });
        }

        let http_url = Url::parse(&provider.base_url)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !http_url {
            errors.push(ValidationError::InvalidBaseUrl {
                provider: provider.name.clone(),
                base_url: provider.base_url.clone(),
            });
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
