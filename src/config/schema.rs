//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::upstream::resolver::{resolve_base_url, OPENROUTER_BASE_URL, OPENROUTER_BASE_URL_ENV};

/// Root configuration for the research proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, concurrency).
    pub listener: ListenerConfig,

    /// Upstream AI providers, each mounted under its own path prefix.
    pub providers: Vec<ProviderConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Outbound HTTP client settings.
    pub client: ClientConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    pub security: SecurityConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            providers: vec![ProviderConfig::openrouter()],
            timeouts: TimeoutConfig::default(),
            client: ClientConfig::default(),
            observability: ObservabilityConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl ProxyConfig {
    /// Resolve every provider's base URL against the environment.
    ///
    /// Called once at startup; handlers only ever see the resolved values.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for provider in &mut self.providers {
            let env_value = provider.base_url_env.as_deref().and_then(&lookup);
            provider.base_url = resolve_base_url(&provider.base_url, env_value.as_deref());
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum in-flight requests (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// One upstream AI provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Provider identifier for logging/metrics.
    pub name: String,

    /// Upstream base URL (scheme + host, optional path).
    pub base_url: String,

    /// Environment variable that overrides `base_url` when set and non-empty.
    #[serde(default)]
    pub base_url_env: Option<String>,

    /// Path inserted between the base URL and the forwarded path.
    #[serde(default = "default_api_path")]
    pub api_path: String,

    /// Inbound path prefix. Defaults to `/api/ai/<name>`.
    #[serde(default)]
    pub mount: Option<String>,
}

fn default_api_path() -> String {
    "/api".to_string()
}

impl ProviderConfig {
    /// The built-in OpenRouter provider.
    pub fn openrouter() -> Self {
        Self {
            name: "openrouter".to_string(),
            base_url: OPENROUTER_BASE_URL.to_string(),
            base_url_env: Some(OPENROUTER_BASE_URL_ENV.to_string()),
            api_path: default_api_path(),
            mount: None,
        }
    }

    /// Inbound path prefix this provider is served under.
    pub fn mount_path(&self) -> String {
        match &self.mount {
            Some(mount) => mount.clone(),
            None => format!("/api/ai/{}", self.name),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Time allowed until response headers are produced, in seconds.
    /// Streamed bodies are not cut off by this limit.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            request_secs: 120,
        }
    }
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Honor HTTP_PROXY / HTTPS_PROXY / NO_PROXY for upstream calls.
    pub system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { system_proxy: true }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable output for development, JSON for production.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Request hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}
