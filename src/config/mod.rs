//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → ProxyConfig::apply_env (provider base URL overrides, once)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → cloned into handler state
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the upstream base URL never changes
//!   for the lifetime of the process
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, Overrides};
pub use schema::ProxyConfig;
pub use schema::{
    ClientConfig, ListenerConfig, LogFormat, ObservabilityConfig, ProviderConfig, SecurityConfig,
    TimeoutConfig,
};
