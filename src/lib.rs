//! Research proxy library.
//!
//! Relays AI completion calls from the research wizard front end to an
//! upstream provider, and models the wizard's step flow.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;
pub mod wizard;

pub use config::schema::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
