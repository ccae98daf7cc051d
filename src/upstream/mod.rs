//! Upstream AI provider subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     resolver.rs (env override or configured/default base URL, once)
//!
//! per request:
//!     wildcard segments + query
//!     → target.rs (join, percent-decode, drop `slug`, build Url)
//!     → client.rs (method, two headers, JSON body → reqwest call)
//!     → http::response (pass-through to the caller)
//! ```
//!
//! # Design Decisions
//! - No retries, no failover: a failed call surfaces once as a 500
//! - Only `Content-Type` and `Authorization` are forwarded upstream
//! - The response body is streamed, never buffered

pub mod client;
pub mod resolver;
pub mod target;

pub use client::{Forwarder, OutboundRequest};
pub use target::ProxyTarget;
