//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, provider mounts)
//!     → request.rs (request ID, body → JSON)
//!     → upstream (build target, send)
//!     → response.rs (pass-through or error body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use response::ErrorBody;
pub use server::HttpServer;
