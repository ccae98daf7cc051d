//! Request handling and transformation.
//!
//! # Responsibilities
//! - Expose the request ID assigned by the middleware
//! - Decide whether a method carries a body
//! - Reject bodies over the size limit, then read and parse them as JSON

use axum::body::Body;
use axum::http::{header, HeaderMap, Method};
use serde_json::Value;

use crate::error::ProxyError;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID set by `SetRequestIdLayer`, or `"unknown"` outside the stack.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// GET (and HEAD, which the router folds into GET) never forward a body.
pub fn carries_body(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD)
}

/// Reject early when the declared `Content-Length` is over `limit`.
///
/// A missing or unparsable header is left to the bounded read.
pub fn enforce_body_limit(headers: &HeaderMap, limit: usize) -> Result<(), ProxyError> {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| raw.parse::<usize>().ok());
    match declared {
        Some(length) if length > limit => Err(ProxyError::PayloadTooLarge { limit }),
        _ => Ok(()),
    }
}

/// Read the body and parse it as JSON. An empty body yields `None`.
pub async fn read_json_body(body: Body, limit: usize) -> Result<Option<Value>, ProxyError> {
    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(ProxyError::BodyRead)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(&bytes)?))
}
