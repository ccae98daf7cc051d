//! Response handling and transformation.
//!
//! # Responsibilities
//! - Relay the upstream response (status, headers, streamed body)
//! - Strip hop-by-hop headers the local connection re-frames
//! - Shape local failures as `{code, message}`

use axum::{
    body::Body,
    http::{header, HeaderName, StatusCode},
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::error::ProxyError;

/// JSON body for locally generated failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

const PROXY_CONNECTION: &str = "proxy-connection";
const KEEP_ALIVE: &str = "keep-alive";

pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    *name == header::CONNECTION
        || *name == header::TRANSFER_ENCODING
        || *name == header::TE
        || *name == header::TRAILER
        || *name == header::UPGRADE
        || name.as_str() == KEEP_ALIVE
        || name.as_str() == PROXY_CONNECTION
}

/// Turn the upstream response into ours without buffering the body.
pub fn passthrough(upstream: reqwest::Response) -> Result<Response, ProxyError> {
    let mut builder = Response::builder().status(upstream.status());
    if let Some(headers) = builder.headers_mut() {
        for (name, value) in upstream.headers() {
            if !is_hop_by_hop(name) {
                headers.append(name.clone(), value.clone());
            }
        }
    }

    Ok(builder.body(Body::from_stream(upstream.bytes_stream()))?)
}
