//! Proxy error type.
//!
//! Every failure on the forwarding path is one of these variants, and each
//! variant renders as `{"code": <status>, "message": <text>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::http::response::ErrorBody;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("invalid path encoding: {0}")]
    InvalidPath(#[from] std::string::FromUtf8Error),

    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("upstream did not respond within {0:?}")]
    Timeout(std::time::Duration),

    #[error("{0}")]
    Upstream(#[from] reqwest::Error),

    #[error("failed to build response: {0}")]
    Response(#[from] axum::http::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidBody(_) | ProxyError::BodyRead(_) => StatusCode::BAD_REQUEST,
            ProxyError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody::new(status, self.to_string()))).into_response()
    }
}
