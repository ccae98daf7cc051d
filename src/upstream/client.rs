//! Outbound request construction and dispatch.

use std::time::Duration;

use axum::http::{header, HeaderMap, HeaderValue, Method};
use serde_json::Value;

use crate::config::{ClientConfig, TimeoutConfig};
use crate::error::ProxyError;
use crate::upstream::target::ProxyTarget;

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// The request sent upstream, derived 1:1 from the inbound request.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub target: ProxyTarget,
    pub content_type: HeaderValue,
    pub authorization: HeaderValue,
    pub body: Option<Vec<u8>>,
}

impl OutboundRequest {
    /// Keep only `Content-Type` and `Authorization` from the inbound headers.
    pub fn new(
        method: Method,
        headers: &HeaderMap,
        target: ProxyTarget,
        body: Option<Value>,
    ) -> Result<Self, ProxyError> {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
        let authorization = headers
            .get(header::AUTHORIZATION)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(""));
        let body = body.map(|value| serde_json::to_vec(&value)).transpose()?;

        Ok(Self {
            method,
            target,
            content_type,
            authorization,
            body,
        })
    }
}

/// Shared upstream HTTP client.
#[derive(Clone)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    pub fn new(timeouts: &TimeoutConfig, client: &ClientConfig) -> Result<Self, ProxyError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs));
        if !client.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(ProxyError::Client)?;
        Ok(Self { client })
    }

    /// Issue the call. The response body is left unread for streaming.
    pub async fn send(&self, request: OutboundRequest) -> Result<reqwest::Response, ProxyError> {
        let mut builder = self
            .client
            .request(request.method, request.target.into_url())
            .header(header::CONTENT_TYPE, request.content_type)
            .header(header::AUTHORIZATION, request.authorization);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        Ok(builder.send().await?)
    }
}
