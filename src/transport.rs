// ABOUTME: Single HTTP request/response exchange with the Gatekeeper service
// ABOUTME: Transport trait plus the reqwest-backed implementation used in production
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Transport
//!
//! The driver never talks to `reqwest` directly. Every exchange goes through
//! [`GatekeeperTransport`], which turns a [`GatekeeperRequest`] into a status
//! code and a body, or a [`TransportError`]. Timeouts and connection errors
//! are the transport's business and surface only as `TransportError`.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

/// Outbound request description
#[derive(Debug, Clone)]
pub struct GatekeeperRequest {
    /// HTTP method
    pub method: Method,
    /// Fully resolved URL
    pub url: Url,
    /// Header name/value pairs
    pub headers: Vec<(&'static str, String)>,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl GatekeeperRequest {
    /// Request with no headers and no body
    #[must_use]
    pub const fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// GET request
    #[must_use]
    pub const fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// POST request
    #[must_use]
    pub const fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    /// DELETE request
    #[must_use]
    pub const fn delete(url: Url) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Attach a JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value of the first header with `name`, compared case-insensitively
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatekeeperResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl GatekeeperResponse {
    /// Build a response
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Failure to complete an exchange at all
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Error raised by the HTTP client (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Any other transport failure
    #[error("{0}")]
    Other(String),
}

/// One HTTP exchange with Gatekeeper
#[async_trait]
pub trait GatekeeperTransport: Send + Sync {
    /// Send the request and read the whole response body
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no response could be obtained
    async fn execute(&self, request: GatekeeperRequest)
        -> Result<GatekeeperResponse, TransportError>;
}

/// Transport backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wrap an existing client
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GatekeeperTransport for ReqwestTransport {
    async fn execute(
        &self,
        request: GatekeeperRequest,
    ) -> Result<GatekeeperResponse, TransportError> {
        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(GatekeeperResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_collects_headers() {
        let url = Url::parse("http://localhost:8000/token/").unwrap();
        let request = GatekeeperRequest::post(url)
            .header("X-Auth-Uid", "7")
            .header("X-Auth-Password", "pw");

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.header_value("x-auth-uid"), Some("7"));
        assert_eq!(request.header_value("X-Auth-Token"), None);
        assert!(request.body.is_none());
    }
}
