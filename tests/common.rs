// ABOUTME: Shared test utilities for Gatekeeper driver integration tests
// ABOUTME: Scripted in-memory transport that replays canned responses and records every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `gatekeeper_driver`

use std::collections::VecDeque;
use std::env;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use gatekeeper_driver::models::AdminCredentials;
use gatekeeper_driver::transport::{
    GatekeeperRequest, GatekeeperResponse, GatekeeperTransport, TransportError,
};
use gatekeeper_driver::{GatekeeperClient, GatekeeperEndpoint, ResilientAdminClient, RetryConfig};
use reqwest::Method;
use serde_json::json;

static INIT_LOGGER: Once = Once::new();

pub const ADMIN_UID: u64 = 1;
pub const ADMIN_PASSWORD: &str = "admin-secret";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Transport that answers from a queue and remembers what it was asked
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<GatekeeperResponse, TransportError>>>,
    requests: Mutex<Vec<GatekeeperRequest>>,
    latency: Option<Duration>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Transport that sleeps for `latency` inside every exchange
    pub fn with_latency(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            latency: Some(latency),
            ..Self::default()
        })
    }

    /// Queue a response with the given status and body
    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(GatekeeperResponse::new(status, body)));
        self
    }

    /// Queue a successful token issuance
    pub fn issue_token(&self, id: &str) -> &Self {
        self.respond(200, &json!({ "token": { "id": id } }).to_string())
    }

    /// Queue a connection failure
    pub fn fail_connection(&self) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Other("connection refused".to_owned())));
        self
    }

    /// Every request seen so far, in order
    pub fn requests(&self) -> Vec<GatekeeperRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `METHOD path` for every request seen so far
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|request| format!("{} {}", request.method, request.url.path()))
            .collect()
    }

    /// Number of token acquisitions issued
    pub fn acquisitions(&self) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.method == Method::POST && request.url.path() == "/token/")
            .count()
    }

    /// Number of requests that carried an admin token
    pub fn admin_exchanges(&self) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.header_value("X-Auth-Token").is_some())
            .count()
    }

    /// Responses queued but never consumed
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl GatekeeperTransport for ScriptedTransport {
    async fn execute(
        &self,
        request: GatekeeperRequest,
    ) -> Result<GatekeeperResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response left".to_owned())))
    }
}

pub fn test_endpoint() -> GatekeeperEndpoint {
    GatekeeperEndpoint::new("http://localhost", 8000).unwrap()
}

pub fn test_client(transport: &Arc<ScriptedTransport>) -> GatekeeperClient {
    init_test_logging();
    GatekeeperClient::with_transport(test_endpoint(), transport.clone())
}

pub fn admin_client(transport: &Arc<ScriptedTransport>) -> ResilientAdminClient {
    admin_client_with_retry(transport, RetryConfig::default())
}

pub fn admin_client_with_retry(
    transport: &Arc<ScriptedTransport>,
    retry: RetryConfig,
) -> ResilientAdminClient {
    ResilientAdminClient::new(
        test_client(transport),
        AdminCredentials::new(ADMIN_UID, ADMIN_PASSWORD),
        retry,
    )
}
