// ABOUTME: HTTP client construction with connection pooling and timeout configuration
// ABOUTME: Builds the reqwest client used by the Gatekeeper transport

use std::time::Duration;

use gatekeeper_core::constants::http::USER_AGENT;
use reqwest::{Client, ClientBuilder};
use tracing::warn;

use crate::config::HttpClientConfig;

/// Create a new HTTP client with custom timeout settings
///
/// Every client identifies itself with the driver's user agent.
///
/// # Arguments
/// * `timeout_secs` - Request timeout in seconds
/// * `connect_timeout_secs` - Connection timeout in seconds
///
/// # Returns
/// A new `reqwest::Client`; falls back to a default client if the builder fails
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    build_client(USER_AGENT, timeout_secs, connect_timeout_secs)
}

fn build_client(user_agent: &str, timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    match ClientBuilder::new()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!(
                error = %e,
                timeout_secs,
                connect_timeout_secs,
                "HTTP client builder failed; falling back to default client without timeouts or user agent"
            );
            Client::new()
        }
    }
}

/// Create the HTTP client for Gatekeeper calls from driver configuration
#[must_use]
pub fn gatekeeper_client(config: &HttpClientConfig) -> Client {
    create_client_with_timeout(config.timeout_secs, config.connect_timeout_secs)
}
