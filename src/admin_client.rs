// ABOUTME: Resilient admin client that runs admin-scoped calls under a cached, self-refreshing token
// ABOUTME: Implements the bounded NoToken/HaveToken/Exhausted retry loop over the credential store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Resilient Admin Client
//!
//! Every admin-scoped operation is described by an [`AdminOperation`] and run
//! through [`ResilientAdminClient::execute`]:
//!
//! 1. **NoToken**: acquire a token with the admin credentials. Failure ends the
//!    call (`AuthorizationExhausted`, or `Transport` if the service is down).
//! 2. **HaveToken**: send the request with `X-Auth-Token`. The expected status
//!    decodes and returns. A rejection clears the token and spends one
//!    attempt; a fresh token that is rejected straight away still counts.
//! 3. **Exhausted**: the budget is spent; return `AuthorizationExhausted`
//!    without touching the network again.
//!
//! The credential store stays locked for the whole call, so concurrent calls
//! on one session run one after another and never double-refresh.

use gatekeeper_core::constants::{env_vars, headers, status};
use gatekeeper_core::models::{AdminCredentials, Token};
use gatekeeper_core::{GatekeeperError, OperationResult};
use reqwest::Method;
use serde_json::Value;
use tokio::sync::MutexGuard;
use tracing::{error, info, warn};
use url::Url;

use crate::client::GatekeeperClient;
use crate::config::DriverConfig;
use crate::retry::{ExchangeOutcome, RetryBudget, RetryConfig, RetryState};
use crate::session::{AdminSession, CredentialStore};
use crate::token_acquirer::{AcquisitionError, TokenAcquirer};
use crate::transport::GatekeeperRequest;

/// Decodes a success body into the operation's result
pub type ResponseDecoder<T> = fn(&'static str, &str) -> OperationResult<T>;

/// Description of one admin-scoped call
pub struct AdminOperation<T> {
    name: &'static str,
    method: Method,
    url: Url,
    body: Option<Value>,
    success_status: u16,
    terminal_statuses: &'static [u16],
    decode: ResponseDecoder<T>,
}

impl<T> AdminOperation<T> {
    /// Operation expecting HTTP 200
    #[must_use]
    pub fn new(name: &'static str, method: Method, url: Url, decode: ResponseDecoder<T>) -> Self {
        Self {
            name,
            method,
            url,
            body: None,
            success_status: status::OK,
            terminal_statuses: &[],
            decode,
        }
    }

    /// Attach a JSON request body
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Override the expected success status
    #[must_use]
    pub const fn expect_status(mut self, status: u16) -> Self {
        self.success_status = status;
        self
    }

    /// Statuses that are a final answer rather than a token problem
    #[must_use]
    pub const fn terminal_on(mut self, statuses: &'static [u16]) -> Self {
        self.terminal_statuses = statuses;
        self
    }

    /// Operation name used in logs and errors
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    fn request(&self, token: &Token) -> GatekeeperRequest {
        let request = GatekeeperRequest::new(self.method.clone(), self.url.clone())
            .header(headers::AUTH_TOKEN, token.as_str());
        match &self.body {
            Some(body) => request.json(body.clone()),
            None => request,
        }
    }
}

/// Admin client that transparently refreshes its token on rejection
pub struct ResilientAdminClient {
    client: GatekeeperClient,
    acquirer: TokenAcquirer,
    session: AdminSession,
    retry: RetryConfig,
}

impl ResilientAdminClient {
    /// Client for an explicit admin identity over an existing Gatekeeper client
    #[must_use]
    pub fn new(client: GatekeeperClient, credentials: AdminCredentials, retry: RetryConfig) -> Self {
        info!(
            admin_user_id = credentials.user_id(),
            max_attempts = retry.max_attempts,
            rejection_policy = %retry.rejection_policy,
            "Gatekeeper admin client initialized"
        );
        Self {
            acquirer: client.token_acquirer(),
            client,
            session: AdminSession::new(credentials),
            retry,
        }
    }

    /// Client whose admin identity comes from configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationInvalid` if the configuration carries no admin
    /// identity or fails validation
    pub fn from_config(config: &DriverConfig) -> OperationResult<Self> {
        config.validate()?;
        let credentials = config.admin.clone().ok_or_else(|| {
            GatekeeperError::config(
                env_vars::ADMIN_UID,
                "admin identity is required for admin operations",
            )
        })?;
        Ok(Self::new(
            GatekeeperClient::new(config),
            credentials,
            config.retry,
        ))
    }

    /// Client for an arbitrary admin identity, ignoring any configured one
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationInvalid` if the configuration fails validation
    pub fn with_admin(config: &DriverConfig, credentials: AdminCredentials) -> OperationResult<Self> {
        config.validate()?;
        Ok(Self::new(
            GatekeeperClient::new(config),
            credentials,
            config.retry,
        ))
    }

    /// Underlying client for non-admin operations
    #[must_use]
    pub const fn client(&self) -> &GatekeeperClient {
        &self.client
    }

    /// Admin session and its cached token
    #[must_use]
    pub const fn session(&self) -> &AdminSession {
        &self.session
    }

    /// Retry settings in effect
    #[must_use]
    pub const fn retry_config(&self) -> RetryConfig {
        self.retry
    }

    /// Run an admin operation under the refresh-and-retry protocol
    ///
    /// # Errors
    ///
    /// - `AuthorizationExhausted` if no token could be acquired or every
    ///   attempt in the budget was rejected
    /// - `RemoteRejected` for statuses the operation or policy treats as final
    /// - `Transport` if Gatekeeper could not be reached
    /// - `Decode` if the success body has an unexpected shape
    pub async fn execute<T>(&self, operation: AdminOperation<T>) -> OperationResult<T> {
        let mut store = self.session.lock().await;
        let mut budget = RetryBudget::new(self.retry.max_attempts);
        let mut state = RetryState::from_cached(store.current_token());

        loop {
            state = match state {
                RetryState::NoToken => {
                    let token = self.refresh(&mut store, &operation, &budget).await?;
                    RetryState::HaveToken(token)
                }
                RetryState::HaveToken(token) => {
                    let response = self
                        .client
                        .send(operation.name, operation.request(&token))
                        .await?;

                    match self.classify(&operation, response.status) {
                        ExchangeOutcome::Success => {
                            return (operation.decode)(operation.name, &response.body);
                        }
                        ExchangeOutcome::Terminal => {
                            return Err(GatekeeperError::RemoteRejected {
                                operation: operation.name,
                                status: response.status,
                            });
                        }
                        ExchangeOutcome::TokenRejected => {
                            store.clear_token();
                            if budget.record_rejection() {
                                RetryState::Exhausted
                            } else {
                                warn!(
                                    "Error probably with the admin-token. Remaking {} automatically. Attempt - {}",
                                    operation.name,
                                    budget.used()
                                );
                                RetryState::NoToken
                            }
                        }
                    }
                }
                RetryState::Exhausted => {
                    error!(
                        operation = operation.name,
                        attempts = budget.used(),
                        "Retry limit reached! Failing gracefully."
                    );
                    return Err(GatekeeperError::AuthorizationExhausted {
                        operation: operation.name,
                        attempts: budget.used(),
                    });
                }
            };
        }
    }

    fn classify<T>(&self, operation: &AdminOperation<T>, status: u16) -> ExchangeOutcome {
        if status == operation.success_status {
            ExchangeOutcome::Success
        } else if operation.terminal_statuses.contains(&status)
            || !self.retry.rejection_policy.is_token_rejection(status)
        {
            ExchangeOutcome::Terminal
        } else {
            ExchangeOutcome::TokenRejected
        }
    }

    async fn refresh<T>(
        &self,
        store: &mut MutexGuard<'_, CredentialStore>,
        operation: &AdminOperation<T>,
        budget: &RetryBudget,
    ) -> OperationResult<Token> {
        let credentials = store.credentials();
        let acquired = self
            .acquirer
            .acquire(credentials.user_id(), credentials.password())
            .await;

        match acquired {
            Ok(token) => {
                store.set_token(token.clone());
                Ok(token)
            }
            Err(AcquisitionError::Rejected { status: code }) => {
                error!(
                    operation = operation.name,
                    status = code,
                    "Admin token acquisition rejected; not retrying"
                );
                Err(GatekeeperError::AuthorizationExhausted {
                    operation: operation.name,
                    attempts: budget.used() + 1,
                })
            }
            Err(AcquisitionError::Transport(e) | AcquisitionError::Decode(e)) => {
                Err(e.for_operation(operation.name))
            }
        }
    }
}
