// ABOUTME: Gatekeeper client handle shared by token, validation, and admin operations
// ABOUTME: Owns the endpoint and transport and logs every exchange's status code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use gatekeeper_core::{GatekeeperError, OperationResult};
use tracing::{debug, info};

use crate::config::{DriverConfig, GatekeeperEndpoint};
use crate::token_acquirer::TokenAcquirer;
use crate::transport::{GatekeeperRequest, GatekeeperResponse, GatekeeperTransport, ReqwestTransport};
use crate::utils::http_client::gatekeeper_client;

/// Handle for non-admin Gatekeeper operations
///
/// Cheap to clone: the transport is shared.
#[derive(Clone)]
pub struct GatekeeperClient {
    endpoint: GatekeeperEndpoint,
    transport: Arc<dyn GatekeeperTransport>,
}

impl GatekeeperClient {
    /// Client using the production HTTP transport
    #[must_use]
    pub fn new(config: &DriverConfig) -> Self {
        let transport = ReqwestTransport::new(gatekeeper_client(&config.http));
        info!("Gatekeeper client initialized for {}", config.endpoint);
        Self::with_transport(config.endpoint.clone(), Arc::new(transport))
    }

    /// Client over an arbitrary transport
    #[must_use]
    pub fn with_transport(
        endpoint: GatekeeperEndpoint,
        transport: Arc<dyn GatekeeperTransport>,
    ) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    /// Gatekeeper base address
    #[must_use]
    pub const fn endpoint(&self) -> &GatekeeperEndpoint {
        &self.endpoint
    }

    /// Token acquirer over this client's transport
    #[must_use]
    pub fn token_acquirer(&self) -> TokenAcquirer {
        TokenAcquirer::new(self.clone())
    }

    /// Perform one exchange, mapping transport failures to `GatekeeperError`
    ///
    /// # Errors
    ///
    /// Returns `GatekeeperError::Transport` if no response was obtained
    pub async fn send(
        &self,
        operation: &'static str,
        request: GatekeeperRequest,
    ) -> OperationResult<GatekeeperResponse> {
        debug!(
            operation,
            method = %request.method,
            path = request.url.path(),
            "Sending Gatekeeper request"
        );
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| GatekeeperError::transport(operation, e))?;
        info!("{operation}::Response code: {}", response.status);
        Ok(response)
    }
}
