// ABOUTME: Exchanges a user id and password for a fresh Gatekeeper access token
// ABOUTME: One POST /token/ per call; never retries, the caller decides what happens next
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gatekeeper_core::constants::{headers, paths, status};
use gatekeeper_core::models::wire::{decode_json, TokenResponse};
use gatekeeper_core::models::{Token, UserId};
use gatekeeper_core::GatekeeperError;
use tracing::{debug, warn};

use crate::client::GatekeeperClient;
use crate::transport::GatekeeperRequest;

const OPERATION: &str = "generate_token";

/// Why no token was issued
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    /// Gatekeeper refused the credentials
    #[error("token request rejected with status {status}")]
    Rejected {
        /// HTTP status returned
        status: u16,
    },

    /// The token endpoint could not be reached
    #[error(transparent)]
    Transport(GatekeeperError),

    /// The 200 response did not contain a usable token
    #[error(transparent)]
    Decode(GatekeeperError),
}

/// Issues `POST /token/` exchanges
#[derive(Clone)]
pub struct TokenAcquirer {
    client: GatekeeperClient,
}

impl TokenAcquirer {
    /// Acquirer over the given client
    #[must_use]
    pub const fn new(client: GatekeeperClient) -> Self {
        Self { client }
    }

    /// Request a token for `user_id`
    ///
    /// # Errors
    ///
    /// Returns `AcquisitionError::Rejected` on any non-200 status,
    /// `Transport` if the service is unreachable, and `Decode` if the 200 body
    /// has no non-empty `token.id`
    pub async fn acquire(&self, user_id: UserId, password: &str) -> Result<Token, AcquisitionError> {
        let request = GatekeeperRequest::post(self.client.endpoint().url(paths::TOKEN))
            .header(headers::AUTH_PASSWORD, password)
            .header(headers::AUTH_UID, user_id.to_string());

        let response = self
            .client
            .send(OPERATION, request)
            .await
            .map_err(AcquisitionError::Transport)?;

        if response.status != status::OK {
            warn!(
                user_id,
                status = response.status,
                "Gatekeeper refused to issue a token"
            );
            return Err(AcquisitionError::Rejected {
                status: response.status,
            });
        }

        let token = decode_json::<TokenResponse>(OPERATION, &response.body)
            .map_err(AcquisitionError::Decode)?
            .into_token();
        if token.is_empty() {
            return Err(AcquisitionError::Decode(GatekeeperError::decode(
                OPERATION,
                "token id is empty",
            )));
        }

        debug!(user_id, token = %token.redacted(), "Received user-token");
        Ok(token)
    }
}
