// ABOUTME: Error types shared by every Gatekeeper operation
// ABOUTME: Defines GatekeeperError, its stable ErrorCode, and the OperationResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Outcome of any Gatekeeper operation
pub type OperationResult<T> = Result<T, GatekeeperError>;

/// Stable error codes for logging and programmatic matching
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Configuration is missing or malformed
    #[serde(rename = "CONFIG_INVALID")]
    ConfigurationInvalid,
    /// Network or I/O failure talking to Gatekeeper
    #[serde(rename = "TRANSPORT_FAILURE")]
    TransportFailure,
    /// A single admin call was rejected; recovered by the retry loop
    #[serde(rename = "AUTHORIZATION_REJECTED")]
    AuthorizationRejected,
    /// The retry budget for an admin call was spent
    #[serde(rename = "AUTHORIZATION_EXHAUSTED")]
    AuthorizationExhausted,
    /// Gatekeeper answered with a non-success status that is not retried
    #[serde(rename = "REMOTE_REJECTED")]
    RemoteRejected,
    /// Response body did not match the expected shape
    #[serde(rename = "DECODE_FAILURE")]
    DecodeFailure,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ConfigurationInvalid => "Driver configuration is missing or invalid",
            Self::TransportFailure => "Gatekeeper could not be reached",
            Self::AuthorizationRejected => "Gatekeeper rejected the admin token",
            Self::AuthorizationExhausted => "Admin authorization failed after all retry attempts",
            Self::RemoteRejected => "Gatekeeper rejected the request",
            Self::DecodeFailure => "Gatekeeper response could not be decoded",
        }
    }

    /// Whether the condition is fatal for the process rather than for one call
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::ConfigurationInvalid | Self::DecodeFailure)
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Errors surfaced by the Gatekeeper driver
#[derive(Debug, thiserror::Error)]
pub enum GatekeeperError {
    /// Configuration value missing or malformed; the client cannot be built
    #[error("Invalid configuration for {key}: {reason}")]
    ConfigurationInvalid {
        /// Configuration key at fault
        key: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Network failure, timeout, or unreadable response body
    #[error("Transport failure during {operation}: {reason}")]
    Transport {
        /// Operation being executed
        operation: &'static str,
        /// Underlying failure description
        reason: String,
    },

    /// Admin token could not be obtained or kept being rejected
    #[error("Admin authorization exhausted for {operation} after {attempts} attempt(s)")]
    AuthorizationExhausted {
        /// Operation being executed
        operation: &'static str,
        /// Number of rejected attempts counted against the budget
        attempts: u32,
    },

    /// Gatekeeper returned a status that is a final answer
    #[error("Gatekeeper rejected {operation} with status {status}")]
    RemoteRejected {
        /// Operation being executed
        operation: &'static str,
        /// HTTP status code returned
        status: u16,
    },

    /// Success response with an unexpected body shape
    #[error("Failed to decode {operation} response: {reason}")]
    Decode {
        /// Operation being executed
        operation: &'static str,
        /// Decoder failure description
        reason: String,
    },
}

impl GatekeeperError {
    /// Create a configuration error
    pub fn config(key: &'static str, reason: impl Into<String>) -> Self {
        Self::ConfigurationInvalid {
            key,
            reason: reason.into(),
        }
    }

    /// Create a transport error from any displayable failure
    pub fn transport(operation: &'static str, reason: impl Display) -> Self {
        Self::Transport {
            operation,
            reason: reason.to_string(),
        }
    }

    /// Create a decode error from any displayable failure
    pub fn decode(operation: &'static str, reason: impl Display) -> Self {
        Self::Decode {
            operation,
            reason: reason.to_string(),
        }
    }

    /// Get the stable error code
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::ConfigurationInvalid { .. } => ErrorCode::ConfigurationInvalid,
            Self::Transport { .. } => ErrorCode::TransportFailure,
            Self::AuthorizationExhausted { .. } => ErrorCode::AuthorizationExhausted,
            Self::RemoteRejected { .. } => ErrorCode::RemoteRejected,
            Self::Decode { .. } => ErrorCode::DecodeFailure,
        }
    }

    /// Same error reported under a different operation name
    ///
    /// Used when a failure in a sub-step (such as token acquisition) should
    /// surface as a failure of the operation the caller invoked.
    #[must_use]
    pub fn for_operation(self, name: &'static str) -> Self {
        match self {
            Self::ConfigurationInvalid { .. } => self,
            Self::Transport { reason, .. } => Self::Transport {
                operation: name,
                reason,
            },
            Self::AuthorizationExhausted { attempts, .. } => Self::AuthorizationExhausted {
                operation: name,
                attempts,
            },
            Self::RemoteRejected { status, .. } => Self::RemoteRejected {
                operation: name,
                status,
            },
            Self::Decode { reason, .. } => Self::Decode {
                operation: name,
                reason,
            },
        }
    }

    /// Operation the error belongs to, if any
    #[must_use]
    pub const fn operation(&self) -> Option<&'static str> {
        match self {
            Self::ConfigurationInvalid { .. } => None,
            Self::Transport { operation, .. }
            | Self::AuthorizationExhausted { operation, .. }
            | Self::RemoteRejected { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
        }
    }

    /// HTTP status carried by a remote rejection
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
