// ABOUTME: Gatekeeper operations exposed by the driver
// ABOUTME: Admin-scoped user/service management and non-admin token and password checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Operations
//!
//! - [`users`] and [`services`] add admin-scoped methods to
//!   [`ResilientAdminClient`](crate::admin_client::ResilientAdminClient); they
//!   run under the token refresh-and-retry protocol.
//! - [`tokens`] adds non-admin methods to
//!   [`GatekeeperClient`](crate::client::GatekeeperClient); they make exactly
//!   one exchange and report a non-success status as `false` or `None`.

pub mod services;
pub mod tokens;
pub mod users;

use gatekeeper_core::{GatekeeperError, OperationResult};
use serde::Serialize;
use serde_json::Value;

/// Serialize a request body, tagging failures with the operation name
pub(crate) fn encode_body<T: Serialize>(operation: &'static str, body: &T) -> OperationResult<Value> {
    serde_json::to_value(body).map_err(|e| GatekeeperError::decode(operation, e))
}
