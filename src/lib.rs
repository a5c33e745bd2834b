// ABOUTME: Library entry point for the Gatekeeper identity service driver
// ABOUTME: Token acquisition, resilient admin calls, and non-admin token checks over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Gatekeeper Driver
//!
//! Client-side access layer for the Gatekeeper identity service.
//!
//! ## Features
//!
//! - **Admin token lifecycle**: acquire, cache, and refresh the admin token
//!   without caller involvement
//! - **Bounded retries**: a rejected admin call is refreshed and retried at
//!   most a configured number of times, then fails with a typed error
//! - **Typed results**: every operation returns `Result<T, GatekeeperError>`
//!
//! ## Architecture
//!
//! - **Transport**: one HTTP exchange behind the [`transport::GatekeeperTransport`] trait
//! - **Token acquirer**: `POST /token/` with a user id and password
//! - **Admin client**: the refresh-and-retry state machine around admin calls
//! - **Operations**: user, service, and token endpoints
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gatekeeper_driver::admin_client::ResilientAdminClient;
//! use gatekeeper_driver::config::DriverConfig;
//! use gatekeeper_driver::OperationResult;
//!
//! #[tokio::main]
//! async fn main() -> OperationResult<()> {
//!     let config = DriverConfig::from_env()?;
//!     let admin = ResilientAdminClient::from_config(&config)?;
//!
//!     for user in admin.list_users().await? {
//!         println!("{}", user.username);
//!     }
//!     Ok(())
//! }
//! ```

/// Resilient admin client and admin operation descriptions
pub mod admin_client;

/// Gatekeeper client handle for non-admin calls
pub mod client;

/// Endpoint and environment configuration
pub mod config;

/// Logging configuration and subscriber setup
pub mod logging;

/// User, service, and token operations
pub mod operations;

/// Retry budget, rejection policy, and retry states
pub mod retry;

/// Admin session and credential store
pub mod session;

/// Token acquisition with user credentials
pub mod token_acquirer;

/// HTTP exchange abstraction
pub mod transport;

/// HTTP client construction
pub mod utils;

pub use gatekeeper_core::constants;
pub use gatekeeper_core::models;
pub use gatekeeper_core::{ErrorCode, GatekeeperError, OperationResult};

pub use admin_client::{AdminOperation, ResilientAdminClient};
pub use client::GatekeeperClient;
pub use config::{DriverConfig, GatekeeperEndpoint};
pub use retry::{RejectionPolicy, RetryConfig};
