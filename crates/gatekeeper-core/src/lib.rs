// ABOUTME: Core types and constants for the Gatekeeper client driver
// ABOUTME: Foundation crate with error handling, wire models, and protocol constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Gatekeeper Core
//!
//! Foundation crate shared by the Gatekeeper driver library and its CLI.
//! It holds no I/O: only the vocabulary the rest of the workspace speaks.
//!
//! ## Modules
//!
//! - **errors**: `GatekeeperError`, `ErrorCode` and the `OperationResult` alias
//! - **constants**: HTTP paths, header names, status codes, retry defaults
//! - **models**: domain values (`Token`, `UserEntry`, ...) and wire bodies

/// Unified error handling with stable error codes
pub mod errors;

/// Protocol constants organized by domain
pub mod constants;

/// Domain models and Gatekeeper wire formats
pub mod models;

pub use errors::{ErrorCode, GatekeeperError, OperationResult};
