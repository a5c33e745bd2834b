// ABOUTME: Configuration module for the Gatekeeper driver
// ABOUTME: Groups environment loading and endpoint address validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Gatekeeper base address and URL building
pub mod endpoint;
/// Driver configuration loaded from environment variables
pub mod environment;

pub use endpoint::GatekeeperEndpoint;
pub use environment::{DriverConfig, HttpClientConfig};
