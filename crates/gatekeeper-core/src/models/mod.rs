// ABOUTME: Domain models for Gatekeeper users, services, tokens, and credentials
// ABOUTME: Re-exports domain values and the JSON wire bodies exchanged with Gatekeeper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Administrator identity and password handling
pub mod credentials;
/// Registered downstream services
pub mod service;
/// Opaque access tokens
pub mod token;
/// Gatekeeper user accounts
pub mod user;
/// Request and response bodies in Gatekeeper's JSON format
pub mod wire;

pub use credentials::AdminCredentials;
pub use service::{NewService, RegisteredService, ServiceEntry};
pub use token::Token;
pub use user::{NewUser, UserEntry, UserId};
