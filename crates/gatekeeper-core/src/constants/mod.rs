// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Gatekeeper HTTP paths, header names, status codes, and driver defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by the part of the Gatekeeper contract they belong to.

/// HTTP paths exposed by the Gatekeeper service
pub mod paths {
    /// Token issuing endpoint
    pub const TOKEN: &str = "/token/";
    /// Token validation prefix, followed by the token itself
    pub const TOKEN_VALIDATE: &str = "/token/validate/";
    /// Admin user collection
    pub const ADMIN_USER: &str = "/admin/user/";
    /// Admin service collection
    pub const ADMIN_SERVICE: &str = "/admin/service/";
    /// Simple password authentication prefix, followed by the user id
    pub const AUTH: &str = "/auth/";
}

/// Header names understood by Gatekeeper
pub mod headers {
    /// Numeric user id of the caller
    pub const AUTH_UID: &str = "X-Auth-Uid";
    /// Account password of the caller
    pub const AUTH_PASSWORD: &str = "X-Auth-Password";
    /// Access token for admin endpoints
    pub const AUTH_TOKEN: &str = "X-Auth-Token";
    /// Service key of a registered downstream service
    pub const AUTH_SERVICE_KEY: &str = "X-Auth-Service-Key";
}

/// Success status codes per endpoint
pub mod status {
    /// Success for token, admin, and validation endpoints
    pub const OK: u16 = 200;
    /// Success for simple password authentication
    pub const ACCEPTED: u16 = 202;
    /// Missing or invalid credentials
    pub const UNAUTHORIZED: u16 = 401;
    /// Credentials valid but not privileged enough
    pub const FORBIDDEN: u16 = 403;
    /// Addressed resource does not exist
    pub const NOT_FOUND: u16 = 404;
}

/// Retry protocol defaults
pub mod retry {
    /// Maximum refresh-and-retry cycles for one admin operation
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
}

/// HTTP client defaults
pub mod http {
    /// Request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Connection timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// User agent sent with every request
    pub const USER_AGENT: &str = concat!("gatekeeper-driver/", env!("CARGO_PKG_VERSION"));
}

/// Environment variable names read by the driver configuration
pub mod env_vars {
    /// Base service URI
    pub const URI: &str = "GATEKEEPER_URI";
    /// Service port
    pub const PORT: &str = "GATEKEEPER_PORT";
    /// Administrator user id
    pub const ADMIN_UID: &str = "GATEKEEPER_ADMIN_UID";
    /// Administrator password
    pub const ADMIN_PASSWORD: &str = "GATEKEEPER_ADMIN_PASSWORD";
    /// Retry budget override
    pub const MAX_ATTEMPTS: &str = "GATEKEEPER_MAX_ATTEMPTS";
    /// Rejection policy (`any` or `authorization`)
    pub const REJECTION_POLICY: &str = "GATEKEEPER_REJECTION_POLICY";
    /// Request timeout override
    pub const TIMEOUT_SECS: &str = "GATEKEEPER_TIMEOUT_SECS";
    /// Connect timeout override
    pub const CONNECT_TIMEOUT_SECS: &str = "GATEKEEPER_CONNECT_TIMEOUT_SECS";
}
