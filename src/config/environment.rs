// ABOUTME: Environment configuration management for the Gatekeeper driver
// ABOUTME: Loads service address, admin identity, retry, and HTTP settings, failing fast on bad values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Everything is read once, validated, and turned into typed values. A
//! missing or malformed setting is reported as `ConfigurationInvalid` here,
//! never later in the middle of an operation.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use gatekeeper_core::constants::{env_vars, http};
use gatekeeper_core::models::{AdminCredentials, UserId};
use gatekeeper_core::{GatekeeperError, OperationResult};
use tracing::info;

use super::endpoint::GatekeeperEndpoint;
use crate::retry::{RejectionPolicy, RetryConfig};

/// HTTP client timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: http::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: http::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Complete driver configuration
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Gatekeeper base address
    pub endpoint: GatekeeperEndpoint,
    /// Admin identity, required only for admin-scoped operations
    pub admin: Option<AdminCredentials>,
    /// Retry budget and rejection policy
    pub retry: RetryConfig,
    /// HTTP client timeouts
    pub http: HttpClientConfig,
}

impl DriverConfig {
    /// Configuration for an endpoint with defaults everywhere else
    #[must_use]
    pub fn new(endpoint: GatekeeperEndpoint) -> Self {
        Self {
            endpoint,
            admin: None,
            retry: RetryConfig::default(),
            http: HttpClientConfig::default(),
        }
    }

    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationInvalid` if a required variable is missing or any
    /// variable fails to parse
    pub fn from_env() -> OperationResult<Self> {
        info!("Loading Gatekeeper driver configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationInvalid` if a required key is missing or any
    /// value fails to parse
    pub fn from_lookup<F>(lookup: F) -> OperationResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let uri = required(&lookup, env_vars::URI)?;
        let port: u16 = parse_required(&lookup, env_vars::PORT)?;
        let endpoint = GatekeeperEndpoint::new(&uri, port)?;

        let admin = admin_from_lookup(&lookup)?;

        let retry = RetryConfig {
            max_attempts: parse_or(
                &lookup,
                env_vars::MAX_ATTEMPTS,
                RetryConfig::default().max_attempts,
            )?,
            rejection_policy: parse_or(
                &lookup,
                env_vars::REJECTION_POLICY,
                RejectionPolicy::default(),
            )?,
        };

        let http = HttpClientConfig {
            timeout_secs: parse_or(&lookup, env_vars::TIMEOUT_SECS, http::DEFAULT_TIMEOUT_SECS)?,
            connect_timeout_secs: parse_or(
                &lookup,
                env_vars::CONNECT_TIMEOUT_SECS,
                http::DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };

        let config = Self {
            endpoint,
            admin,
            retry,
            http,
        };
        config.validate()?;
        info!("Gatekeeper driver configuration loaded: {}", config.summary());
        Ok(config)
    }

    /// Replace the admin identity
    #[must_use]
    pub fn with_admin(mut self, admin: AdminCredentials) -> Self {
        self.admin = Some(admin);
        self
    }

    /// Replace the retry settings
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationInvalid` on a zero retry budget or zero timeouts
    pub fn validate(&self) -> OperationResult<()> {
        if self.retry.max_attempts == 0 {
            return Err(GatekeeperError::config(
                env_vars::MAX_ATTEMPTS,
                "retry budget must allow at least one attempt",
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(GatekeeperError::config(
                env_vars::TIMEOUT_SECS,
                "timeout must be non-zero",
            ));
        }
        if self.http.connect_timeout_secs == 0 {
            return Err(GatekeeperError::config(
                env_vars::CONNECT_TIMEOUT_SECS,
                "connect timeout must be non-zero",
            ));
        }
        Ok(())
    }

    /// One-line summary for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "endpoint={}, admin={}, max_attempts={}, rejection_policy={}, timeout={}s",
            self.endpoint,
            self.admin
                .as_ref()
                .map_or_else(|| "none".to_owned(), |admin| admin.user_id().to_string()),
            self.retry.max_attempts,
            self.retry.rejection_policy,
            self.http.timeout_secs,
        )
    }
}

fn admin_from_lookup<F>(lookup: &F) -> OperationResult<Option<AdminCredentials>>
where
    F: Fn(&str) -> Option<String>,
{
    let uid = non_empty(lookup, env_vars::ADMIN_UID);
    let password = non_empty(lookup, env_vars::ADMIN_PASSWORD);
    match (uid, password) {
        (None, None) => Ok(None),
        (Some(uid), Some(password)) => {
            let user_id: UserId = parse_value(env_vars::ADMIN_UID, &uid)?;
            Ok(Some(AdminCredentials::new(user_id, password)))
        }
        (Some(_), None) => Err(GatekeeperError::config(
            env_vars::ADMIN_PASSWORD,
            "admin user id is set but the password is missing",
        )),
        (None, Some(_)) => Err(GatekeeperError::config(
            env_vars::ADMIN_UID,
            "admin password is set but the user id is missing",
        )),
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> OperationResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).ok_or_else(|| GatekeeperError::config(key, "required but not set"))
}

fn parse_required<F, T>(lookup: &F, key: &'static str) -> OperationResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    parse_value(key, &required(lookup, key)?)
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> OperationResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    non_empty(lookup, key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &'static str, raw: &str) -> OperationResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| GatekeeperError::config(key, format!("{raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekeeper_core::ErrorCode;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_minimal_configuration() {
        let config = DriverConfig::from_lookup(lookup_from(&[
            ("GATEKEEPER_URI", "http://localhost"),
            ("GATEKEEPER_PORT", "8000"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint.to_string(), "http://localhost:8000");
        assert!(config.admin.is_none());
        assert_eq!(config.retry, RetryConfig::default());
        assert_eq!(config.http, HttpClientConfig::default());
    }

    #[test]
    fn test_full_configuration() {
        let config = DriverConfig::from_lookup(lookup_from(&[
            ("GATEKEEPER_URI", "https://gk.example.com"),
            ("GATEKEEPER_PORT", "8443"),
            ("GATEKEEPER_ADMIN_UID", "1"),
            ("GATEKEEPER_ADMIN_PASSWORD", "Eq7K8h9gpg"),
            ("GATEKEEPER_MAX_ATTEMPTS", "3"),
            ("GATEKEEPER_REJECTION_POLICY", "authorization"),
            ("GATEKEEPER_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        let admin = config.admin.as_ref().unwrap();
        assert_eq!(admin.user_id(), 1);
        assert_eq!(admin.password(), "Eq7K8h9gpg");
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(
            config.retry.rejection_policy,
            RejectionPolicy::AuthorizationOnly
        );
        assert_eq!(config.http.timeout_secs, 5);
        assert!(!config.summary().contains("Eq7K8h9gpg"));
    }

    #[test]
    fn test_missing_port_is_invalid() {
        let err = DriverConfig::from_lookup(lookup_from(&[("GATEKEEPER_URI", "http://localhost")]))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigurationInvalid);
        assert!(err.to_string().contains("GATEKEEPER_PORT"));
    }

    #[test]
    fn test_malformed_port_is_invalid() {
        let err = DriverConfig::from_lookup(lookup_from(&[
            ("GATEKEEPER_URI", "http://localhost"),
            ("GATEKEEPER_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("GATEKEEPER_PORT"));
    }

    #[test]
    fn test_half_admin_identity_is_invalid() {
        let err = DriverConfig::from_lookup(lookup_from(&[
            ("GATEKEEPER_URI", "http://localhost"),
            ("GATEKEEPER_PORT", "8000"),
            ("GATEKEEPER_ADMIN_UID", "1"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("GATEKEEPER_ADMIN_PASSWORD"));
    }

    #[test]
    fn test_zero_attempts_is_invalid() {
        let err = DriverConfig::from_lookup(lookup_from(&[
            ("GATEKEEPER_URI", "http://localhost"),
            ("GATEKEEPER_PORT", "8000"),
            ("GATEKEEPER_MAX_ATTEMPTS", "0"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("GATEKEEPER_MAX_ATTEMPTS"));
    }

    #[test]
    fn test_unknown_policy_is_invalid() {
        assert!(DriverConfig::from_lookup(lookup_from(&[
            ("GATEKEEPER_URI", "http://localhost"),
            ("GATEKEEPER_PORT", "8000"),
            ("GATEKEEPER_REJECTION_POLICY", "maybe"),
        ]))
        .is_err());
    }
}
