// ABOUTME: Integration tests for loading driver configuration from process environment variables
// ABOUTME: Serialized because every test mutates the shared environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use gatekeeper_driver::constants::env_vars;
use gatekeeper_driver::{
    DriverConfig, ErrorCode, GatekeeperError, RejectionPolicy, ResilientAdminClient,
};
use serial_test::serial;

const ALL_VARS: [&str; 8] = [
    env_vars::URI,
    env_vars::PORT,
    env_vars::ADMIN_UID,
    env_vars::ADMIN_PASSWORD,
    env_vars::MAX_ATTEMPTS,
    env_vars::REJECTION_POLICY,
    env_vars::TIMEOUT_SECS,
    env_vars::CONNECT_TIMEOUT_SECS,
];

fn reset_env(vars: &[(&str, &str)]) {
    for key in ALL_VARS {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    reset_env(&[(env_vars::URI, "http://localhost"), (env_vars::PORT, "8000")]);

    let config = DriverConfig::from_env().unwrap();

    assert_eq!(config.endpoint.to_string(), "http://localhost:8000");
    assert!(config.admin.is_none());
    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(config.retry.rejection_policy, RejectionPolicy::AnyNonSuccess);
    assert_eq!(config.http.timeout_secs, 30);
    assert_eq!(config.http.connect_timeout_secs, 10);
}

#[test]
#[serial]
fn test_from_env_with_admin_and_overrides() {
    reset_env(&[
        (env_vars::URI, "https://gatekeeper.internal"),
        (env_vars::PORT, "9443"),
        (env_vars::ADMIN_UID, "1"),
        (env_vars::ADMIN_PASSWORD, "secret"),
        (env_vars::MAX_ATTEMPTS, "3"),
        (env_vars::REJECTION_POLICY, "authorization"),
    ]);

    let config = DriverConfig::from_env().unwrap();

    let admin = config.admin.as_ref().unwrap();
    assert_eq!(admin.user_id(), 1);
    assert_eq!(admin.password(), "secret");
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(
        config.retry.rejection_policy,
        RejectionPolicy::AuthorizationOnly
    );
    assert!(!config.summary().contains("secret"));
    assert!(ResilientAdminClient::from_config(&config).is_ok());
}

#[test]
#[serial]
fn test_missing_port_is_configuration_error() {
    reset_env(&[(env_vars::URI, "http://localhost")]);

    let err = DriverConfig::from_env().unwrap_err();

    assert!(matches!(
        err,
        GatekeeperError::ConfigurationInvalid {
            key: env_vars::PORT,
            ..
        }
    ));
}

#[test]
#[serial]
fn test_half_admin_identity_is_rejected() {
    reset_env(&[
        (env_vars::URI, "http://localhost"),
        (env_vars::PORT, "8000"),
        (env_vars::ADMIN_UID, "1"),
    ]);

    let err = DriverConfig::from_env().unwrap_err();
    assert_eq!(err.code(), ErrorCode::ConfigurationInvalid);
}

#[test]
#[serial]
fn test_zero_retry_budget_is_rejected() {
    reset_env(&[
        (env_vars::URI, "http://localhost"),
        (env_vars::PORT, "8000"),
        (env_vars::MAX_ATTEMPTS, "0"),
    ]);

    let err = DriverConfig::from_env().unwrap_err();
    assert!(matches!(
        err,
        GatekeeperError::ConfigurationInvalid {
            key: env_vars::MAX_ATTEMPTS,
            ..
        }
    ));
}

#[test]
#[serial]
fn test_admin_client_requires_admin_identity() {
    reset_env(&[(env_vars::URI, "http://localhost"), (env_vars::PORT, "8000")]);
    let config = DriverConfig::from_env().unwrap();

    let err = ResilientAdminClient::from_config(&config).err().unwrap();

    assert_eq!(err.code(), ErrorCode::ConfigurationInvalid);
}
