// ABOUTME: Token and password commands for gatekeeper-cli
// ABOUTME: Non-admin calls: generate and validate tokens, simple password authentication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{bail, Result};
use gatekeeper_driver::models::{Token, UserId};
use gatekeeper_driver::{DriverConfig, GatekeeperClient};

/// Issue a token and print it
pub async fn generate(config: &DriverConfig, user_id: UserId, password: &str) -> Result<()> {
    let client = GatekeeperClient::new(config);
    match client.generate_token(user_id, password).await? {
        Some(token) => {
            println!("{token}");
            Ok(())
        }
        None => bail!("Gatekeeper refused to issue a token for user {user_id}"),
    }
}

/// Validate a token for a user or a service
pub async fn validate(
    config: &DriverConfig,
    token: String,
    user_id: Option<UserId>,
    service_key: Option<String>,
) -> Result<()> {
    let client = GatekeeperClient::new(config);
    let token = Token::new(token);

    let valid = match (user_id, service_key) {
        (Some(user_id), _) => client.validate_token_for_user(&token, user_id).await?,
        (None, Some(key)) => client.validate_token_for_service(&token, &key).await?,
        (None, None) => bail!("either --user-id or --service-key is required"),
    };

    println!("{}", if valid { "valid" } else { "invalid" });
    if !valid {
        bail!("token {} is not valid", token.redacted());
    }
    Ok(())
}

/// Check a user's password
pub async fn authenticate(config: &DriverConfig, user_id: UserId, password: &str) -> Result<()> {
    let client = GatekeeperClient::new(config);
    if client.simple_authentication(user_id, password).await? {
        println!("User {user_id} authenticated");
        Ok(())
    } else {
        bail!("authentication failed for user {user_id}")
    }
}
