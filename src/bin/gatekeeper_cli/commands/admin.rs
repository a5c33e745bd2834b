// ABOUTME: Admin commands for gatekeeper-cli
// ABOUTME: User and service management through the resilient admin client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{bail, Result};
use gatekeeper_driver::models::{NewService, NewUser, UserId};
use gatekeeper_driver::{DriverConfig, ResilientAdminClient};
use tracing::warn;

use crate::helpers::display::{
    display_registered_service, display_registered_user, display_services, display_users,
};

/// List all users
pub async fn list_users(config: &DriverConfig) -> Result<()> {
    let admin = ResilientAdminClient::from_config(config)?;
    let users = admin.list_users().await?;
    display_users(&users);
    Ok(())
}

/// Register a new user
pub async fn register_user(
    config: &DriverConfig,
    username: String,
    password: String,
    is_admin: bool,
    access_list: String,
) -> Result<()> {
    let admin = ResilientAdminClient::from_config(config)?;
    let user = NewUser::new(username, password, is_admin, access_list);
    let user_id = admin.register_user(&user).await?;
    display_registered_user(&user, user_id);
    Ok(())
}

/// Delete a user, failing if Gatekeeper refused
pub async fn delete_user(config: &DriverConfig, user_id: UserId) -> Result<()> {
    let admin = ResilientAdminClient::from_config(config)?;
    if !admin.delete_user(user_id).await? {
        warn!(user_id, "Gatekeeper did not delete the user");
        bail!("user {user_id} was not deleted");
    }
    println!("Deleted user {user_id}");
    Ok(())
}

/// List registered services
pub async fn list_services(config: &DriverConfig) -> Result<()> {
    let admin = ResilientAdminClient::from_config(config)?;
    let services = admin.list_services().await?;
    display_services(&services);
    Ok(())
}

/// Register a downstream service
pub async fn register_service(
    config: &DriverConfig,
    short_name: String,
    description: String,
) -> Result<()> {
    let admin = ResilientAdminClient::from_config(config)?;
    let service = NewService::new(short_name, description);
    let registered = admin.register_service(&service).await?;
    display_registered_service(&service, &registered);
    Ok(())
}
