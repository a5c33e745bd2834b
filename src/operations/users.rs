// ABOUTME: Admin-scoped user management: list, register, and delete Gatekeeper users
// ABOUTME: Each call is an AdminOperation run through the resilient admin client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gatekeeper_core::constants::{paths, status};
use gatekeeper_core::models::wire::{
    decode_json, RegisterUserRequest, RegisterUserResponse, UserListResponse,
};
use gatekeeper_core::models::{NewUser, UserEntry, UserId};
use gatekeeper_core::{GatekeeperError, OperationResult};
use reqwest::Method;
use tracing::info;

use super::encode_body;
use crate::admin_client::{AdminOperation, ResilientAdminClient};

const LIST_USERS: &str = "list_users";
const REGISTER_USER: &str = "register_user";
const DELETE_USER: &str = "delete_user";

fn decode_user_list(operation: &'static str, body: &str) -> OperationResult<Vec<UserEntry>> {
    decode_json::<UserListResponse>(operation, body)?.into_entries(operation)
}

fn decode_registered_user(operation: &'static str, body: &str) -> OperationResult<UserId> {
    decode_json::<RegisterUserResponse>(operation, body)?.into_user_id(operation)
}

fn ignore_body(_operation: &'static str, _body: &str) -> OperationResult<()> {
    Ok(())
}

impl ResilientAdminClient {
    /// List every user known to Gatekeeper
    ///
    /// # Errors
    ///
    /// Returns an error if the admin call fails; see
    /// [`ResilientAdminClient::execute`]
    pub async fn list_users(&self) -> OperationResult<Vec<UserEntry>> {
        let url = self.client().endpoint().url(paths::ADMIN_USER);
        let users = self
            .execute(AdminOperation::new(LIST_USERS, Method::GET, url, decode_user_list))
            .await?;
        info!("Got user-list with {} users", users.len());
        Ok(users)
    }

    /// Register a new user and return the id Gatekeeper assigned
    ///
    /// # Errors
    ///
    /// Returns an error if the admin call fails or the response carries no id
    pub async fn register_user(&self, user: &NewUser) -> OperationResult<UserId> {
        let body = encode_body(REGISTER_USER, &RegisterUserRequest::from(user))?;
        let url = self.client().endpoint().url(paths::ADMIN_USER);
        let operation =
            AdminOperation::new(REGISTER_USER, Method::POST, url, decode_registered_user)
                .with_body(body);

        let user_id = self.execute(operation).await?;
        info!(user_id, username = %user.username, "User registered");
        Ok(user_id)
    }

    /// Delete a user
    ///
    /// Returns `Ok(false)` when Gatekeeper refuses with a final status, such
    /// as 404 for an id that no longer exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the token budget is exhausted or the service is
    /// unreachable
    pub async fn delete_user(&self, user_id: UserId) -> OperationResult<bool> {
        let url = self
            .client()
            .endpoint()
            .url_with_segment(paths::ADMIN_USER, &user_id.to_string());
        let operation = AdminOperation::new(DELETE_USER, Method::DELETE, url, ignore_body)
            .terminal_on(&[status::NOT_FOUND]);

        match self.execute(operation).await {
            Ok(()) => {
                info!(user_id, "User deleted");
                Ok(true)
            }
            Err(GatekeeperError::RemoteRejected { status: code, .. }) => {
                info!(user_id, status = code, "User was not deleted");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
