// ABOUTME: JSON request and response bodies in Gatekeeper's wire format
// ABOUTME: Converts raw bodies into domain models, reporting shape mismatches as decode errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

use super::service::{NewService, RegisteredService, ServiceEntry};
use super::token::Token;
use super::user::{NewUser, UserEntry, UserId};
use crate::errors::{GatekeeperError, OperationResult};

/// Parse a response body, tagging failures with the operation name
///
/// # Errors
///
/// Returns `GatekeeperError::Decode` if the body is not valid JSON for `T`
pub fn decode_json<T: DeserializeOwned>(operation: &'static str, body: &str) -> OperationResult<T> {
    serde_json::from_str(body).map_err(|e| GatekeeperError::decode(operation, e))
}

/// User id that Gatekeeper may send either as a number or a numeric string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexibleId(pub UserId);

impl<'de> Deserialize<'de> for FlexibleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(UserId),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(id) => Ok(Self(id)),
            Raw::Text(text) => text
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| de::Error::custom(format!("user id is not numeric: {text:?}"))),
        }
    }
}

/// `POST /token/` success body
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Nested token object
    pub token: TokenBody,
}

/// Token object inside a token response
#[derive(Debug, Deserialize)]
pub struct TokenBody {
    /// Token value
    pub id: String,
}

impl TokenResponse {
    /// Extract the issued token
    #[must_use]
    pub fn into_token(self) -> Token {
        Token::new(self.token.id)
    }
}

/// `GET /admin/user/` success body
#[derive(Debug, Deserialize)]
pub struct UserListResponse {
    /// Usernames
    pub userlist: Vec<String>,
    /// User ids aligned with `userlist`; missing in the reduced variant
    #[serde(default)]
    pub userids: Option<Vec<FlexibleId>>,
}

impl UserListResponse {
    /// Pair usernames with their ids
    ///
    /// # Errors
    ///
    /// Returns a decode error if `userids` is present but not aligned with `userlist`
    pub fn into_entries(self, operation: &'static str) -> OperationResult<Vec<UserEntry>> {
        match self.userids {
            None => Ok(self
                .userlist
                .into_iter()
                .map(|username| UserEntry {
                    username,
                    user_id: None,
                })
                .collect()),
            Some(ids) if ids.len() == self.userlist.len() => Ok(self
                .userlist
                .into_iter()
                .zip(ids)
                .map(|(username, FlexibleId(id))| UserEntry {
                    username,
                    user_id: Some(id),
                })
                .collect()),
            Some(ids) => Err(GatekeeperError::decode(
                operation,
                format!(
                    "userlist has {} entries but userids has {}",
                    self.userlist.len(),
                    ids.len()
                ),
            )),
        }
    }
}

/// `POST /admin/user/` request body
#[derive(Debug, Serialize)]
pub struct RegisterUserRequest<'a> {
    /// Login name
    pub username: &'a str,
    /// Account password
    pub password: &'a str,
    /// `"y"` for admins, `"n"` otherwise
    pub isadmin: &'static str,
    /// Trimmed access list
    pub accesslist: &'a str,
}

impl<'a> From<&'a NewUser> for RegisterUserRequest<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            username: &user.username,
            password: &user.password,
            isadmin: if user.is_admin { "y" } else { "n" },
            accesslist: user.access_list.trim(),
        }
    }
}

/// `POST /admin/user/` success body
#[derive(Debug, Deserialize)]
pub struct RegisterUserResponse {
    /// Created account records; the first one is the new user
    pub info: Vec<RegisteredUserInfo>,
}

/// Created account record
#[derive(Debug, Deserialize)]
pub struct RegisteredUserInfo {
    /// Assigned user id
    pub id: FlexibleId,
}

impl RegisterUserResponse {
    /// Id of the newly created user
    ///
    /// # Errors
    ///
    /// Returns a decode error if `info` is empty
    pub fn into_user_id(self, operation: &'static str) -> OperationResult<UserId> {
        self.info
            .first()
            .map(|info| info.id.0)
            .ok_or_else(|| GatekeeperError::decode(operation, "info array is empty"))
    }
}

/// `GET /admin/service/` success body
#[derive(Debug, Deserialize)]
pub struct ServiceListResponse {
    /// Column-oriented service listing
    pub servicelist: ServiceListBody,
}

/// Parallel arrays of service names and keys
#[derive(Debug, Deserialize)]
pub struct ServiceListBody {
    /// Service short names
    pub shortname: Vec<String>,
    /// Service keys aligned with `shortname`
    #[serde(rename = "service-key")]
    pub service_key: Vec<String>,
}

impl ServiceListResponse {
    /// Pair short names with their keys
    ///
    /// # Errors
    ///
    /// Returns a decode error if the two arrays differ in length
    pub fn into_entries(self, operation: &'static str) -> OperationResult<Vec<ServiceEntry>> {
        let ServiceListBody {
            shortname,
            service_key,
        } = self.servicelist;
        if shortname.len() != service_key.len() {
            return Err(GatekeeperError::decode(
                operation,
                format!(
                    "shortname has {} entries but service-key has {}",
                    shortname.len(),
                    service_key.len()
                ),
            ));
        }
        Ok(shortname
            .into_iter()
            .zip(service_key)
            .map(|(short_name, service_key)| ServiceEntry {
                short_name,
                service_key,
            })
            .collect())
    }
}

/// `POST /admin/service/` request body
#[derive(Debug, Serialize)]
pub struct RegisterServiceRequest<'a> {
    /// Unique one-word name
    pub shortname: &'a str,
    /// Free-text description
    pub description: &'a str,
}

impl<'a> From<&'a NewService> for RegisterServiceRequest<'a> {
    fn from(service: &'a NewService) -> Self {
        Self {
            shortname: &service.short_name,
            description: &service.description,
        }
    }
}

/// `POST /admin/service/` success body
#[derive(Debug, Deserialize)]
pub struct RegisterServiceResponse {
    /// Created service records; the first one is the new service
    pub info: Vec<RegisteredServiceInfo>,
}

/// Created service record
#[derive(Debug, Deserialize)]
pub struct RegisteredServiceInfo {
    /// Admin URI of the service record
    #[serde(rename = "service-uri")]
    pub service_uri: String,
    /// Issued service key
    #[serde(rename = "service-key")]
    pub service_key: String,
}

impl RegisterServiceResponse {
    /// URI and key of the newly registered service
    ///
    /// # Errors
    ///
    /// Returns a decode error if `info` is empty
    pub fn into_registered(self, operation: &'static str) -> OperationResult<RegisteredService> {
        self.info
            .into_iter()
            .next()
            .map(|info| RegisteredService {
                service_uri: info.service_uri,
                service_key: info.service_key,
            })
            .ok_or_else(|| GatekeeperError::decode(operation, "info array is empty"))
    }
}
