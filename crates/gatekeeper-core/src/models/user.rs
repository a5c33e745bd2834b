// ABOUTME: Gatekeeper user account models
// ABOUTME: Listed user entries and the registration request for new accounts

use serde::Serialize;

/// Numeric Gatekeeper user id
pub type UserId = u64;

/// One row of the admin user listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserEntry {
    /// Login name
    pub username: String,
    /// User id, absent when the server omits `userids`
    pub user_id: Option<UserId>,
}

/// Registration request for a new user account
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Desired login name
    pub username: String,
    /// Account password
    pub password: String,
    /// Whether the account gets admin privileges
    pub is_admin: bool,
    /// Comma-separated service short names, or `ALL`
    pub access_list: String,
}

impl NewUser {
    /// Build a registration request
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        is_admin: bool,
        access_list: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            is_admin,
            access_list: access_list.into(),
        }
    }
}
