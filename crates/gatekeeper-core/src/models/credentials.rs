// ABOUTME: Administrator identity used to obtain admin access tokens
// ABOUTME: Password is held in zeroizing memory and never printed

use std::fmt;

use zeroize::Zeroizing;

use super::user::UserId;

/// Administrator user id and password
#[derive(Clone)]
pub struct AdminCredentials {
    user_id: UserId,
    password: Zeroizing<String>,
}

impl AdminCredentials {
    /// Create credentials for the given admin account
    #[must_use]
    pub fn new(user_id: UserId, password: impl Into<String>) -> Self {
        Self {
            user_id,
            password: Zeroizing::new(password.into()),
        }
    }

    /// Admin user id
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Admin password
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("user_id", &self.user_id)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = AdminCredentials::new(1, "Eq7K8h9gpg");
        let debug = format!("{creds:?}");
        assert!(debug.contains("user_id: 1"));
        assert!(!debug.contains("Eq7K8h9gpg"));
        assert_eq!(creds.password(), "Eq7K8h9gpg");
    }
}
