// ABOUTME: Admin session holding the administrator identity and the single cached token
// ABOUTME: The credential store sits behind an async mutex so refreshes never race
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gatekeeper_core::models::{AdminCredentials, Token, UserId};
use tokio::sync::{Mutex, MutexGuard};

/// Administrator identity plus at most one cached admin token
///
/// Order of use: check presence, use, on rejection clear, then reacquire.
#[derive(Debug)]
pub struct CredentialStore {
    credentials: AdminCredentials,
    cached_token: Option<Token>,
}

impl CredentialStore {
    /// Store with no cached token
    #[must_use]
    pub const fn new(credentials: AdminCredentials) -> Self {
        Self {
            credentials,
            cached_token: None,
        }
    }

    /// Administrator identity
    #[must_use]
    pub const fn credentials(&self) -> &AdminCredentials {
        &self.credentials
    }

    /// Cached token, if any
    #[must_use]
    pub const fn current_token(&self) -> Option<&Token> {
        self.cached_token.as_ref()
    }

    /// Replace the cached token
    pub fn set_token(&mut self, token: Token) {
        self.cached_token = Some(token);
    }

    /// Drop the cached token
    pub fn clear_token(&mut self) {
        self.cached_token = None;
    }
}

/// Session owned by one resilient admin client
///
/// Holding the store lock for a whole admin call serializes the
/// read-clear-refresh sequence across concurrent callers.
#[derive(Debug)]
pub struct AdminSession {
    admin_user_id: UserId,
    store: Mutex<CredentialStore>,
}

impl AdminSession {
    /// New session for the given administrator
    #[must_use]
    pub fn new(credentials: AdminCredentials) -> Self {
        Self {
            admin_user_id: credentials.user_id(),
            store: Mutex::new(CredentialStore::new(credentials)),
        }
    }

    /// Administrator user id
    #[must_use]
    pub const fn admin_user_id(&self) -> UserId {
        self.admin_user_id
    }

    /// Exclusive access to the credential store
    pub async fn lock(&self) -> MutexGuard<'_, CredentialStore> {
        self.store.lock().await
    }

    /// Snapshot of the cached token
    pub async fn cached_token(&self) -> Option<Token> {
        self.store.lock().await.current_token().cloned()
    }

    /// Forget the cached token so the next admin call reacquires one
    pub async fn invalidate(&self) {
        self.store.lock().await.clear_token();
    }
}
