// ABOUTME: Retry budget and rejection classification for admin-scoped Gatekeeper calls
// ABOUTME: Defines the NoToken/HaveToken/Exhausted state machine driven by the admin client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use gatekeeper_core::constants::{retry, status};
use gatekeeper_core::models::Token;

/// Which non-success statuses are read as "the admin token is no good"
///
/// Gatekeeper does not tell apart a missing, expired, or under-privileged
/// token at the protocol level, so the default treats every non-success
/// status as a token rejection. This also retries malformed requests and
/// server errors; `AuthorizationOnly` narrows the trigger to 401/403.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RejectionPolicy {
    /// Any status other than the expected success refreshes and retries
    #[default]
    AnyNonSuccess,
    /// Only 401 and 403 refresh and retry; other statuses are final
    AuthorizationOnly,
}

impl RejectionPolicy {
    /// Whether `status` should clear the cached token and retry
    #[must_use]
    pub const fn is_token_rejection(self, status: u16) -> bool {
        match self {
            Self::AnyNonSuccess => true,
            Self::AuthorizationOnly => {
                matches!(status, status::UNAUTHORIZED | status::FORBIDDEN)
            }
        }
    }
}

impl FromStr for RejectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" | "any-non-success" => Ok(Self::AnyNonSuccess),
            "authorization" | "auth" | "authorization-only" => Ok(Self::AuthorizationOnly),
            other => Err(format!(
                "unknown rejection policy '{other}', expected 'any' or 'authorization'"
            )),
        }
    }
}

impl fmt::Display for RejectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnyNonSuccess => write!(f, "any"),
            Self::AuthorizationOnly => write!(f, "authorization"),
        }
    }
}

/// Retry settings for one admin session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Rejected attempts allowed before giving up
    pub max_attempts: u32,
    /// How rejections are classified
    pub rejection_policy: RejectionPolicy,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: retry::DEFAULT_MAX_ATTEMPTS,
            rejection_policy: RejectionPolicy::default(),
        }
    }
}

impl RetryConfig {
    /// Create a retry configuration
    #[must_use]
    pub const fn new(max_attempts: u32, rejection_policy: RejectionPolicy) -> Self {
        Self {
            max_attempts,
            rejection_policy,
        }
    }
}

/// Where one admin call currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryState {
    /// No usable token; the next step is acquisition
    NoToken,
    /// A token is cached and will be attached to the next exchange
    HaveToken(Token),
    /// The budget is spent; nothing more goes over the wire
    Exhausted,
}

impl RetryState {
    /// Starting state given whatever the credential store holds
    #[must_use]
    pub fn from_cached(token: Option<&Token>) -> Self {
        token.map_or(Self::NoToken, |token| Self::HaveToken(token.clone()))
    }
}

/// How one exchange's status is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// Expected success status
    Success,
    /// Token rejected; clear it and spend one attempt
    TokenRejected,
    /// Final answer from the server, not a token problem
    Terminal,
}

/// Attempt counter for a single logical admin call
#[derive(Debug, Clone, Copy)]
pub struct RetryBudget {
    used: u32,
    max_attempts: u32,
}

impl RetryBudget {
    /// Fresh budget allowing `max_attempts` rejections
    #[must_use]
    pub const fn new(max_attempts: u32) -> Self {
        Self {
            used: 0,
            max_attempts,
        }
    }

    /// Record one rejection; returns `true` once the budget is spent
    pub fn record_rejection(&mut self) -> bool {
        self.used = self.used.saturating_add(1);
        self.is_exhausted()
    }

    /// Whether no attempts remain
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.used >= self.max_attempts
    }

    /// Rejections recorded so far
    #[must_use]
    pub const fn used(&self) -> u32 {
        self.used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_non_success_rejects_everything() {
        let policy = RejectionPolicy::AnyNonSuccess;
        for status in [400, 401, 403, 404, 500, 503] {
            assert!(policy.is_token_rejection(status));
        }
    }

    #[test]
    fn test_authorization_only_policy() {
        let policy = RejectionPolicy::AuthorizationOnly;
        assert!(policy.is_token_rejection(401));
        assert!(policy.is_token_rejection(403));
        assert!(!policy.is_token_rejection(400));
        assert!(!policy.is_token_rejection(500));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "any".parse::<RejectionPolicy>().unwrap(),
            RejectionPolicy::AnyNonSuccess
        );
        assert_eq!(
            " Authorization ".parse::<RejectionPolicy>().unwrap(),
            RejectionPolicy::AuthorizationOnly
        );
        assert!("sometimes".parse::<RejectionPolicy>().is_err());
    }

    #[test]
    fn test_budget_exhausts_at_max() {
        let mut budget = RetryBudget::new(5);
        for _ in 0..4 {
            assert!(!budget.record_rejection());
        }
        assert!(budget.record_rejection());
        assert_eq!(budget.used(), 5);
    }

    #[test]
    fn test_initial_state_follows_cache() {
        assert_eq!(RetryState::from_cached(None), RetryState::NoToken);
        let token = Token::new("t-1");
        assert_eq!(
            RetryState::from_cached(Some(&token)),
            RetryState::HaveToken(token)
        );
    }

    #[test]
    fn test_default_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.rejection_policy, RejectionPolicy::AnyNonSuccess);
    }
}
