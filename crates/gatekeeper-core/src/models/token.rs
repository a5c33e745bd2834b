// ABOUTME: Opaque access token issued by Gatekeeper
// ABOUTME: Keeps the full value out of Debug output and log lines

use std::fmt;

/// Characters of a token kept when it is shown in logs
const VISIBLE_PREFIX_LEN: usize = 6;

/// Access token issued by Gatekeeper
///
/// Expiry is controlled by the server and is only observable through a
/// rejected call, so the token carries no timestamps.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token value
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw token value for use in headers and paths
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the server handed out an empty id
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Truncated form safe for log output
    #[must_use]
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(VISIBLE_PREFIX_LEN).collect();
        format!("{prefix}...")
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&self.redacted()).finish()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
