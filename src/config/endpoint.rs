// ABOUTME: Base address of the Gatekeeper service and URL construction for its endpoints
// ABOUTME: Validates scheme and port once so request building cannot fail later
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use gatekeeper_core::constants::env_vars;
use gatekeeper_core::{GatekeeperError, OperationResult};
use url::Url;

/// Validated Gatekeeper base address (scheme, host, and port)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatekeeperEndpoint {
    base: Url,
}

impl GatekeeperEndpoint {
    /// Build an endpoint from a base URI and port
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationInvalid` if the URI does not parse, is not
    /// http(s), or cannot carry a port
    pub fn new(uri: &str, port: u16) -> OperationResult<Self> {
        let mut base = Url::parse(uri.trim())
            .map_err(|e| GatekeeperError::config(env_vars::URI, format!("{uri:?}: {e}")))?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(GatekeeperError::config(
                env_vars::URI,
                format!("unsupported scheme '{}'", base.scheme()),
            ));
        }
        if base.cannot_be_a_base() || base.host().is_none() {
            return Err(GatekeeperError::config(env_vars::URI, "URI has no host"));
        }
        if port == 0 {
            return Err(GatekeeperError::config(env_vars::PORT, "port must be non-zero"));
        }
        base.set_port(Some(port))
            .map_err(|()| GatekeeperError::config(env_vars::PORT, "URI cannot carry a port"))?;
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self { base })
    }

    /// URL for a fixed endpoint path such as `/admin/user/`
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url
    }

    /// URL for a path prefix followed by one percent-encoded segment
    #[must_use]
    pub fn url_with_segment(&self, prefix: &str, segment: &str) -> Url {
        let mut url = self.url(prefix);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        url
    }

    /// Port the endpoint targets
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.base.port_or_known_default()
    }
}

impl fmt::Display for GatekeeperEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base.as_str().trim_end_matches('/'))
    }
}
