// ABOUTME: Downstream service registration models
// ABOUTME: Listed services, registration requests, and the issued uri/key pair

use serde::Serialize;

/// One row of the admin service listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEntry {
    /// One-word service name used in access lists
    pub short_name: String,
    /// Key the service presents when validating tokens
    pub service_key: String,
}

/// Registration request for a downstream service
#[derive(Debug, Clone)]
pub struct NewService {
    /// Unique one-word name
    pub short_name: String,
    /// Sentence describing the service
    pub description: String,
}

impl NewService {
    /// Build a registration request
    #[must_use]
    pub fn new(short_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            description: description.into(),
        }
    }
}

/// Result of registering a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredService {
    /// Admin URI for managing the service record later on
    pub service_uri: String,
    /// Key handed to the service for token validation
    pub service_key: String,
}
