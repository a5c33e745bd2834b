// ABOUTME: Non-admin Gatekeeper calls: issue and validate user tokens, plain password checks
// ABOUTME: One exchange each, no retries; non-success statuses are negative answers, not errors

use gatekeeper_core::constants::{headers, paths, status};
use gatekeeper_core::models::{Token, UserId};
use gatekeeper_core::OperationResult;
use tracing::debug;
use url::Url;

use crate::client::GatekeeperClient;
use crate::token_acquirer::AcquisitionError;
use crate::transport::GatekeeperRequest;

const VALIDATE_TOKEN: &str = "validate_token";
const SIMPLE_AUTHENTICATION: &str = "simple_authentication";

impl GatekeeperClient {
    /// Issue a token for a user
    ///
    /// Returns `Ok(None)` if Gatekeeper refuses the credentials.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if Gatekeeper is unreachable and `Decode` if a
    /// 200 response carries no token
    pub async fn generate_token(
        &self,
        user_id: UserId,
        password: &str,
    ) -> OperationResult<Option<Token>> {
        match self.token_acquirer().acquire(user_id, password).await {
            Ok(token) => Ok(Some(token)),
            Err(AcquisitionError::Rejected { .. }) => Ok(None),
            Err(AcquisitionError::Transport(e) | AcquisitionError::Decode(e)) => Err(e),
        }
    }

    /// Whether `token` is valid for the given user
    ///
    /// # Errors
    ///
    /// Returns `Transport` if Gatekeeper is unreachable
    pub async fn validate_token_for_user(
        &self,
        token: &Token,
        user_id: UserId,
    ) -> OperationResult<bool> {
        let request = GatekeeperRequest::get(self.validate_url(token))
            .header(headers::AUTH_UID, user_id.to_string());
        self.validate(request).await
    }

    /// Whether `token` grants access to the service owning `service_key`
    ///
    /// # Errors
    ///
    /// Returns `Transport` if Gatekeeper is unreachable
    pub async fn validate_token_for_service(
        &self,
        token: &Token,
        service_key: &str,
    ) -> OperationResult<bool> {
        let request = GatekeeperRequest::get(self.validate_url(token))
            .header(headers::AUTH_SERVICE_KEY, service_key);
        self.validate(request).await
    }

    /// Check a user's password without issuing a token
    ///
    /// # Errors
    ///
    /// Returns `Transport` if Gatekeeper is unreachable
    pub async fn simple_authentication(
        &self,
        user_id: UserId,
        password: &str,
    ) -> OperationResult<bool> {
        let url = self
            .endpoint()
            .url_with_segment(paths::AUTH, &user_id.to_string());
        let request = GatekeeperRequest::get(url).header(headers::AUTH_PASSWORD, password);

        let response = self.send(SIMPLE_AUTHENTICATION, request).await?;
        let authenticated = response.status == status::ACCEPTED;
        debug!(user_id, authenticated, "Simple authentication finished");
        Ok(authenticated)
    }

    fn validate_url(&self, token: &Token) -> Url {
        self.endpoint()
            .url_with_segment(paths::TOKEN_VALIDATE, token.as_str())
    }

    async fn validate(&self, request: GatekeeperRequest) -> OperationResult<bool> {
        let response = self.send(VALIDATE_TOKEN, request).await?;
        Ok(response.status == status::OK)
    }
}
