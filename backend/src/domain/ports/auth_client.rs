//! Driven ports for the authentication provider and the profile store.
//!
//! The auth provider hands out a client bound to one request's credentials.
//! That client resolves the current session and, because the profile store
//! enforces row access with the same credentials, also reads and updates the
//! caller's profile row. Nothing here is cached between requests.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use zeroize::Zeroize;

use super::define_port_error;
use crate::domain::{AuthSession, UserId};

/// Bearer access token issued by the auth provider.
///
/// The token is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token, returning `None` for blank input.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    /// Expose the raw token for transport headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Credentials carried by one inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCredentials {
    access_token: Option<AccessToken>,
}

impl RequestCredentials {
    /// Credentials for a request that presented no token.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Credentials carrying a bearer token.
    #[must_use]
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            access_token: Some(token),
        }
    }

    /// Bearer token, if the request presented one.
    #[must_use]
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }
}

/// Stored profile row as far as the email sync is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    /// Denormalised email column; may be null in the store.
    pub email: Option<String>,
}

define_port_error! {
    /// Errors surfaced while resolving the current session.
    pub enum AuthClientError {
        /// Network transport failed before a response was read.
        Transport { message: String } =>
            "auth provider transport failed: {message}",
        /// The request exceeded the client timeout.
        Timeout { message: String } =>
            "auth provider timeout: {message}",
        /// The provider answered with an unexpected non-success status.
        Rejected { message: String } =>
            "auth provider rejected request: {message}",
        /// The provider's response could not be decoded.
        Decode { message: String } =>
            "auth provider response decode failed: {message}",
    }
}

define_port_error! {
    /// Errors surfaced while reading or writing the profile store.
    pub enum ProfileStoreError {
        /// Network transport failed before a response was read.
        Transport { message: String } =>
            "profile store transport failed: {message}",
        /// The request exceeded the client timeout.
        Timeout { message: String } =>
            "profile store timeout: {message}",
        /// The store answered with an unexpected non-success status.
        Rejected { message: String } =>
            "profile store rejected request: {message}",
        /// The store's response could not be decoded.
        Decode { message: String } =>
            "profile store response decode failed: {message}",
    }
}

/// Request-scoped client for the auth provider and profile store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Resolve the session for the bound credentials.
    ///
    /// Returns `Ok(None)` when the request is not authenticated; errors mean
    /// the provider could not answer.
    async fn current_session(&self) -> Result<Option<AuthSession>, AuthClientError>;

    /// Read the profile row of `user_id`, or `None` when no row exists.
    async fn profile(&self, user_id: &UserId) -> Result<Option<ProfileRecord>, ProfileStoreError>;

    /// Overwrite the email column of `user_id`'s profile row.
    async fn update_profile_email(
        &self,
        user_id: &UserId,
        email: &str,
    ) -> Result<(), ProfileStoreError>;
}

/// Builds [`AuthClient`]s bound to a request's credentials.
#[cfg_attr(test, mockall::automock)]
pub trait AuthClientFactory: Send + Sync {
    /// Create a client scoped to one request.
    fn for_request(&self, credentials: RequestCredentials) -> Arc<dyn AuthClient>;
}

/// Client that never finds a session, used when no auth provider is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnonymousAuthClient;

#[async_trait]
impl AuthClient for AnonymousAuthClient {
    async fn current_session(&self) -> Result<Option<AuthSession>, AuthClientError> {
        Ok(None)
    }

    async fn profile(&self, _user_id: &UserId) -> Result<Option<ProfileRecord>, ProfileStoreError> {
        Ok(None)
    }

    async fn update_profile_email(
        &self,
        _user_id: &UserId,
        _email: &str,
    ) -> Result<(), ProfileStoreError> {
        Ok(())
    }
}

/// Factory handing out [`AnonymousAuthClient`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnonymousAuthClientFactory;

impl AuthClientFactory for AnonymousAuthClientFactory {
    fn for_request(&self, _credentials: RequestCredentials) -> Arc<dyn AuthClient> {
        Arc::new(AnonymousAuthClient)
    }
}
