//! Reqwest-backed Supabase auth client and profile store.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use tracing::{debug, warn};

use super::dto::{AuthUserDto, ProfileEmailUpdateDto, ProfileRowDto};
use crate::domain::ports::{
    AuthClient, AuthClientError, AuthClientFactory, ProfileRecord, ProfileStoreError,
    RequestCredentials,
};
use crate::domain::{AuthSession, UserId};
use crate::outbound::http_support::{
    build_client, is_timeout_status, join_segments, read_response, status_message,
};

const APIKEY_HEADER: &str = "apikey";
const PREFER_HEADER: &str = "Prefer";
const PROFILES_TABLE: &str = "profiles";

/// Errors raised while describing a Supabase project.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SupabaseProjectError {
    /// The project URL cannot carry path segments.
    #[error("supabase url {url} cannot be used as a base url")]
    NotABaseUrl { url: String },
    /// The public key was blank.
    #[error("supabase public key must not be empty")]
    EmptyPublicKey,
}

/// Public coordinates of a Supabase project.
#[derive(Clone, PartialEq, Eq)]
pub struct SupabaseProject {
    url: Url,
    public_key: String,
}

impl SupabaseProject {
    /// Validate the project URL and public (anon) key.
    ///
    /// # Errors
    /// Returns [`SupabaseProjectError`] when the URL cannot be extended with
    /// path segments or the key is blank.
    pub fn new(url: Url, public_key: impl Into<String>) -> Result<Self, SupabaseProjectError> {
        if url.cannot_be_a_base() {
            return Err(SupabaseProjectError::NotABaseUrl {
                url: url.to_string(),
            });
        }
        let public_key = public_key.into().trim().to_owned();
        if public_key.is_empty() {
            return Err(SupabaseProjectError::EmptyPublicKey);
        }
        Ok(Self { url, public_key })
    }

    /// Project base URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, String> {
        join_segments(&self.url, segments)
    }
}

impl fmt::Debug for SupabaseProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseProject")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

/// Factory sharing one connection pool across request-scoped clients.
#[derive(Clone)]
pub struct SupabaseClientFactory {
    http: Client,
    project: Arc<SupabaseProject>,
}

impl SupabaseClientFactory {
    /// Build a factory with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(project: SupabaseProject, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: build_client(timeout)?,
            project: Arc::new(project),
        })
    }
}

impl AuthClientFactory for SupabaseClientFactory {
    fn for_request(&self, credentials: RequestCredentials) -> Arc<dyn AuthClient> {
        Arc::new(SupabaseAuthClient {
            http: self.http.clone(),
            project: Arc::clone(&self.project),
            credentials,
        })
    }
}

/// Client bound to one request's credentials.
pub struct SupabaseAuthClient {
    http: Client,
    project: Arc<SupabaseProject>,
    credentials: RequestCredentials,
}

impl SupabaseAuthClient {
    /// Attach the project key and the caller's bearer.
    ///
    /// Anonymous requests fall back to the public key so row-level security
    /// evaluates them as the anonymous role.
    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .credentials
            .access_token()
            .map_or(self.project.public_key.as_str(), |token| token.expose());
        request
            .header(APIKEY_HEADER, self.project.public_key.as_str())
            .bearer_auth(bearer)
    }

    fn profile_url(&self, user_id: &UserId) -> Result<Url, String> {
        let mut url = self.project.endpoint(&["rest", "v1", PROFILES_TABLE])?;
        url.query_pairs_mut()
            .append_pair("user_id", &format!("eq.{user_id}"));
        Ok(url)
    }
}

#[async_trait]
impl AuthClient for SupabaseAuthClient {
    async fn current_session(&self) -> Result<Option<AuthSession>, AuthClientError> {
        let Some(token) = self.credentials.access_token() else {
            return Ok(None);
        };
        let url = self
            .project
            .endpoint(&["auth", "v1", "user"])
            .map_err(AuthClientError::transport)?;
        let response = self
            .http
            .get(url)
            .header(APIKEY_HEADER, self.project.public_key.as_str())
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(auth_transport_error)?;
        let (status, body) = read_response(response)
            .await
            .map_err(auth_transport_error)?;

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            debug!(status = status.as_u16(), "auth provider rejected access token");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(auth_status_error(status, &body));
        }
        parse_session(&body).map(Some)
    }

    async fn profile(&self, user_id: &UserId) -> Result<Option<ProfileRecord>, ProfileStoreError> {
        let mut url = self
            .profile_url(user_id)
            .map_err(ProfileStoreError::transport)?;
        url.query_pairs_mut().append_pair("select", "email");
        let response = self
            .authorised(self.http.get(url))
            .send()
            .await
            .map_err(store_transport_error)?;
        let (status, body) = read_response(response)
            .await
            .map_err(store_transport_error)?;
        if !status.is_success() {
            return Err(store_status_error(status, &body));
        }
        parse_profile_rows(&body)
    }

    async fn update_profile_email(
        &self,
        user_id: &UserId,
        email: &str,
    ) -> Result<(), ProfileStoreError> {
        let url = self
            .profile_url(user_id)
            .map_err(ProfileStoreError::transport)?;
        let response = self
            .authorised(self.http.patch(url))
            .header(PREFER_HEADER, "return=minimal")
            .json(&ProfileEmailUpdateDto { email })
            .send()
            .await
            .map_err(store_transport_error)?;
        let (status, body) = read_response(response)
            .await
            .map_err(store_transport_error)?;
        if !status.is_success() {
            return Err(store_status_error(status, &body));
        }
        Ok(())
    }
}

fn parse_session(body: &[u8]) -> Result<AuthSession, AuthClientError> {
    let user: AuthUserDto = serde_json::from_slice(body)
        .map_err(|error| AuthClientError::decode(format!("invalid user payload: {error}")))?;
    let user_id = UserId::new(&user.id)
        .map_err(|error| AuthClientError::decode(format!("invalid user id: {error}")))?;
    let email = user.email.filter(|email| !email.is_empty());
    Ok(AuthSession::new(user_id, email))
}

fn parse_profile_rows(body: &[u8]) -> Result<Option<ProfileRecord>, ProfileStoreError> {
    let mut rows: Vec<ProfileRowDto> = serde_json::from_slice(body).map_err(|error| {
        ProfileStoreError::decode(format!("invalid profile payload: {error}"))
    })?;
    match rows.len() {
        0 => Ok(None),
        1 => Ok(rows.pop().map(|row| ProfileRecord { email: row.email })),
        count => {
            warn!(rows = count, "ambiguous profile lookup; treating as missing");
            Ok(None)
        }
    }
}

fn auth_transport_error(error: reqwest::Error) -> AuthClientError {
    if error.is_timeout() {
        AuthClientError::timeout(error.to_string())
    } else {
        AuthClientError::transport(error.to_string())
    }
}

fn auth_status_error(status: StatusCode, body: &[u8]) -> AuthClientError {
    let message = status_message(status, body);
    if is_timeout_status(status) {
        AuthClientError::timeout(message)
    } else {
        AuthClientError::rejected(message)
    }
}

fn store_transport_error(error: reqwest::Error) -> ProfileStoreError {
    if error.is_timeout() {
        ProfileStoreError::timeout(error.to_string())
    } else {
        ProfileStoreError::transport(error.to_string())
    }
}

fn store_status_error(status: StatusCode, body: &[u8]) -> ProfileStoreError {
    let message = status_message(status, body);
    if is_timeout_status(status) {
        ProfileStoreError::timeout(message)
    } else {
        ProfileStoreError::rejected(message)
    }
}
