//! Layout bootstrap executed on every navigation.
//!
//! Each load builds a fresh auth client for the request, resolves the session,
//! and keeps the profile's denormalised email equal to the session email. The
//! read-then-write is not atomic: two concurrent loads for the same user may
//! both write, and the last write wins.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use super::ports::{
    AuthClient, AuthClientError, AuthClientFactory, ProfileStoreError, RequestCredentials,
};
use super::{AuthSession, Error};

/// Result of one layout load.
///
/// The client is returned so later work in the same request can reuse the
/// request-scoped credentials.
pub struct LayoutData {
    /// Auth client bound to the request's credentials.
    pub client: Arc<dyn AuthClient>,
    /// Current session, or `None` for anonymous requests.
    pub session: Option<AuthSession>,
}

/// What the profile email sync did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSyncOutcome {
    /// Stored email already matched the session.
    Unchanged,
    /// Stored email was overwritten with the session email.
    Updated,
    /// No single profile row exists for the user.
    ProfileMissing,
    /// The session carries no email to copy.
    SessionEmailMissing,
}

/// Failures that abort a layout load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutLoadError {
    /// The auth provider could not resolve the session.
    #[error("session lookup failed: {0}")]
    AuthUnavailable(#[source] AuthClientError),
    /// The profile read or update failed.
    #[error("profile email sync failed: {0}")]
    ProfileStoreUnavailable(#[source] ProfileStoreError),
}

impl From<LayoutLoadError> for Error {
    fn from(value: LayoutLoadError) -> Self {
        match value {
            LayoutLoadError::AuthUnavailable(_) => {
                Self::service_unavailable("auth provider unavailable")
                    .with_details(json!({ "source": "auth" }))
            }
            LayoutLoadError::ProfileStoreUnavailable(_) => {
                Self::service_unavailable("profile store unavailable")
                    .with_details(json!({ "source": "profile_store" }))
            }
        }
    }
}

/// Bring the stored profile email in line with the session email.
///
/// Issues at most one update, and only when a profile row exists and its email
/// differs from the session's.
///
/// # Errors
/// Propagates [`ProfileStoreError`] from the read or the update.
pub async fn sync_profile_email(
    client: &dyn AuthClient,
    session: &AuthSession,
) -> Result<ProfileSyncOutcome, ProfileStoreError> {
    let user_id = session.user_id();
    let Some(auth_email) = session.email() else {
        return Ok(ProfileSyncOutcome::SessionEmailMissing);
    };

    let Some(profile) = client.profile(user_id).await? else {
        return Ok(ProfileSyncOutcome::ProfileMissing);
    };

    if profile.email.as_deref() == Some(auth_email) {
        return Ok(ProfileSyncOutcome::Unchanged);
    }

    client.update_profile_email(user_id, auth_email).await?;
    Ok(ProfileSyncOutcome::Updated)
}

/// Runs the layout bootstrap for one request.
#[derive(Clone)]
pub struct LayoutLoader {
    clients: Arc<dyn AuthClientFactory>,
}

impl LayoutLoader {
    /// Build a loader drawing request-scoped clients from `clients`.
    pub fn new(clients: Arc<dyn AuthClientFactory>) -> Self {
        Self { clients }
    }

    /// Resolve the session and sync the profile email.
    ///
    /// # Errors
    /// [`LayoutLoadError::AuthUnavailable`] when the session lookup fails and
    /// [`LayoutLoadError::ProfileStoreUnavailable`] when the profile read or
    /// update fails. A missing session is not an error.
    pub async fn load(&self, credentials: RequestCredentials) -> Result<LayoutData, LayoutLoadError> {
        let client = self.clients.for_request(credentials);
        let session = client.current_session().await.map_err(|error| {
            warn!(%error, "session lookup failed");
            LayoutLoadError::AuthUnavailable(error)
        })?;

        let Some(session) = session else {
            debug!("no active session");
            return Ok(LayoutData {
                client,
                session: None,
            });
        };

        let outcome = sync_profile_email(client.as_ref(), &session)
            .await
            .map_err(|error| {
                warn!(%error, user_id = %session.user_id(), "profile email sync failed");
                LayoutLoadError::ProfileStoreUnavailable(error)
            })?;
        match outcome {
            ProfileSyncOutcome::Updated => {
                info!(user_id = %session.user_id(), "profile email updated from session");
            }
            other => debug!(user_id = %session.user_id(), outcome = ?other, "profile email sync"),
        }

        Ok(LayoutData {
            client,
            session: Some(session),
        })
    }
}
