//! Cookie-session endpoints.
//!
//! ```text
//! POST /api/v1/session {"accessToken":"eyJ..."}
//! DELETE /api/v1/session
//! ```
//!
//! Browsers that cannot attach an `Authorization` header hand their access
//! token over once; it is kept in the encrypted session cookie and used as the
//! request credentials from then on.

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::{AccessToken, RequestCredentials};
use crate::domain::{AuthSession, Error, LayoutLoadError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/v1/session`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub access_token: String,
}

/// Verify an access token and store it in the session cookie.
///
/// The token is only stored once the auth provider accepts it.
#[utoipa::path(
    post,
    path = "/api/v1/session",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Token accepted", body = AuthSession,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank token", body = Error),
        (status = 401, description = "Token rejected by the auth provider", body = Error),
        (status = 503, description = "Auth provider unavailable", body = Error)
    ),
    tags = ["session"],
    operation_id = "createSession"
)]
#[post("/session")]
pub async fn create_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateSessionRequest>,
) -> ApiResult<web::Json<AuthSession>> {
    let token = AccessToken::new(payload.into_inner().access_token).ok_or_else(|| {
        Error::invalid_request("accessToken must not be empty")
            .with_details(json!({ "field": "accessToken", "code": "empty_access_token" }))
    })?;
    let client = state
        .auth
        .for_request(RequestCredentials::with_token(token.clone()));
    let resolved = client
        .current_session()
        .await
        .map_err(|error| Error::from(LayoutLoadError::AuthUnavailable(error)))?
        .ok_or_else(|| Error::unauthorized("access token rejected"))?;

    session.persist_access_token(&token)?;
    info!(user_id = %resolved.user_id(), "session established");
    Ok(web::Json(resolved))
}

/// Forget the stored access token.
#[utoipa::path(
    delete,
    path = "/api/v1/session",
    responses((status = 204, description = "Session cleared")),
    tags = ["session"],
    operation_id = "deleteSession"
)]
#[delete("/session")]
pub async fn delete_session(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}
