//! Layout bootstrap handler.
//!
//! ```text
//! GET /api/v1/layout
//! ```
//!
//! Called once per navigation. Resolves the caller's session and brings the
//! stored profile email in line with it before answering.

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::RequestCredentials;
use crate::domain::{AuthSession, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Layout payload; `session` is `null` for anonymous callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LayoutResponse {
    pub session: Option<AuthSession>,
}

/// Resolve the session and sync the profile email.
#[utoipa::path(
    get,
    path = "/api/v1/layout",
    responses(
        (status = 200, description = "Current session, or null", body = LayoutResponse),
        (status = 503, description = "Auth provider or profile store unavailable; `details.source` names which", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["layout"],
    operation_id = "loadLayout"
)]
#[get("/layout")]
pub async fn load_layout(
    state: web::Data<HttpState>,
    credentials: RequestCredentials,
) -> ApiResult<HttpResponse> {
    let data = state.layout.load(credentials).await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "private, no-store"))
        .json(LayoutResponse {
            session: data.session,
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::UserId;
    use crate::domain::ports::{
        AuthClient, AuthClientError, FixturePokemonSource, MockAuthClient, MockAuthClientFactory,
        ProfileRecord, ProfileStoreError,
    };

    const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    const EMAIL: &str = "ash@pallet.town";

    fn session() -> AuthSession {
        AuthSession::new(UserId::new(USER_ID).expect("valid id"), Some(EMAIL.to_owned()))
    }

    fn state_for(client: MockAuthClient, expected_token: Option<&'static str>) -> web::Data<HttpState> {
        let mut factory = MockAuthClientFactory::new();
        factory
            .expect_for_request()
            .withf(move |credentials| {
                credentials.access_token().map(|token| token.expose()) == expected_token
            })
            .times(1)
            .return_once(move |_| Arc::new(client) as Arc<dyn AuthClient>);
        web::Data::new(HttpState::new(
            Arc::new(FixturePokemonSource),
            Arc::new(factory),
        ))
    }

    async fn get_layout(state: web::Data<HttpState>, bearer: Option<&str>) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(web::scope("/api/v1").service(load_layout)),
        )
        .await;
        let mut req = test::TestRequest::get().uri("/api/v1/layout");
        if let Some(token) = bearer {
            req = req.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
        }
        let res = test::call_service(&app, req.to_request()).await;
        (res.status(), test::read_body_json(res).await)
    }

    #[actix_web::test]
    async fn anonymous_callers_get_a_null_session() {
        let mut client = MockAuthClient::new();
        client.expect_current_session().times(1).returning(|| Ok(None));
        client.expect_profile().never();
        client.expect_update_profile_email().never();

        let (status, body) = get_layout(state_for(client, None), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "session": null }));
    }

    #[actix_web::test]
    async fn signed_in_callers_get_their_session_and_a_synced_profile() {
        let mut client = MockAuthClient::new();
        client
            .expect_current_session()
            .times(1)
            .returning(|| Ok(Some(session())));
        client.expect_profile().times(1).returning(|_| {
            Ok(Some(ProfileRecord {
                email: Some("old@pallet.town".to_owned()),
            }))
        });
        client
            .expect_update_profile_email()
            .withf(|_, email| email == EMAIL)
            .times(1)
            .returning(|_, _| Ok(()));

        let (status, body) = get_layout(state_for(client, Some("user-token")), Some("user-token")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "session": { "userId": USER_ID, "email": EMAIL } })
        );
    }

    #[rstest]
    #[case::auth(true, "auth")]
    #[case::profile_store(false, "profile_store")]
    #[actix_web::test]
    async fn upstream_failures_are_503_with_their_source(
        #[case] auth_fails: bool,
        #[case] source: &str,
    ) {
        let mut client = MockAuthClient::new();
        if auth_fails {
            client
                .expect_current_session()
                .times(1)
                .returning(|| Err(AuthClientError::transport("connection refused")));
        } else {
            client
                .expect_current_session()
                .times(1)
                .returning(|| Ok(Some(session())));
            client
                .expect_profile()
                .times(1)
                .returning(|_| Err(ProfileStoreError::timeout("10s")));
        }
        client.expect_update_profile_email().never();

        let (status, body) = get_layout(state_for(client, Some("t")), Some("t")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "service_unavailable");
        assert_eq!(body["details"]["source"], source);
    }
}
