//! Request credential extraction.
//!
//! A request authenticates either with an `Authorization: Bearer` header or
//! with an access token previously stored in the encrypted cookie session by
//! `POST /api/v1/session`. The header wins when both are present.

use actix_session::{Session, SessionExt};
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::{AccessToken, RequestCredentials};

pub(crate) const ACCESS_TOKEN_KEY: &str = "access_token";

/// Cookie-session operations used by the session endpoints.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `token` so later requests authenticate without a header.
    pub fn persist_access_token(&self, token: &AccessToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ACCESS_TOKEN_KEY, token.expose())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Token stored in the session, if any.
    pub fn access_token(&self) -> Result<Option<AccessToken>, Error> {
        let raw = self
            .0
            .get::<String>(ACCESS_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(AccessToken::new))
    }

    /// Drop everything stored in the session cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::new(req.get_session())))
    }
}

fn bearer_token(req: &HttpRequest) -> Option<AccessToken> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    AccessToken::new(token)
}

impl FromRequest for RequestCredentials {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        if let Some(token) = bearer_token(req) {
            return ready(Ok(Self::with_token(token)));
        }
        let credentials = match SessionContext::new(req.get_session()).access_token() {
            Ok(Some(token)) => Self::with_token(token),
            Ok(None) => Self::anonymous(),
            Err(error) => {
                // An unreadable cookie is treated as no cookie.
                warn!(%error, "ignoring unreadable session cookie");
                Self::anonymous()
            }
        };
        ready(Ok(credentials))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use crate::inbound::http::test_utils::test_session_middleware;

    async fn echo_token(credentials: RequestCredentials) -> HttpResponse {
        match credentials.access_token() {
            Some(token) => HttpResponse::Ok().body(token.expose().to_owned()),
            None => HttpResponse::NoContent().finish(),
        }
    }

    async fn store_token(session: SessionContext) -> Result<HttpResponse, Error> {
        let token = AccessToken::new("cookie-token").expect("token");
        session.persist_access_token(&token)?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn forget_token(session: SessionContext) -> HttpResponse {
        session.clear();
        HttpResponse::Ok().finish()
    }

    macro_rules! credentials_app {
        () => {
            test::init_service(
                App::new()
                    .wrap(test_session_middleware())
                    .route("/echo", web::get().to(echo_token))
                    .route("/store", web::post().to(store_token))
                    .route("/forget", web::post().to(forget_token)),
            )
            .await
        };
    }

    #[rstest]
    #[case::bearer("Bearer header-token", Some("header-token"))]
    #[case::lowercase_scheme("bearer header-token", Some("header-token"))]
    #[case::basic("Basic dXNlcjpwYXNz", None)]
    #[case::blank_token("Bearer    ", None)]
    #[actix_web::test]
    async fn reads_bearer_headers(#[case] header_value: &str, #[case] expected: Option<&str>) {
        let app = credentials_app!();
        let req = test::TestRequest::get()
            .uri("/echo")
            .insert_header((header::AUTHORIZATION, header_value))
            .to_request();
        let res = test::call_service(&app, req).await;
        match expected {
            Some(token) => {
                assert_eq!(res.status(), StatusCode::OK);
                assert_eq!(test::read_body(res).await, token.as_bytes());
            }
            None => assert_eq!(res.status(), StatusCode::NO_CONTENT),
        }
    }

    #[actix_web::test]
    async fn falls_back_to_the_cookie_session() {
        let app = credentials_app!();
        let stored =
            test::call_service(&app, test::TestRequest::post().uri("/store").to_request()).await;
        let cookie = stored
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/echo")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(test::read_body(res).await, "cookie-token");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/echo")
                .cookie(cookie)
                .insert_header((header::AUTHORIZATION, "Bearer header-token"))
                .to_request(),
        )
        .await;
        assert_eq!(test::read_body(res).await, "header-token");
    }

    #[actix_web::test]
    async fn cleared_sessions_are_anonymous() {
        let app = credentials_app!();
        let stored =
            test::call_service(&app, test::TestRequest::post().uri("/store").to_request()).await;
        let cookie = stored
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let forgotten = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/forget")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let removal = forgotten
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("removal cookie set")
            .into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/echo")
                .cookie(removal)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn tampered_cookies_are_anonymous() {
        let app = credentials_app!();
        let req = test::TestRequest::get()
            .uri("/echo")
            .cookie(actix_web::cookie::Cookie::new("session", "garbage"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
