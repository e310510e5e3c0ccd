//! Email-keyed page loader.
//!
//! ```text
//! GET /api/v1/pages/{email}
//! ```

use actix_web::{get, web};

use crate::domain::{EmailPage, Error, load_email_page};
use crate::inbound::http::ApiResult;

/// Serve the page for an email-shaped segment.
///
/// The segment is only checked for shape; no user lookup happens.
#[utoipa::path(
    get,
    path = "/api/v1/pages/{email}",
    params(("email" = String, Path, description = "Email-shaped page key")),
    responses(
        (status = 200, description = "Segment echoed unchanged", body = EmailPage),
        (status = 404, description = "Page not found", body = Error)
    ),
    tags = ["pages"],
    operation_id = "loadEmailPage"
)]
#[get("/pages/{email}")]
pub async fn load_page(path: web::Path<String>) -> ApiResult<web::Json<EmailPage>> {
    Ok(web::Json(load_email_page(&path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case::plain("/api/v1/pages/misty@cerulean.gym", "misty@cerulean.gym")]
    #[case::plus_tag("/api/v1/pages/Brock+rock@Pewter.Gym", "Brock+rock@Pewter.Gym")]
    #[case::encoded_at("/api/v1/pages/erika%40celadon.gym", "erika@celadon.gym")]
    #[actix_web::test]
    async fn echoes_email_shaped_segments(#[case] uri: &str, #[case] email: &str) {
        let app = test::init_service(App::new().service(web::scope("/api/v1").service(load_page))).await;
        let req = test::TestRequest::get().uri(uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "email": email }));
    }

    #[rstest]
    #[case::not_an_email("/api/v1/pages/not-an-email")]
    #[case::no_tld("/api/v1/pages/a@b")]
    #[case::space("/api/v1/pages/a%20b@c.d")]
    #[actix_web::test]
    async fn rejects_other_segments_with_page_not_found(#[case] uri: &str) {
        let app = test::init_service(App::new().service(web::scope("/api/v1").service(load_page))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Page not found");
        assert_eq!(body["code"], "not_found");
    }
}
