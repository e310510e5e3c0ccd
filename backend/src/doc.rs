//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI in debug builds. Credentials are optional on every
//! endpoint, so the two schemes are declared but not required globally.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{AuthSession, EmailPage, Error, ErrorCode};
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::layout::LayoutResponse;
use crate::inbound::http::sessions::CreateSessionRequest;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Access token issued by the auth provider."))
                    .build(),
            ),
        );
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie set by POST /api/v1/session.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pokédex backend API",
        description = "Pokémon data relay, layout session bootstrap, and email-keyed pages."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::pokemon::list_pokemon,
        crate::inbound::http::pokemon::get_pokemon_by_name,
        crate::inbound::http::layout::load_layout,
        crate::inbound::http::sessions::create_session,
        crate::inbound::http::sessions::delete_session,
        crate::inbound::http::pages::load_page,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        AuthSession,
        LayoutResponse,
        EmailPage,
        CreateSessionRequest,
        ProbeStatus
    )),
    tags(
        (name = "pokemon", description = "Pokémon data relayed from PokeAPI"),
        (name = "layout", description = "Per-navigation session bootstrap"),
        (name = "session", description = "Cookie-session token storage"),
        (name = "pages", description = "Email-keyed pages"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
