//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_ports;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::time::Duration;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, Scope, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::layout::load_layout;
use backend::inbound::http::pages::load_page;
use backend::inbound::http::pokemon::{get_pokemon_by_name, list_pokemon};
use backend::inbound::http::session_config::SessionSettings;
use backend::inbound::http::sessions::{create_session, delete_session};
use backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const SESSION_TTL_HOURS: i64 = 8;

/// Encrypted cookie session carrying the caller's access token.
fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_http_only(true)
        .cookie_secure(settings.cookie_secure)
        .cookie_same_site(settings.same_site)
        .cookie_content_security(CookieContentSecurity::Private)
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::hours(SESSION_TTL_HOURS)),
        )
        .build()
}

fn api_scope(settings: SessionSettings) -> Scope<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    web::scope("/api/v1")
        .wrap(session_middleware(&settings))
        .service(list_pokemon)
        .service(get_pokemon_by_name)
        .service(load_layout)
        .service(create_session)
        .service(delete_session)
        .service(load_page)
}

/// Bind the HTTP server and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        session,
        bind_addr,
        ports,
    } = config;
    let http_state: web::Data<HttpState> = web::Data::new(ports.into_http_state());
    let probes = health_state.clone();

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(probes.clone())
            .app_data(http_state.clone())
            .wrap(Trace)
            .service(api_scope(session.clone()))
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app = app
            .service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
