//! Pokédex backend entry-point.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::info;

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{
    BuildMode, fingerprint::key_fingerprint, session_settings_from_env,
};
use backend::settings::AppSettings;
use backend::telemetry::init_tracing;
use server::{ServerConfig, build_ports, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing().map_err(std::io::Error::other)?;

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(std::io::Error::other)?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let config = ServerConfig::new(session, bind_addr, build_ports(&settings)?);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "listening");
    let handle = server.handle();
    let drain_state = health_state.clone();
    actix_web::rt::spawn(async move {
        if actix_web::rt::signal::ctrl_c().await.is_ok() {
            drain_state.mark_draining();
            handle.stop(true).await;
        }
    });
    server.await
}
