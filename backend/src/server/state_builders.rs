//! Outbound port construction from settings.

use std::sync::Arc;

use tracing::{info, warn};

use backend::domain::ports::{AnonymousAuthClientFactory, AuthClientFactory, PokemonSource};
use backend::inbound::http::state::HttpState;
use backend::outbound::pokeapi::PokeApiHttpSource;
use backend::outbound::supabase::SupabaseClientFactory;
use backend::settings::AppSettings;

/// Adapters behind the HTTP handlers.
pub struct OutboundPorts {
    pokemon: Arc<dyn PokemonSource>,
    auth: Arc<dyn AuthClientFactory>,
}

impl OutboundPorts {
    pub(crate) fn into_http_state(self) -> HttpState {
        HttpState::new(self.pokemon, self.auth)
    }
}

/// Build the Pokémon source and auth client factory.
///
/// Without auth settings every request is anonymous.
///
/// # Errors
/// Returns [`std::io::Error`] when a setting is invalid or a reqwest client
/// cannot be built.
pub fn build_ports(settings: &AppSettings) -> std::io::Result<OutboundPorts> {
    let timeout = settings.http_timeout().map_err(std::io::Error::other)?;
    let pokemon_url = settings.pokemon_api_url().map_err(std::io::Error::other)?;
    info!(url = %pokemon_url, "using PokeAPI");
    let pokemon = PokeApiHttpSource::new(pokemon_url, timeout).map_err(std::io::Error::other)?;

    let auth: Arc<dyn AuthClientFactory> =
        match settings.auth_project().map_err(std::io::Error::other)? {
            Some(project) => {
                info!(url = %project.url(), "using auth provider");
                Arc::new(SupabaseClientFactory::new(project, timeout).map_err(std::io::Error::other)?)
            }
            None => {
                warn!("auth provider not configured; all requests are anonymous");
                Arc::new(AnonymousAuthClientFactory)
            }
        };

    Ok(OutboundPorts {
        pokemon: Arc::new(pokemon),
        auth,
    })
}
