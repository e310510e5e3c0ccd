//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_client;
mod pokemon_source;

#[cfg(test)]
pub use auth_client::{MockAuthClient, MockAuthClientFactory};
pub use auth_client::{
    AccessToken, AnonymousAuthClient, AnonymousAuthClientFactory, AuthClient, AuthClientError,
    AuthClientFactory, ProfileRecord, ProfileStoreError, RequestCredentials,
};
#[cfg(test)]
pub use pokemon_source::MockPokemonSource;
pub use pokemon_source::{
    FixturePokemonSource, POKEMON_LIST_LIMIT, POKEMON_LIST_OFFSET, PokemonName, PokemonSource,
    PokemonSourceError,
};
