//! Pokémon API outbound adapter.
//!
//! A thin HTTP implementation of the `PokemonSource` port against PokeAPI v2.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_POKEAPI_BASE_URL, PokeApiHttpSource};
