//! Driven port for reading Pokémon data from the public Pokémon API.
//!
//! Records are opaque JSON: the domain passes them through untouched, so the
//! port only fixes which requests are made and how failures are classified.

use async_trait::async_trait;
use serde_json::{Value, json};

use super::define_port_error;

/// Number of entries requested by [`PokemonSource::list_pokemon`].
pub const POKEMON_LIST_LIMIT: u32 = 151;
/// Offset requested by [`PokemonSource::list_pokemon`].
pub const POKEMON_LIST_OFFSET: u32 = 0;

define_port_error! {
    /// Errors surfaced while calling the Pokémon API.
    pub enum PokemonSourceError {
        /// Network transport failed before a response was read.
        Transport { message: String } =>
            "pokemon api transport failed: {message}",
        /// The request exceeded the client timeout.
        Timeout { message: String } =>
            "pokemon api timeout: {message}",
        /// The API has no record under this name or id.
        NotFound { name: String } =>
            "pokemon not found: {name}",
        /// The API answered with an unexpected non-success status.
        UpstreamStatus { message: String } =>
            "pokemon api returned {message}",
        /// The response body was not the expected JSON.
        Decode { message: String } =>
            "pokemon api response decode failed: {message}",
        /// The adapter rejected the request before sending it.
        InvalidRequest { message: String } =>
            "pokemon api request invalid: {message}",
    }
}

/// Name or numeric id of a Pokémon as used in the API path.
///
/// Only blank input is rejected; the value is otherwise passed through as-is so
/// the API decides what it recognises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonName(String);

impl PokemonName {
    /// Validate a Pokémon identifier.
    ///
    /// # Errors
    /// Returns [`PokemonSourceError::InvalidRequest`] for empty or
    /// whitespace-only input.
    pub fn new(raw: impl Into<String>) -> Result<Self, PokemonSourceError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(PokemonSourceError::invalid_request(
                "pokemon name must not be empty",
            ));
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for PokemonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for PokemonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Port for fetching Pokémon records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokemonSource: Send + Sync {
    /// Fetch the first [`POKEMON_LIST_LIMIT`] entries and return the `results`
    /// array of the response verbatim.
    async fn list_pokemon(&self) -> Result<Vec<Value>, PokemonSourceError>;

    /// Fetch one Pokémon and return the whole response body verbatim.
    async fn get_pokemon_by_name(&self, name: &PokemonName) -> Result<Value, PokemonSourceError>;
}

/// Offline source serving a single canned record, used when no API is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePokemonSource;

const FIXTURE_NAME: &str = "bulbasaur";

#[async_trait]
impl PokemonSource for FixturePokemonSource {
    async fn list_pokemon(&self) -> Result<Vec<Value>, PokemonSourceError> {
        Ok(vec![json!({
            "name": FIXTURE_NAME,
            "url": "https://pokeapi.co/api/v2/pokemon/1/",
        })])
    }

    async fn get_pokemon_by_name(&self, name: &PokemonName) -> Result<Value, PokemonSourceError> {
        match name.as_ref() {
            FIXTURE_NAME | "1" => Ok(json!({ "id": 1, "name": FIXTURE_NAME })),
            other => Err(PokemonSourceError::not_found(other)),
        }
    }
}
