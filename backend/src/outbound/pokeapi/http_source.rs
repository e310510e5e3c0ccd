//! Reqwest-backed PokeAPI source adapter.
//!
//! This adapter owns transport details only: URL building, timeout and HTTP
//! error mapping, and JSON decoding. Records are returned verbatim.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use super::dto::PokemonListDto;
use crate::domain::ports::{
    POKEMON_LIST_LIMIT, POKEMON_LIST_OFFSET, PokemonName, PokemonSource, PokemonSourceError,
};
use crate::outbound::http_support::{
    build_client, is_timeout_status, join_segments, read_response, status_message,
};

/// Public PokeAPI v2 endpoint.
pub const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2/";

/// PokeAPI adapter issuing one GET per call against a fixed base URL.
pub struct PokeApiHttpSource {
    client: Client,
    base_url: Url,
}

impl PokeApiHttpSource {
    /// Build an adapter with an explicit request timeout.
    /// ```rust,ignore
    /// let base = Url::parse(DEFAULT_POKEAPI_BASE_URL)?;
    /// let source = PokeApiHttpSource::new(base, Duration::from_secs(10))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url,
        })
    }

    fn list_url(&self) -> Result<Url, PokemonSourceError> {
        let mut url = join_segments(&self.base_url, &["pokemon"])
            .map_err(PokemonSourceError::invalid_request)?;
        url.query_pairs_mut()
            .append_pair("limit", &POKEMON_LIST_LIMIT.to_string())
            .append_pair("offset", &POKEMON_LIST_OFFSET.to_string());
        Ok(url)
    }

    fn detail_url(&self, name: &PokemonName) -> Result<Url, PokemonSourceError> {
        join_segments(&self.base_url, &["pokemon", name.as_ref()])
            .map_err(PokemonSourceError::invalid_request)
    }

    async fn get(&self, url: Url) -> Result<(StatusCode, Vec<u8>), PokemonSourceError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;
        read_response(response).await.map_err(map_transport_error)
    }
}

#[async_trait]
impl PokemonSource for PokeApiHttpSource {
    async fn list_pokemon(&self) -> Result<Vec<Value>, PokemonSourceError> {
        let (status, body) = self.get(self.list_url()?).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        parse_results(&body)
    }

    async fn get_pokemon_by_name(&self, name: &PokemonName) -> Result<Value, PokemonSourceError> {
        let (status, body) = self.get(self.detail_url(name)?).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(PokemonSourceError::not_found(name.as_ref()));
        }
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        parse_record(&body)
    }
}

fn parse_results(body: &[u8]) -> Result<Vec<Value>, PokemonSourceError> {
    let decoded: PokemonListDto = serde_json::from_slice(body).map_err(|error| {
        PokemonSourceError::decode(format!("invalid pokemon list payload: {error}"))
    })?;
    Ok(decoded.results)
}

fn parse_record(body: &[u8]) -> Result<Value, PokemonSourceError> {
    serde_json::from_slice(body).map_err(|error| {
        PokemonSourceError::decode(format!("invalid pokemon payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> PokemonSourceError {
    if error.is_timeout() {
        PokemonSourceError::timeout(error.to_string())
    } else {
        PokemonSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PokemonSourceError {
    let message = status_message(status, body);
    if is_timeout_status(status) {
        PokemonSourceError::timeout(message)
    } else {
        PokemonSourceError::upstream_status(message)
    }
}
