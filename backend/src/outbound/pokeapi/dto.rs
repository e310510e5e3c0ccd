//! DTOs for decoding PokeAPI list responses.
//!
//! Entries stay as raw JSON; only the envelope is typed so a body without a
//! `results` array is reported as a decode failure.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(super) struct PokemonListDto {
    pub(super) results: Vec<Value>,
}
