//! Pokémon API handlers.
//!
//! ```text
//! GET /api/v1/pokemon
//! GET /api/v1/pokemon/{name}
//! ```
//!
//! Records are relayed as the upstream API returned them.

use actix_web::{get, web};
use serde_json::{Value, json};

use crate::domain::Error;
use crate::domain::ports::{PokemonName, PokemonSourceError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn map_source_error(error: PokemonSourceError) -> Error {
    match error {
        PokemonSourceError::NotFound { name } => {
            Error::not_found(format!("pokemon {name} not found"))
                .with_details(json!({ "name": name }))
        }
        PokemonSourceError::InvalidRequest { message } => Error::invalid_request(message),
        PokemonSourceError::Transport { .. }
        | PokemonSourceError::Timeout { .. }
        | PokemonSourceError::UpstreamStatus { .. } => {
            Error::service_unavailable(format!("pokemon api unavailable: {error}"))
                .with_details(json!({ "source": "pokemon_api" }))
        }
        PokemonSourceError::Decode { message } => {
            Error::internal(format!("pokemon api payload: {message}"))
        }
    }
}

/// List the first 151 Pokémon.
#[utoipa::path(
    get,
    path = "/api/v1/pokemon",
    responses(
        (status = 200, description = "PokeAPI `results` entries, verbatim"),
        (status = 503, description = "PokeAPI unreachable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pokemon"],
    operation_id = "listPokemon"
)]
#[get("/pokemon")]
pub async fn list_pokemon(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Value>>> {
    let results = state.pokemon.list_pokemon().await.map_err(map_source_error)?;
    Ok(web::Json(results))
}

/// Fetch one Pokémon by name or numeric id.
#[utoipa::path(
    get,
    path = "/api/v1/pokemon/{name}",
    params(("name" = String, Path, description = "Pokémon name or numeric id")),
    responses(
        (status = 200, description = "PokeAPI record, verbatim"),
        (status = 400, description = "Blank name", body = Error),
        (status = 404, description = "Unknown Pokémon", body = Error),
        (status = 503, description = "PokeAPI unreachable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pokemon"],
    operation_id = "getPokemonByName"
)]
#[get("/pokemon/{name}")]
pub async fn get_pokemon_by_name(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Value>> {
    let name = PokemonName::new(path.into_inner()).map_err(map_source_error)?;
    let record = state
        .pokemon
        .get_pokemon_by_name(&name)
        .await
        .map_err(map_source_error)?;
    Ok(web::Json(record))
}
