//! PokeAPI adapter behaviour against a local stub of the API.

mod support;

use std::time::Duration;

use actix_web::http::Method;
use actix_web::{HttpResponse, web};
use backend::domain::ports::{PokemonName, PokemonSource, PokemonSourceError};
use backend::outbound::pokeapi::PokeApiHttpSource;
use reqwest::Url;
use serde_json::{Value, json};

use support::stub_server::StubServer;

fn list_body() -> Value {
    json!({
        "count": 1302,
        "next": "https://pokeapi.co/api/v2/pokemon?offset=151&limit=151",
        "previous": null,
        "results": [
            {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
            {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
        ]
    })
}

fn pikachu() -> Value {
    json!({
        "id": 25,
        "name": "pikachu",
        "types": [{"slot": 1, "type": {"name": "electric"}}],
        "sprites": {"front_default": null}
    })
}

fn pokeapi_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/api/v2/pokemon",
        web::get().to(|| async { HttpResponse::Ok().json(list_body()) }),
    )
    .route(
        "/api/v2/pokemon/{name}",
        web::get().to(|path: web::Path<String>| async move {
            match path.as_str() {
                "pikachu" => HttpResponse::Ok().json(pikachu()),
                "porygon" => HttpResponse::BadGateway().body("upstream hiccup"),
                "glitch" => HttpResponse::Ok()
                    .content_type("application/json")
                    .body("{\"id\":"),
                _ => HttpResponse::NotFound().body("Not Found"),
            }
        }),
    );
}

fn source_for(stub: &StubServer) -> PokeApiHttpSource {
    let base = Url::parse(&format!("{}/api/v2/", stub.base_url)).expect("stub url");
    PokeApiHttpSource::new(base, Duration::from_secs(5)).expect("client builds")
}

#[actix_rt::test]
async fn list_issues_one_request_and_returns_results_verbatim() {
    let stub = StubServer::start(pokeapi_routes).await;
    let source = source_for(&stub);

    let results = source.list_pokemon().await.expect("list succeeds");

    assert_eq!(Value::Array(results), list_body()["results"]);
    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].uri, "/api/v2/pokemon?limit=151&offset=0");
    stub.stop().await;
}

#[actix_rt::test]
async fn detail_issues_one_request_and_returns_the_body_verbatim() {
    let stub = StubServer::start(pokeapi_routes).await;
    let source = source_for(&stub);
    let name = PokemonName::new("pikachu").expect("valid name");

    let record = source.get_pokemon_by_name(&name).await.expect("detail succeeds");

    assert_eq!(record, pikachu());
    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].uri, "/api/v2/pokemon/pikachu");
    assert_eq!(requests[0].header("accept"), Some("application/json"));
    stub.stop().await;
}

#[actix_rt::test]
async fn unknown_names_are_not_found() {
    let stub = StubServer::start(pokeapi_routes).await;
    let source = source_for(&stub);
    let name = PokemonName::new("missingno").expect("valid name");

    let error = source.get_pokemon_by_name(&name).await.expect_err("404");

    assert_eq!(error, PokemonSourceError::not_found("missingno"));
    assert_eq!(stub.requests().len(), 1);
    stub.stop().await;
}

#[actix_rt::test]
async fn upstream_failures_are_not_retried() {
    let stub = StubServer::start(pokeapi_routes).await;
    let source = source_for(&stub);
    let name = PokemonName::new("porygon").expect("valid name");

    let error = source.get_pokemon_by_name(&name).await.expect_err("502");

    match error {
        PokemonSourceError::UpstreamStatus { message } => {
            assert_eq!(message, "status 502: upstream hiccup");
        }
        other => panic!("expected upstream status error, got {other:?}"),
    }
    assert_eq!(stub.requests().len(), 1);
    stub.stop().await;
}

#[actix_rt::test]
async fn truncated_bodies_are_decode_errors() {
    let stub = StubServer::start(pokeapi_routes).await;
    let source = source_for(&stub);
    let name = PokemonName::new("glitch").expect("valid name");

    let error = source.get_pokemon_by_name(&name).await.expect_err("bad json");

    assert!(matches!(error, PokemonSourceError::Decode { .. }));
    stub.stop().await;
}

#[actix_rt::test]
async fn unreachable_hosts_are_transport_errors() {
    let stub = StubServer::start(pokeapi_routes).await;
    let base = Url::parse(&format!("{}/api/v2/", stub.base_url)).expect("stub url");
    stub.stop().await;
    let source = PokeApiHttpSource::new(base, Duration::from_secs(2)).expect("client builds");

    let error = source.list_pokemon().await.expect_err("connection refused");

    assert!(matches!(
        error,
        PokemonSourceError::Transport { .. } | PokemonSourceError::Timeout { .. }
    ));
}
