//! Pokédex backend library.
//!
//! Hexagonal layout: [`domain`] holds the ports and services, [`outbound`]
//! implements the ports over HTTP, [`inbound`] exposes them through
//! actix-web.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
pub mod telemetry;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use middleware::Trace;
