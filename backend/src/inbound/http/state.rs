//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see domain ports, so
//! tests swap in mocks or fixtures without any I/O.

use std::sync::Arc;

use crate::domain::LayoutLoader;
use crate::domain::ports::{AuthClientFactory, PokemonSource};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Pokémon data source.
    pub pokemon: Arc<dyn PokemonSource>,
    /// Source of request-scoped auth clients.
    pub auth: Arc<dyn AuthClientFactory>,
    /// Layout bootstrap drawing clients from `auth`.
    pub layout: LayoutLoader,
}

impl HttpState {
    /// Wire the handlers to concrete port implementations.
    pub fn new(pokemon: Arc<dyn PokemonSource>, auth: Arc<dyn AuthClientFactory>) -> Self {
        let layout = LayoutLoader::new(Arc::clone(&auth));
        Self {
            pokemon,
            auth,
            layout,
        }
    }
}
