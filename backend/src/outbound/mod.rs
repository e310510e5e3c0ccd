//! Outbound adapters implementing domain ports for external services.
//!
//! - **pokeapi**: reqwest-backed [`crate::domain::ports::PokemonSource`].
//! - **supabase**: reqwest-backed auth client and profile store speaking the
//!   Supabase auth and REST APIs.
//!
//! Adapters are thin translators between domain types and wire formats. They
//! contain no business logic.

mod http_support;
pub mod pokeapi;
pub mod supabase;
