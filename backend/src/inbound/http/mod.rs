//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod health;
pub mod layout;
pub mod pages;
pub mod pokemon;
pub mod session;
pub mod session_config;
pub mod sessions;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
