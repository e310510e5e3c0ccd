//! Service settings loaded via OrthoConfig.
//!
//! Values come from `POKEDEX_*` environment variables, matching CLI flags, or
//! a config file, in OrthoConfig's usual precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::pokeapi::DEFAULT_POKEAPI_BASE_URL;
use crate::outbound::supabase::{SupabaseProject, SupabaseProjectError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A value could not be parsed.
    #[error("invalid {name} '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
    /// Only one of the auth URL and public key was set.
    #[error("POKEDEX_AUTH_URL and POKEDEX_AUTH_PUBLIC_KEY must be set together")]
    PartialAuth,
    /// The auth project coordinates were rejected.
    #[error(transparent)]
    AuthProject(#[from] SupabaseProjectError),
}

/// Runtime settings for the HTTP server and its outbound adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "POKEDEX")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PokeAPI base URL.
    pub pokemon_api_url: Option<String>,
    /// Auth provider (Supabase project) URL.
    pub auth_url: Option<String>,
    /// Auth provider public (anon) key.
    pub auth_public_key: Option<String>,
    /// Timeout, in seconds, applied to every outbound request.
    #[ortho_config(default = 10)]
    pub http_timeout_secs: u64,
}

impl AppSettings {
    /// Listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|error: std::net::AddrParseError| SettingsError::Invalid {
            name: "bind_addr",
            value: raw.to_owned(),
            reason: error.to_string(),
        })
    }

    /// PokeAPI base URL, defaulting to the public v2 endpoint.
    pub fn pokemon_api_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .pokemon_api_url
            .as_deref()
            .unwrap_or(DEFAULT_POKEAPI_BASE_URL);
        parse_url("pokemon_api_url", raw)
    }

    /// Outbound request timeout; zero is rejected.
    pub fn http_timeout(&self) -> Result<Duration, SettingsError> {
        match self.http_timeout_secs {
            0 => Err(SettingsError::Invalid {
                name: "http_timeout_secs",
                value: "0".to_owned(),
                reason: "must be positive".to_owned(),
            }),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Auth provider coordinates, or `None` when auth is not configured.
    pub fn auth_project(&self) -> Result<Option<SupabaseProject>, SettingsError> {
        match (self.auth_url.as_deref(), self.auth_public_key.as_deref()) {
            (None, None) => Ok(None),
            (Some(url), Some(key)) => {
                let url = parse_url("auth_url", url)?;
                Ok(Some(SupabaseProject::new(url, key)?))
            }
            _ => Err(SettingsError::PartialAuth),
        }
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, SettingsError> {
    Url::parse(raw).map_err(|error| SettingsError::Invalid {
        name,
        value: raw.to_owned(),
        reason: error.to_string(),
    })
}
