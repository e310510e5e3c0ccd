//! Cookie-session settings read from the environment.
//!
//! The cookie carries a bearer token, so release builds insist on explicit,
//! valid toggles and a real signing key. Debug builds fall back to permissive
//! defaults and log what they assumed.

pub mod fingerprint;

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/run/secrets/pokedex_session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
// `Key::derive_from` panics below this.
const SESSION_KEY_DERIVE_MIN_LEN: usize = 32;
const KEY_FILE_ENV: &str = "POKEDEX_SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "POKEDEX_SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "POKEDEX_SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "POKEDEX_SESSION_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// How strictly the settings are validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or invalid toggles fall back to defaults with a warning.
    Debug,
    /// Missing or invalid toggles are errors.
    Release,
}

impl BuildMode {
    /// Mode matching `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Validated cookie-session settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key.
    pub key: Key,
    /// Whether the cookie is marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy of the cookie.
    pub same_site: SameSite,
}

/// Errors raised while validating session settings.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A toggle is unset in a release build.
    #[error("{name} must be set in release builds")]
    MissingToggle { name: &'static str },
    /// A toggle holds an unusable value.
    #[error("{name}={value:?} is not one of {expected}")]
    InvalidToggle {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The key file could not be read.
    #[error("session key {path} is unreadable: {source}")]
    KeyUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file is shorter than the build mode's minimum.
    #[error("session key {path} holds {length} bytes; at least {min_len} are required")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` without `Secure` in a release build.
    #[error("SameSite=None cookies must be Secure")]
    SameSiteNoneInsecure,
    /// Ephemeral keys requested in a release build.
    #[error("ephemeral session keys are not allowed in release builds")]
    EphemeralKeyInRelease,
}

/// Reads toggles from an [`Env`], applying the build mode's fallback policy.
struct Toggles<'a, E: Env> {
    env: &'a E,
    mode: BuildMode,
}

impl<E: Env> Toggles<'_, E> {
    /// Resolve `name` with `parse`, or fall back to `default` in debug builds.
    fn resolve<T>(
        &self,
        name: &'static str,
        expected: &'static str,
        default: T,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, SessionConfigError> {
        let Some(value) = self.env.string(name) else {
            return match self.mode {
                BuildMode::Debug => {
                    warn!(name, "session toggle not set; using default");
                    Ok(default)
                }
                BuildMode::Release => Err(SessionConfigError::MissingToggle { name }),
            };
        };
        match (parse(&value), self.mode) {
            (Some(parsed), _) => Ok(parsed),
            (None, BuildMode::Debug) => {
                warn!(name, value = %value, "invalid session toggle; using default");
                Ok(default)
            }
            (None, BuildMode::Release) => Err(SessionConfigError::InvalidToggle {
                name,
                value,
                expected,
            }),
        }
    }
}

/// Build session settings from the environment.
///
/// # Errors
/// Returns [`SessionConfigError`] when a release build is missing a toggle,
/// carries an invalid or unsafe combination, or cannot read a long enough key.
///
/// # Examples
/// ```rust
/// use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let toggles = Toggles { env, mode };
    let cookie_secure = toggles.resolve(COOKIE_SECURE_ENV, BOOL_EXPECTED, true, parse_bool)?;
    let default_same_site = match mode {
        BuildMode::Debug => SameSite::Lax,
        BuildMode::Release => SameSite::Strict,
    };
    let same_site = toggles.resolve(
        SAMESITE_ENV,
        SAMESITE_EXPECTED,
        default_same_site,
        parse_same_site,
    )?;
    if same_site == SameSite::None && !cookie_secure {
        match mode {
            BuildMode::Debug => {
                warn!("SameSite=None without a secure cookie; browsers may drop it");
            }
            BuildMode::Release => return Err(SessionConfigError::SameSiteNoneInsecure),
        }
    }
    let allow_ephemeral =
        toggles.resolve(ALLOW_EPHEMERAL_ENV, BOOL_EXPECTED, false, parse_bool)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralKeyInRelease);
    }

    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );
    let key = load_key(path, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn load_key(path: PathBuf, mode: BuildMode, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            let min_len = match mode {
                BuildMode::Debug => SESSION_KEY_DERIVE_MIN_LEN,
                BuildMode::Release => SESSION_KEY_MIN_LEN,
            };
            if length < min_len {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode == BuildMode::Debug || allow_ephemeral => {
            warn!(path = %path.display(), %error, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyUnreadable { path, source }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}
