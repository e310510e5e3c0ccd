//! Wire shapes for the Supabase auth and PostgREST endpoints.

use serde::{Deserialize, Serialize};

/// Subset of the `/auth/v1/user` response the session needs.
#[derive(Debug, Deserialize)]
pub(super) struct AuthUserDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) email: Option<String>,
}

/// One row of `profiles?select=email`.
#[derive(Debug, Deserialize)]
pub(super) struct ProfileRowDto {
    #[serde(default)]
    pub(super) email: Option<String>,
}

/// PATCH body overwriting the email column.
#[derive(Debug, Serialize)]
pub(super) struct ProfileEmailUpdateDto<'a> {
    pub(super) email: &'a str,
}
