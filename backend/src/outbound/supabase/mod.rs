//! Supabase outbound adapter.
//!
//! Implements [`crate::domain::ports::AuthClientFactory`] over the Supabase
//! auth API (`/auth/v1`) and the PostgREST profile table (`/rest/v1`). Each
//! inbound request gets its own client bound to that request's token.

mod client;
mod dto;

pub use client::{SupabaseAuthClient, SupabaseClientFactory, SupabaseProject, SupabaseProjectError};
