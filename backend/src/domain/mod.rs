//! Domain primitives, ports, and services.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`AuthSession`] / [`UserId`]: the session attributes the service reads.
//! - [`EmailParam`] / [`load_email_page`]: the email-shaped route gate.
//! - [`LayoutLoader`]: per-navigation session lookup and profile email sync.
//! - [`ports`]: traits implemented by outbound adapters.

pub mod email_param;
pub mod error;
pub mod layout;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::email_param::{
    EmailPage, EmailParam, NotEmailShaped, PAGE_NOT_FOUND_MESSAGE, load_email_page,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::layout::{
    LayoutData, LayoutLoadError, LayoutLoader, ProfileSyncOutcome, sync_profile_email,
};
pub use self::trace_id::TraceId;
pub use self::user::{AuthSession, UserId, UserValidationError};
