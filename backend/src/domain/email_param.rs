//! Email-shaped route parameter gate.
//!
//! A page keyed by an email address is only served when the path segment looks
//! like an email. The check is purely syntactic: it does not prove the address
//! belongs to a known user.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Error;

/// Message returned when the segment is not email-shaped.
pub const PAGE_NOT_FOUND_MESSAGE: &str = "Page not found";

static EMAIL_SHAPE_RE: OnceLock<Regex> = OnceLock::new();

fn email_shape_regex() -> &'static Regex {
    EMAIL_SHAPE_RE.get_or_init(|| {
        // local@domain.tld with no whitespace and at least one dot after the @.
        // Whitespace follows ECMAScript `\s`: Unicode White_Space plus U+FEFF,
        // without U+0085.
        let part = r"[^@\x{FEFF}[\s--\x{85}]]+";
        let pattern = format!(r"^{part}@{part}\.{part}$");
        Regex::new(&pattern)
            .unwrap_or_else(|error| panic!("email shape regex failed to compile: {error}"))
    })
}

/// Rejection raised for segments that are not email-shaped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("route parameter is not email-shaped")]
pub struct NotEmailShaped;

impl From<NotEmailShaped> for Error {
    fn from(_: NotEmailShaped) -> Self {
        Self::not_found(PAGE_NOT_FOUND_MESSAGE)
    }
}

/// Route parameter known to match the email shape.
///
/// The original text is kept verbatim: no trimming, case folding, or Unicode
/// normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailParam(String);

impl EmailParam {
    /// Accept `raw` when it matches `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
    ///
    /// # Errors
    /// Returns [`NotEmailShaped`] for any other input.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::EmailParam;
    ///
    /// assert!(EmailParam::parse("misty@cerulean.gym").is_ok());
    /// assert!(EmailParam::parse("a@b").is_err());
    /// ```
    pub fn parse(raw: impl Into<String>) -> Result<Self, NotEmailShaped> {
        let raw = raw.into();
        if email_shape_regex().is_match(&raw) {
            Ok(Self(raw))
        } else {
            Err(NotEmailShaped)
        }
    }

    /// Borrow the parameter text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailParam> for String {
    fn from(value: EmailParam) -> Self {
        value.0
    }
}

/// Data handed to the email page once the parameter passes the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmailPage {
    /// The route parameter, unchanged.
    #[schema(example = "brock@pewter.gym")]
    pub email: String,
}

/// Gate a page load on the email shape of its route parameter.
///
/// # Errors
/// Returns a `not_found` [`Error`] with [`PAGE_NOT_FOUND_MESSAGE`] when the
/// segment is not email-shaped.
pub fn load_email_page(segment: &str) -> Result<EmailPage, Error> {
    let param = EmailParam::parse(segment)?;
    Ok(EmailPage {
        email: param.into(),
    })
}
