//! URL building and redirect validation.
//!
//! Download links are built against the server's `download` endpoint;
//! install responses are checked before the browser is sent anywhere.

use crate::config::{ALLOWED_REDIRECT_SCHEMES, endpoints};

/// `download?path=<encoded path>` for a file on the server.
pub fn download_url(path: &str) -> String {
    format!("{}?path={}", endpoints::DOWNLOAD, urlencoding::encode(path))
}

/// Result of URL validation
#[derive(Debug, Clone, PartialEq)]
pub enum UrlValidation {
    /// URL is valid and safe to redirect
    Valid(String),
    /// URL is invalid or unsafe
    Invalid(UrlValidationError),
}

/// Errors that can occur during URL validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UrlValidationError {
    /// URL is empty
    #[error("URL is empty")]
    Empty,
    /// URL has no `scheme:` prefix
    #[error("URL has no scheme")]
    NoScheme,
    /// Scheme is not in the allowed list
    #[error("Scheme '{0}' is not allowed")]
    SchemeNotAllowed(String),
}

/// Validate an install redirect target.
///
/// Checks:
/// 1. URL is not empty
/// 2. URL carries a scheme
/// 3. The scheme is in the allowed list (`javascript:` and friends are not)
pub fn validate_redirect_url(url: &str) -> UrlValidation {
    let url = url.trim();

    if url.is_empty() {
        return UrlValidation::Invalid(UrlValidationError::Empty);
    }

    let Some(scheme) = extract_scheme(url) else {
        return UrlValidation::Invalid(UrlValidationError::NoScheme);
    };

    if !ALLOWED_REDIRECT_SCHEMES.contains(&scheme.as_str()) {
        return UrlValidation::Invalid(UrlValidationError::SchemeNotAllowed(scheme));
    }

    UrlValidation::Valid(url.to_string())
}

/// Lower-cased scheme of a URL, if it has a well-formed one.
fn extract_scheme(url: &str) -> Option<String> {
    let (scheme, _) = url.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic()
        || !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return None;
    }
    Some(scheme.to_ascii_lowercase())
}
