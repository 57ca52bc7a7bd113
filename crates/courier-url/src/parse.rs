//! Literal-URL parsing helpers.

use courier_core::error::{CourierError, CourierResult};
use http::Uri;

/// Components of a parsed absolute URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    /// URL scheme.
    pub scheme: Option<String>,
    /// User-info (`user:password`) from the authority.
    pub user_info: Option<String>,
    /// Host name.
    pub host: Option<String>,
    /// Port, when the literal names one.
    pub port: Option<i32>,
    /// Path, when the literal carries one.
    pub path: Option<String>,
    /// Fragment (the part after `#`).
    pub fragment: Option<String>,
}

/// Whether `value` looks like an absolute URL (`scheme://...`).
#[must_use]
pub fn is_url_literal(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once("://") else {
        return false;
    };
    !scheme.is_empty()
        && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
}

/// Split a `#fragment` suffix off a URL string.
#[must_use]
pub fn split_fragment(value: &str) -> (&str, Option<&str>) {
    match value.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (value, None),
    }
}

/// Parse an absolute URL literal into its components.
///
/// # Errors
///
/// Returns [`CourierError::InvalidUrl`] when the input is empty or does not
/// parse as an absolute URL with an authority.
pub fn parse_absolute_url(value: &str) -> CourierResult<ParsedUrl> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CourierError::InvalidUrl(
            "request url cannot be empty".to_owned(),
        ));
    }

    let (without_fragment, fragment) = split_fragment(trimmed);
    let uri: Uri = without_fragment
        .parse()
        .map_err(|e| CourierError::InvalidUrl(format!("{without_fragment}: {e}")))?;
    let authority = uri
        .authority()
        .ok_or_else(|| CourierError::InvalidUrl(format!("{trimmed}: missing authority")))?;

    // `http::Uri` keeps user-info inside the authority without splitting it.
    let user_info = authority
        .as_str()
        .rsplit_once('@')
        .map(|(user_info, _)| user_info.to_owned());

    let rest = without_fragment
        .split_once("://")
        .map_or(without_fragment, |(_, rest)| rest);
    let path = rest.contains('/').then(|| uri.path().to_owned());

    Ok(ParsedUrl {
        scheme: uri.scheme_str().map(ToOwned::to_owned),
        user_info,
        host: uri.host().map(ToOwned::to_owned),
        port: uri.port_u16().map(i32::from),
        path,
        fragment: fragment.map(ToOwned::to_owned),
    })
}
