//! Percent-encoding for URL authority and path segments.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// The set of characters percent-encoded inside the user-info segment.
///
/// RFC 3986 allows unreserved characters, sub-delimiters, and `:` in
/// user-info. `%` is left as-is so pre-encoded input is not encoded twice.
const USER_INFO_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'%');

/// The set of characters percent-encoded inside path segments.
///
/// Everything the user-info set allows, plus `@` and `/` — forward slashes
/// separate path segments and are never encoded.
const PATH_ENCODE_SET: &AsciiSet = &USER_INFO_ENCODE_SET.remove(b'@').remove(b'/');

/// Percent-encode a user-info (or host) value.
#[must_use]
pub fn user_info_encode(input: &str) -> String {
    utf8_percent_encode(input, USER_INFO_ENCODE_SET).to_string()
}

/// Percent-encode a path value, preserving `/` separators.
#[must_use]
pub fn path_encode(input: &str) -> String {
    utf8_percent_encode(input, PATH_ENCODE_SET).to_string()
}

/// Prepend a `/` when `path` is non-empty and does not already carry one.
#[must_use]
pub fn ensure_leading_slash(path: &str) -> String {
    if path.is_empty() || path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}
