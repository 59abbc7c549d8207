//! # URL Policy
//!
//! Percent-encoding of stored names into serving URLs. Escaping happens
//! only here; stored names keep their raw characters.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes percent-encoded in file URLs.
///
/// Everything except ASCII alphanumerics, the RFC 3986 unreserved marks
/// `-_.~`, and the path-safe set `/!*()'` is escaped, uppercase hex.
/// Non-ASCII characters are escaped as their UTF-8 bytes.
const NAME_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/')
    .remove(b'!')
    .remove(b'*')
    .remove(b'(')
    .remove(b')')
    .remove(b'\'');

/// Percent-encode a stored name for use in a URL path.
pub fn escape_name(name: &str) -> String {
    utf8_percent_encode(name, NAME_ESCAPE).to_string()
}

/// Append exactly one trailing `/` to a base URL when missing.
pub fn ensure_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    }
}

/// Concatenate a (already slash-terminated) base URL with an escaped name.
pub fn file_url(base: &str, name: &str) -> String {
    format!("{}{}", base, escape_name(name))
}
