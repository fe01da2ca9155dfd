//! Header line parsing with CGI-style key normalization.
//!
//! `Accept-Language: en-US` becomes `("HTTP_ACCEPT_LANGUAGE", "en-US")`.
//! `Content-Type` and `Content-Length` keep their bare CGI names
//! (`CONTENT_TYPE`, `CONTENT_LENGTH`) without the `HTTP_` prefix.

use crate::protocol::ParseError;
use crate::protocol::environment::{CONTENT_LENGTH, CONTENT_TYPE};

const SEPARATOR: &str = ": ";
const HEADER_PREFIX: &str = "HTTP_";

/// Splits one header line (line terminator already stripped) on its first
/// `": "` and normalizes the name.
///
/// # Errors
///
/// Returns [`ParseError::MalformedHeader`] if the line has no `": "`.
pub fn parse_header_line(line: &str) -> Result<(String, String), ParseError> {
    let (name, value) = line.split_once(SEPARATOR).ok_or_else(|| ParseError::malformed_header(line))?;
    Ok((normalize_key(name), value.to_string()))
}

/// Upper-cases the name (Unicode-aware), turns `-` into `_` and adds the `HTTP_` prefix
/// unless the result is `CONTENT_TYPE` or `CONTENT_LENGTH`.
pub fn normalize_key(name: &str) -> String {
    let key: String = name.chars().flat_map(char::to_uppercase).map(|c| if c == '-' { '_' } else { c }).collect();

    match key.as_str() {
        CONTENT_TYPE | CONTENT_LENGTH => key,
        _ => {
            let mut prefixed = String::with_capacity(HEADER_PREFIX.len() + key.len());
            prefixed.push_str(HEADER_PREFIX);
            prefixed.push_str(&key);
            prefixed
        }
    }
}
