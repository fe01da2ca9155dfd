//! The parsed-request representation handed to a [`RequestHandler`](crate::handler::RequestHandler).
//!
//! A Rack environment is traditionally a string-keyed hash. Here the keys every
//! request carries are named fields, and every other header lives in an
//! ordered side map keyed by its CGI-style name (`HTTP_ACCEPT_LANGUAGE`, ...).
//! [`Environment::get`] answers Rack-style lookups across both.

use std::slice;

use super::RackInput;

pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
pub const PATH_INFO: &str = "PATH_INFO";
pub const SERVER_PROTOCOL: &str = "SERVER_PROTOCOL";
pub const CONTENT_TYPE: &str = "CONTENT_TYPE";
pub const CONTENT_LENGTH: &str = "CONTENT_LENGTH";
pub const RACK_INPUT: &str = "rack.input";

/// One parsed request.
///
/// Created fresh for every accepted connection and consumed by the handler.
#[derive(Debug)]
pub struct Environment {
    method: String,
    path: String,
    protocol: String,
    content_type: Option<String>,
    content_length: Option<String>,
    headers: HeaderEntries,
    input: RackInput,
}

impl Environment {
    /// Creates an environment from the three request line tokens, with no
    /// headers and an empty body.
    pub fn new<M, P, V>(method: M, path: P, protocol: V) -> Self
    where
        M: Into<String>,
        P: Into<String>,
        V: Into<String>,
    {
        Self {
            method: method.into(),
            path: path.into(),
            protocol: protocol.into(),
            content_type: None,
            content_length: None,
            headers: HeaderEntries::default(),
            input: RackInput::empty(),
        }
    }

    /// The request method, verbatim from the request line.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request target, verbatim from the request line.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The protocol token, verbatim from the request line.
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The raw `CONTENT_LENGTH` value as the client sent it.
    pub fn raw_content_length(&self) -> Option<&str> {
        self.content_length.as_deref()
    }

    /// The declared body length. Absent or non-numeric values count as zero.
    pub fn content_length(&self) -> usize {
        self.content_length.as_deref().and_then(|value| value.trim().parse().ok()).unwrap_or(0)
    }

    /// Stores a normalized header pair.
    ///
    /// `CONTENT_TYPE` and `CONTENT_LENGTH` land in their own fields, every
    /// other key goes to the ordered header map. A repeated key keeps its
    /// first position and takes the later value.
    pub fn insert_header(&mut self, key: String, value: String) {
        match key.as_str() {
            CONTENT_TYPE => self.content_type = Some(value),
            CONTENT_LENGTH => self.content_length = Some(value),
            _ => self.headers.insert(key, value),
        }
    }

    /// The `HTTP_*` headers in the order the client first sent them.
    pub fn headers(&self) -> &HeaderEntries {
        &self.headers
    }

    /// Rack-style lookup by environment key.
    ///
    /// Answers the fixed keys and any `HTTP_*` header. `rack.input` is not a
    /// string, use [`Environment::input`] for it.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            REQUEST_METHOD => Some(&self.method),
            PATH_INFO => Some(&self.path),
            SERVER_PROTOCOL => Some(&self.protocol),
            CONTENT_TYPE => self.content_type(),
            CONTENT_LENGTH => self.raw_content_length(),
            _ => self.headers.get(key),
        }
    }

    /// The request body, positioned wherever the last read left it.
    pub fn input(&self) -> &RackInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut RackInput {
        &mut self.input
    }

    pub fn into_input(self) -> RackInput {
        self.input
    }

    pub(crate) fn set_input(&mut self, input: RackInput) {
        self.input = input;
    }
}

/// Insertion-ordered `HTTP_*` header map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderEntries {
    entries: Vec<(String, String)>,
}

impl HeaderEntries {
    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(existing, _)| existing == key).map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.entries.iter() }
    }
}

impl<'a> IntoIterator for &'a HeaderEntries {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_keys_are_answered_by_get() {
        let mut env = Environment::new("POST", "/greet", "HTTP/1.1");
        env.insert_header("CONTENT_TYPE".into(), "text/plain".into());
        env.insert_header("CONTENT_LENGTH".into(), "4".into());

        assert_eq!(env.get(REQUEST_METHOD), Some("POST"));
        assert_eq!(env.get(PATH_INFO), Some("/greet"));
        assert_eq!(env.get(SERVER_PROTOCOL), Some("HTTP/1.1"));
        assert_eq!(env.get(CONTENT_TYPE), Some("text/plain"));
        assert_eq!(env.get(CONTENT_LENGTH), Some("4"));
        assert_eq!(env.get(RACK_INPUT), None);
        assert!(env.headers().is_empty());
    }

    #[test]
    fn later_duplicate_wins_in_first_position() {
        let mut env = Environment::new("GET", "/", "HTTP/1.1");
        env.insert_header("HTTP_HOST".into(), "a".into());
        env.insert_header("HTTP_ACCEPT".into(), "*/*".into());
        env.insert_header("HTTP_HOST".into(), "b".into());

        let headers: Vec<_> = env.headers().iter().collect();
        assert_eq!(headers, vec![("HTTP_HOST", "b"), ("HTTP_ACCEPT", "*/*")]);
        assert_eq!(env.get("HTTP_HOST"), Some("b"));
    }

    #[test]
    fn content_length_falls_back_to_zero() {
        let mut env = Environment::new("GET", "/", "HTTP/1.1");
        assert_eq!(env.content_length(), 0);

        env.insert_header("CONTENT_LENGTH".into(), "abc".into());
        assert_eq!(env.content_length(), 0);
        assert_eq!(env.raw_content_length(), Some("abc"));

        env.insert_header("CONTENT_LENGTH".into(), " 15 ".into());
        assert_eq!(env.content_length(), 15);
    }
}
