//! The response descriptor a handler returns.
//!
//! It is the Rack triple `(status, headers, body)`. Whatever goes in is
//! exactly what gets written: no `Content-Length`, `Date` or reason phrase is
//! ever added on the way out.

use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<Bytes>,
}

impl Response {
    /// A response with the given status, no headers and no body.
    ///
    /// The status is a bare number: a reason phrase can't be expressed and is
    /// never written.
    pub fn new(status: u16) -> Self {
        Self { status, headers: Vec::new(), body: Vec::new() }
    }

    /// Builds the full triple at once.
    pub fn from_parts<I, K, V, B, C>(status: u16, headers: I, body: B) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
        B: IntoIterator<Item = C>,
        C: Into<Bytes>,
    {
        Self {
            status,
            headers: headers.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            body: body.into_iter().map(Into::into).collect(),
        }
    }

    /// A single-chunk `text/plain` response.
    pub fn text<S: Into<String>>(status: u16, body: S) -> Self {
        let body: String = body.into();
        Self::new(status).header("Content-Type", "text/plain").chunk(body)
    }

    /// Appends a header. Order is preserved and duplicates are kept.
    #[must_use]
    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Appends a body chunk.
    #[must_use]
    pub fn chunk<C: Into<Bytes>>(mut self, chunk: C) -> Self {
        self.body.push(chunk.into());
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &[Bytes] {
        &self.body
    }

    /// Sum of all chunk lengths.
    pub fn body_len(&self) -> usize {
        self.body.iter().map(Bytes::len).sum()
    }

    pub fn into_parts(self) -> (u16, Vec<(String, String)>, Vec<Bytes>) {
        (self.status, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_order_and_duplicates() {
        let response = Response::new(200).header("b", "1").header("a", "2").header("b", "3").chunk("he").chunk("llo");

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers(),
            &[("b".to_string(), "1".to_string()), ("a".to_string(), "2".to_string()), ("b".to_string(), "3".to_string())]
        );
        assert_eq!(response.body_len(), 5);
    }

    #[test]
    fn status_line_carries_no_reason_phrase() {
        let bytes = crate::codec::serialize(&Response::new(301).header("Location", "/users"));
        assert_eq!(&bytes[..], b"HTTP/1.1 301\r\nLocation: /users\r\n\r\n");
    }

    #[test]
    fn text_sets_content_type_only() {
        let response = Response::text(404, "nope");
        assert_eq!(response.headers(), &[("Content-Type".to_string(), "text/plain".to_string())]);
        assert_eq!(response.body(), &[Bytes::from_static(b"nope")]);
    }
}
