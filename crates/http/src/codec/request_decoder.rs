//! HTTP request decoder module
//!
//! Turns the bytes of one request into an [`Environment`]. Parsing is line
//! oriented and runs three phases strictly in order:
//!
//! 1. request line: `METHOD PATH PROTOCOL`
//! 2. header lines, up to the first empty line
//! 3. a body of exactly `CONTENT_LENGTH` bytes (zero when absent or not a number)
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use rack_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from(&b"GET /users HTTP/1.1\r\nHost: x\r\n\r\n"[..]);
//! let env = decoder.decode(&mut buffer).unwrap().unwrap();
//!
//! assert_eq!(env.path(), "/users");
//! assert_eq!(env.get("HTTP_HOST"), Some("x"));
//! ```

use std::mem;

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::body::LengthDecoder;
use crate::codec::header::parse_header_line;
use crate::ensure;
use crate::protocol::{Environment, ParseError, RackInput};

/// A decoder for one HTTP request.
///
/// # State Machine
///
/// - `RequestLine`: waiting for the first line
/// - `Headers`: the request line is parsed, collecting header lines
/// - `Body`: the blank line was seen, collecting `CONTENT_LENGTH` bytes
///
/// After yielding an [`Environment`] the decoder is back in `RequestLine`.
#[derive(Debug, Default)]
pub struct RequestDecoder {
    state: State,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    RequestLine,
    Headers(Environment),
    Body(Environment, LengthDecoder),
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for RequestDecoder {
    type Item = Environment;
    type Error = ParseError;

    /// Attempts to decode a whole request from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(env))`: the request line, headers and body are complete
    /// - `Ok(None)`: need more data to proceed
    /// - `Err(_)`: the request is malformed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match mem::take(&mut self.state) {
                State::RequestLine => {
                    let Some(line) = next_line(src) else {
                        return Ok(None);
                    };
                    let line = line_to_string(&line, ParseError::malformed_request_line)?;
                    let env = parse_request_line(&line)?;
                    trace!(method = env.method(), path = env.path(), "parsed request line");
                    self.state = State::Headers(env);
                }

                State::Headers(mut env) => {
                    let Some(line) = next_line(src) else {
                        self.state = State::Headers(env);
                        return Ok(None);
                    };

                    if line.is_empty() {
                        let length = env.content_length();
                        trace!(header_count = env.headers().len(), body_size = length, "parsed request headers");
                        self.state = State::Body(env, LengthDecoder::new(length));
                        continue;
                    }

                    let line = line_to_string(&line, ParseError::malformed_header)?;
                    let (key, value) = parse_header_line(&line)?;
                    env.insert_header(key, value);
                    self.state = State::Headers(env);
                }

                State::Body(mut env, mut body_decoder) => {
                    let Some(body) = body_decoder.decode(src)? else {
                        self.state = State::Body(env, body_decoder);
                        return Ok(None);
                    };
                    env.set_input(RackInput::new(body));
                    return Ok(Some(env));
                }
            }
        }
    }

    /// Called once the peer has closed its side.
    ///
    /// A peer that leaves before sending anything produced no request. Leaving
    /// in the middle of the head or the body is an error.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(env) = self.decode(src)? {
            return Ok(Some(env));
        }

        match &self.state {
            State::RequestLine if src.is_empty() => Ok(None),
            State::RequestLine | State::Headers(_) => Err(ParseError::IncompleteHead),
            State::Body(_, body_decoder) => Err(body_decoder.truncated()),
        }
    }
}

/// Splits `METHOD PATH PROTOCOL` on whitespace.
///
/// # Errors
///
/// Returns [`ParseError::MalformedRequestLine`] unless there are exactly three tokens.
pub fn parse_request_line(line: &str) -> Result<Environment, ParseError> {
    let mut tokens = line.split_whitespace();
    let (Some(method), Some(path), Some(protocol)) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(ParseError::malformed_request_line(line));
    };
    ensure!(tokens.next().is_none(), ParseError::malformed_request_line(line));

    Ok(Environment::new(method, path, protocol))
}

/// Takes one `\n` terminated line off the front of `src`, without its `\r\n`
/// or `\n` terminator. `None` until a full line is buffered.
fn next_line(src: &mut BytesMut) -> Option<BytesMut> {
    let end = src.iter().position(|b| *b == b'\n')?;
    let mut line = src.split_to(end + 1);
    line.truncate(end);
    if line.last() == Some(&b'\r') {
        line.truncate(end - 1);
    }
    Some(line)
}

fn line_to_string(line: &[u8], malformed: fn(String) -> ParseError) -> Result<String, ParseError> {
    match std::str::from_utf8(line) {
        Ok(line) => Ok(line.to_owned()),
        Err(_) => Err(malformed(String::from_utf8_lossy(line).into_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Read;

    const FORM_POST: &str = concat!(
        "POST / HTTP/1.1\r\n",
        "Host: localhost:8080\r\n",
        "Connection: keep-alive\r\n",
        "Cache-Control: max-age=0\r\n",
        "Accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8\r\n",
        "User-Agent: Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/41.0.2272.89 Safari/537.36\r\n",
        "Accept-Encoding: gzip, deflate, sdch\r\n",
        "Accept-Language: en-US,en;q=0.8\r\n",
        "Content-Length: 15\r\n",
        "Content-Type: application/x-www-form-urlencoded\r\n",
        "\r\n",
        "abc=123&def=456",
    );

    fn decode_all(input: &str) -> Result<Option<Environment>, ParseError> {
        let mut buf = BytesMut::from(input);
        RequestDecoder::new().decode_eof(&mut buf)
    }

    #[test]
    fn form_post_request_line() {
        let env = decode_all(FORM_POST).unwrap().unwrap();

        assert_eq!(env.get("REQUEST_METHOD"), Some("POST"));
        assert_eq!(env.get("PATH_INFO"), Some("/"));
        assert_eq!(env.get("SERVER_PROTOCOL"), Some("HTTP/1.1"));
    }

    #[test]
    fn form_post_headers() {
        let env = decode_all(FORM_POST).unwrap().unwrap();

        assert_eq!(env.get("HTTP_ACCEPT_LANGUAGE"), Some("en-US,en;q=0.8"));
        assert_eq!(env.get("HTTP_CONNECTION"), Some("keep-alive"));
        assert_eq!(env.get("HTTP_HOST"), Some("localhost:8080"));
        assert_eq!(env.get("CONTENT_LENGTH"), Some("15"));
        assert_eq!(env.get("CONTENT_TYPE"), Some("application/x-www-form-urlencoded"));
        assert_eq!(env.get("HTTP_CONTENT_LENGTH"), None);
        assert_eq!(env.headers().len(), 7);
    }

    #[test]
    fn form_post_body() {
        let mut env = decode_all(FORM_POST).unwrap().unwrap();

        let mut body = String::new();
        env.input_mut().read_to_string(&mut body).unwrap();
        assert_eq!(body, "abc=123&def=456");
    }

    #[test]
    fn header_order_follows_the_wire() {
        let env = decode_all("GET / HTTP/1.1\r\nB: 1\r\nA: 2\r\nC: 3\r\n\r\n").unwrap().unwrap();
        let keys: Vec<_> = env.headers().iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["HTTP_B", "HTTP_A", "HTTP_C"]);
    }

    #[test]
    fn repeated_header_keeps_last_value_in_first_position() {
        let env = decode_all("GET / HTTP/1.1\r\nHost: a\r\nAccept: */*\r\nHost: b\r\n\r\n").unwrap().unwrap();

        assert_eq!(env.get("HTTP_HOST"), Some("b"));
        let headers: Vec<_> = env.headers().iter().collect();
        assert_eq!(headers, vec![("HTTP_HOST", "b"), ("HTTP_ACCEPT", "*/*")]);
    }

    #[test]
    fn from_curl_with_bare_newlines() {
        let str = indoc! {r##"
        GET /index.html HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        "##};

        let env = decode_all(str).unwrap().unwrap();

        assert_eq!(env.method(), "GET");
        assert_eq!(env.path(), "/index.html");
        assert_eq!(env.protocol(), "HTTP/1.1");
        assert_eq!(env.get("HTTP_USER_AGENT"), Some("curl/7.79.1"));
        assert_eq!(env.get("HTTP_ACCEPT"), Some("*/*"));
        assert!(env.input().is_empty());
    }

    #[test]
    fn path_is_kept_verbatim() {
        let env = decode_all("GET /index/?a=1&b=2 HTTP/1.1\r\n\r\n").unwrap().unwrap();
        assert_eq!(env.path(), "/index/?a=1&b=2");
    }

    #[test]
    fn incremental_feeding() {
        let mut decoder = RequestDecoder::new();
        let mut buf = BytesMut::new();

        for piece in ["GET /us", "ers HTTP/1.1\r", "\nHost: x\r\nContent-Len", "gth: 3\r\n\r\nab"] {
            buf.extend_from_slice(piece.as_bytes());
            assert!(decoder.decode(&mut buf).unwrap().is_none());
        }

        buf.extend_from_slice(b"c");
        let env = decoder.decode(&mut buf).unwrap().unwrap();
        assert_eq!(env.path(), "/users");
        assert_eq!(env.input().as_bytes().as_ref(), b"abc");
    }

    #[test]
    fn body_ignores_trailing_bytes() {
        let mut buf = BytesMut::from("POST / HTTP/1.1\r\nContent-Length: 2\r\n\r\nokextra");
        let env = RequestDecoder::new().decode(&mut buf).unwrap().unwrap();
        assert_eq!(env.input().as_bytes().as_ref(), b"ok");
        assert_eq!(&buf[..], b"extra");
    }

    #[test]
    fn unparsable_content_length_means_no_body() {
        let env = decode_all("POST / HTTP/1.1\r\nContent-Length: lots\r\n\r\nignored").unwrap().unwrap();
        assert!(env.input().is_empty());
        assert_eq!(env.get("CONTENT_LENGTH"), Some("lots"));
    }

    #[test]
    fn two_token_request_line_is_malformed() {
        let result = decode_all("GET /users\r\nHost: x\r\n\r\n");
        assert!(matches!(result, Err(ParseError::MalformedRequestLine { line }) if line == "GET /users"));
    }

    #[test]
    fn four_token_request_line_is_malformed() {
        let result = decode_all("GET /users HTTP/1.1 extra\r\n\r\n");
        assert!(matches!(result, Err(ParseError::MalformedRequestLine { .. })));
    }

    #[test]
    fn header_without_separator_is_malformed() {
        let result = decode_all("GET / HTTP/1.1\r\nHost:x\r\n\r\n");
        assert!(matches!(result, Err(ParseError::MalformedHeader { line }) if line == "Host:x"));
    }

    #[test]
    fn non_utf8_header_is_malformed() {
        let mut buf = BytesMut::from(&b"GET / HTTP/1.1\r\nX-Bin: \xff\xfe\r\n\r\n"[..]);
        let result = RequestDecoder::new().decode(&mut buf);
        assert!(matches!(result, Err(ParseError::MalformedHeader { .. })));
    }

    #[test]
    fn short_body_is_truncated() {
        let result = decode_all("POST / HTTP/1.1\r\nContent-Length: 15\r\n\r\nabc");
        assert!(matches!(result, Err(ParseError::TruncatedBody { expected: 15, received: 3 })));
    }

    #[test]
    fn eof_inside_head_is_incomplete() {
        assert!(matches!(decode_all("GET / HTTP/1.1\r\nHost: x\r\n"), Err(ParseError::IncompleteHead)));
        assert!(matches!(decode_all("GET / HT"), Err(ParseError::IncompleteHead)));
    }

    #[test]
    fn eof_without_bytes_is_no_request() {
        assert!(decode_all("").unwrap().is_none());
    }

    #[test]
    fn request_line_helper() {
        let env = parse_request_line("  DELETE   /users/1   HTTP/1.1 ").unwrap();
        assert_eq!((env.method(), env.path(), env.protocol()), ("DELETE", "/users/1", "HTTP/1.1"));
        assert!(parse_request_line("").is_err());
    }
}
