//! Parsed request types

use bytes::Bytes;
use h1wire_headers::Headers;

use crate::{Error, Result};

/// First line of a request: `METHOD TARGET VERSION`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub target: String,
    pub version: String,
}

/// A fully parsed HTTP/1.1 request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub request_line: RequestLine,
    /// Header names are lower-case; duplicates are folded
    pub headers: Headers,
    /// Exactly `Content-Length` bytes, or empty when no length was declared
    pub body: Bytes,
}

impl Request {
    /// Get a header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Declared body length, if present and numeric
    pub fn content_length(&self) -> Option<usize> {
        self.header("content-length").and_then(|v| v.parse().ok())
    }

    /// Convert into an `http::Request`
    ///
    /// Only `HTTP/1.0` and `HTTP/1.1` versions are accepted.
    pub fn into_http(self) -> Result<http::Request<Bytes>> {
        let version = match self.request_line.version.as_str() {
            "HTTP/1.0" => http::Version::HTTP_10,
            "HTTP/1.1" => http::Version::HTTP_11,
            other => return Err(Error::Http(format!("unsupported version: {other}"))),
        };

        let mut builder = http::Request::builder()
            .method(self.request_line.method.as_str())
            .uri(self.request_line.target.as_str())
            .version(version);
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }

        builder.body(self.body).map_err(|e| Error::Http(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(version: &str, header_lines: &[&[u8]], body: &'static [u8]) -> Request {
        let mut headers = Headers::new();
        for line in header_lines {
            headers.parse(line).unwrap();
        }
        Request {
            request_line: RequestLine {
                method: "POST".to_string(),
                target: "/coffee?size=large".to_string(),
                version: version.to_string(),
            },
            headers,
            body: Bytes::from_static(body),
        }
    }

    #[test]
    fn test_header_lookup() {
        let req = request("HTTP/1.1", &[b"Content-Type: text/plain\r\n"], b"");
        assert_eq!(req.header("content-type"), Some("text/plain"));
        assert_eq!(req.header("CONTENT-TYPE"), Some("text/plain"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn test_content_length() {
        let req = request("HTTP/1.1", &[b"Content-Length: 4\r\n"], b"brew");
        assert_eq!(req.content_length(), Some(4));

        let req = request("HTTP/1.1", &[], b"");
        assert_eq!(req.content_length(), None);
    }

    #[test]
    fn test_into_http() {
        let req = request(
            "HTTP/1.1",
            &[b"Host: localhost:42069\r\n", b"Accept: a\r\n", b"Accept: b\r\n"],
            b"brew",
        );
        let http_req = req.into_http().unwrap();

        assert_eq!(http_req.method(), http::Method::POST);
        assert_eq!(http_req.uri().path(), "/coffee");
        assert_eq!(http_req.uri().query(), Some("size=large"));
        assert_eq!(http_req.version(), http::Version::HTTP_11);
        assert_eq!(http_req.headers()["host"], "localhost:42069");
        assert_eq!(http_req.headers()["accept"], "a, b");
        assert_eq!(http_req.body().as_ref(), b"brew");
    }

    #[test]
    fn test_into_http_http10() {
        let http_req = request("HTTP/1.0", &[], b"").into_http().unwrap();
        assert_eq!(http_req.version(), http::Version::HTTP_10);
    }

    #[test]
    fn test_into_http_unsupported_version() {
        let err = request("HTTP/2", &[], b"").into_http().unwrap_err();
        assert!(matches!(err, Error::Http(msg) if msg.contains("HTTP/2")));
    }
}
