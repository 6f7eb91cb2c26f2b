//! h1wire-headers: incremental HTTP/1.1 header map
//!
//! Leaf crate used by `h1wire-core` to collect the header block of a
//! request one line at a time.
//!
//! ## Behavior
//! - Names are stored lower-case, so lookups are case-insensitive
//! - A repeated name folds its values as `"<first>, <second>"` in arrival order
//! - Each [`Headers::parse`] call handles at most one `\r\n`-terminated line
//!
//! ## Example
//! ```
//! use h1wire_headers::{Headers, Status};
//!
//! let mut headers = Headers::new();
//! assert_eq!(headers.parse(b"Accept: text/html\r\n").unwrap(), Status::Line(19));
//! assert_eq!(headers.parse(b"ACCEPT: */*\r\n").unwrap(), Status::Line(13));
//! assert_eq!(headers.parse(b"\r\n").unwrap(), Status::Done(2));
//!
//! assert_eq!(headers.get("accept"), Some("text/html, */*"));
//! ```

mod error;

pub use error::HeaderError;

use std::collections::hash_map::{self, Entry};
use std::collections::HashMap;

/// Line terminator for header lines
pub const CRLF: &[u8] = b"\r\n";

/// Symbols allowed in a header name besides ASCII letters and digits
const TOKEN_SYMBOLS: &[u8] = b"!#$%&'*+-.^_`|~";

/// Outcome of a single [`Headers::parse`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No complete line available yet; nothing consumed
    Incomplete,
    /// One header line consumed (length includes the terminator)
    Line(usize),
    /// Empty line consumed; the header block is finished
    Done(usize),
}

impl Status {
    /// Number of bytes consumed from the input
    #[inline]
    pub fn consumed(&self) -> usize {
        match *self {
            Status::Incomplete => 0,
            Status::Line(n) | Status::Done(n) => n,
        }
    }

    /// Whether the end of the header block was reached
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, Status::Done(_))
    }
}

/// Case-insensitive header map with duplicate folding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    map: HashMap<String, String>,
}

impl Headers {
    /// Create an empty header map
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a single header line from the front of `data`.
    ///
    /// Returns [`Status::Incomplete`] when `data` holds no full line, which
    /// is not an error: the caller retries once more bytes arrive.
    pub fn parse(&mut self, data: &[u8]) -> Result<Status, HeaderError> {
        let Some(end) = memchr::memmem::find(data, CRLF) else {
            return Ok(Status::Incomplete);
        };
        if end == 0 {
            return Ok(Status::Done(CRLF.len()));
        }

        let line = &data[..end];
        let Some(colon) = memchr::memchr(b':', line) else {
            return Err(HeaderError::MissingColon);
        };

        // "Host : x" is rejected outright rather than trimmed
        let raw_name = &line[..colon];
        if raw_name.contains(&b' ') {
            return Err(HeaderError::SpaceInName);
        }

        let name = raw_name.trim_ascii();
        if name.is_empty() {
            return Err(HeaderError::EmptyName);
        }
        if let Some(&byte) = name.iter().find(|&&b| !is_token(b)) {
            return Err(HeaderError::InvalidNameChar(byte));
        }

        let value = String::from_utf8_lossy(&line[colon + 1..]);
        self.append(lowercase(name), value.trim());

        Ok(Status::Line(end + CRLF.len()))
    }

    /// Get a header value (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(name.to_ascii_lowercase().as_str())
            .map(String::as_str)
    }

    /// Check whether a header is present (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name.to_ascii_lowercase().as_str())
    }

    /// Number of distinct header names
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over `(name, value)` pairs; names are lower-case
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.map.iter(),
        }
    }

    fn append(&mut self, name: String, value: &str) {
        match self.map.entry(name) {
            Entry::Occupied(mut entry) => {
                let folded = entry.get_mut();
                folded.push_str(", ");
                folded.push_str(value);
            }
            Entry::Vacant(entry) => {
                entry.insert(value.to_owned());
            }
        }
    }
}

/// Iterator over header `(name, value)` pairs
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[inline]
fn is_token(b: u8) -> bool {
    b.is_ascii_alphanumeric() || TOKEN_SYMBOLS.contains(&b)
}

/// Name bytes are already validated as ASCII tokens
fn lowercase(name: &[u8]) -> String {
    name.iter().map(|b| char::from(b.to_ascii_lowercase())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_single_header() {
        let mut headers = Headers::new();
        let status = headers.parse(b"Host: localhost:42069\r\n\r\n").unwrap();

        assert_eq!(status, Status::Line(23));
        assert!(!status.is_done());
        assert_eq!(headers.get("host"), Some("localhost:42069"));
    }

    #[test]
    fn test_incomplete_line() {
        let mut headers = Headers::new();
        assert_eq!(headers.parse(b"Host: local").unwrap(), Status::Incomplete);
        assert_eq!(headers.parse(b"Host: localhost\r").unwrap(), Status::Incomplete);
        assert_eq!(headers.parse(b"").unwrap().consumed(), 0);
        assert!(headers.is_empty());
    }

    #[test]
    fn test_done() {
        let mut headers = Headers::new();
        let status = headers.parse(b"\r\nleftover").unwrap();

        assert_eq!(status, Status::Done(2));
        assert!(status.is_done());
        assert_eq!(status.consumed(), 2);
    }

    #[test]
    fn test_only_first_line_consumed() {
        let mut headers = Headers::new();
        let status = headers.parse(b"A: 1\r\nB: 2\r\n\r\n").unwrap();

        assert_eq!(status, Status::Line(6));
        assert_eq!(headers.get("a"), Some("1"));
        assert!(!headers.contains("b"));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let mut headers = Headers::new();
        headers.parse(b"Host:    localhost:42069    \r\n").unwrap();
        assert_eq!(headers.get("host"), Some("localhost:42069"));

        headers.parse(b"\tAccept:\t*/*\r\n").unwrap();
        assert_eq!(headers.get("accept"), Some("*/*"));
    }

    #[test]
    fn test_space_in_name() {
        let mut headers = Headers::new();
        assert_eq!(
            headers.parse(b"       Host : localhost:42069       \r\n\r\n"),
            Err(HeaderError::SpaceInName)
        );
        assert_eq!(
            headers.parse(b"Host : localhost:42069\r\n\r\n"),
            Err(HeaderError::SpaceInName)
        );
        assert_eq!(headers.parse(b"X Y: z\r\n"), Err(HeaderError::SpaceInName));
    }

    #[test]
    fn test_missing_colon() {
        let mut headers = Headers::new();
        assert_eq!(
            headers.parse(b"Host localhost:42069\r\n\r\n"),
            Err(HeaderError::MissingColon)
        );
    }

    #[test]
    fn test_invalid_name_char() {
        let mut headers = Headers::new();
        assert_eq!(
            headers.parse("H©st: localhost:42069\r\n\r\n".as_bytes()),
            Err(HeaderError::InvalidNameChar(0xc2))
        );
        assert_eq!(
            headers.parse(b"Ho(st: x\r\n"),
            Err(HeaderError::InvalidNameChar(b'('))
        );
        assert!(headers.is_empty());
    }

    #[test]
    fn test_empty_name() {
        let mut headers = Headers::new();
        assert_eq!(
            headers.parse(b": localhost:42069\r\n\r\n"),
            Err(HeaderError::EmptyName)
        );
        assert_eq!(headers.parse(b"\t: x\r\n"), Err(HeaderError::EmptyName));
    }

    #[test]
    fn test_token_symbols_accepted() {
        let mut headers = Headers::new();
        headers.parse(b"X-!#$%&'*+-.^_`|~9: ok\r\n").unwrap();
        assert_eq!(headers.get("x-!#$%&'*+-.^_`|~9"), Some("ok"));
    }

    #[test]
    fn test_mixed_case_name() {
        let mut headers = Headers::new();
        let status = headers.parse(b"ConTent-LeNgth: 42\r\n\r\n").unwrap();

        assert_eq!(status, Status::Line(20));
        assert_eq!(headers.get("content-length"), Some("42"));
        assert_eq!(headers.get("CONTENT-LENGTH"), Some("42"));
        assert!(headers.contains("Content-Length"));
    }

    #[test]
    fn test_duplicate_headers_fold() {
        let mut headers = Headers::new();
        headers.parse(b"Content-Type: application/json\r\n").unwrap();
        headers.parse(b"CoNtEnT-TyPe: text/plain\r\n").unwrap();
        assert_eq!(headers.get("content-type"), Some("application/json, text/plain"));

        headers.parse(b"content-type: text/html\r\n").unwrap();
        assert_eq!(
            headers.get("content-type"),
            Some("application/json, text/plain, text/html")
        );
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_empty_value() {
        let mut headers = Headers::new();
        headers.parse(b"X-Empty:\r\n").unwrap();
        assert_eq!(headers.get("x-empty"), Some(""));
    }

    #[test]
    fn test_colon_in_value() {
        let mut headers = Headers::new();
        headers.parse(b"Host: localhost:42069\r\n").unwrap();
        assert_eq!(headers.get("host"), Some("localhost:42069"));
    }

    #[test]
    fn test_iter() {
        let mut headers = Headers::new();
        headers.parse(b"A: 1\r\n").unwrap();
        headers.parse(b"B: 2\r\n").unwrap();

        let mut pairs: Vec<_> = headers.iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
        assert_eq!((&headers).into_iter().count(), 2);
    }
}
