//! h1wire-core: incremental HTTP/1.1 request parser
//!
//! Turns a byte stream with arbitrary read boundaries into a [`Request`]:
//! request line, case-insensitive headers and a `Content-Length` delimited
//! body. Chunked transfer-encoding, trailers and pipelining are not handled.
//!
//! ## Features
//! - `native` - async entry points over `tokio::io::AsyncRead`
//!
//! ## Example
//! ```
//! let raw: &[u8] = b"POST /x HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
//! let req = h1wire_core::parse_from_reader(raw).unwrap();
//!
//! assert_eq!(req.request_line.method, "POST");
//! assert_eq!(req.header("Content-Length"), Some("5"));
//! assert_eq!(req.body.as_ref(), b"hello");
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

mod buffer;
pub mod config;
pub mod error;
pub mod parser;
pub mod request;
mod stream;

// Re-exports
pub use config::ParserConfig;
pub use error::{Error, Result};
pub use parser::{RequestParser, State};
pub use request::{Request, RequestLine};
pub use stream::{parse_from_reader, parse_from_reader_with};

#[cfg(feature = "native")]
pub use stream::{parse_from_async_reader, parse_from_async_reader_with};

pub use h1wire_headers::{HeaderError, Headers};
