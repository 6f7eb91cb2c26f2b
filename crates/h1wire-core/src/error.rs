//! Error types for h1wire-core

use h1wire_headers::HeaderError;
use thiserror::Error;

use crate::parser::State;

/// Result type alias for h1wire operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a request parse
#[derive(Debug, Error)]
pub enum Error {
    /// Request line does not have exactly three space-separated parts
    #[error("invalid request line: {0:?}")]
    InvalidRequestLine(String),

    /// Malformed header line
    #[error("invalid header: {0}")]
    Header(#[from] HeaderError),

    /// Content-Length is not an integer
    #[error("invalid content length: {0:?}")]
    InvalidContentLength(String),

    /// Stream ended before the request was complete
    #[error("missing end of request: stream ended while {0}")]
    Truncated(State),

    /// Parser fed after reaching its terminal state
    #[error("parser already done")]
    AlreadyDone,

    /// A single unconsumed run of bytes outgrew the read buffer
    #[error("read buffer limit of {limit} bytes exceeded")]
    BufferLimit { limit: usize },

    /// IO error from the byte source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Conversion into an `http::Request` failed
    #[error("HTTP error: {0}")]
    Http(String),
}
