//! Entry points that drive a [`RequestParser`] from a byte source
//!
//! Reads may return any number of bytes; the request is assembled through a
//! sliding-window buffer and only returned once complete.

use std::io::{self, Read};

use tracing::debug;

use crate::buffer::ReadBuffer;
use crate::{Error, ParserConfig, Request, RequestParser, Result};

/// Parse one request from a blocking reader with the default config
pub fn parse_from_reader<R: Read>(reader: R) -> Result<Request> {
    parse_from_reader_with(reader, &ParserConfig::default())
}

/// Parse one request from a blocking reader
pub fn parse_from_reader_with<R: Read>(mut reader: R, config: &ParserConfig) -> Result<Request> {
    let mut session = Session::new(config);
    loop {
        let n = match reader.read(session.spare_mut()?) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if session.advance(n)? {
            return session.finish();
        }
    }
}

/// Parse one request from an async reader with the default config
#[cfg(feature = "native")]
pub async fn parse_from_async_reader<R>(reader: R) -> Result<Request>
where
    R: tokio::io::AsyncRead + Unpin,
{
    parse_from_async_reader_with(reader, &ParserConfig::default()).await
}

/// Parse one request from an async reader
#[cfg(feature = "native")]
pub async fn parse_from_async_reader_with<R>(mut reader: R, config: &ParserConfig) -> Result<Request>
where
    R: tokio::io::AsyncRead + Unpin,
{
    use tokio::io::AsyncReadExt;

    let mut session = Session::new(config);
    loop {
        let n = match reader.read(session.spare_mut()?).await {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if session.advance(n)? {
            return session.finish();
        }
    }
}

/// Parser plus the buffer feeding it, shared by the sync and async loops
struct Session {
    parser: RequestParser,
    buffer: ReadBuffer,
}

impl Session {
    fn new(config: &ParserConfig) -> Self {
        Self {
            parser: RequestParser::new(),
            buffer: ReadBuffer::new(config.initial_buffer_size, config.max_buffer_size),
        }
    }

    fn spare_mut(&mut self) -> Result<&mut [u8]> {
        self.buffer.spare_mut()
    }

    /// Account for `n` freshly read bytes; `true` once the request is complete.
    /// A zero-length read is end-of-stream.
    fn advance(&mut self, n: usize) -> Result<bool> {
        if n == 0 {
            let state = self.parser.state();
            debug!(%state, pending = self.buffer.filled().len(), "stream ended early");
            return Err(Error::Truncated(state));
        }

        self.buffer.commit(n);
        let consumed = self.parser.parse(self.buffer.filled())?;
        self.buffer.consume(consumed);
        Ok(self.parser.is_done())
    }

    fn finish(self) -> Result<Request> {
        let request = self.parser.finish()?;
        debug!(
            method = %request.request_line.method,
            target = %request.request_line.target,
            headers = request.headers.len(),
            body_len = request.body.len(),
            "request parsed"
        );
        Ok(request)
    }
}
