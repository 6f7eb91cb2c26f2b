//! Request parser state machine
//!
//! [`RequestParser::parse`] consumes as many complete units (request line,
//! header lines, body bytes) as the given data holds and reports how many
//! bytes it used. It never waits for input: a return of `Ok(0)` means the
//! caller has to supply more bytes.
//!
//! Transitions only move forward:
//!
//! ```text
//! Initialized -> ParsingHeaders -> ParsingBody -> Done
//!                      |                           ^
//!                      +---- no Content-Length ----+
//! ```

use bytes::BytesMut;
use h1wire_headers::Headers;
use smallvec::SmallVec;
use tracing::trace;

use crate::{Error, Request, RequestLine, Result};

/// Request line terminator
const CRLF: &[u8] = b"\r\n";

const CONTENT_LENGTH: &str = "content-length";

/// Parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Waiting for the request line
    Initialized,
    /// Reading header lines until the empty line
    ParsingHeaders,
    /// Reading `Content-Length` body bytes
    ParsingBody,
    /// Request complete; the parser accepts no more input
    Done,
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            State::Initialized => "reading the request line",
            State::ParsingHeaders => "reading headers",
            State::ParsingBody => "reading the body",
            State::Done => "done",
        };
        f.write_str(s)
    }
}

/// Single-use incremental parser for one request
#[derive(Debug)]
pub struct RequestParser {
    state: State,
    request_line: Option<RequestLine>,
    headers: Headers,
    body: BytesMut,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            state: State::Initialized,
            request_line: None,
            headers: Headers::new(),
            body: BytesMut::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Request line, once it has been parsed
    pub fn request_line(&self) -> Option<&RequestLine> {
        self.request_line.as_ref()
    }

    /// Headers parsed so far
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Feed the unconsumed bytes and return how many were consumed.
    ///
    /// The caller drops the consumed prefix and passes the remainder, plus
    /// any newly read bytes, on the next call. Calling this once the parser
    /// is done fails with [`Error::AlreadyDone`].
    pub fn parse(&mut self, data: &[u8]) -> Result<usize> {
        if self.is_done() {
            return Err(Error::AlreadyDone);
        }

        let mut total = 0;
        while !self.is_done() {
            let n = self.parse_single(&data[total..])?;
            if n == 0 {
                break;
            }
            total += n;
        }
        Ok(total)
    }

    /// Hand over the finished request
    pub fn finish(self) -> Result<Request> {
        match (self.state, self.request_line) {
            (State::Done, Some(request_line)) => Ok(Request {
                request_line,
                headers: self.headers,
                body: self.body.freeze(),
            }),
            (state, _) => Err(Error::Truncated(state)),
        }
    }

    fn parse_single(&mut self, data: &[u8]) -> Result<usize> {
        match self.state {
            State::Initialized => {
                let Some((request_line, consumed)) = parse_request_line(data)? else {
                    return Ok(0);
                };
                self.request_line = Some(request_line);
                self.transition(State::ParsingHeaders);
                Ok(consumed)
            }
            State::ParsingHeaders => {
                let status = self.headers.parse(data)?;
                if status.is_done() {
                    // Without Content-Length, or with an empty value, the body
                    // is empty. Anything after the blank line is left
                    // unconsumed rather than read as body.
                    let declared = self
                        .headers
                        .get(CONTENT_LENGTH)
                        .is_some_and(|v| !v.is_empty());
                    let next = if declared {
                        State::ParsingBody
                    } else {
                        State::Done
                    };
                    self.transition(next);
                }
                Ok(status.consumed())
            }
            State::ParsingBody => {
                let content_length = self.content_length()?;
                let remaining = content_length.saturating_sub_unsigned(self.body.len() as u64);
                // Covers negative lengths too: nothing more to read
                if remaining <= 0 {
                    self.transition(State::Done);
                    return Ok(0);
                }

                let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
                let n = remaining.min(data.len());
                self.body.extend_from_slice(&data[..n]);
                if n == remaining {
                    self.transition(State::Done);
                }
                Ok(n)
            }
            State::Done => Err(Error::AlreadyDone),
        }
    }

    fn content_length(&self) -> Result<i64> {
        let value = self.headers.get(CONTENT_LENGTH).unwrap_or_default();
        value
            .parse()
            .map_err(|_| Error::InvalidContentLength(value.to_string()))
    }

    fn transition(&mut self, next: State) {
        trace!(from = ?self.state, to = ?next, "parser state transition");
        self.state = next;
    }
}

/// Parse `METHOD TARGET VERSION\r\n`; `None` until the terminator arrives
fn parse_request_line(data: &[u8]) -> Result<Option<(RequestLine, usize)>> {
    let Some(end) = memchr::memmem::find(data, CRLF) else {
        return Ok(None);
    };

    let line = String::from_utf8_lossy(&data[..end]);
    let parts: SmallVec<[&str; 3]> = line.split(' ').collect();
    let [method, target, version] = parts.as_slice() else {
        return Err(Error::InvalidRequestLine(line.to_string()));
    };

    let request_line = RequestLine {
        method: (*method).to_owned(),
        target: (*target).to_owned(),
        version: (*version).to_owned(),
    };
    Ok(Some((request_line, end + CRLF.len())))
}
