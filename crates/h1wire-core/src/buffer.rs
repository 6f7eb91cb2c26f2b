//! Sliding-window read buffer
//!
//! Bytes are read into the free tail, the parser consumes a prefix, and the
//! unconsumed rest slides back to the front. Consumed bytes are never looked
//! at again.

use tracing::trace;

use crate::{Error, Result};

pub(crate) struct ReadBuffer {
    /// Backing storage; its length is the current capacity
    buf: Vec<u8>,
    /// Number of valid bytes at the front of `buf`
    filled: usize,
    max_size: usize,
}

impl ReadBuffer {
    pub(crate) fn new(initial_size: usize, max_size: usize) -> Self {
        let initial_size = initial_size.max(1);
        Self {
            buf: vec![0; initial_size],
            filled: 0,
            max_size: max_size.max(initial_size),
        }
    }

    /// Free space to read into, doubling the capacity when it is full
    pub(crate) fn spare_mut(&mut self) -> Result<&mut [u8]> {
        if self.filled == self.buf.len() {
            let capacity = self.buf.len();
            if capacity >= self.max_size {
                return Err(Error::BufferLimit {
                    limit: self.max_size,
                });
            }
            let grown = (capacity * 2).min(self.max_size);
            trace!(from = capacity, to = grown, "growing read buffer");
            self.buf.resize(grown, 0);
        }
        Ok(&mut self.buf[self.filled..])
    }

    /// Mark `n` bytes of the spare space as valid
    pub(crate) fn commit(&mut self, n: usize) {
        debug_assert!(self.filled + n <= self.buf.len());
        self.filled += n;
    }

    /// Valid, not yet consumed bytes
    pub(crate) fn filled(&self) -> &[u8] {
        &self.buf[..self.filled]
    }

    /// Drop `n` bytes from the front and slide the rest down
    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.filled);
        self.buf.copy_within(n..self.filled, 0);
        self.filled -= n;
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.buf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(buffer: &mut ReadBuffer, data: &[u8]) {
        let spare = buffer.spare_mut().unwrap();
        spare[..data.len()].copy_from_slice(data);
        buffer.commit(data.len());
    }

    #[test]
    fn test_commit_and_consume() {
        let mut buffer = ReadBuffer::new(8, 64);
        fill(&mut buffer, b"GET /\r\n");
        assert_eq!(buffer.filled(), b"GET /\r\n");

        buffer.consume(4);
        assert_eq!(buffer.filled(), b"/\r\n");
        assert_eq!(buffer.spare_mut().unwrap().len(), 5);

        buffer.consume(3);
        assert!(buffer.filled().is_empty());
    }

    #[test]
    fn test_doubles_when_full() {
        let mut buffer = ReadBuffer::new(4, 64);
        fill(&mut buffer, b"abcd");
        assert_eq!(buffer.capacity(), 4);

        assert_eq!(buffer.spare_mut().unwrap().len(), 4);
        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.filled(), b"abcd");
    }

    #[test]
    fn test_growth_capped_at_limit() {
        let mut buffer = ReadBuffer::new(4, 6);
        fill(&mut buffer, b"abcd");
        assert_eq!(buffer.spare_mut().unwrap().len(), 2);
        fill(&mut buffer, b"ef");

        assert!(matches!(
            buffer.spare_mut(),
            Err(Error::BufferLimit { limit: 6 })
        ));
    }

    #[test]
    fn test_zero_initial_size() {
        let mut buffer = ReadBuffer::new(0, 0);
        assert_eq!(buffer.spare_mut().unwrap().len(), 1);
    }
}
