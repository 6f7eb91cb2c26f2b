//! Parser configuration

/// Initial read buffer capacity in bytes
pub const DEFAULT_INITIAL_BUFFER_SIZE: usize = 8;

/// Largest the read buffer may grow to (64KB)
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 64 * 1024;

/// Buffer sizing for the stream entry points
///
/// The buffer only ever holds bytes the parser has not consumed yet, so the
/// limit bounds the longest request line or header line, not the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Capacity the buffer starts with; doubled whenever it fills up
    pub initial_buffer_size: usize,
    /// Capacity the buffer may not grow past
    pub max_buffer_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            initial_buffer_size: DEFAULT_INITIAL_BUFFER_SIZE,
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial buffer capacity in bytes
    pub fn initial_buffer_size(mut self, size: usize) -> Self {
        self.initial_buffer_size = size;
        self
    }

    /// Set the buffer limit in bytes
    pub fn max_buffer_size(mut self, size: usize) -> Self {
        self.max_buffer_size = size;
        self
    }

    /// Set the buffer limit in kilobytes
    pub fn max_buffer_kb(self, size: usize) -> Self {
        self.max_buffer_size(size * 1024)
    }
}
