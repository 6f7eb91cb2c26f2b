//! Error types for h1wire-headers

use thiserror::Error;

/// A header line that cannot be accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Line has no `:` separating name and value
    #[error("invalid header format: missing ':'")]
    MissingColon,

    /// Name contains a space before the colon
    #[error("invalid spacing in header name")]
    SpaceInName,

    /// Name is empty after trimming
    #[error("empty header name")]
    EmptyName,

    /// Name contains a byte outside the token character set
    #[error("invalid character {0:#04x} in header name")]
    InvalidNameChar(u8),
}
