//! Error types

use thiserror::Error;

/// Errors that can occur when generating a UUIDv7.
#[derive(Debug, Error)]
pub enum Error {
    /// The supplied `unix_ts_ms` does not fit in the 48-bit timestamp field.
    #[error("timestamp {0} does not fit in 48 bits")]
    InvalidTimestamp(u64),

    /// The random number generator failed to produce bytes.
    #[error("cryptographically secure random source unavailable")]
    RandomSourceUnavailable(#[source] rand::Error),
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Error)]
#[error("invalid string representation: {kind}")]
pub struct ParseError {
    kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) const fn new(kind: ParseErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the reason the input was rejected.
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

/// The reason a string was rejected as a UUID representation.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Error)]
pub enum ParseErrorKind {
    /// The input is not 36 bytes long.
    #[error("expected 36 characters")]
    Length,

    /// A hyphen is missing at the given byte offset.
    #[error("expected '-' at offset {0}")]
    Hyphen(usize),

    /// A non-hexadecimal byte at the given byte offset.
    #[error("invalid hex digit at offset {0}")]
    Digit(usize),

    /// The version nibble is not `7`.
    #[error("version nibble is not 7")]
    Version,

    /// The variant bits are not `10`.
    #[error("variant bits are not 10")]
    Variant,
}
