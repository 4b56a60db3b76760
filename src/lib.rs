//! A codec for UUID version 7: generation, strict validation, and bit-field decomposition
//!
//! ```rust
//! let uuid = uuid7_codec::generate(Some(1_700_000_000_000))?;
//! println!("{}", uuid); // e.g., "018bcfe5-6800-7c05-9219-566f82fff672"
//!
//! assert!(uuid7_codec::is_valid(&uuid));
//! assert_eq!(uuid7_codec::parse_timestamp(&uuid), Some(1_700_000_000_000));
//!
//! for field in uuid7_codec::decompose(&uuid).unwrap() {
//!     println!("{:<20} {:>2} bits  {}", field.name(), field.bits(), field.binary());
//! }
//! # Ok::<(), uuid7_codec::Error>(())
//! ```
//!
//! See [RFC 9562](https://www.rfc-editor.org/rfc/rfc9562).
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        rand_a         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in milliseconds.
//! - The 4-bit `ver` field is set at `0111`.
//! - The 12-bit `rand_a` field is filled with random bits.
//! - The 2-bit `var` field is set at `10`.
//! - The 62-bit `rand_b` field is filled with random bits.
//!
//! Random bits come from a cryptographically strong random number generator. The generator does
//! not keep a counter, so identifiers sharing a millisecond are not ordered among themselves.
//! Timestamps wider than 48 bits are rejected with [`Error::InvalidTimestamp`] rather than
//! truncated.
//!
//! # Inspection
//!
//! [`decompose()`] breaks a UUIDv7 down into [`FieldDescriptor`]s carrying the bit width, hex and
//! binary renderings, and the character ranges each field occupies in the hyphenated text, which
//! is enough to drive a viewer that highlights the fields.
//!
//! # Crate features
//!
//! - `serde` enables serialization of [`Uuid`] and [`FieldDescriptor`].
//! - `uuid` enables conversion from and to [`uuid::Uuid`](https://docs.rs/uuid).

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::{Error, ParseError, ParseErrorKind};

mod id;
pub use id::{Style, Uuid, Variant};

pub mod fields;
pub use fields::{FieldDescriptor, FieldId};

pub mod generator;
pub use generator::{StdSystemTime, TimeSource, V7Generator};

mod entry;
pub use entry::{decompose, format, generate, is_valid, parse_timestamp};
