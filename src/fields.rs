//! UUIDv7 bit-field decomposition
//!
//! Each UUIDv7 breaks down into five fields:
//!
//! | Field                | Bits | Offset  |
//! | -------------------- | ---- | ------- |
//! | `timestamp`          | 48   | 0..48   |
//! | `version`            | 4    | 48..52  |
//! | `rand_after_version` | 12   | 52..64  |
//! | `variant`            | 2    | 64..66  |
//! | `rand_remaining`     | 62   | 66..128 |
//!
//! Offsets count from the most significant bit. Besides the bit values, every
//! [`FieldDescriptor`] records where the field appears in the 36-character hyphenated text, so that
//! a viewer can highlight it.

use std::{fmt, ops::Range};

use crate::Uuid;

/// Maps the five hex-digit groups of the 32-digit form to their offsets in the hyphenated form.
const SEGMENTS: [(Range<usize>, usize); 5] = [
    (0..8, 0),
    (8..12, 9),
    (12..16, 14),
    (16..20, 19),
    (20..32, 24),
];

/// Identifies one of the five UUIDv7 bit fields.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldId {
    /// 48-bit Unix timestamp in milliseconds.
    Timestamp,

    /// 4-bit version, always `0111`.
    Version,

    /// 12-bit `rand_a` following the version.
    RandAfterVersion,

    /// 2-bit variant, always `10`.
    Variant,

    /// 62-bit `rand_b` following the variant.
    RandRemaining,
}

impl FieldId {
    /// All fields in the order they appear in a UUID.
    pub const ALL: [Self; 5] = [
        Self::Timestamp,
        Self::Version,
        Self::RandAfterVersion,
        Self::Variant,
        Self::RandRemaining,
    ];

    /// Returns the stable string key of the field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Version => "version",
            Self::RandAfterVersion => "rand_after_version",
            Self::Variant => "variant",
            Self::RandRemaining => "rand_remaining",
        }
    }

    /// Returns the human-readable label of the field.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Timestamp => "Unix timestamp (ms)",
            Self::Version => "Version",
            Self::RandAfterVersion => "Random A",
            Self::Variant => "Variant",
            Self::RandRemaining => "Random B",
        }
    }

    /// Returns the bit offset from the most significant bit.
    pub const fn offset(&self) -> u32 {
        match self {
            Self::Timestamp => 0,
            Self::Version => 48,
            Self::RandAfterVersion => 52,
            Self::Variant => 64,
            Self::RandRemaining => 66,
        }
    }

    /// Returns the bit width of the field.
    pub const fn bits(&self) -> u32 {
        match self {
            Self::Timestamp => 48,
            Self::Version => 4,
            Self::RandAfterVersion => 12,
            Self::Variant => 2,
            Self::RandRemaining => 62,
        }
    }

    /// Returns the range of hex-digit indexes in the 32-digit form that the field owns.
    ///
    /// A digit belongs to the field holding its most significant bit, so the digit shared by
    /// `variant` and `rand_remaining` belongs to `variant`.
    const fn nibbles(&self) -> Range<usize> {
        let start = self.offset().div_ceil(4) as usize;
        let end = (self.offset() + self.bits()).div_ceil(4) as usize;
        start..end
    }

    /// Extracts the field value from a 128-bit UUID value.
    const fn extract(&self, value: u128) -> u128 {
        (value >> (128 - self.offset() - self.bits())) & ((1u128 << self.bits()) - 1)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only description of one bit field of a UUIDv7.
///
/// # Examples
///
/// ```rust
/// use uuid7_codec::{FieldId, Uuid};
///
/// let x = Uuid::parse_v7("018dab34-1234-7abc-8def-0123456789ab")?;
/// let [timestamp, _, _, variant, _] = x.fields();
///
/// assert_eq!(timestamp.id(), FieldId::Timestamp);
/// assert_eq!(timestamp.hex(), "018dab341234");
/// assert_eq!(timestamp.ranges(), &[0..8, 9..13]);
///
/// assert_eq!(variant.bits(), 2);
/// assert_eq!(variant.binary(), "10");
/// # Ok::<(), uuid7_codec::ParseError>(())
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDescriptor {
    id: FieldId,
    name: &'static str,
    bits: u32,
    hex: String,
    binary: String,
    ranges: Vec<Range<usize>>,
}

impl FieldDescriptor {
    /// Returns the field identifier.
    pub const fn id(&self) -> FieldId {
        self.id
    }

    /// Returns the human-readable label.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the bit width.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns the field value as lowercase hex digits.
    ///
    /// Fields aligned to hex digits render exactly the digits they cover. `variant` renders its
    /// 2-bit code (`2` for `10`), and `rand_remaining` renders its 62-bit value in 16 digits.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Returns the field value as binary digits, exactly [`bits`](Self::bits) long.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Returns the half-open character ranges the field occupies in the 36-character hyphenated
    /// form, split at hyphens.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }
}

/// Breaks down a UUID into the five UUIDv7 field descriptors.
pub(crate) fn decompose(uuid: &Uuid) -> [FieldDescriptor; 5] {
    let value = u128::from(*uuid);
    FieldId::ALL.map(|id| {
        let bits = id.bits() as usize;
        let v = id.extract(value);
        FieldDescriptor {
            id,
            name: id.name(),
            bits: id.bits(),
            hex: format!("{:0width$x}", v, width = bits.div_ceil(4)),
            binary: format!("{:0width$b}", v, width = bits),
            ranges: text_ranges(id.nibbles()),
        }
    })
}

/// Translates a range of hex-digit indexes in the 32-digit form into ranges of character indexes
/// in the hyphenated form, splitting at each hyphen crossed.
pub(crate) fn text_ranges(nibbles: Range<usize>) -> Vec<Range<usize>> {
    SEGMENTS
        .iter()
        .filter_map(|(segment, text_start)| {
            let start = nibbles.start.max(segment.start);
            let end = nibbles.end.min(segment.end);
            (start < end).then(|| {
                start - segment.start + text_start..end - segment.start + text_start
            })
        })
        .collect()
}
