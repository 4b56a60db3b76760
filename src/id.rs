use std::{fmt, str, time};

use fstr::FStr;

use crate::error::{ParseError, ParseErrorKind};
use crate::fields::{self, FieldDescriptor};

/// Character offsets of the four hyphens in the 8-4-4-4-12 representation.
const HYPHEN_OFFSETS: [usize; 4] = [8, 13, 18, 23];

/// Represents a Universally Unique IDentifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID byte array from UUIDv7 field values.
    ///
    /// Returns `None` if `unix_ts_ms`, `rand_a`, or `rand_b` does not fit in 48, 12, or 62 bits,
    /// respectively.
    pub const fn from_fields_v7(unix_ts_ms: u64, rand_a: u16, rand_b: u64) -> Option<Self> {
        if unix_ts_ms >= 1 << 48 || rand_a >= 1 << 12 || rand_b >= 1 << 62 {
            return None;
        }

        Some(Self([
            (unix_ts_ms >> 40) as u8,
            (unix_ts_ms >> 32) as u8,
            (unix_ts_ms >> 24) as u8,
            (unix_ts_ms >> 16) as u8,
            (unix_ts_ms >> 8) as u8,
            unix_ts_ms as u8,
            0x70 | (rand_a >> 8) as u8,
            rand_a as u8,
            0x80 | (rand_b >> 56) as u8,
            (rand_b >> 48) as u8,
            (rand_b >> 40) as u8,
            (rand_b >> 32) as u8,
            (rand_b >> 24) as u8,
            (rand_b >> 16) as u8,
            (rand_b >> 8) as u8,
            rand_b as u8,
        ]))
    }

    /// Creates a UUIDv7 from `unix_ts_ms` and 16 random bytes, overwriting the timestamp, version,
    /// and variant positions of the random bytes.
    ///
    /// Returns `None` if `unix_ts_ms` does not fit in 48 bits.
    pub const fn from_random_v7(unix_ts_ms: u64, random: [u8; 16]) -> Option<Self> {
        if unix_ts_ms >= 1 << 48 {
            return None;
        }

        let mut bytes = random;
        let ts = unix_ts_ms.to_be_bytes();
        let mut i = 0;
        while i < 6 {
            bytes[i] = ts[i + 2];
            i += 1;
        }
        bytes[6] = 0x70 | (bytes[6] & 0x0f);
        bytes[8] = 0x80 | (bytes[8] & 0x3f);
        Some(Self(bytes))
    }

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation, accepting only
    /// UUIDv7 values (version nibble `7` and variant bits `10`).
    ///
    /// Hexadecimal digits are case-insensitive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_codec::{ParseErrorKind, Uuid};
    ///
    /// assert!(Uuid::parse_v7("018dab34-1234-7abc-8def-0123456789ab").is_ok());
    ///
    /// let err = Uuid::parse_v7("018dab34-1234-6abc-8def-0123456789ab").unwrap_err();
    /// assert_eq!(err.kind(), ParseErrorKind::Version);
    /// ```
    pub fn parse_v7(src: &str) -> Result<Self, ParseError> {
        let uuid: Self = src.parse()?;
        if uuid.0[6] >> 4 != 7 {
            Err(ParseError::new(ParseErrorKind::Version))
        } else if uuid.0[8] >> 6 != 0b10 {
            Err(ParseError::new(ParseErrorKind::Variant))
        } else {
            Ok(uuid)
        }
    }

    /// Returns the 48-bit `unix_ts_ms` field value.
    pub const fn unix_ts_ms(&self) -> u64 {
        (u128::from_be_bytes(self.0) >> 80) as u64
    }

    /// Returns the 12-bit `rand_a` field value.
    pub const fn rand_a(&self) -> u16 {
        ((u128::from_be_bytes(self.0) >> 64) & 0xfff) as u16
    }

    /// Returns the 62-bit `rand_b` field value.
    pub const fn rand_b(&self) -> u64 {
        (u128::from_be_bytes(self.0) & ((1 << 62) - 1)) as u64
    }

    /// Returns the `unix_ts_ms` field value as a [`SystemTime`](time::SystemTime).
    pub fn to_system_time(&self) -> time::SystemTime {
        time::UNIX_EPOCH + time::Duration::from_millis(self.unix_ts_ms())
    }

    /// Reports the variant field value of the UUID.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 => Variant::Var0,
            0x8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version field value of the UUID or `None` if the UUID does not have the
    /// variant field value of `10`.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Breaks the UUID down into its five UUIDv7 bit fields.
    ///
    /// See [`FieldDescriptor`] for the rendering of each field.
    ///
    /// The bits are read at the UUIDv7 positions whatever the actual version is, so a non-v7 UUID
    /// such as [`Uuid::NIL`] reports a `version` of `0000` and a `variant` of `00`. Check
    /// [`version()`](Self::version) first, or use [`decompose()`](crate::decompose), which
    /// rejects anything but UUIDv7.
    pub fn fields(&self) -> [FieldDescriptor; 5] {
        fields::decompose(self)
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_codec::Uuid;
    ///
    /// let x = "01809424-3e59-7c05-9219-566f82fff672".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "01809424-3e59-7c05-9219-566f82fff672");
    /// assert_eq!(format!("{}", y), "01809424-3e59-7c05-9219-566f82fff672");
    /// # Ok::<(), uuid7_codec::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [b'-'; 36];
        let mut offset = 0;
        for (i, e) in self.0.iter().enumerate() {
            buffer[offset] = DIGITS[(e >> 4) as usize];
            buffer[offset + 1] = DIGITS[(e & 15) as usize];
            offset += if matches!(i, 3 | 5 | 7 | 9) { 3 } else { 2 };
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: every byte written is an ASCII hex digit or hyphen
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }

    /// Renders the UUID in the requested [`Style`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_codec::{Style, Uuid};
    ///
    /// let x = Uuid::parse_v7("018dab34-1234-7abc-8def-0123456789ab")?;
    /// assert_eq!(x.format(Style::Uppercase), "018DAB34-1234-7ABC-8DEF-0123456789AB");
    /// assert_eq!(x.format(Style::Simple), "018dab3412347abc8def0123456789ab");
    /// # Ok::<(), uuid7_codec::ParseError>(())
    /// ```
    pub fn format(&self, style: Style) -> String {
        let text = self.encode();
        match style {
            Style::Standard => text.to_string(),
            Style::Uppercase => text.to_ascii_uppercase(),
            Style::Simple => text.chars().filter(|c| *c != '-').collect(),
        }
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation of any UUID
    /// version.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let src = src.as_bytes();
        if src.len() != 36 {
            return Err(ParseError::new(ParseErrorKind::Length));
        }

        let mut dst = [0u8; 16];
        let mut nibbles = 0;
        for (offset, &c) in src.iter().enumerate() {
            if HYPHEN_OFFSETS.contains(&offset) {
                if c != b'-' {
                    return Err(ParseError::new(ParseErrorKind::Hyphen(offset)));
                }
                continue;
            }

            let digit = char::from(c)
                .to_digit(16)
                .ok_or(ParseError::new(ParseErrorKind::Digit(offset)))? as u8;
            dst[nibbles / 2] |= if nibbles % 2 == 0 { digit << 4 } else { digit };
            nibbles += 1;
        }
        Ok(Self(dst))
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

/// UUID variants defined by RFC 9562.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// The variant field value of `0`, reserved for NCS backward compatibility.
    Var0,

    /// The variant field value of `10`, used by UUIDv7 and the other RFC 9562 versions.
    Var10,

    /// The variant field value of `110`, reserved for Microsoft backward compatibility.
    Var110,

    /// The reserved variant field value of `111`.
    VarReserved,
}

/// Textual renderings supported by [`Uuid::format()`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Style {
    /// Lowercase 8-4-4-4-12 representation.
    #[default]
    Standard,

    /// Uppercase 8-4-4-4-12 representation.
    Uppercase,

    /// 32 lowercase hexadecimal digits without hyphens.
    Simple,
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}
