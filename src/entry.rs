//! Entry point functions backed by the operating system's random number generator and the system
//! clock.
//!
//! Malformed input is an expected condition for callers that accept free text, so the functions
//! here that take text report it as `false` or `None` rather than as an error. All of them share
//! the validity predicate of [`Uuid::parse_v7()`].

use rand::rngs::OsRng;

use crate::{Error, FieldDescriptor, Style, Uuid, V7Generator};

/// Generates a UUIDv7 string from `unix_ts_ms`, or from the current time if `None`.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] if `unix_ts_ms` does not fit in 48 bits and
/// [`Error::RandomSourceUnavailable`] if the operating system cannot supply random bytes.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid7_codec::generate(Some(1_700_000_000_000))?;
/// assert_eq!(uuid7_codec::parse_timestamp(&uuid), Some(1_700_000_000_000));
///
/// let uuid = uuid7_codec::generate(None)?;
/// println!("{uuid}"); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// # Ok::<(), uuid7_codec::Error>(())
/// ```
pub fn generate(unix_ts_ms: Option<u64>) -> Result<String, Error> {
    V7Generator::new(OsRng)
        .generate_at(unix_ts_ms)
        .map(String::from)
}

/// Tests if `text` is a UUIDv7 in the 8-4-4-4-12 hexadecimal representation.
///
/// Hexadecimal digits are case-insensitive; the version nibble must be `7` and the variant bits
/// must be `10`.
///
/// # Examples
///
/// ```rust
/// assert!(uuid7_codec::is_valid("018dab34-1234-7abc-8def-0123456789ab"));
/// assert!(!uuid7_codec::is_valid("018dab34-1234-6abc-8def-0123456789ab"));
/// assert!(!uuid7_codec::is_valid("018dab34-1234-7abc-cdef-0123456789ab"));
/// ```
pub fn is_valid(text: &str) -> bool {
    parse(text).is_some()
}

/// Extracts the 48-bit Unix timestamp in milliseconds from a UUIDv7 string, or returns `None` if
/// `text` is not a valid UUIDv7.
pub fn parse_timestamp(text: &str) -> Option<u64> {
    parse(text).map(|uuid| uuid.unix_ts_ms())
}

/// Breaks down a UUIDv7 string into its five bit fields, or returns `None` if `text` is not a
/// valid UUIDv7.
///
/// # Examples
///
/// ```rust
/// let fields = uuid7_codec::decompose("018dab34-1234-7abc-8def-0123456789ab").unwrap();
/// for f in &fields {
///     println!("{}: {} bits, hex {}, binary {}", f.name(), f.bits(), f.hex(), f.binary());
/// }
/// assert!(uuid7_codec::decompose("not a uuid").is_none());
/// ```
pub fn decompose(text: &str) -> Option<[FieldDescriptor; 5]> {
    parse(text).map(|uuid| uuid.fields())
}

/// Renders a UUIDv7 string in the requested [`Style`], or returns `None` if `text` is not a valid
/// UUIDv7.
pub fn format(text: &str, style: Style) -> Option<String> {
    parse(text).map(|uuid| uuid.format(style))
}

fn parse(text: &str) -> Option<Uuid> {
    Uuid::parse_v7(text)
        .map_err(|err| tracing::trace!(%err, text, "rejected UUIDv7 text"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::{decompose, format, generate, is_valid, parse_timestamp};
    use crate::{FieldId, Style};

    /// Generates strings decoding back to supplied timestamp
    #[test]
    fn generates_strings_decoding_back_to_supplied_timestamp() {
        let uuid = generate(Some(1_700_000_000_000)).unwrap();
        assert_eq!(uuid.len(), 36);
        assert!(uuid.starts_with("018bcfe5-6800-7"));
        assert!(matches!(&uuid[19..20], "8" | "9" | "a" | "b"));
        assert!(is_valid(&uuid));
        assert_eq!(parse_timestamp(&uuid), Some(1_700_000_000_000));
    }

    /// Generates 1000 distinct strings with same timestamp
    #[test]
    fn generates_1000_distinct_strings_with_same_timestamp() {
        use std::collections::HashSet;
        let s: HashSet<String> = (0..1_000)
            .map(|_| generate(Some(1_700_000_000_000)).unwrap())
            .collect();
        assert_eq!(s.len(), 1_000);
    }

    /// Generates from current time when timestamp is omitted
    #[test]
    fn generates_from_current_time_when_timestamp_is_omitted() {
        use std::time;
        let before = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let ts = parse_timestamp(&generate(None).unwrap()).unwrap();
        let after = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        assert!(before <= ts && ts <= after);
    }

    /// Rejects timestamp wider than 48 bits
    #[test]
    fn rejects_timestamp_wider_than_48_bits() {
        assert!(generate(Some(1 << 48)).is_err());
    }

    /// Validates prepared cases
    #[test]
    fn validates_prepared_cases() {
        let cases = [
            ("018dab34-1234-7abc-8def-0123456789ab", true),
            ("018DAB34-1234-7ABC-8DEF-0123456789AB", true),
            ("018dab34-1234-7abc-9def-0123456789ab", true),
            ("018dab34-1234-7abc-adef-0123456789ab", true),
            ("018dab34-1234-7abc-bdef-0123456789ab", true),
            ("018dab34-1234-6abc-8def-0123456789ab", false),
            ("018dab34-1234-7abc-cdef-0123456789ab", false),
            ("018dab34-1234-7abc-7def-0123456789ab", false),
            ("018dab3412347abc8def0123456789ab", false),
            ("018dab34-1234-7abc-8def-0123456789ab0", false),
            ("018dab34-12347-abc-8def-0123456789ab", false),
            ("018dab34-1234-7abc-8deg-0123456789ab", false),
            ("", false),
        ];

        for (text, expected) in cases {
            assert_eq!(is_valid(text), expected, "{text}");
            assert_eq!(parse_timestamp(text).is_some(), expected, "{text}");
            assert_eq!(decompose(text).is_some(), expected, "{text}");
            assert_eq!(format(text, Style::Standard).is_some(), expected, "{text}");
        }
    }

    /// Extracts timestamp from prepared cases
    #[test]
    fn extracts_timestamp_from_prepared_cases() {
        assert_eq!(
            parse_timestamp("018dab34-1234-7abc-8def-0123456789ab"),
            Some(0x018d_ab34_1234)
        );
        assert_eq!(
            parse_timestamp("ffffffff-ffff-7fff-bfff-ffffffffffff"),
            Some((1 << 48) - 1)
        );
        assert_eq!(
            parse_timestamp("00000000-0000-7000-8000-000000000000"),
            Some(0)
        );
    }

    /// Decomposes variant and rand_remaining of prepared case
    #[test]
    fn decomposes_variant_and_rand_remaining_of_prepared_case() {
        let fields = decompose("018dab34-1234-7abc-8def-0123456789ab").unwrap();
        let ids: Vec<FieldId> = fields.iter().map(|f| f.id()).collect();
        assert_eq!(ids, FieldId::ALL);

        assert_eq!(fields[3].bits(), 2);
        assert_eq!(fields[3].binary(), "10");
        assert_eq!(fields[4].bits(), 62);
        assert_eq!(fields[4].ranges(), [20..23, 24..36]);
    }

    /// Shares codec types across threads
    #[test]
    fn shares_codec_types_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<crate::Uuid>();
        assert_send_sync::<crate::FieldDescriptor>();
        assert_send_sync::<crate::Error>();
    }

    /// Generates and decomposes identifiers under multithreading
    #[test]
    fn generates_and_decomposes_identifiers_under_multithreading(
    ) -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for i in 0..4u64 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..1_000 {
                        let uuid = generate(Some(1_700_000_000_000 + i)).unwrap();
                        let fields = decompose(&uuid).unwrap();
                        tx.send((uuid, fields)).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok((uuid, fields)) = rx.recv() {
            assert_eq!(decompose(&uuid), Some(fields));
            assert!(parse_timestamp(&uuid).is_some_and(|ts| ts - 1_700_000_000_000 < 4));
            s.insert(uuid);
        }

        assert_eq!(s.len(), 4 * 1_000);
        Ok(())
    }

    /// Formats in supported styles
    #[test]
    fn formats_in_supported_styles() {
        let text = "018dab34-1234-7abc-8def-0123456789ab";
        assert_eq!(format(text, Style::Standard).unwrap(), text);
        assert_eq!(
            format(text, Style::Uppercase).unwrap(),
            "018DAB34-1234-7ABC-8DEF-0123456789AB"
        );
        assert_eq!(
            format(text, Style::Simple).unwrap(),
            "018dab3412347abc8def0123456789ab"
        );
    }
}
