//! UUIDv7 generator and related types.

use rand::RngCore;

use crate::{Error, Uuid};


/// A trait that provides the current Unix timestamp to [`V7Generator`].
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that reads the system clock.
///
/// A clock set before the Unix epoch reads as zero.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Represents a UUIDv7 generator that combines an explicit random number generator and an
/// explicit clock.
///
/// The generator keeps no state between calls besides its random number generator and clock, so
/// every UUID it returns depends only on the timestamp and the random bytes drawn for it. Inject a
/// seeded random number generator and a fixed clock to get reproducible output.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use uuid7_codec::V7Generator;
///
/// let mut g = V7Generator::new(OsRng);
/// let uuid = g.generate_at(Some(1_700_000_000_000))?;
/// assert!(uuid.to_string().starts_with("018bcfe5-6800-7"));
/// # Ok::<(), uuid7_codec::Error>(())
/// ```
///
/// # Generator functions
///
/// | Flavor           | Timestamp                   |
/// | ---------------- | --------------------------- |
/// | [`generate`]     | Clock                       |
/// | [`generate_at`]  | Argument if any, else clock |
/// | [`generate_core`]| Argument                    |
///
/// All of them fail with [`Error::InvalidTimestamp`] if the timestamp does not fit in 48 bits and
/// with [`Error::RandomSourceUnavailable`] if the random number generator fails.
///
/// [`generate`]: V7Generator::generate
/// [`generate_at`]: V7Generator::generate_at
/// [`generate_core`]: V7Generator::generate_core
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct V7Generator<R, T = StdSystemTime> {
    /// The random number generator used by the generator.
    rng: R,

    /// The clock used by the generator.
    time_source: T,
}

impl<R: RngCore> V7Generator<R> {
    /// Creates a generator instance that reads the system clock.
    pub const fn new(rng: R) -> Self {
        Self::with_time_source(rng, StdSystemTime)
    }
}

impl<R: RngCore, T: TimeSource> V7Generator<R, T> {
    /// Creates a generator instance with a custom clock.
    pub const fn with_time_source(rng: R, time_source: T) -> Self {
        Self { rng, time_source }
    }

    /// Generates a new UUIDv7 object from the current timestamp.
    pub fn generate(&mut self) -> Result<Uuid, Error> {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_core(unix_ts_ms)
    }

    /// Generates a new UUIDv7 object from `unix_ts_ms` if given, or from the current timestamp
    /// otherwise.
    pub fn generate_at(&mut self, unix_ts_ms: Option<u64>) -> Result<Uuid, Error> {
        match unix_ts_ms {
            Some(unix_ts_ms) => self.generate_core(unix_ts_ms),
            None => self.generate(),
        }
    }

    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed.
    ///
    /// Values above `2^48 - 1` are rejected rather than truncated.
    pub fn generate_core(&mut self, unix_ts_ms: u64) -> Result<Uuid, Error> {
        if unix_ts_ms >= 1 << 48 {
            tracing::debug!(unix_ts_ms, "rejected timestamp wider than 48 bits");
            return Err(Error::InvalidTimestamp(unix_ts_ms));
        }

        let mut bytes = [0u8; 16];
        self.rng.try_fill_bytes(&mut bytes).map_err(|err| {
            tracing::warn!(error = %err, "random source unavailable");
            Error::RandomSourceUnavailable(err)
        })?;

        let uuid = Uuid::from_random_v7(unix_ts_ms, bytes)
            .ok_or(Error::InvalidTimestamp(unix_ts_ms))?;
        tracing::trace!(%uuid, "generated UUIDv7");
        Ok(uuid)
    }
}
