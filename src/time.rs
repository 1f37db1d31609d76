//! Time Module
//!
//! Parses unit-suffixed durations into a canonical millisecond quantity.

use std::str::FromStr;
use std::time::Duration;

use crate::error::{CacheError, Result};

// == Time Units ==
/// Millisecond factors for the supported unit suffixes.
const TIME_UNITS: [(&str, u64); 4] = [
    ("s", 1_000),
    ("m", 60_000),
    ("h", 3_600_000),
    ("d", 86_400_000),
];

// == Time ==
/// A non-negative duration held as a canonical millisecond count.
///
/// Constructed from a raw millisecond value or a `<integer><unit>` string
/// where the unit is one of `s`, `m`, `h`, `d`. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time {
    millis: u64,
}

impl Time {
    // == Constructor ==
    /// Creates a Time from a raw millisecond count, taken verbatim.
    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Returns the duration in milliseconds.
    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    /// Converts to a std [`Duration`] for timer plumbing.
    pub fn to_duration(&self) -> Duration {
        Duration::from_millis(self.millis)
    }
}

impl FromStr for Time {
    type Err = CacheError;

    /// Parses a `<integer><unit>` string such as `"30s"` or `"5m"`.
    ///
    /// The magnitude is the leading run of ASCII digits and the remainder is
    /// the unit suffix; anything without a known unit fails with
    /// [`CacheError::InvalidTimeUnit`]. No zero- or overlong-duration
    /// validation is performed.
    fn from_str(input: &str) -> Result<Self> {
        let split = input
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(input.len());
        let (magnitude, unit) = input.split_at(split);

        let factor = TIME_UNITS
            .iter()
            .find(|(suffix, _)| *suffix == unit)
            .map(|(_, factor)| *factor)
            .ok_or_else(|| CacheError::InvalidTimeUnit(unit.to_string()))?;

        let magnitude: u64 = magnitude
            .parse()
            .map_err(|_| CacheError::InvalidTimeUnit(input.to_string()))?;

        Ok(Self::from_millis(magnitude * factor))
    }
}

impl TryFrom<&str> for Time {
    type Error = CacheError;

    fn try_from(input: &str) -> Result<Self> {
        input.parse()
    }
}

impl From<u64> for Time {
    fn from(millis: u64) -> Self {
        Self::from_millis(millis)
    }
}

impl From<Duration> for Time {
    fn from(duration: Duration) -> Self {
        Self::from_millis(duration.as_millis() as u64)
    }
}

// == Time Spec ==
/// A duration as supplied at an option boundary, before normalization.
///
/// Option fields accept a pre-built [`Time`], a raw millisecond count, or a
/// `<integer><unit>` string; everything is normalized identically, once, at
/// layer construction.
#[derive(Debug, Clone)]
pub enum TimeSpec {
    /// Already-normalized duration
    Time(Time),
    /// Raw millisecond count
    Millis(u64),
    /// Unit-suffixed duration string, parsed on resolve
    Text(String),
}

impl TimeSpec {
    /// Normalizes to a canonical [`Time`], parsing string forms.
    pub fn resolve(&self) -> Result<Time> {
        match self {
            TimeSpec::Time(time) => Ok(*time),
            TimeSpec::Millis(millis) => Ok(Time::from_millis(*millis)),
            TimeSpec::Text(text) => text.parse(),
        }
    }
}

impl From<Time> for TimeSpec {
    fn from(time: Time) -> Self {
        TimeSpec::Time(time)
    }
}

impl From<u64> for TimeSpec {
    fn from(millis: u64) -> Self {
        TimeSpec::Millis(millis)
    }
}

impl From<&str> for TimeSpec {
    fn from(text: &str) -> Self {
        TimeSpec::Text(text.to_string())
    }
}

impl From<String> for TimeSpec {
    fn from(text: String) -> Self {
        TimeSpec::Text(text)
    }
}
