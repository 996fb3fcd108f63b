//! Record timestamps and their fixed textual format.

use chrono::{DateTime, Datelike, NaiveDateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

/// The only accepted textual form: ISO-like, no offset, six fractional digits.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Years that render as exactly four unsigned digits.
const YEARS: core::ops::RangeInclusive<i32> = 0..=9999;

/// UTC instant held at microsecond precision.
///
/// Microsecond precision matches the textual format exactly, so rendering and
/// parsing never lose information.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(6))
    }

    /// The current time, or one microsecond past `previous` if the clock has
    /// not moved beyond it. Always strictly greater than `previous`.
    ///
    /// Fails when the next instant no longer fits the textual format.
    pub fn after(previous: Timestamp) -> DomainResult<Self> {
        let floor = previous
            .0
            .checked_add_signed(TimeDelta::microseconds(1))
            .filter(|next| YEARS.contains(&next.year()))
            .ok_or_else(|| DomainError::format(format!("no timestamp after {previous}")))?;
        let now = Self::now();
        Ok(if now.0 >= floor { now } else { Self(floor) })
    }

    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(value.trunc_subsecs(6))
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        let naive = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
            .map_err(|e| DomainError::format(format!("invalid timestamp {s:?}: {e}")))?;
        if !YEARS.contains(&naive.year()) {
            return Err(DomainError::format(format!(
                "invalid timestamp {s:?}: year out of range"
            )));
        }
        let parsed = Self(naive.and_utc());
        // chrono accepts a missing or shorter fraction; the format does not.
        if parsed.to_string() != s {
            return Err(DomainError::format(format!(
                "invalid timestamp {s:?}: expected {TIMESTAMP_FORMAT}"
            )));
        }
        Ok(parsed)
    }
}

impl core::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.naive_utc().format(TIMESTAMP_FORMAT))
    }
}

impl core::str::FromStr for Timestamp {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
