//! # Temporal Types
//!
//! UTC-only timestamp type. All timestamps are stored in UTC and serialize
//! with a `Z` suffix; local time conversion is a presentation concern.
//!
//! Proofs are stamped at creation and checked for plausibility before a
//! submission is allowed onto the network: a timestamp that is non-positive
//! or in the future marks the proof invalid.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A UTC timestamp with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

/// Clock skew tolerance when deciding whether a timestamp is "in the
/// future". Remote proving services may run a few seconds ahead.
const FUTURE_SKEW_MS: i64 = 5_000;

impl Timestamp {
    /// The current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Construct from milliseconds since the Unix epoch.
    ///
    /// Returns `None` for values outside chrono's representable range.
    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Milliseconds since the Unix epoch.
    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Whether this timestamp is positive and not ahead of the local clock
    /// (beyond a small skew tolerance).
    pub fn is_plausible(&self) -> bool {
        let millis = self.unix_millis();
        millis > 0 && millis <= Utc::now().timestamp_millis() + FUTURE_SKEW_MS
    }

    /// ISO 8601 string with `Z` suffix, truncated to seconds.
    pub fn to_canonical_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}
