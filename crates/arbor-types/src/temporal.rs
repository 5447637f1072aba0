use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Wall-clock instant in milliseconds since the UNIX epoch.
///
/// Two sentinel values carry meaning in release windows: [`Timestamp::UNSET`]
/// is "no bound", and [`Timestamp::MAX`] is the conventional "never expires"
/// value stored in `date_expired`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// No bound / not set.
    pub const UNSET: Self = Self(0);

    /// The far end of time; used as the default expiry.
    pub const MAX: Self = Self(u64::MAX);

    /// Create a timestamp from milliseconds since the epoch.
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self(ms)
    }

    /// Milliseconds since the epoch.
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Returns `true` for the [`Timestamp::UNSET`] sentinel.
    pub const fn is_unset(&self) -> bool {
        self.0 == 0
    }

    /// The next representable instant (saturating at [`Timestamp::MAX`]).
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns `true` if this timestamp is strictly after `other`.
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }

    /// Returns `true` if this timestamp is strictly before `other`.
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    /// RFC 3339 rendering, or `None` when out of chrono's representable range.
    pub fn to_rfc3339(&self) -> Option<String> {
        let ms = i64::try_from(self.0).ok()?;
        chrono::DateTime::from_timestamp_millis(ms).map(|dt| dt.to_rfc3339())
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ms)", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unset() {
            return f.write_str("unset");
        }
        if *self == Self::MAX {
            return f.write_str("never");
        }
        match self.to_rfc3339() {
            Some(s) => f.write_str(&s),
            None => write!(f, "{}ms", self.0),
        }
    }
}

/// Validity interval of a resource.
///
/// Either end may be [`Timestamp::UNSET`]; a window with both ends set must
/// not end before it starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleaseWindow {
    pub released: Timestamp,
    pub expired: Timestamp,
}

impl ReleaseWindow {
    /// A window with no lower bound that never expires.
    pub const OPEN: Self = Self {
        released: Timestamp::UNSET,
        expired: Timestamp::MAX,
    };

    pub const fn new(released: Timestamp, expired: Timestamp) -> Self {
        Self { released, expired }
    }

    /// Returns `true` unless both ends are set and out of order.
    pub fn is_well_formed(&self) -> bool {
        self.released.is_unset() || self.expired.is_unset() || self.released <= self.expired
    }

    /// Returns `true` if `now` is at or after the release date.
    pub fn is_released(&self, now: Timestamp) -> bool {
        self.released.is_unset() || now >= self.released
    }

    /// Returns `true` if `now` is at or after the expiry date.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        !self.expired.is_unset() && now >= self.expired
    }

    /// Returns `true` if `now` lies inside the window.
    pub fn contains(&self, now: Timestamp) -> bool {
        self.is_released(now) && !self.is_expired(now)
    }
}

impl Default for ReleaseWindow {
    fn default() -> Self {
        Self::OPEN
    }
}
