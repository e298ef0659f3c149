//! Expiry tokens
//!
//! A closed set of retention windows. Unknown tokens are rejected wherever
//! they enter the system; a typo must surface as an error, not as a paste
//! that silently lives forever.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How long a paste lives after creation.
///
/// The serialized form is the short token (`"5m"`, `"1h"`, `"never"`, ...).
/// Deserializing any other string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expiry {
    /// Five minutes
    #[serde(rename = "5m")]
    FiveMinutes,
    /// Ten minutes
    #[serde(rename = "10m")]
    TenMinutes,
    /// Thirty minutes
    #[serde(rename = "30m")]
    ThirtyMinutes,
    /// One hour
    #[serde(rename = "1h")]
    OneHour,
    /// Six hours
    #[serde(rename = "6h")]
    SixHours,
    /// Twelve hours
    #[serde(rename = "12h")]
    TwelveHours,
    /// One day
    #[serde(rename = "1d")]
    OneDay,
    /// Three days
    #[serde(rename = "3d")]
    ThreeDays,
    /// One week
    #[serde(rename = "1w")]
    OneWeek,
    /// Thirty days
    #[serde(rename = "1M")]
    OneMonth,
    /// No expiry; the paste lives until deleted or burned
    #[serde(rename = "never")]
    Never,
}

/// A token outside the supported set
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown expiry token: {0:?}")]
pub struct UnknownExpiry(pub String);

impl Expiry {
    /// Every supported value, in ascending retention order.
    pub const ALL: [Expiry; 11] = [
        Expiry::FiveMinutes,
        Expiry::TenMinutes,
        Expiry::ThirtyMinutes,
        Expiry::OneHour,
        Expiry::SixHours,
        Expiry::TwelveHours,
        Expiry::OneDay,
        Expiry::ThreeDays,
        Expiry::OneWeek,
        Expiry::OneMonth,
        Expiry::Never,
    ];

    /// Offset from creation to expiry; `None` means the paste never expires.
    ///
    /// Total over the enum: every variant maps, nothing falls through.
    pub fn offset(self) -> Option<Duration> {
        const MINUTE: u64 = 60;
        const HOUR: u64 = 60 * MINUTE;
        const DAY: u64 = 24 * HOUR;

        let seconds = match self {
            Expiry::FiveMinutes => 5 * MINUTE,
            Expiry::TenMinutes => 10 * MINUTE,
            Expiry::ThirtyMinutes => 30 * MINUTE,
            Expiry::OneHour => HOUR,
            Expiry::SixHours => 6 * HOUR,
            Expiry::TwelveHours => 12 * HOUR,
            Expiry::OneDay => DAY,
            Expiry::ThreeDays => 3 * DAY,
            Expiry::OneWeek => 7 * DAY,
            Expiry::OneMonth => 30 * DAY,
            Expiry::Never => return None,
        };
        Some(Duration::from_secs(seconds))
    }

    /// The wire token for this value.
    pub fn token(self) -> &'static str {
        match self {
            Expiry::FiveMinutes => "5m",
            Expiry::TenMinutes => "10m",
            Expiry::ThirtyMinutes => "30m",
            Expiry::OneHour => "1h",
            Expiry::SixHours => "6h",
            Expiry::TwelveHours => "12h",
            Expiry::OneDay => "1d",
            Expiry::ThreeDays => "3d",
            Expiry::OneWeek => "1w",
            Expiry::OneMonth => "1M",
            Expiry::Never => "never",
        }
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Expiry {
    type Err = UnknownExpiry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|expiry| expiry.token() == s)
            .ok_or_else(|| UnknownExpiry(s.to_string()))
    }
}
