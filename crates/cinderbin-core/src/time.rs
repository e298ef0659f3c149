//! Timestamps with no clock attached
//!
//! Core code never reads the system clock; callers pass `now` in. The server
//! owns the one place that actually asks the OS for the time.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Seconds since the Unix epoch.
///
/// Second resolution is all expiry needs; the shortest retention window is
/// five minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Construct from whole seconds since the epoch.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Whole seconds since the epoch.
    pub const fn as_secs(self) -> u64 {
        self.0
    }

    /// Add an offset, saturating at the far end of representable time.
    ///
    /// Saturation instead of wrap: an absurd offset must never produce a
    /// timestamp in the past, which would expire the paste immediately.
    pub fn saturating_add(self, offset: Duration) -> Self {
        Self(self.0.saturating_add(offset.as_secs()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
