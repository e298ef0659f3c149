//! Wall-clock abstraction.
//!
//! Decouples lifecycle decisions from system time. Production uses
//! [`SystemClock`]; tests implement [`Clock`] with a settable timestamp and
//! drive expiry without sleeping.

use cinderbin_core::Timestamp;

/// Source of the current wall-clock time.
///
/// Implementations must be cheap to clone; every request reads the clock
/// once and passes the resulting [`Timestamp`] down, so a paste is judged
/// against a single instant.
pub trait Clock: Clone + Send + Sync + 'static {
    /// Current time in whole seconds since the Unix epoch.
    fn now(&self) -> Timestamp;
}

/// Production clock reading the system time.
///
/// # Panics
///
/// Panics if the system clock reports a time before the Unix epoch. A host
/// in that state cannot run expiry correctly, so refusing to continue beats
/// serving pastes against a nonsense clock.
#[derive(Clone, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    #[allow(clippy::disallowed_methods)]
    #[allow(clippy::expect_used)]
    fn now(&self) -> Timestamp {
        let secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("invariant: system clock is after Unix epoch (1970-01-01)")
            .as_secs();

        Timestamp::from_secs(secs)
    }
}
