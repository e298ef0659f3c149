//! Background expiry sweeper.
//!
//! Reads already purge expired pastes on contact; the sweeper exists for the
//! pastes nobody asks for again. It is a plain interval loop over
//! [`PasteService::sweep`] with an explicit stop channel, so tests can shut
//! it down deterministically instead of abandoning a task.

use std::time::Duration;

use cinderbin_core::PasteStore;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

use crate::{clock::Clock, service::PasteService};

/// Handle to the background sweep task.
///
/// Dropping the handle also stops the task: once the stop channel is gone
/// the loop exits on its next wakeup.
pub struct Sweeper {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    /// Spawn a sweep loop over `service` that fires every `interval`.
    ///
    /// The first sweep runs one full interval after start, not immediately.
    pub fn start<S: PasteStore, C: Clock>(
        service: PasteService<S, C>,
        interval: Duration,
    ) -> Self {
        let (stop, mut stopped) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // An interval's first tick completes immediately; consume it so
            // the first sweep waits one full period.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = service.sweep().await {
                            warn!(error = %e, "sweep failed, will retry next interval");
                        }
                    },
                    changed = stopped.changed() => {
                        if changed.is_err() || *stopped.borrow() {
                            break;
                        }
                    },
                }
            }

            debug!("sweeper stopped");
        });

        Self { stop, handle }
    }

    /// Stop the loop and wait for it to finish.
    ///
    /// Any sweep already in flight completes first.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use cinderbin_core::{PasteRecord, Timestamp};

    use super::*;
    use crate::{clock::SystemClock, storage::MemoryStore};

    fn expired_record(id_hex: &str) -> PasteRecord {
        PasteRecord {
            id: id_hex.parse().expect("valid test id"),
            encrypted_content: "Y2lwaGVy".to_string(),
            nonce: "bm9uY2U=".to_string(),
            burn_after_reading: false,
            // Expired decades before any system clock reading
            expires_at: Some(Timestamp::from_secs(1)),
            created_at: Timestamp::from_secs(0),
        }
    }

    fn eternal_record(id_hex: &str) -> PasteRecord {
        PasteRecord { expires_at: None, ..expired_record(id_hex) }
    }

    #[tokio::test]
    async fn sweeper_removes_expired_and_keeps_the_rest() {
        let store = MemoryStore::new();
        store.put(&expired_record("00000000000000a1"), &[]).unwrap();
        store.put(&eternal_record("00000000000000a2"), &[]).unwrap();

        let service =
            PasteService::new(store.clone(), SystemClock::new(), Duration::from_secs(5));
        let sweeper = Sweeper::start(service, Duration::from_millis(20));

        let mut swept = false;
        for _ in 0..100 {
            if store.paste_count() == 1 {
                swept = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        sweeper.stop().await;

        assert!(swept, "expired paste was not swept within the polling window");
        let survivor = "00000000000000a2".parse().unwrap();
        assert!(store.get(&survivor).unwrap().is_some());
    }

    #[tokio::test]
    async fn stop_returns_before_the_first_tick() {
        let store = MemoryStore::new();
        store.put(&expired_record("00000000000000a1"), &[]).unwrap();

        let service =
            PasteService::new(store.clone(), SystemClock::new(), Duration::from_secs(5));
        let sweeper = Sweeper::start(service, Duration::from_secs(3_600));

        // The hour-long first interval must not delay shutdown.
        sweeper.stop().await;

        // Stopped before sweeping anything
        assert_eq!(store.paste_count(), 1);
    }
}
