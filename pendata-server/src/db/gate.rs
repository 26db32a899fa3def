//! One-shot connection initialization.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::OnceCell;

/// A process-lifetime, lazily initialized slot for a store handle.
///
/// The first caller runs the connect future and caches the result. Callers
/// arriving while that attempt is in flight wait on it instead of racing
/// their own connections, so N simultaneous first requests produce exactly
/// one attempt. A failed attempt leaves the slot empty and the error goes to
/// the caller; the next request tries again.
pub struct ConnectionGate<T> {
    slot: OnceCell<T>,
    attempts: AtomicU64,
}

impl<T> ConnectionGate<T> {
    pub fn new() -> Self {
        Self {
            slot: OnceCell::new(),
            attempts: AtomicU64::new(0),
        }
    }

    /// Return the cached value, connecting on first use.
    ///
    /// Once set, the value is returned unchanged: no re-validation, no
    /// health check, no reconnection path.
    pub async fn get_or_connect<E, F, Fut>(&self, connect: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.slot
            .get_or_try_init(|| async {
                self.attempts.fetch_add(1, Ordering::Relaxed);
                connect().await
            })
            .await
    }

    /// The cached value, if a connection attempt has already succeeded.
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    /// Connection attempts made so far, successful or not.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }
}

impl<T> Default for ConnectionGate<T> {
    fn default() -> Self {
        Self::new()
    }
}
