//! Per-address serialization of verification sessions

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of one async mutex per email address
///
/// A verification session holds the guard for its whole lifetime, so a
/// second session for the same address waits until the first resolves.
/// Sessions for different addresses never contend.
#[derive(Default)]
pub(crate) struct SessionLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SessionLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to the address
    pub(crate) async fn acquire(&self, email: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // Entries nobody holds or waits on
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks
                .entry(email.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    pub(crate) fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_address_is_serialized() {
        let locks = SessionLocks::new();
        let guard = locks.acquire("user@dso.org.sg").await;

        let second = tokio::time::timeout(Duration::from_millis(20), locks.acquire("user@dso.org.sg")).await;
        assert!(second.is_err());

        drop(guard);
        let second = tokio::time::timeout(Duration::from_millis(20), locks.acquire("user@dso.org.sg")).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_different_addresses_do_not_contend() {
        let locks = SessionLocks::new();
        let _first = locks.acquire("a@dso.org.sg").await;
        let second = tokio::time::timeout(Duration::from_millis(20), locks.acquire("b@dso.org.sg")).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_released_entries_are_pruned() {
        let locks = SessionLocks::new();
        drop(locks.acquire("a@dso.org.sg").await);
        drop(locks.acquire("b@dso.org.sg").await);
        let _guard = locks.acquire("c@dso.org.sg").await;
        assert_eq!(locks.tracked(), 1);
    }
}
