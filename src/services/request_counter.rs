use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::AppResult;

/// Process-wide count of inbound requests.
///
/// Implementations are injected through the application state and live for
/// the lifetime of the server. Increments are best effort: a backend failure
/// must never fail the request being counted.
#[async_trait::async_trait]
pub trait RequestCounter: Send + Sync {
    /// Adds one, treating an uninitialised counter as 0, and returns the new value
    async fn increment(&self) -> AppResult<u64>;

    /// Returns the current value, 0 if nothing was counted yet
    async fn read(&self) -> AppResult<u64>;

    /// Sets the counter back to 0
    async fn reset(&self) -> AppResult<()>;
}

/// [`RequestCounter`] held in a single atomic integer.
///
/// Counts are exact within one process; a reset concurrent with increments
/// keeps whichever write lands last.
#[derive(Debug, Default)]
pub struct AtomicCounter {
    value: AtomicU64,
}

impl AtomicCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RequestCounter for AtomicCounter {
    async fn increment(&self) -> AppResult<u64> {
        Ok(self.value.fetch_add(1, Ordering::Relaxed) + 1)
    }

    async fn read(&self) -> AppResult<u64> {
        Ok(self.value.load(Ordering::Relaxed))
    }

    async fn reset(&self) -> AppResult<()> {
        self.value.store(0, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_starts_at_zero() {
        let counter = AtomicCounter::new();
        assert_eq!(assert_ok!(counter.read().await), 0);
    }

    #[tokio::test]
    async fn test_increment_returns_new_value() {
        let counter = AtomicCounter::new();
        assert_eq!(assert_ok!(counter.increment().await), 1);
        assert_eq!(assert_ok!(counter.increment().await), 2);
    }

    #[tokio::test]
    async fn test_reset() {
        let counter = AtomicCounter::new();
        counter.increment().await.unwrap();
        assert_ok!(counter.reset().await);
        assert_eq!(counter.read().await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let counter: Arc<dyn RequestCounter> = Arc::new(AtomicCounter::new());
        let workers = 64;

        let tasks: Vec<_> = (0..workers)
            .map(|_| {
                let counter = counter.clone();
                tokio::spawn(async move { counter.increment().await })
            })
            .collect();

        for task in tasks {
            assert_ok!(task.await.unwrap());
        }

        let total = counter.read().await.unwrap();
        assert!(total >= 1 && total <= workers);
        // the atomic backend never loses an increment
        assert_eq!(total, workers);
    }
}
