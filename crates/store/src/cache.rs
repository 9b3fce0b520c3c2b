use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Explicit time-to-live memoization around a fallible async loader.
///
/// Holds `(loaded_at, value)` behind a mutex. The lock is held across the
/// load, so concurrent callers inside one window always observe a single
/// shared snapshot instead of racing the source.
pub struct TtlCache<T> {
    ttl: Duration,
    slot: Mutex<Option<Entry<T>>>,
}

struct Entry<T> {
    loaded_at: Instant,
    value: Arc<T>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached snapshot while it is fresh; otherwise runs the
    /// loader and stores its result. A loader failure leaves the slot
    /// untouched, so the next call retries.
    pub async fn get_or_load<F, Fut, E>(&self, loader: F) -> std::result::Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(entry) = slot.as_ref() {
            if entry.loaded_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&entry.value));
            }
        }

        let value = Arc::new(loader().await?);
        *slot = Some(Entry {
            loaded_at: Instant::now(),
            value: Arc::clone(&value),
        });
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn fresh_entries_are_served_without_reloading() {
        let cache = TtlCache::new(Duration::from_secs(3600));
        let loads = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_load(|| async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(vec![1, 2, 3])
                })
                .await
                .unwrap();
            assert_eq!(*value, vec![1, 2, 3]);
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stale_entries_are_rebuilt() {
        let cache = TtlCache::new(Duration::ZERO);
        let loads = AtomicUsize::new(0);

        for expected in 1..=3 {
            let value = cache
                .get_or_load(|| async {
                    Ok::<_, String>(loads.fetch_add(1, Ordering::SeqCst) + 1)
                })
                .await
                .unwrap();
            assert_eq!(*value, expected);
        }
    }

    #[tokio::test]
    async fn loader_errors_propagate_and_are_not_cached() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(3600));

        let err = cache
            .get_or_load(|| async { Err::<u32, _>("source unavailable".to_string()) })
            .await
            .unwrap_err();
        assert_eq!(err, "source unavailable");

        // The failure must not poison the slot: the next load succeeds.
        let value = cache
            .get_or_load(|| async { Ok::<_, String>(7) })
            .await
            .unwrap();
        assert_eq!(*value, 7);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_slot_for_retry() {
        let cache = TtlCache::new(Duration::ZERO);

        let first = cache
            .get_or_load(|| async { Ok::<_, String>(1) })
            .await
            .unwrap();
        assert_eq!(*first, 1);

        // Expired entry plus failing source: the error surfaces.
        let err = cache
            .get_or_load(|| async { Err::<u32, _>("down".to_string()) })
            .await
            .unwrap_err();
        assert_eq!(err, "down");

        // A later successful load repopulates.
        let second = cache
            .get_or_load(|| async { Ok::<_, String>(2) })
            .await
            .unwrap();
        assert_eq!(*second, 2);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_snapshot() {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(3600)));
        let loads = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let loads = Arc::clone(&loads);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_load(|| async move {
                        loads.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, String>(42u32)
                    })
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            assert_eq!(*handle.await.unwrap(), 42);
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }
}
