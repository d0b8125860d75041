//! Clocks for time-bounded polling.
//!
//! Polling loops read time and sleep only through [`Clock`], so tests can
//! swap in [`FakeClock`] and run a multi-second budget in microseconds.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Monotonic time source with an async sleep
#[async_trait]
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Milliseconds elapsed since the clock's origin
    fn now_ms(&self) -> u64;

    /// Suspend the caller for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Thread-safe clock handle
pub type SharedClock = Arc<dyn Clock>;

/// Wall clock backed by the tokio timer.
///
/// Uses `tokio::time::Instant`, so a runtime started with paused time
/// advances it too.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: tokio::time::Instant,
}

impl TokioClock {
    /// Create a clock whose origin is now
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }

    /// Shared handle to a fresh clock
    #[must_use]
    pub fn shared() -> SharedClock {
        Arc::new(Self::new())
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for TokioClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Fake clock for deterministic tests.
///
/// Time only moves when someone sleeps on it or calls
/// [`FakeClock::fast_forward`]. Sleeping advances time instantly and yields
/// to the scheduler once.
#[derive(Debug, Default)]
pub struct FakeClock {
    current_ms: AtomicU64,
    sleeps: AtomicU64,
}

impl FakeClock {
    /// Create a fake clock at time zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fake clock at `time_ms`
    #[must_use]
    pub fn at(time_ms: u64) -> Self {
        Self {
            current_ms: AtomicU64::new(time_ms),
            sleeps: AtomicU64::new(0),
        }
    }

    /// Move time forward without sleeping
    pub fn fast_forward(&self, duration: Duration) {
        self.fast_forward_ms(duration.as_millis() as u64);
    }

    /// Move time forward by `ms` milliseconds
    pub fn fast_forward_ms(&self, ms: u64) {
        self.current_ms.fetch_add(ms, Ordering::SeqCst);
    }

    /// Number of times [`Clock::sleep`] was awaited
    #[must_use]
    pub fn sleep_count(&self) -> u64 {
        self.sleeps.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.current_ms.load(Ordering::SeqCst)
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
        self.fast_forward(duration);
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod fake_clock_tests {
        use super::*;

        #[test]
        fn test_new_starts_at_zero() {
            let clock = FakeClock::new();
            assert_eq!(clock.now_ms(), 0);
            assert_eq!(clock.sleep_count(), 0);
        }

        #[test]
        fn test_at_sets_origin() {
            assert_eq!(FakeClock::at(1_000).now_ms(), 1_000);
        }

        #[test]
        fn test_fast_forward() {
            let clock = FakeClock::new();
            clock.fast_forward(Duration::from_millis(250));
            clock.fast_forward_ms(50);
            assert_eq!(clock.now_ms(), 300);
        }

        #[tokio::test]
        async fn test_sleep_advances_time() {
            let clock = FakeClock::new();
            clock.sleep(Duration::from_millis(300)).await;
            clock.sleep(Duration::from_millis(300)).await;
            assert_eq!(clock.now_ms(), 600);
            assert_eq!(clock.sleep_count(), 2);
        }

        #[tokio::test]
        async fn test_shared_handle() {
            let fake = Arc::new(FakeClock::new());
            let shared: SharedClock = fake.clone();
            shared.sleep(Duration::from_millis(10)).await;
            assert_eq!(fake.now_ms(), 10);
        }
    }

    mod tokio_clock_tests {
        use super::*;

        #[tokio::test]
        async fn test_sleep_moves_time_forward() {
            let clock = TokioClock::new();
            clock.sleep(Duration::from_millis(20)).await;
            assert!(clock.now_ms() >= 20);
        }

        #[test]
        fn test_copy_shares_origin() {
            let clock = TokioClock::new();
            let copy = clock;
            assert_eq!(copy.origin, clock.origin);
        }
    }
}
