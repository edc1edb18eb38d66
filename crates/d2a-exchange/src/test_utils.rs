//! Test utilities for the exchange.
//!
//! Deterministic clocks for driving handshake expiry and reputation
//! recovery. Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust,ignore
//! use d2a_exchange::test_utils::ManualClock;
//! use d2a_exchange::TimeSource;
//!
//! let clock = ManualClock::new(1_000);
//! clock.advance(29_999);
//! assert_eq!(clock.now().as_millis(), 30_999);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::Timestamp;
use crate::ports::TimeSource;

/// A time source that always returns the same instant (milliseconds).
#[derive(Debug, Clone)]
pub struct FixedTimeSource {
    millis: u64,
}

impl FixedTimeSource {
    /// Create a fixed time source at `millis` since the epoch.
    pub fn new(millis: u64) -> Self {
        Self { millis }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.millis)
    }
}

/// Shared, manually advanced clock. Clones observe the same time, so a test
/// can keep one handle while the service owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock at `millis` since the epoch.
    pub fn new(millis: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(millis)),
        }
    }

    /// Move forward by `millis`.
    pub fn advance(&self, millis: u64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }

    /// Jump to an absolute instant.
    pub fn set(&self, millis: u64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.millis.load(Ordering::SeqCst))
    }
}
