//! Replay protection for inbound events.
//!
//! An event is admitted once, and only while it is fresh. Freshness bounds
//! how long an id has to be remembered, so the seen-set is evicted by time
//! instead of growing with traffic.

use std::collections::HashMap;

use tracing::debug;

use super::envelope::SignedEvent;
use crate::domain::{Timestamp, HANDSHAKE_TIMEOUT_MS};

/// How far ahead of the local clock an event may be dated.
pub const MAX_FUTURE_SKEW_MS: u64 = 10_000;

/// Remembered ids before an eviction pass is forced.
pub const DEFAULT_REPLAY_CAPACITY: usize = 10_000;

/// `created_at` has second resolution; an event may be up to this much
/// younger than its timestamp says.
const CREATED_AT_RESOLUTION_MS: u64 = 999;

/// Why an event was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayRejection {
    /// Older than the freshness window
    Stale,
    /// Dated too far in the future
    FromFuture,
    /// Id already admitted
    Duplicate,
}

/// Sliding-window record of admitted event ids.
#[derive(Debug, Clone)]
pub struct ReplayGuard {
    /// Admitted ids and their creation time
    seen: HashMap<String, Timestamp>,
    /// Maximum event age in milliseconds
    max_age_ms: u64,
    capacity: usize,
}

impl Default for ReplayGuard {
    fn default() -> Self {
        Self::new(HANDSHAKE_TIMEOUT_MS)
    }
}

impl ReplayGuard {
    /// Guard admitting events up to `max_age_ms` old.
    pub fn new(max_age_ms: u64) -> Self {
        Self::with_capacity(max_age_ms, DEFAULT_REPLAY_CAPACITY)
    }

    /// Guard with an explicit id capacity (at least 1).
    pub fn with_capacity(max_age_ms: u64, capacity: usize) -> Self {
        Self {
            seen: HashMap::new(),
            max_age_ms,
            capacity: capacity.max(1),
        }
    }

    /// Admit `event` at `now`, remembering its id.
    ///
    /// Call only for events whose id and signature were verified; otherwise
    /// a forged id could shadow a genuine event.
    pub fn admit(&mut self, event: &SignedEvent, now: Timestamp) -> Result<(), ReplayRejection> {
        let created = Timestamp::from_secs(event.created_at);
        if self.is_stale(created, now) {
            debug!(id = %event.id, "Dropping stale event");
            return Err(ReplayRejection::Stale);
        }
        if created.millis_since(now) > MAX_FUTURE_SKEW_MS {
            debug!(id = %event.id, "Dropping event dated in the future");
            return Err(ReplayRejection::FromFuture);
        }
        if self.seen.contains_key(&event.id) {
            debug!(id = %event.id, "Dropping replayed event");
            return Err(ReplayRejection::Duplicate);
        }

        if self.seen.len() >= self.capacity {
            self.evict(now);
        }
        if self.seen.len() >= self.capacity {
            // Still full of fresh ids: forget the oldest
            if let Some(oldest) = self
                .seen
                .iter()
                .min_by_key(|(_, created)| **created)
                .map(|(id, _)| id.clone())
            {
                self.seen.remove(&oldest);
            }
        }
        self.seen.insert(event.id.clone(), created);
        Ok(())
    }

    /// Forget ids too old to pass the freshness check. Returns how many.
    pub fn evict(&mut self, now: Timestamp) -> usize {
        let before = self.seen.len();
        let max_age_ms = self.max_age_ms;
        self.seen
            .retain(|_, created| !stale(*created, now, max_age_ms));
        before - self.seen.len()
    }

    /// Number of remembered ids.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether no ids are remembered.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    fn is_stale(&self, created: Timestamp, now: Timestamp) -> bool {
        stale(created, now, self.max_age_ms)
    }
}

fn stale(created: Timestamp, now: Timestamp, max_age_ms: u64) -> bool {
    now.millis_since(created.plus_millis(CREATED_AT_RESOLUTION_MS)) > max_age_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, created_secs: u64) -> SignedEvent {
        SignedEvent {
            id: id.to_string(),
            pubkey: String::new(),
            created_at: created_secs,
            kind: 0,
            tags: Vec::new(),
            content: String::new(),
            sig: String::new(),
        }
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut guard = ReplayGuard::default();
        let now = Timestamp::from_secs(100);

        assert_eq!(guard.admit(&event("a", 100), now), Ok(()));
        assert_eq!(guard.admit(&event("a", 100), now), Err(ReplayRejection::Duplicate));
        assert_eq!(guard.admit(&event("b", 100), now), Ok(()));
    }

    #[test]
    fn test_freshness_window() {
        let mut guard = ReplayGuard::new(30_000);

        // Created during second 100, so at most 30.999s old at 130.999
        assert!(guard.admit(&event("a", 100), Timestamp::new(130_999)).is_ok());
        assert_eq!(
            guard.admit(&event("b", 100), Timestamp::new(131_000)),
            Err(ReplayRejection::Stale)
        );
    }

    #[test]
    fn test_future_skew() {
        let mut guard = ReplayGuard::default();
        let now = Timestamp::from_secs(100);

        assert!(guard.admit(&event("a", 110), now).is_ok());
        assert_eq!(guard.admit(&event("b", 111), now), Err(ReplayRejection::FromFuture));
    }

    #[test]
    fn test_old_replay_stays_rejected_after_eviction() {
        let mut guard = ReplayGuard::default();
        assert!(guard.admit(&event("a", 100), Timestamp::from_secs(100)).is_ok());

        let day_later = Timestamp::from_secs(100 + 86_400);
        assert_eq!(guard.evict(day_later), 1);
        assert!(guard.is_empty());
        assert_eq!(guard.admit(&event("a", 100), day_later), Err(ReplayRejection::Stale));
    }

    #[test]
    fn test_capacity_bounds_memory() {
        let mut guard = ReplayGuard::with_capacity(30_000, 2);
        let now = Timestamp::from_secs(100);

        for id in ["a", "b", "c", "d"] {
            assert!(guard.admit(&event(id, 100), now).is_ok());
        }
        assert_eq!(guard.len(), 2);
    }

    #[test]
    fn test_full_guard_evicts_stale_ids_first() {
        let mut guard = ReplayGuard::with_capacity(30_000, 2);
        assert!(guard.admit(&event("old", 100), Timestamp::from_secs(100)).is_ok());
        assert!(guard.admit(&event("mid", 125), Timestamp::from_secs(125)).is_ok());

        let now = Timestamp::from_secs(140);
        assert!(guard.admit(&event("new", 140), now).is_ok());
        assert_eq!(guard.admit(&event("mid", 125), now), Err(ReplayRejection::Duplicate));
    }
}
