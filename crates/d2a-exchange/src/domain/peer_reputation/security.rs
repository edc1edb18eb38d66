//! Per-peer reputation record.
//!
//! SECURITY-CRITICAL: `score` is derived, never trusted from storage.

use serde::{Deserialize, Serialize};

use super::config::{PEER_BLOCK_THRESHOLD, SLOP_WEIGHT};
use crate::domain::{PeerId, Timestamp};

/// Useful/slop counters for one peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerReputation {
    peer_id: PeerId,
    useful: u32,
    slop: u32,
    score: i64,
    updated_at: Timestamp,
}

impl PeerReputation {
    /// Empty record created on the first recorded outcome.
    pub fn new(peer_id: PeerId, now: Timestamp) -> Self {
        Self {
            peer_id,
            useful: 0,
            slop: 0,
            score: 0,
            updated_at: now,
        }
    }

    /// Counterparty.
    pub fn peer_id(&self) -> &PeerId {
        &self.peer_id
    }

    /// Useful outcomes recorded.
    pub fn useful(&self) -> u32 {
        self.useful
    }

    /// Slop outcomes recorded.
    pub fn slop(&self) -> u32 {
        self.slop
    }

    /// `useful - slop * 3`.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Last mutation time.
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Whether the score is at or below the block threshold.
    pub fn is_blocked(&self) -> bool {
        self.score <= PEER_BLOCK_THRESHOLD
    }

    /// Record one useful outcome.
    pub fn record_useful(&mut self, now: Timestamp) {
        self.useful = self.useful.saturating_add(1);
        self.touch(now);
    }

    /// Record one slop outcome.
    pub fn record_slop(&mut self, now: Timestamp) {
        self.slop = self.slop.saturating_add(1);
        self.touch(now);
    }

    /// Re-derive the score from the counters (used after loading).
    pub(crate) fn recompute(&mut self) {
        self.score = i64::from(self.useful) - i64::from(self.slop) * SLOP_WEIGHT;
    }

    fn touch(&mut self, now: Timestamp) {
        self.recompute();
        self.updated_at = now;
    }
}
