//! Peer reputation ledger implementation.

use std::collections::HashMap;

use tracing::debug;

use super::config::PEER_LEDGER_KEY;
use super::security::PeerReputation;
use crate::domain::persistence::{decode_entries, encode_entries};
use crate::domain::trust::calculate_effective_trust;
use crate::domain::{PeerId, StoreError, Timestamp};

/// Reputation records for every peer that has produced an outcome.
#[derive(Debug, Default, Clone)]
pub struct PeerReputationLedger {
    /// Records per peer, created lazily
    records: HashMap<PeerId, PeerReputation>,
}

impl PeerReputationLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a stored snapshot. Corrupt or missing data gives an
    /// empty ledger; invalid keys are skipped.
    pub fn from_snapshot(raw: Option<&str>) -> Self {
        let mut records = HashMap::new();
        for (key, mut record) in decode_entries::<PeerReputation>(PEER_LEDGER_KEY, raw) {
            let Ok(peer_id) = PeerId::new(key) else {
                continue;
            };
            if record.peer_id() != &peer_id {
                debug!(peer = %peer_id, "Skipping ledger entry with mismatched key");
                continue;
            }
            record.recompute();
            records.insert(peer_id, record);
        }
        Self { records }
    }

    /// Serialize as a versioned snapshot.
    pub fn to_snapshot(&self) -> Result<String, StoreError> {
        let mut entries: Vec<(String, PeerReputation)> = self
            .records
            .iter()
            .map(|(id, rec)| (id.as_str().to_string(), rec.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        encode_entries(entries)
    }

    /// Record for `peer`, if any outcome was ever recorded.
    pub fn get(&self, peer: &PeerId) -> Option<&PeerReputation> {
        self.records.get(peer)
    }

    /// Score for `peer`, 0 when unknown.
    pub fn score(&self, peer: &PeerId) -> i64 {
        self.records.get(peer).map(PeerReputation::score).unwrap_or(0)
    }

    /// Record a useful outcome and return the new score.
    pub fn record_useful(&mut self, peer: &PeerId, now: Timestamp) -> i64 {
        let record = self.entry(peer, now);
        record.record_useful(now);
        record.score()
    }

    /// Record a slop outcome and return the new score.
    pub fn record_slop(&mut self, peer: &PeerId, now: Timestamp) -> i64 {
        let record = self.entry(peer, now);
        record.record_slop(now);
        record.score()
    }

    /// Whether `peer` is blocked. Unknown peers are not.
    pub fn is_blocked(&self, peer: &PeerId) -> bool {
        self.records
            .get(peer)
            .map(PeerReputation::is_blocked)
            .unwrap_or(false)
    }

    /// Blend graph trust with this ledger's score for `peer`.
    pub fn effective_trust(&self, peer: &PeerId, wot_score: f64) -> f64 {
        calculate_effective_trust(wot_score, self.score(peer))
    }

    /// Peers currently blocked.
    pub fn blocked_peers(&self) -> Vec<PeerId> {
        let mut blocked: Vec<PeerId> = self
            .records
            .values()
            .filter(|r| r.is_blocked())
            .map(|r| r.peer_id().clone())
            .collect();
        blocked.sort();
        blocked
    }

    /// Number of peers with a record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no outcomes were ever recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn entry(&mut self, peer: &PeerId, now: Timestamp) -> &mut PeerReputation {
        self.records
            .entry(peer.clone())
            .or_insert_with(|| PeerReputation::new(peer.clone(), now))
    }
}
