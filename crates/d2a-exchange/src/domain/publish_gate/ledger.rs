//! Publish gate ledger.

use std::collections::HashMap;

use tracing::debug;

use super::config::PUBLISH_LEDGER_KEY;
use super::recovery::apply_reputation_recovery;
use super::types::{PublishGateDecision, PublishReputation};
use crate::domain::persistence::{decode_entries, encode_entries};
use crate::domain::{PeerId, StoreError, Timestamp};

/// Publish reputation per publisher identity.
#[derive(Debug, Default, Clone)]
pub struct PublishGateLedger {
    records: HashMap<PeerId, PublishReputation>,
}

impl PublishGateLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a stored snapshot. Corrupt or missing data gives an
    /// empty ledger.
    pub fn from_snapshot(raw: Option<&str>) -> Self {
        let mut records = HashMap::new();
        for (key, mut record) in decode_entries::<PublishReputation>(PUBLISH_LEDGER_KEY, raw) {
            let Ok(pubkey) = PeerId::new(key) else {
                continue;
            };
            if record.pubkey() != &pubkey {
                debug!(pubkey = %pubkey, "Skipping publish entry with mismatched key");
                continue;
            }
            record.recompute();
            records.insert(pubkey, record);
        }
        Self { records }
    }

    /// Serialize as a versioned snapshot.
    pub fn to_snapshot(&self) -> Result<String, StoreError> {
        let mut entries: Vec<(String, PublishReputation)> = self
            .records
            .iter()
            .map(|(key, rec)| (key.as_str().to_string(), rec.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        encode_entries(entries)
    }

    /// Stored record (without recovery).
    pub fn get(&self, pubkey: &PeerId) -> Option<&PublishReputation> {
        self.records.get(pubkey)
    }

    /// Record a validation and return the new stored score.
    pub fn record_publish_validation(&mut self, pubkey: &PeerId, now: Timestamp) -> i64 {
        let record = self.entry(pubkey, now);
        record.record_validation(now);
        record.score()
    }

    /// Record a flag and return the new stored score.
    pub fn record_publish_flag(&mut self, pubkey: &PeerId, now: Timestamp) -> i64 {
        let record = self.entry(pubkey, now);
        record.record_flag(now);
        record.score()
    }

    /// Decide whether `pubkey` may publish at `now`.
    pub fn check_publish_gate(&self, pubkey: &PeerId, now: Timestamp) -> PublishGateDecision {
        match self.records.get(pubkey) {
            None => PublishGateDecision::first_time(),
            Some(record) => {
                PublishGateDecision::for_score(apply_reputation_recovery(record, now).score())
            }
        }
    }

    /// Number of publishers with a record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no publisher has a record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn entry(&mut self, pubkey: &PeerId, now: Timestamp) -> &mut PublishReputation {
        self.records
            .entry(pubkey.clone())
            .or_insert_with(|| PublishReputation::new(pubkey.clone(), now))
    }
}
