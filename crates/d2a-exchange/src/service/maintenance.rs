use tracing::debug;

use super::core::{load_or_none, ExchangeService};
use crate::domain::{PeerReputationLedger, PublishGateLedger, PEER_LEDGER_KEY, PUBLISH_LEDGER_KEY};
use crate::ports::{LedgerStore, RelayTransport, TrustGraph};

impl<T: RelayTransport, G: TrustGraph, S: LedgerStore> ExchangeService<T, G, S> {
    /// Drop rejected, delivered and expired handshakes, and forget inbound
    /// event ids too old to be admitted again. Returns how many handshakes
    /// were dropped.
    pub fn evict_finished_handshakes(&mut self) -> usize {
        let now = self.now();
        let forgotten = self.replay_guard.evict(now);
        if forgotten > 0 {
            debug!(forgotten, "Forgot stale inbound event ids");
        }
        let evicted = self.registry.evict_finished(now);
        if evicted > 0 {
            debug!(evicted, remaining = self.registry.len(), "Evicted finished handshakes");
        }
        evicted
    }

    /// Refresh both cached ledgers from the store, picking up writes made
    /// by another process sharing it.
    pub fn reload_ledgers(&mut self) {
        self.peer_ledger = PeerReputationLedger::from_snapshot(
            load_or_none(&self.store, PEER_LEDGER_KEY).as_deref(),
        );
        self.publish_ledger = PublishGateLedger::from_snapshot(
            load_or_none(&self.store, PUBLISH_LEDGER_KEY).as_deref(),
        );
    }
}
