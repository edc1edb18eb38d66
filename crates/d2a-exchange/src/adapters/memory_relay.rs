//! In-memory relay network.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::ExchangeError;
use crate::ports::{PublishOutcome, RelayTransport};
use crate::protocol::SignedEvent;

#[derive(Debug, Default)]
struct NetworkState {
    /// `(relay, event)` in arrival order
    log: Vec<(String, SignedEvent)>,
    /// Relays that refuse every publish
    failing: HashSet<String>,
}

/// A set of relays living in process memory.
///
/// Clones share the same relays, so two agents handed clones of one network
/// can talk to each other. Usable directly as a [`RelayTransport`]
/// (sequential) or behind a `RelayPool` as its connector.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRelayNetwork {
    state: Arc<RwLock<NetworkState>>,
}

impl InMemoryRelayNetwork {
    /// Create an empty network where every relay is up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `relay` refuse every publish.
    pub fn fail_relay(&self, relay: &str) {
        self.state.write().failing.insert(relay.to_string());
    }

    /// Bring `relay` back up.
    pub fn restore_relay(&self, relay: &str) {
        self.state.write().failing.remove(relay);
    }

    /// Store `event` on `relay`. Returns `false` if the relay is down.
    pub fn accept(&self, relay: &str, event: &SignedEvent) -> bool {
        let mut state = self.state.write();
        if state.failing.contains(relay) {
            return false;
        }
        let duplicate = state
            .log
            .iter()
            .any(|(r, e)| r == relay && e.id == event.id);
        if !duplicate {
            state.log.push((relay.to_string(), event.clone()));
        }
        true
    }

    /// Events stored on `relay`.
    pub fn events_on(&self, relay: &str) -> Vec<SignedEvent> {
        self.state
            .read()
            .log
            .iter()
            .filter(|(r, _)| r == relay)
            .map(|(_, e)| e.clone())
            .collect()
    }

    /// Events tagged for `recipient` across all relays, each id once, in
    /// arrival order.
    pub fn events_for(&self, recipient: &str) -> Vec<SignedEvent> {
        let state = self.state.read();
        let mut seen = HashSet::new();
        state
            .log
            .iter()
            .map(|(_, e)| e)
            .filter(|e| e.recipient() == Some(recipient))
            .filter(|e| seen.insert(e.id.clone()))
            .cloned()
            .collect()
    }

    /// Total events stored across relays, one per relay copy.
    pub fn stored_count(&self) -> usize {
        self.state.read().log.len()
    }
}

#[async_trait]
impl RelayTransport for InMemoryRelayNetwork {
    async fn publish(
        &self,
        event: &SignedEvent,
        relays: &[String],
    ) -> Result<PublishOutcome, ExchangeError> {
        let mut outcome = PublishOutcome::default();
        for relay in relays {
            if outcome.published.contains(relay) || outcome.failed.contains(relay) {
                continue;
            }
            if self.accept(relay, event) {
                outcome.published.push(relay.clone());
            } else {
                debug!(relay = %relay, "In-memory relay is down");
                outcome.failed.push(relay.clone());
            }
        }
        Ok(outcome)
    }
}

#[cfg(feature = "network")]
#[async_trait]
impl super::relay_pool::RelayConnector for InMemoryRelayNetwork {
    async fn send(
        &self,
        relay: &str,
        event: &SignedEvent,
    ) -> Result<(), super::relay_pool::RelayError> {
        if self.accept(relay, event) {
            Ok(())
        } else {
            Err(super::relay_pool::RelayError::Unreachable(relay.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExchangeMessage, MessageBody, PeerId, Timestamp};
    use crate::protocol::seal_message;
    use shared_crypto::Secp256k1KeyPair;

    fn accept_event(from: &Secp256k1KeyPair, to: &Secp256k1KeyPair) -> SignedEvent {
        let message = ExchangeMessage::new(
            PeerId::from_public_key(&from.public_key()),
            PeerId::from_public_key(&to.public_key()),
            MessageBody::Accept,
        );
        seal_message(from, &message, Timestamp::new(0)).unwrap()
    }

    #[tokio::test]
    async fn test_publish_partitions_and_recovers() {
        let network = InMemoryRelayNetwork::new();
        let alice = Secp256k1KeyPair::generate();
        let bob = Secp256k1KeyPair::generate();
        let relays = vec!["wss://a".to_string(), "wss://b".to_string()];

        network.fail_relay("wss://a");
        let outcome = network.publish(&accept_event(&alice, &bob), &relays).await.unwrap();
        assert_eq!(outcome.published, vec!["wss://b".to_string()]);
        assert_eq!(outcome.failed, vec!["wss://a".to_string()]);

        network.restore_relay("wss://a");
        let outcome = network.publish(&accept_event(&alice, &bob), &relays).await.unwrap();
        assert_eq!(outcome.published.len(), 2);
    }

    #[tokio::test]
    async fn test_events_for_dedupes_across_relays() {
        let network = InMemoryRelayNetwork::new();
        let alice = Secp256k1KeyPair::generate();
        let bob = Secp256k1KeyPair::generate();
        let relays = vec!["wss://a".to_string(), "wss://b".to_string()];

        network.publish(&accept_event(&alice, &bob), &relays).await.unwrap();

        assert_eq!(network.stored_count(), 2);
        assert_eq!(network.events_for(&bob.public_key().to_hex()).len(), 1);
        assert!(network.events_for(&alice.public_key().to_hex()).is_empty());
    }
}
