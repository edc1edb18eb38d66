//! Shared fixtures: agents on a common relay network, each with its own
//! on-disk ledger directory and a shared manual clock.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use d2a_exchange::test_utils::ManualClock;
use d2a_exchange::{
    AgentExchangeApi, ContentScores, DeliverPayload, ExchangeConfig, ExchangeService,
    FileLedgerStore, GraphTrust, InMemoryRelayNetwork, OfferPayload, PeerId, RelayConnector,
    RelayError, RelayPool, SignedEvent, StaticTrustGraph, Verdict,
};
use parking_lot::RwLock;
use shared_crypto::Secp256k1KeyPair;
use tempfile::TempDir;

pub(crate) const START: u64 = 1_700_000_000_000;
pub(crate) const DAY_MS: u64 = 24 * 60 * 60 * 1_000;
pub(crate) const RELAY_TIMEOUT: Duration = Duration::from_millis(500);

pub(crate) type Agent =
    ExchangeService<RelayPool<HarnessConnector>, StaticTrustGraph, FileLedgerStore>;

pub(crate) fn relays() -> Vec<String> {
    vec![
        "wss://relay-a".to_string(),
        "wss://relay-b".to_string(),
        "wss://relay-c".to_string(),
    ]
}

/// Connector over the shared in-memory network that can also stall relays.
#[derive(Clone)]
pub(crate) struct HarnessConnector {
    network: InMemoryRelayNetwork,
    stalled: Arc<RwLock<HashSet<String>>>,
}

impl HarnessConnector {
    pub(crate) fn stall(&self, relay: &str) {
        self.stalled.write().insert(relay.to_string());
    }
}

#[async_trait]
impl RelayConnector for HarnessConnector {
    async fn send(&self, relay: &str, event: &SignedEvent) -> Result<(), RelayError> {
        let stalled = self.stalled.read().contains(relay);
        if stalled {
            tokio::time::sleep(Duration::from_secs(3_600)).await;
        }
        self.network.send(relay, event).await
    }
}

/// A key plus everything needed to bring its agent back up after a restart.
pub(crate) struct Identity {
    pub(crate) id: PeerId,
    secret: [u8; 32],
    ledger_dir: std::path::PathBuf,
}

pub(crate) struct Harness {
    pub(crate) network: InMemoryRelayNetwork,
    pub(crate) connector: HarnessConnector,
    pub(crate) clock: ManualClock,
    pub(crate) trust_graph: StaticTrustGraph,
    dir: TempDir,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let network = InMemoryRelayNetwork::new();
        Self {
            connector: HarnessConnector {
                network: network.clone(),
                stalled: Arc::new(RwLock::new(HashSet::new())),
            },
            network,
            clock: ManualClock::new(START),
            trust_graph: StaticTrustGraph::new(),
            dir: TempDir::new().unwrap(),
        }
    }

    pub(crate) fn identity(&self, name: &str) -> Identity {
        let keypair = Secp256k1KeyPair::generate();
        Identity {
            id: PeerId::from_public_key(&keypair.public_key()),
            secret: keypair.to_bytes(),
            ledger_dir: self.dir.path().join(name),
        }
    }

    /// Start (or restart) the agent for `identity`.
    pub(crate) fn start(&self, identity: &Identity) -> Agent {
        let config = ExchangeConfig {
            relay_timeout_ms: RELAY_TIMEOUT.as_millis() as u64,
            ..ExchangeConfig::with_relays(relays())
        };
        ExchangeService::new(
            Secp256k1KeyPair::from_bytes(identity.secret).unwrap(),
            config.clone(),
            RelayPool::from_config(self.connector.clone(), &config),
            self.trust_graph.clone(),
            FileLedgerStore::new(&identity.ledger_dir),
            Box::new(self.clock.clone()),
        )
    }

    pub(crate) fn spawn(&self, name: &str) -> (Agent, Identity) {
        let identity = self.identity(name);
        (self.start(&identity), identity)
    }

    pub(crate) fn trust(&self, peer: &PeerId, trust_score: f64) {
        self.trust_graph.insert(
            peer.clone(),
            GraphTrust {
                hop_distance: Some(1),
                mutual_follows: 3,
                is_in_graph: true,
                trust_score,
            },
        );
    }

    /// Latest event addressed to `recipient`.
    pub(crate) fn inbox(&self, recipient: &PeerId) -> SignedEvent {
        self.network
            .events_for(recipient.as_str())
            .pop()
            .expect("an event for the recipient")
    }

    pub(crate) fn fail_all_relays(&self) {
        for relay in relays() {
            self.network.fail_relay(&relay);
        }
    }
}

pub(crate) fn offer(topic: &str) -> OfferPayload {
    OfferPayload {
        topic: topic.into(),
        score: 8.0,
        content_preview: format!("A close read on {topic}"),
    }
}

pub(crate) fn content(verdict: Verdict) -> DeliverPayload {
    DeliverPayload {
        text: "Full text of the piece".into(),
        scores: ContentScores {
            originality: 8.0,
            insight: 7.5,
            credibility: 9.0,
            composite: 8.2,
        },
        verdict,
        topics: vec!["rust".into()],
        v_signal: Some(0.8),
        c_context: Some(0.6),
        l_slop: Some(0.1),
    }
}

/// Offer, accept and deliver between two agents. Returns once `receiver`
/// has processed the delivery.
pub(crate) async fn exchange(
    harness: &Harness,
    sender: &mut Agent,
    sender_id: &PeerId,
    receiver: &mut Agent,
    receiver_id: &PeerId,
    verdict: Verdict,
) {
    sender.send_offer(receiver_id, offer("rust")).await.unwrap();
    receiver.handle_incoming(&harness.inbox(receiver_id)).unwrap();
    receiver.send_accept(sender_id).await.unwrap();
    sender.handle_incoming(&harness.inbox(sender_id)).unwrap();
    sender.send_deliver(receiver_id, content(verdict)).await.unwrap();
    receiver.handle_incoming(&harness.inbox(receiver_id)).unwrap();
}
