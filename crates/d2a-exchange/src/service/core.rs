use shared_crypto::Secp256k1KeyPair;
use tracing::{info, warn};

use crate::domain::{
    calculate_dynamic_fee, get_trust_tier, resonance, ExchangeConfig, ExchangeError,
    ExchangeMessage, HandshakeRegistry, MessageBody, PeerAssessment, PeerId, PeerProfile,
    PeerReputationLedger, PreferenceProfile, PublishGateLedger, Timestamp, TrustTier,
    PEER_LEDGER_KEY, PUBLISH_LEDGER_KEY,
};
use crate::ports::{
    ConfigProvider, LedgerStore, PublishOutcome, RelayTransport, TimeSource, TrustGraph,
};
use crate::protocol::{seal_message, ReplayGuard};

/// D2A exchange service for one local agent.
///
/// # Example
///
/// ```rust,ignore
/// use d2a_exchange::{ExchangeConfig, ExchangeService, InMemoryRelayNetwork, MemoryLedgerStore,
///     StaticTrustGraph, SystemTimeSource};
///
/// let service = ExchangeService::new(
///     keypair,
///     ExchangeConfig::with_relays(["wss://relay.example"]),
///     InMemoryRelayNetwork::new(),
///     StaticTrustGraph::new(),
///     MemoryLedgerStore::new(),
///     Box::new(SystemTimeSource::new()),
/// );
/// ```
pub struct ExchangeService<T: RelayTransport, G: TrustGraph, S: LedgerStore> {
    /// Signing and decryption identity
    pub(crate) keypair: Secp256k1KeyPair,
    /// `keypair`'s public key as an identity
    pub(crate) local_id: PeerId,
    pub(crate) config: ExchangeConfig,
    pub(crate) transport: T,
    pub(crate) trust_graph: G,
    pub(crate) store: S,
    pub(crate) time_source: Box<dyn TimeSource>,
    /// One handshake per peer
    pub(crate) registry: HandshakeRegistry,
    /// Ids of inbound events already processed
    pub(crate) replay_guard: ReplayGuard,
    /// Cache of the stored peer ledger
    pub(crate) peer_ledger: PeerReputationLedger,
    /// Cache of the stored publish ledger
    pub(crate) publish_ledger: PublishGateLedger,
}

impl<T: RelayTransport, G: TrustGraph, S: LedgerStore> ExchangeService<T, G, S> {
    /// Create a service, loading both ledgers from `store`.
    ///
    /// Unreadable or corrupt snapshots start empty.
    pub fn new(
        keypair: Secp256k1KeyPair,
        config: ExchangeConfig,
        transport: T,
        trust_graph: G,
        store: S,
        time_source: Box<dyn TimeSource>,
    ) -> Self {
        let local_id = PeerId::from_public_key(&keypair.public_key());
        let peer_ledger =
            PeerReputationLedger::from_snapshot(load_or_none(&store, PEER_LEDGER_KEY).as_deref());
        let publish_ledger =
            PublishGateLedger::from_snapshot(load_or_none(&store, PUBLISH_LEDGER_KEY).as_deref());

        info!(
            agent = %local_id,
            relays = config.relays.len(),
            known_peers = peer_ledger.len(),
            "D2A exchange service started"
        );

        Self {
            keypair,
            local_id,
            registry: HandshakeRegistry::new(config.handshake_config()),
            replay_guard: ReplayGuard::new(config.handshake_timeout_ms),
            config,
            transport,
            trust_graph,
            store,
            time_source,
            peer_ledger,
            publish_ledger,
        }
    }

    /// Create a service whose configuration comes from `provider`.
    pub fn from_config_provider(
        keypair: Secp256k1KeyPair,
        provider: &dyn ConfigProvider,
        transport: T,
        trust_graph: G,
        store: S,
        time_source: Box<dyn TimeSource>,
    ) -> Self {
        Self::new(
            keypair,
            provider.exchange_config(),
            transport,
            trust_graph,
            store,
            time_source,
        )
    }

    /// Local agent identity.
    pub fn local_id(&self) -> &PeerId {
        &self.local_id
    }

    /// Active configuration.
    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Handshake registry.
    pub fn registry(&self) -> &HandshakeRegistry {
        &self.registry
    }

    /// Cached peer ledger.
    pub fn peer_ledger(&self) -> &PeerReputationLedger {
        &self.peer_ledger
    }

    /// Cached publish ledger.
    pub fn publish_ledger(&self) -> &PublishGateLedger {
        &self.publish_ledger
    }

    /// The relay transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The trust graph.
    pub fn trust_graph(&self) -> &G {
        &self.trust_graph
    }

    /// The ledger store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn now(&self) -> Timestamp {
        self.time_source.now()
    }

    /// Effective trust and tier for `peer`. Blocked peers are restricted.
    pub(crate) fn trust_of(&self, peer: &PeerId) -> (f64, TrustTier) {
        let graph = self.trust_graph.lookup(peer);
        let effective = self.peer_ledger.effective_trust(peer, graph.trust_score);
        let tier = if self.peer_ledger.is_blocked(peer) {
            TrustTier::Restricted
        } else {
            get_trust_tier(effective)
        };
        (effective, tier)
    }

    pub(crate) fn assess(&self, profile: &PreferenceProfile, peer: &PeerProfile) -> PeerAssessment {
        let now = self.now();
        let resonance = resonance(profile, peer);
        let (effective_trust, tier) = self.trust_of(&peer.peer_id);
        let eligible = resonance >= self.config.resonance_threshold
            && !self.peer_ledger.is_blocked(&peer.peer_id)
            && tier.can_transact()
            && peer.capacity > 0
            && peer.is_fresh(now, self.config.peer_stale_after_ms);

        PeerAssessment {
            peer_id: peer.peer_id.clone(),
            resonance,
            effective_trust,
            tier,
            fee: calculate_dynamic_fee(tier),
            eligible,
        }
    }

    /// Fail unless `peer` may transact.
    pub(crate) fn ensure_can_transact(&self, peer: &PeerId) -> Result<(), ExchangeError> {
        if self.peer_ledger.is_blocked(peer) {
            return Err(ExchangeError::PeerBlocked(peer.clone()));
        }
        let (_, tier) = self.trust_of(peer);
        if !tier.can_transact() {
            return Err(ExchangeError::PeerRestricted(peer.clone()));
        }
        Ok(())
    }

    /// Seal `body` for `peer` and publish it to every configured relay.
    ///
    /// # Errors
    ///
    /// `AllRelaysFailed` when no relay accepted the event.
    pub(crate) async fn publish_to(
        &self,
        peer: &PeerId,
        body: MessageBody,
        now: Timestamp,
    ) -> Result<PublishOutcome, ExchangeError> {
        let message = ExchangeMessage::new(self.local_id.clone(), peer.clone(), body);
        let kind = message.message_type();
        let event = seal_message(&self.keypair, &message, now)?;

        let outcome = self.transport.publish(&event, &self.config.relays).await?;
        if !outcome.is_success() {
            warn!(
                peer = %peer,
                kind = %kind,
                attempted = outcome.attempted(),
                "No relay accepted message"
            );
            return Err(ExchangeError::AllRelaysFailed {
                attempted: outcome.attempted(),
            });
        }
        if !outcome.failed.is_empty() {
            warn!(peer = %peer, kind = %kind, failed = ?outcome.failed, "Partial relay failure");
        }
        Ok(outcome)
    }

    /// Load the peer ledger, apply `mutate`, save it and refresh the cache.
    pub(crate) fn update_peer_ledger<F>(&mut self, mutate: F) -> Result<i64, ExchangeError>
    where
        F: FnOnce(&mut PeerReputationLedger, Timestamp) -> i64,
    {
        let now = self.now();
        let raw = self.store.load(PEER_LEDGER_KEY)?;
        let mut ledger = PeerReputationLedger::from_snapshot(raw.as_deref());
        let score = mutate(&mut ledger, now);
        self.store.save(PEER_LEDGER_KEY, &ledger.to_snapshot()?)?;
        self.peer_ledger = ledger;
        Ok(score)
    }

    /// Load the publish ledger, apply `mutate`, save it and refresh the cache.
    pub(crate) fn update_publish_ledger<F>(&mut self, mutate: F) -> Result<i64, ExchangeError>
    where
        F: FnOnce(&mut PublishGateLedger, Timestamp) -> i64,
    {
        let now = self.now();
        let raw = self.store.load(PUBLISH_LEDGER_KEY)?;
        let mut ledger = PublishGateLedger::from_snapshot(raw.as_deref());
        let score = mutate(&mut ledger, now);
        self.store.save(PUBLISH_LEDGER_KEY, &ledger.to_snapshot()?)?;
        self.publish_ledger = ledger;
        Ok(score)
    }
}

/// Read a snapshot at startup. Store failures start the ledger empty.
pub(crate) fn load_or_none<S: LedgerStore>(store: &S, key: &str) -> Option<String> {
    match store.load(key) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(ledger = key, error = %e, "Ledger store unreadable, starting empty");
            None
        }
    }
}
