//! # D2A Exchange - Agent-to-Agent Content Exchange
//!
//! Two independent agents discover shared interest, negotiate an encrypted
//! handoff of one piece of content, and adjust each other's standing based
//! on the outcome.
//!
//! ## Components
//!
//! | Component | Module |
//! |-----------|--------|
//! | Resonance matcher | [`domain::resonance`] |
//! | Handshake state machine | [`domain::handshake`] |
//! | Peer reputation ledger | [`domain::peer_reputation`] |
//! | Trust tiering & fee schedule | [`domain::trust`] |
//! | Publish gate | [`domain::publish_gate`] |
//! | Signed, encrypted envelopes | [`protocol`] |
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Pure, synchronous protocol logic
//! - **Ports Layer:** Relay transport, trust graph, ledger store, time, config
//! - **Service Layer:** [`ExchangeService`] wires domain to ports
//! - **Adapters Layer:** Concrete implementations (relay pool feature-gated)
//!
//! ## Error Classes
//!
//! - Malformed inbound input is dropped (`None`), never an error
//! - No relay accepting a message is `ExchangeError::AllRelaysFailed`, retryable
//! - Corrupt persisted ledgers load as empty
//!
//! ## Example
//!
//! ```rust
//! use d2a_exchange::{
//!     calculate_dynamic_fee, calculate_effective_trust, get_trust_tier, resonance, PeerId,
//!     PeerProfile, PreferenceProfile, Timestamp, TrustTier,
//! };
//!
//! let profile = PreferenceProfile::from_pairs([("rust", 0.9), ("ai", 0.5), ("golf", 0.1)]);
//! let peer = PeerProfile::new(PeerId::new("02ab").unwrap(), ["rust", "ai"], 3, Timestamp::new(0));
//! assert_eq!(resonance(&profile, &peer), 1.0);
//!
//! let tier = get_trust_tier(calculate_effective_trust(0.5, 4));
//! assert_eq!(tier, TrustTier::Known);
//! assert_eq!(calculate_dynamic_fee(tier), 100_000);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod domain;
pub mod ports;
pub mod protocol;
pub mod service;

// =============================================================================
// ADAPTERS
// =============================================================================

pub mod adapters;

// =============================================================================
// TEST UTILITIES
// =============================================================================

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// =============================================================================
// PUBLIC API RE-EXPORTS
// =============================================================================

// Components
pub use domain::{
    apply_reputation_recovery, calculate_dynamic_fee, calculate_effective_trust,
    get_trust_tier, is_handshake_expired, resonance,
};

// Types
pub use domain::{
    CommentPayload, ContentScores, DeliverPayload, ExchangeConfig, ExchangeError,
    ExchangeMessage, GraphTrust, HandshakePhase, HandshakeRegistry, HandshakeRole,
    HandshakeState, InboundEvent, MessageBody, MessageType, OfferPayload, PeerAssessment, PeerId,
    PeerProfile, PeerReputation, PeerReputationLedger, PreferenceProfile, PublishGateDecision,
    PublishGateLedger, PublishReputation, StoreError, Timestamp, TrustTier, Verdict,
};

// Ports
pub use ports::{
    AgentExchangeApi, ConfigProvider, LedgerStore, PublishOutcome, RelayTransport, TimeSource,
    TrustGraph,
};

// Protocol
pub use protocol::{open_event, seal_message, ReplayGuard, SignedEvent, D2A_EVENT_KIND};

// Service
pub use service::ExchangeService;

// Adapters
pub use adapters::{
    FileLedgerStore, InMemoryRelayNetwork, MemoryLedgerStore, StaticConfigProvider,
    StaticTrustGraph, SystemTimeSource,
};

#[cfg(feature = "network")]
pub use adapters::{ConfigError, RelayConnector, RelayError, RelayPool, TomlConfigProvider};

#[cfg(feature = "test-utils")]
pub use test_utils::{FixedTimeSource, ManualClock};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
