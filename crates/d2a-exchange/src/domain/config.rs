//! # Exchange Configuration
//!
//! Tunables for one local agent. Everything has a default so that an agent
//! with no config file still runs (with no relays, every publish fails).

use super::handshake::{HandshakeConfig, HANDSHAKE_TIMEOUT_MS};
use super::resonance::HIGH_AFFINITY_THRESHOLD;

/// Default discovery freshness window (1 hour).
pub const DEFAULT_PEER_STALE_AFTER_MS: u64 = 60 * 60 * 1_000;

/// Default per-relay publish timeout.
pub const DEFAULT_RELAY_TIMEOUT_MS: u64 = 5_000;

/// Exchange configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeConfig {
    /// Relay URIs every message fans out to
    pub relays: Vec<String>,
    /// Minimum resonance before proposing a handshake
    pub resonance_threshold: f64,
    /// Handshake expiry (defaults to the fixed protocol timeout)
    pub handshake_timeout_ms: u64,
    /// Peers not seen for longer than this are not eligible
    pub peer_stale_after_ms: u64,
    /// Per-relay publish timeout used by the relay pool
    pub relay_timeout_ms: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            relays: Vec::new(),
            resonance_threshold: HIGH_AFFINITY_THRESHOLD,
            handshake_timeout_ms: HANDSHAKE_TIMEOUT_MS,
            peer_stale_after_ms: DEFAULT_PEER_STALE_AFTER_MS,
            relay_timeout_ms: DEFAULT_RELAY_TIMEOUT_MS,
        }
    }
}

impl ExchangeConfig {
    /// Config with the given relays and defaults elsewhere.
    pub fn with_relays<I, S>(relays: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            relays: relays.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Handshake expiry settings derived from this config.
    pub fn handshake_config(&self) -> HandshakeConfig {
        HandshakeConfig {
            timeout_ms: self.handshake_timeout_ms,
        }
    }
}
