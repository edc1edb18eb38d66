//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the embedding application provides.

use async_trait::async_trait;

use crate::domain::{ExchangeConfig, ExchangeError, GraphTrust, PeerId, StoreError, Timestamp};
use crate::protocol::SignedEvent;

/// Per-relay result of one publish attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Relays that accepted the event
    pub published: Vec<String>,
    /// Relays that failed or timed out
    pub failed: Vec<String>,
}

impl PublishOutcome {
    /// At least one relay accepted the event.
    pub fn is_success(&self) -> bool {
        !self.published.is_empty()
    }

    /// Number of relays attempted.
    pub fn attempted(&self) -> usize {
        self.published.len() + self.failed.len()
    }
}

/// Fan-out publication to a relay set.
///
/// # Contract
///
/// Partial failure is never an error: every relay ends up in exactly one of
/// `published` or `failed`. `Err` is reserved for local encoding failures.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// Publish `event` to every relay in `relays` concurrently.
    async fn publish(
        &self,
        event: &SignedEvent,
        relays: &[String],
    ) -> Result<PublishOutcome, ExchangeError>;
}

/// Trust graph lookups. Traversal happens elsewhere; this core only reads
/// the resulting score.
pub trait TrustGraph: Send + Sync {
    /// Graph answer for `peer`.
    fn lookup(&self, peer: &PeerId) -> GraphTrust;
}

/// Durable key-value storage for ledger snapshots.
pub trait LedgerStore: Send + Sync {
    /// Raw snapshot stored under `key`, `None` if nothing was ever saved.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the snapshot stored under `key`.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Abstract interface for time-related operations.
///
/// Enables deterministic testing by injecting controllable time sources.
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds.
    fn now(&self) -> Timestamp;
}

/// Abstract interface for configuration loading.
pub trait ConfigProvider: Send + Sync {
    /// Exchange configuration.
    fn exchange_config(&self) -> ExchangeConfig;
}
