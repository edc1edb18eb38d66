//! # Domain Errors
//!
//! Only two of the three D2A error classes ever surface as `Err`:
//! transport failure (`AllRelaysFailed`) and local programming or encoding
//! errors. Malformed inbound input resolves to `None` at the parse boundary
//! and corrupted persistence resolves to an empty ledger.

use shared_crypto::CryptoError;
use thiserror::Error;

use super::handshake::HandshakePhase;
use super::value_objects::PeerId;

/// Errors returned by D2A exchange operations.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// No relay accepted the message. Retryable by re-running the same step.
    #[error("All {attempted} relays failed to publish")]
    AllRelaysFailed {
        /// Number of relays the publish was attempted on
        attempted: usize,
    },

    /// Handshake phase cannot move from `from` to `to`.
    #[error("Invalid handshake transition: {from} -> {to}")]
    InvalidTransition {
        /// Current phase
        from: HandshakePhase,
        /// Attempted phase
        to: HandshakePhase,
    },

    /// A live handshake with this peer already exists.
    #[error("Handshake already in flight with {0}")]
    HandshakeInFlight(PeerId),

    /// No handshake with this peer is being tracked.
    #[error("No active handshake with {0}")]
    NoActiveHandshake(PeerId),

    /// Peer reputation is at or below the block threshold.
    #[error("Peer is blocked: {0}")]
    PeerBlocked(PeerId),

    /// Peer falls in the restricted trust tier and cannot transact.
    #[error("Peer is restricted: {0}")]
    PeerRestricted(PeerId),

    /// Identifier was empty or not a valid public key where one is needed.
    #[error("Invalid peer identifier: {0:?}")]
    InvalidPeerId(String),

    /// Outbound message could not be encoded.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Local cryptographic failure while sealing or signing.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Ledger store rejected a write.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors from a `LedgerStore` backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Backend I/O failure
    #[error("I/O error on {key}: {reason}")]
    Io {
        /// Ledger key being read or written
        key: String,
        /// Underlying error message
        reason: String,
    },

    /// Snapshot could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}
