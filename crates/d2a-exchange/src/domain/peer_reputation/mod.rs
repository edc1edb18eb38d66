//! # Peer Reputation Ledger
//!
//! Behavioural reputation for remote agents, built from the outcomes of
//! completed handshakes. One slop delivery costs three useful ones.
//!
//! There is no decay: a blocked peer recovers only by earning `useful`
//! outcomes that lift its score back above the threshold.

// Semantic submodules
mod config;
mod ledger;
mod security;

// Re-export public API
pub use config::{PEER_BLOCK_THRESHOLD, PEER_LEDGER_KEY, SLOP_WEIGHT};
pub use ledger::PeerReputationLedger;
pub use security::PeerReputation;
