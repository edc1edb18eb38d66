//! Domain Layer - Pure protocol logic with no I/O
//!
//! This module contains the D2A exchange core:
//! - Resonance matching between local preferences and peer interests
//! - Handshake phases, lazy expiry and the per-peer registry
//! - Peer reputation ledger (useful/slop, blocking)
//! - Trust tiering and the dynamic fee schedule
//! - Publish gate over the local publisher's own signals
//! - The closed message type set and its parse boundary
//! - Exchange configuration and operation outcomes

pub mod config;
pub mod entities;
pub mod errors;
pub mod handshake;
pub mod message;
pub mod outcomes;
pub mod peer_reputation;
pub mod persistence;
pub mod publish_gate;
pub mod resonance;
pub mod trust;
pub mod value_objects;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use handshake::*;
pub use message::*;
pub use outcomes::*;
pub use peer_reputation::*;
pub use persistence::{LedgerSnapshot, LEDGER_SNAPSHOT_VERSION};
pub use publish_gate::*;
pub use resonance::*;
pub use trust::*;
pub use value_objects::*;
