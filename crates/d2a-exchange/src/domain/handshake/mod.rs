//! # Content Handshakes
//!
//! Offer -> Accept/Reject -> Deliver negotiation for handing one piece of
//! content to one peer.
//!
//! Expiry is lazy: nothing is scheduled. Every access re-checks the age of
//! the handshake against [`HANDSHAKE_TIMEOUT_MS`], so dropping a
//! [`HandshakeState`] is all the cleanup a cancelled negotiation needs.

// Semantic submodules
mod config;
mod registry;
mod security;
mod types;

// Re-export public API
pub use config::{HandshakeConfig, HANDSHAKE_TIMEOUT_MS};
pub use registry::HandshakeRegistry;
pub use security::{advance_handshake, effective_phase, is_handshake_expired};
pub use types::{HandshakePhase, HandshakeRole, HandshakeState};
