//! Handshake data types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{PeerId, Timestamp};

/// Lifecycle phase of a handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandshakePhase {
    /// Offer sent or received, awaiting a response
    Offered,
    /// Recipient agreed to receive the content
    Accepted,
    /// Recipient declined
    Rejected,
    /// Content handed over
    Delivered,
    /// Timed out before reaching a terminal phase
    Expired,
}

impl HandshakePhase {
    /// Check if transition is valid.
    ///
    /// Forward moves are `offered -> accepted | rejected` and
    /// `accepted -> delivered`; any non-terminal phase may move sideways to
    /// `expired`.
    pub fn can_transition_to(&self, next: HandshakePhase) -> bool {
        match (self, next) {
            (Self::Offered, Self::Accepted) => true,
            (Self::Offered, Self::Rejected) => true,
            (Self::Accepted, Self::Delivered) => true,
            (current, Self::Expired) => !current.is_terminal(),
            _ => false,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Delivered | Self::Expired)
    }

    /// Wire/log literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Offered => "offered",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Delivered => "delivered",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for HandshakePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the negotiation the local agent is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandshakeRole {
    /// Local agent sent the offer and will deliver
    Initiator,
    /// Local agent received the offer and will accept or reject
    Responder,
}

/// One in-flight negotiation with one peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandshakeState {
    /// Counterparty
    pub peer_id: PeerId,
    /// Current phase
    pub phase: HandshakePhase,
    /// Topic named in the offer
    pub offered_topic: String,
    /// Quality score named in the offer, in `[0, 10]`
    pub offered_score: f64,
    /// When the offer was created
    pub started_at: Timestamp,
    /// Local side of the negotiation
    pub role: HandshakeRole,
}

impl HandshakeState {
    /// Fresh handshake in the `offered` phase.
    pub fn offered(
        peer_id: PeerId,
        topic: impl Into<String>,
        score: f64,
        started_at: Timestamp,
        role: HandshakeRole,
    ) -> Self {
        Self {
            peer_id,
            phase: HandshakePhase::Offered,
            offered_topic: topic.into(),
            offered_score: score,
            started_at,
            role,
        }
    }

    /// Milliseconds since the offer.
    pub fn age_ms(&self, now: Timestamp) -> u64 {
        now.millis_since(self.started_at)
    }
}
