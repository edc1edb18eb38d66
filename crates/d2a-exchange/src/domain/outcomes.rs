//! # Operation Outcomes
//!
//! Results the service hands back to the embedding application.

use serde::{Deserialize, Serialize};

use super::handshake::HandshakeState;
use super::message::{CommentPayload, DeliverPayload, OfferPayload};
use super::trust::TrustTier;
use super::value_objects::PeerId;

/// Everything the local agent knows about a candidate peer at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerAssessment {
    /// Candidate
    pub peer_id: PeerId,
    /// Jaccard resonance in `[0, 1]`
    pub resonance: f64,
    /// Blended trust in `[0, 1]`
    pub effective_trust: f64,
    /// Trust band (restricted when blocked)
    pub tier: TrustTier,
    /// Fee for the next exchange
    pub fee: u64,
    /// Whether an offer should be sent
    pub eligible: bool,
}

/// A verified inbound message and its effect on the handshake registry.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// A peer proposed content; a responder handshake was opened.
    Offer {
        /// Sender
        from: PeerId,
        /// Offer contents
        offer: OfferPayload,
        /// Newly tracked handshake
        handshake: HandshakeState,
    },
    /// Our offer was accepted.
    Accepted {
        /// Sender
        from: PeerId,
        /// Updated handshake
        handshake: HandshakeState,
    },
    /// Our offer was rejected.
    Rejected {
        /// Sender
        from: PeerId,
        /// Updated handshake
        handshake: HandshakeState,
    },
    /// Content we accepted arrived.
    Delivered {
        /// Sender
        from: PeerId,
        /// Delivered content
        content: DeliverPayload,
        /// Updated handshake
        handshake: HandshakeState,
    },
    /// A comment on previously delivered content.
    Comment {
        /// Sender
        from: PeerId,
        /// Comment contents
        comment: CommentPayload,
    },
}

impl InboundEvent {
    /// Sender of the message.
    pub fn from(&self) -> &PeerId {
        match self {
            Self::Offer { from, .. }
            | Self::Accepted { from, .. }
            | Self::Rejected { from, .. }
            | Self::Delivered { from, .. }
            | Self::Comment { from, .. } => from,
        }
    }
}
