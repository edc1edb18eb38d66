//! # Driving Port (Inbound API)
//!
//! The API an embedding application uses to run D2A exchanges.

use async_trait::async_trait;

use crate::domain::{
    CommentPayload, DeliverPayload, ExchangeError, HandshakeState, InboundEvent, OfferPayload,
    PeerAssessment, PeerId, PeerProfile, PreferenceProfile, PublishGateDecision, Verdict,
};
use crate::ports::PublishOutcome;
use crate::protocol::SignedEvent;

/// Primary API for one local agent.
///
/// Send operations publish through the relay transport and only touch the
/// handshake registry once at least one relay accepted the message. Every
/// `AllRelaysFailed` is retryable by calling the same operation again.
///
/// # Example
///
/// ```rust,ignore
/// let assessment = agent.evaluate_peer(&profile, &peer);
/// if assessment.eligible {
///     agent.send_offer(&peer.peer_id, offer).await?;
/// }
/// ```
#[async_trait]
pub trait AgentExchangeApi: Send {
    /// Score a candidate peer: resonance, trust, tier, fee and eligibility.
    fn evaluate_peer(&self, profile: &PreferenceProfile, peer: &PeerProfile) -> PeerAssessment;

    /// Open a handshake by offering content to `peer`.
    ///
    /// # Errors
    ///
    /// - `HandshakeInFlight` if a live handshake with `peer` exists
    /// - `PeerBlocked` / `PeerRestricted` if the peer may not transact
    /// - `AllRelaysFailed` if no relay accepted the offer
    async fn send_offer(
        &mut self,
        peer: &PeerId,
        offer: OfferPayload,
    ) -> Result<HandshakeState, ExchangeError>;

    /// Accept an offer received from `peer`.
    async fn send_accept(&mut self, peer: &PeerId) -> Result<HandshakeState, ExchangeError>;

    /// Reject an offer received from `peer`.
    async fn send_reject(&mut self, peer: &PeerId) -> Result<HandshakeState, ExchangeError>;

    /// Deliver content to a peer that accepted our offer.
    ///
    /// On `AllRelaysFailed` the handshake stays `accepted`.
    async fn send_deliver(
        &mut self,
        peer: &PeerId,
        content: DeliverPayload,
    ) -> Result<HandshakeState, ExchangeError>;

    /// Comment on content exchanged with `peer`. Not part of the handshake.
    async fn send_comment(
        &mut self,
        peer: &PeerId,
        comment: CommentPayload,
    ) -> Result<PublishOutcome, ExchangeError>;

    /// Process an inbound event. `None` means it was ignored.
    fn handle_incoming(&mut self, event: &SignedEvent) -> Option<InboundEvent>;

    /// Current handshake with `peer`, expiry applied.
    fn handshake(&self, peer: &PeerId) -> Option<HandshakeState>;

    /// Settle a peer's reputation from a delivery verdict. Returns the new score.
    fn record_outcome(&mut self, peer: &PeerId, verdict: Verdict) -> Result<i64, ExchangeError>;

    /// Whether the local user may publish, with recovery applied.
    fn publish_gate(&self) -> PublishGateDecision;

    /// Record a community validation of the local user's signal.
    fn record_publish_validation(&mut self) -> Result<i64, ExchangeError>;

    /// Record a community flag on the local user's signal.
    fn record_publish_flag(&mut self) -> Result<i64, ExchangeError>;
}
