use async_trait::async_trait;
use tracing::info;

use super::core::ExchangeService;
use crate::domain::{
    CommentPayload, DeliverPayload, ExchangeError, HandshakePhase, HandshakeRole, HandshakeState,
    InboundEvent, MessageBody, OfferPayload, PeerAssessment, PeerId, PeerProfile,
    PreferenceProfile, PublishGateDecision, Verdict,
};
use crate::ports::{AgentExchangeApi, LedgerStore, PublishOutcome, RelayTransport, TrustGraph};
use crate::protocol::SignedEvent;

impl<T: RelayTransport, G: TrustGraph, S: LedgerStore> ExchangeService<T, G, S> {
    /// Current handshake with `peer` if it is in `role` and may move to
    /// `next`.
    fn expect_transition(
        &self,
        peer: &PeerId,
        role: HandshakeRole,
        next: HandshakePhase,
    ) -> Result<HandshakeState, ExchangeError> {
        let state = self
            .registry
            .get(peer, self.now())
            .filter(|s| s.role == role)
            .ok_or_else(|| ExchangeError::NoActiveHandshake(peer.clone()))?;
        if !state.phase.can_transition_to(next) {
            return Err(ExchangeError::InvalidTransition {
                from: state.phase,
                to: next,
            });
        }
        Ok(state)
    }

    /// Publish a phase-changing response, then advance the registry.
    async fn respond(
        &mut self,
        peer: &PeerId,
        body: MessageBody,
        role: HandshakeRole,
        next: HandshakePhase,
    ) -> Result<HandshakeState, ExchangeError> {
        let now = self.now();
        self.expect_transition(peer, role, next)?;
        self.publish_to(peer, body, now).await?;

        let state = self.registry.advance(peer, next, now)?;
        info!(peer = %peer, phase = %state.phase, "Handshake advanced");
        Ok(state)
    }
}

#[async_trait]
impl<T: RelayTransport, G: TrustGraph, S: LedgerStore> AgentExchangeApi
    for ExchangeService<T, G, S>
{
    fn evaluate_peer(&self, profile: &PreferenceProfile, peer: &PeerProfile) -> PeerAssessment {
        self.assess(profile, peer)
    }

    async fn send_offer(
        &mut self,
        peer: &PeerId,
        offer: OfferPayload,
    ) -> Result<HandshakeState, ExchangeError> {
        let now = self.now();
        self.registry.ensure_available(peer, now)?;
        self.ensure_can_transact(peer)?;

        let state = HandshakeState::offered(
            peer.clone(),
            offer.topic.clone(),
            offer.score,
            now,
            HandshakeRole::Initiator,
        );
        self.publish_to(peer, MessageBody::Offer(offer), now).await?;
        self.registry.begin(state.clone(), now)?;

        info!(peer = %peer, topic = %state.offered_topic, "Offer sent");
        Ok(state)
    }

    async fn send_accept(&mut self, peer: &PeerId) -> Result<HandshakeState, ExchangeError> {
        self.ensure_can_transact(peer)?;
        self.respond(
            peer,
            MessageBody::Accept,
            HandshakeRole::Responder,
            HandshakePhase::Accepted,
        )
        .await
    }

    async fn send_reject(&mut self, peer: &PeerId) -> Result<HandshakeState, ExchangeError> {
        self.respond(
            peer,
            MessageBody::Reject,
            HandshakeRole::Responder,
            HandshakePhase::Rejected,
        )
        .await
    }

    async fn send_deliver(
        &mut self,
        peer: &PeerId,
        content: DeliverPayload,
    ) -> Result<HandshakeState, ExchangeError> {
        self.respond(
            peer,
            MessageBody::Deliver(content),
            HandshakeRole::Initiator,
            HandshakePhase::Delivered,
        )
        .await
    }

    async fn send_comment(
        &mut self,
        peer: &PeerId,
        comment: CommentPayload,
    ) -> Result<PublishOutcome, ExchangeError> {
        let now = self.now();
        let outcome = self
            .publish_to(peer, MessageBody::Comment(comment), now)
            .await?;
        info!(peer = %peer, relays = outcome.published.len(), "Comment sent");
        Ok(outcome)
    }

    fn handle_incoming(&mut self, event: &SignedEvent) -> Option<InboundEvent> {
        self.process_event(event)
    }

    fn handshake(&self, peer: &PeerId) -> Option<HandshakeState> {
        self.registry.get(peer, self.now())
    }

    fn record_outcome(&mut self, peer: &PeerId, verdict: Verdict) -> Result<i64, ExchangeError> {
        let score = self.update_peer_ledger(|ledger, now| match verdict {
            Verdict::Quality => ledger.record_useful(peer, now),
            Verdict::Slop => ledger.record_slop(peer, now),
        })?;
        info!(
            peer = %peer,
            verdict = verdict.as_str(),
            score,
            blocked = self.peer_ledger.is_blocked(peer),
            "Peer reputation updated"
        );
        Ok(score)
    }

    fn publish_gate(&self) -> PublishGateDecision {
        self.publish_ledger
            .check_publish_gate(&self.local_id, self.now())
    }

    fn record_publish_validation(&mut self) -> Result<i64, ExchangeError> {
        let me = self.local_id.clone();
        let score =
            self.update_publish_ledger(|ledger, now| ledger.record_publish_validation(&me, now))?;
        info!(score, "Publish validation recorded");
        Ok(score)
    }

    fn record_publish_flag(&mut self) -> Result<i64, ExchangeError> {
        let me = self.local_id.clone();
        let score = self.update_publish_ledger(|ledger, now| ledger.record_publish_flag(&me, now))?;
        info!(score, "Publish flag recorded");
        Ok(score)
    }
}
