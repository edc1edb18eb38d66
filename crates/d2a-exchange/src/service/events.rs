use tracing::{debug, info};

use super::core::ExchangeService;
use crate::domain::{
    ExchangeMessage, HandshakePhase, HandshakeRole, HandshakeState, InboundEvent, MessageBody,
    PeerId, Timestamp,
};
use crate::ports::{LedgerStore, RelayTransport, TrustGraph};
use crate::protocol::{open_event, SignedEvent};

impl<T: RelayTransport, G: TrustGraph, S: LedgerStore> ExchangeService<T, G, S> {
    /// Parse boundary for inbound events. Anything unparseable, stale,
    /// replayed, unexpected or from a peer we will not deal with is dropped.
    pub(crate) fn process_event(&mut self, event: &SignedEvent) -> Option<InboundEvent> {
        let ExchangeMessage { from, body, .. } = open_event(&self.keypair, event)?;
        let now = self.now();
        self.replay_guard.admit(event, now).ok()?;

        if self.peer_ledger.is_blocked(&from) {
            debug!(peer = %from, kind = %body.message_type(), "Ignoring message from blocked peer");
            return None;
        }

        match body {
            MessageBody::Offer(offer) => {
                let handshake = HandshakeState::offered(
                    from.clone(),
                    offer.topic.clone(),
                    offer.score,
                    now,
                    HandshakeRole::Responder,
                );
                if let Err(e) = self.registry.begin(handshake.clone(), now) {
                    debug!(peer = %from, error = %e, "Ignoring offer");
                    return None;
                }
                info!(peer = %from, topic = %offer.topic, "Offer received");
                Some(InboundEvent::Offer {
                    from,
                    offer,
                    handshake,
                })
            }
            MessageBody::Accept => {
                let handshake = self.advance_inbound(&from, HandshakePhase::Accepted, now)?;
                Some(InboundEvent::Accepted { from, handshake })
            }
            MessageBody::Reject => {
                let handshake = self.advance_inbound(&from, HandshakePhase::Rejected, now)?;
                Some(InboundEvent::Rejected { from, handshake })
            }
            MessageBody::Deliver(content) => {
                let handshake = self.advance_inbound(&from, HandshakePhase::Delivered, now)?;
                Some(InboundEvent::Delivered {
                    from,
                    content,
                    handshake,
                })
            }
            MessageBody::Comment(comment) => {
                debug!(peer = %from, content = %comment.content_hash, "Comment received");
                Some(InboundEvent::Comment { from, comment })
            }
        }
    }

    /// Advance the handshake with `from` in response to its message.
    ///
    /// Accept and reject answer our offers; deliver answers our accept.
    fn advance_inbound(
        &mut self,
        from: &PeerId,
        next: HandshakePhase,
        now: Timestamp,
    ) -> Option<HandshakeState> {
        let expected_role = match next {
            HandshakePhase::Delivered => HandshakeRole::Responder,
            _ => HandshakeRole::Initiator,
        };
        let current = self.registry.get(from, now)?;
        if current.role != expected_role {
            debug!(peer = %from, phase = %next, "Ignoring message for the wrong side");
            return None;
        }

        match self.registry.advance(from, next, now) {
            Ok(state) => {
                info!(peer = %from, phase = %state.phase, "Handshake advanced by peer");
                Some(state)
            }
            Err(e) => {
                debug!(peer = %from, error = %e, "Ignoring out-of-order message");
                None
            }
        }
    }
}
