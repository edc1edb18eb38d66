//! # End-to-End Exchange Choreography
//!
//! Two agents run a complete exchange over a shared relay network:
//!
//! ```text
//! [Alice]                         [Relays]                         [Bob]
//!    │ evaluate_peer(bob)            │                               │
//!    │── send_offer ────────────────→│── d2a-offer ─────────────────→│ handle_incoming
//!    │                               │←──────────────── send_accept ─│
//!    │ handle_incoming ←─ d2a-accept─│                               │
//!    │── send_deliver ──────────────→│── d2a-deliver ───────────────→│ handle_incoming
//!    │                               │                               │ record_outcome
//!    │                               │←─────────────── send_comment ─│
//!    │ handle_incoming ←─ d2a-comment│                               │
//! ```
//!
//! ## Test Categories
//!
//! 1. **Happy Path**: discovery through settlement
//! 2. **Reputation Effects**: slop leads to blocking, quality lowers fees
//! 3. **Publish Gate**: community flags, deposits and recovery

#[cfg(test)]
mod tests {
    use crate::integration::harness::*;
    use d2a_exchange::{
        AgentExchangeApi, CommentPayload, ExchangeError, HandshakePhase, HandshakeRole,
        InboundEvent, PeerProfile, PreferenceProfile, Timestamp, TrustTier, Verdict,
        D2A_EVENT_KIND,
    };

    fn profile() -> PreferenceProfile {
        PreferenceProfile::from_pairs([("rust", 0.9), ("distributed-systems", 0.7), ("golf", 0.1)])
    }

    // =========================================================================
    // TEST GROUP 1: Happy Path
    // =========================================================================

    #[tokio::test]
    async fn test_full_exchange_between_two_agents() {
        let harness = Harness::new();
        let (mut alice, alice_key) = harness.spawn("alice");
        let (mut bob, bob_key) = harness.spawn("bob");
        let (alice_id, bob_id) = (alice_key.id.clone(), bob_key.id.clone());
        harness.trust(&bob_id, 0.9);

        // Discovery
        let candidate = PeerProfile::new(
            bob_id.clone(),
            ["rust", "distributed-systems"],
            2,
            Timestamp::new(START),
        );
        let assessment = alice.evaluate_peer(&profile(), &candidate);
        assert!(assessment.eligible);
        assert_eq!(assessment.resonance, 1.0);
        assert_eq!(assessment.tier, TrustTier::Known);
        assert_eq!(assessment.fee, 100_000);

        // Offer
        alice.send_offer(&bob_id, offer("rust")).await.unwrap();
        let wire = harness.inbox(&bob_id);
        assert_eq!(wire.kind, D2A_EVENT_KIND);
        assert_eq!(harness.network.events_on("wss://relay-c").len(), 1);
        match bob.handle_incoming(&wire) {
            Some(InboundEvent::Offer { from, handshake, .. }) => {
                assert_eq!(from, alice_id);
                assert_eq!(handshake.role, HandshakeRole::Responder);
            }
            other => panic!("expected offer, got {other:?}"),
        }

        // Accept
        harness.clock.advance(2_000);
        bob.send_accept(&alice_id).await.unwrap();
        let accepted = alice.handle_incoming(&harness.inbox(&alice_id)).unwrap();
        assert!(matches!(accepted, InboundEvent::Accepted { .. }));

        // Deliver
        harness.clock.advance(2_000);
        alice.send_deliver(&bob_id, content(Verdict::Quality)).await.unwrap();
        let delivered = bob.handle_incoming(&harness.inbox(&bob_id)).unwrap();
        let verdict = match delivered {
            InboundEvent::Delivered { content, handshake, .. } => {
                assert_eq!(handshake.phase, HandshakePhase::Delivered);
                assert_eq!(handshake.started_at, Timestamp::new(START));
                content.verdict
            }
            other => panic!("expected delivery, got {other:?}"),
        };

        // Settle
        assert_eq!(bob.record_outcome(&alice_id, verdict).unwrap(), 1);
        assert_eq!(alice.handshake(&bob_id).unwrap().phase, HandshakePhase::Delivered);
        assert_eq!(bob.handshake(&alice_id).unwrap().phase, HandshakePhase::Delivered);

        // Comment travels outside the handshake
        let comment = CommentPayload {
            content_hash: content(Verdict::Quality).content_hash(),
            content_title: Some("A close read on rust".into()),
            comment: "Great breakdown of lifetimes.".into(),
            timestamp: Timestamp::new(START + 4_000),
        };
        let outcome = bob.send_comment(&alice_id, comment.clone()).await.unwrap();
        assert_eq!(outcome.published.len(), 3);
        match alice.handle_incoming(&harness.inbox(&alice_id)) {
            Some(InboundEvent::Comment { comment: received, .. }) => assert_eq!(received, comment),
            other => panic!("expected comment, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_third_agent_cannot_read_or_hijack() {
        let harness = Harness::new();
        let (mut alice, _) = harness.spawn("alice");
        let (_, bob_key) = harness.spawn("bob");
        let (mut eve, _) = harness.spawn("eve");

        alice.send_offer(&bob_key.id, offer("rust")).await.unwrap();
        assert!(eve.handle_incoming(&harness.inbox(&bob_key.id)).is_none());
        assert!(eve.handshake(&bob_key.id).is_none());
    }

    #[tokio::test]
    async fn test_replayed_offer_is_ignored() {
        let harness = Harness::new();
        let (mut alice, alice_key) = harness.spawn("alice");
        let (mut bob, bob_key) = harness.spawn("bob");

        alice.send_offer(&bob_key.id, offer("rust")).await.unwrap();
        let wire = harness.inbox(&bob_key.id);
        assert!(bob.handle_incoming(&wire).is_some());
        assert!(bob.handle_incoming(&wire).is_none());
        assert_eq!(bob.handshake(&alice_key.id).unwrap().phase, HandshakePhase::Offered);
    }

    // =========================================================================
    // TEST GROUP 2: Reputation Effects
    // =========================================================================

    #[tokio::test]
    async fn test_repeated_slop_blocks_sender() {
        let harness = Harness::new();
        let (mut alice, alice_key) = harness.spawn("alice");
        let (mut bob, bob_key) = harness.spawn("bob");
        let (alice_id, bob_id) = (alice_key.id.clone(), bob_key.id.clone());

        for _ in 0..2 {
            exchange(&harness, &mut alice, &alice_id, &mut bob, &bob_id, Verdict::Slop).await;
            bob.record_outcome(&alice_id, Verdict::Slop).unwrap();
            harness.clock.advance(1_000);
        }
        assert!(bob.peer_ledger().is_blocked(&alice_id));

        // Bob ignores further offers and refuses to start one
        alice.send_offer(&bob_id, offer("rust")).await.unwrap();
        assert!(bob.handle_incoming(&harness.inbox(&bob_id)).is_none());
        assert!(matches!(
            bob.send_offer(&alice_id, offer("rust")).await,
            Err(ExchangeError::PeerBlocked(_))
        ));

        let candidate = PeerProfile::new(alice_id.clone(), ["rust"], 1, Timestamp::new(START));
        let assessment = bob.evaluate_peer(&profile(), &candidate);
        assert_eq!(assessment.tier, TrustTier::Restricted);
        assert!(!assessment.eligible);
    }

    #[tokio::test]
    async fn test_quality_history_reaches_trusted_tier() {
        let harness = Harness::new();
        let (mut alice, alice_key) = harness.spawn("alice");
        let (mut bob, bob_key) = harness.spawn("bob");
        let (alice_id, bob_id) = (alice_key.id.clone(), bob_key.id.clone());
        harness.trust(&alice_id, 0.9);

        let candidate = PeerProfile::new(alice_id.clone(), ["rust"], 1, Timestamp::new(START));
        assert_eq!(bob.evaluate_peer(&profile(), &candidate).fee, 100_000);

        for _ in 0..10 {
            exchange(&harness, &mut alice, &alice_id, &mut bob, &bob_id, Verdict::Quality).await;
            bob.record_outcome(&alice_id, Verdict::Quality).unwrap();
            harness.clock.advance(1_000);
        }

        let assessment = bob.evaluate_peer(&profile(), &candidate);
        assert_eq!(assessment.tier, TrustTier::Trusted);
        assert_eq!(assessment.fee, 0);
    }

    // =========================================================================
    // TEST GROUP 3: Publish Gate
    // =========================================================================

    #[tokio::test]
    async fn test_flags_require_deposit_then_recover() {
        let harness = Harness::new();
        let (mut alice, _) = harness.spawn("alice");

        let first = alice.publish_gate();
        assert!(first.can_publish);
        assert!(!first.requires_deposit);

        alice.record_publish_flag().unwrap();
        assert_eq!(alice.record_publish_flag().unwrap(), -4);
        let gated = alice.publish_gate();
        assert!(gated.can_publish);
        assert!(gated.requires_deposit);

        harness.clock.advance(21 * DAY_MS);
        let recovered = alice.publish_gate();
        assert!(recovered.can_publish);
        assert!(!recovered.requires_deposit);
    }

    #[tokio::test]
    async fn test_heavily_flagged_author_is_blocked() {
        let harness = Harness::new();
        let (mut alice, _) = harness.spawn("alice");

        for _ in 0..6 {
            alice.record_publish_flag().unwrap();
        }
        let decision = alice.publish_gate();
        assert!(!decision.can_publish);

        assert_eq!(alice.record_publish_validation().unwrap(), -11);
        assert!(!alice.publish_gate().can_publish);
        alice.record_publish_validation().unwrap();
        assert!(alice.publish_gate().can_publish);
    }
}
