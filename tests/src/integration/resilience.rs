//! # Resilience Flows
//!
//! Relay outages, stalled relays, handshake expiry and agent restarts.
//! Every failure here must leave the exchange retryable or cleanly closed,
//! never half-advanced.

#[cfg(test)]
mod tests {
    use crate::integration::harness::*;
    use d2a_exchange::domain::{PEER_LEDGER_KEY, PUBLISH_LEDGER_KEY};
    use d2a_exchange::{
        AgentExchangeApi, CommentPayload, ExchangeError, HandshakePhase, InboundEvent,
        LedgerStore, Timestamp, Verdict,
    };

    // =========================================================================
    // TEST GROUP 1: Relay Failures
    // =========================================================================

    #[tokio::test]
    async fn test_partial_relay_outage_still_delivers() {
        let harness = Harness::new();
        let (mut alice, _) = harness.spawn("alice");
        let (mut bob, bob_key) = harness.spawn("bob");
        harness.network.fail_relay("wss://relay-a");
        harness.network.fail_relay("wss://relay-b");

        alice.send_offer(&bob_key.id, offer("rust")).await.unwrap();

        assert!(harness.network.events_on("wss://relay-a").is_empty());
        assert_eq!(harness.network.events_on("wss://relay-c").len(), 1);
        assert!(matches!(
            bob.handle_incoming(&harness.inbox(&bob_key.id)),
            Some(InboundEvent::Offer { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_relay_times_out_without_blocking_others() {
        let harness = Harness::new();
        let (mut alice, _) = harness.spawn("alice");
        let (_, bob_key) = harness.spawn("bob");
        harness.connector.stall("wss://relay-b");

        let outcome = alice
            .send_comment(
                &bob_key.id,
                CommentPayload {
                    content_hash: "c0ffee".into(),
                    content_title: None,
                    comment: "Saved for later.".into(),
                    timestamp: Timestamp::new(START),
                },
            )
            .await
            .unwrap();

        assert_eq!(outcome.published, vec!["wss://relay-a", "wss://relay-c"]);
        assert_eq!(outcome.failed, vec!["wss://relay-b"]);
    }

    #[tokio::test]
    async fn test_total_outage_is_retryable_at_every_step() {
        let harness = Harness::new();
        let (mut alice, alice_key) = harness.spawn("alice");
        let (mut bob, bob_key) = harness.spawn("bob");

        harness.fail_all_relays();
        assert!(matches!(
            alice.send_offer(&bob_key.id, offer("rust")).await,
            Err(ExchangeError::AllRelaysFailed { attempted: 3 })
        ));
        assert!(alice.handshake(&bob_key.id).is_none());

        harness.network.restore_relay("wss://relay-a");
        alice.send_offer(&bob_key.id, offer("rust")).await.unwrap();
        bob.handle_incoming(&harness.inbox(&bob_key.id)).unwrap();

        harness.network.fail_relay("wss://relay-a");
        assert!(bob.send_accept(&alice_key.id).await.is_err());
        assert_eq!(bob.handshake(&alice_key.id).unwrap().phase, HandshakePhase::Offered);

        harness.network.restore_relay("wss://relay-c");
        let accepted = bob.send_accept(&alice_key.id).await.unwrap();
        assert_eq!(accepted.phase, HandshakePhase::Accepted);
    }

    // =========================================================================
    // TEST GROUP 2: Expiry
    // =========================================================================

    #[tokio::test]
    async fn test_late_accept_does_not_revive_expired_offer() {
        let harness = Harness::new();
        let (mut alice, alice_key) = harness.spawn("alice");
        let (mut bob, bob_key) = harness.spawn("bob");

        alice.send_offer(&bob_key.id, offer("rust")).await.unwrap();
        harness.clock.advance(20_000);
        bob.handle_incoming(&harness.inbox(&bob_key.id)).unwrap();

        // Bob accepts after Alice's side has timed out
        harness.clock.advance(10_001);
        assert_eq!(alice.handshake(&bob_key.id).unwrap().phase, HandshakePhase::Expired);
        bob.send_accept(&alice_key.id).await.unwrap();
        assert!(alice.handle_incoming(&harness.inbox(&alice_key.id)).is_none());
        assert!(matches!(
            alice.send_deliver(&bob_key.id, content(Verdict::Quality)).await,
            Err(ExchangeError::InvalidTransition {
                from: HandshakePhase::Expired,
                to: HandshakePhase::Delivered
            })
        ));

        // Expired handshakes free the slot
        assert_eq!(alice.evict_finished_handshakes(), 1);
        alice.send_offer(&bob_key.id, offer("rust")).await.unwrap();
    }

    #[tokio::test]
    async fn test_offer_older_than_timeout_is_dropped() {
        let harness = Harness::new();
        let (mut alice, alice_key) = harness.spawn("alice");
        let (mut bob, bob_key) = harness.spawn("bob");

        alice.send_offer(&bob_key.id, offer("rust")).await.unwrap();
        harness.clock.advance(31_000);

        assert!(bob.handle_incoming(&harness.inbox(&bob_key.id)).is_none());
        assert!(bob.handshake(&alice_key.id).is_none());
    }

    #[tokio::test]
    async fn test_handshake_at_exact_timeout_is_live() {
        let harness = Harness::new();
        let (mut alice, _) = harness.spawn("alice");
        let (_, bob_key) = harness.spawn("bob");

        alice.send_offer(&bob_key.id, offer("rust")).await.unwrap();
        harness.clock.advance(30_000);
        assert_eq!(alice.handshake(&bob_key.id).unwrap().phase, HandshakePhase::Offered);
    }

    // =========================================================================
    // TEST GROUP 3: Restarts
    // =========================================================================

    #[tokio::test]
    async fn test_ledgers_survive_restart() {
        let harness = Harness::new();
        let (mut alice, alice_key) = harness.spawn("alice");
        let (mut bob, bob_key) = harness.spawn("bob");
        let (alice_id, bob_id) = (alice_key.id.clone(), bob_key.id.clone());

        exchange(&harness, &mut alice, &alice_id, &mut bob, &bob_id, Verdict::Slop).await;
        bob.record_outcome(&alice_id, Verdict::Slop).unwrap();
        bob.record_outcome(&alice_id, Verdict::Slop).unwrap();
        bob.record_publish_flag().unwrap();
        drop(bob);

        let bob = harness.start(&bob_key);
        assert!(bob.peer_ledger().is_blocked(&alice_id));
        assert_eq!(bob.peer_ledger().score(&alice_id), -6);
        assert_eq!(bob.publish_ledger().len(), 1);
        assert!(bob.store().load(PEER_LEDGER_KEY).unwrap().is_some());
        assert!(bob.store().load(PUBLISH_LEDGER_KEY).unwrap().is_some());

        // Handshakes are not persisted
        assert!(bob.handshake(&alice_id).is_none());
    }

    #[tokio::test]
    async fn test_corrupt_ledger_file_starts_empty() {
        let harness = Harness::new();
        let (bob, bob_key) = harness.spawn("bob");
        bob.store().save(PEER_LEDGER_KEY, "{ not json").unwrap();
        drop(bob);

        let mut bob = harness.start(&bob_key);
        assert!(bob.peer_ledger().is_empty());

        let (_, carol_key) = harness.spawn("carol");
        assert_eq!(bob.record_outcome(&carol_key.id, Verdict::Quality).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_reload_picks_up_shared_store_writes() {
        let harness = Harness::new();
        let (mut bob, bob_key) = harness.spawn("bob");
        let mut twin = harness.start(&bob_key);
        let (_, carol_key) = harness.spawn("carol");

        twin.record_outcome(&carol_key.id, Verdict::Quality).unwrap();
        assert_eq!(bob.peer_ledger().score(&carol_key.id), 0);

        bob.reload_ledgers();
        assert_eq!(bob.peer_ledger().score(&carol_key.id), 1);

        // Mutations read the store first, so they do not clobber the twin
        bob.record_outcome(&carol_key.id, Verdict::Quality).unwrap();
        twin.reload_ledgers();
        assert_eq!(twin.peer_ledger().score(&carol_key.id), 2);
    }
}
