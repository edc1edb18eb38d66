//! Per-peer handshake registry.

use std::collections::HashMap;

use super::config::HandshakeConfig;
use super::security::{advance_handshake, effective_phase};
use super::types::{HandshakePhase, HandshakeState};
use crate::domain::{ExchangeError, PeerId, Timestamp};

/// Tracks at most one handshake per peer.
///
/// A peer slot is "live" while its handshake is neither terminal nor expired.
/// Finished entries stay readable until replaced or swept by
/// [`HandshakeRegistry::evict_finished`].
#[derive(Debug, Default)]
pub struct HandshakeRegistry {
    /// Handshakes keyed by counterparty
    handshakes: HashMap<PeerId, HandshakeState>,
    /// Expiry configuration
    config: HandshakeConfig,
}

impl HandshakeRegistry {
    /// Create an empty registry.
    pub fn new(config: HandshakeConfig) -> Self {
        Self {
            handshakes: HashMap::new(),
            config,
        }
    }

    /// Expiry configuration in use.
    pub fn config(&self) -> &HandshakeConfig {
        &self.config
    }

    /// Whether a live handshake with `peer` exists at `now`.
    pub fn is_in_flight(&self, peer: &PeerId, now: Timestamp) -> bool {
        self.handshakes
            .get(peer)
            .map(|s| !effective_phase(s, now, &self.config).is_terminal())
            .unwrap_or(false)
    }

    /// Fail with `HandshakeInFlight` if a live handshake with `peer` exists.
    pub fn ensure_available(&self, peer: &PeerId, now: Timestamp) -> Result<(), ExchangeError> {
        if self.is_in_flight(peer, now) {
            return Err(ExchangeError::HandshakeInFlight(peer.clone()));
        }
        Ok(())
    }

    /// Start tracking `state`, replacing a finished handshake with the same
    /// peer.
    ///
    /// # Errors
    ///
    /// `HandshakeInFlight` if a live handshake with that peer exists.
    pub fn begin(&mut self, state: HandshakeState, now: Timestamp) -> Result<(), ExchangeError> {
        self.ensure_available(&state.peer_id, now)?;
        self.handshakes.insert(state.peer_id.clone(), state);
        Ok(())
    }

    /// Current handshake with `peer`, with lazy expiry applied.
    pub fn get(&self, peer: &PeerId, now: Timestamp) -> Option<HandshakeState> {
        self.handshakes.get(peer).map(|s| {
            let mut view = s.clone();
            view.phase = effective_phase(s, now, &self.config);
            view
        })
    }

    /// Apply a phase transition to the handshake with `peer`.
    ///
    /// The stored state records the outcome even when the transition is
    /// refused because the handshake expired.
    pub fn advance(
        &mut self,
        peer: &PeerId,
        next: HandshakePhase,
        now: Timestamp,
    ) -> Result<HandshakeState, ExchangeError> {
        let state = self
            .handshakes
            .get_mut(peer)
            .ok_or_else(|| ExchangeError::NoActiveHandshake(peer.clone()))?;
        advance_handshake(state, next, now, &self.config)?;
        Ok(state.clone())
    }

    /// Forget the handshake with `peer`.
    pub fn remove(&mut self, peer: &PeerId) -> Option<HandshakeState> {
        self.handshakes.remove(peer)
    }

    /// Drop every terminal or expired handshake. Returns how many were dropped.
    pub fn evict_finished(&mut self, now: Timestamp) -> usize {
        let before = self.handshakes.len();
        let config = self.config;
        self.handshakes
            .retain(|_, s| !effective_phase(s, now, &config).is_terminal());
        before - self.handshakes.len()
    }

    /// Number of tracked handshakes, finished ones included.
    pub fn len(&self) -> usize {
        self.handshakes.len()
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.handshakes.is_empty()
    }
}
