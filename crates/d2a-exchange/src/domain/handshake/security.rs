//! Handshake expiry and transition rules.
//!
//! SECURITY-CRITICAL: an adversarial peer controls when (and whether) its
//! responses arrive. These checks are the only thing standing between a late
//! or replayed response and a phase change.

use super::config::HandshakeConfig;
use super::types::{HandshakePhase, HandshakeState};
use crate::domain::{ExchangeError, Timestamp};

/// Whether the handshake is older than the timeout.
///
/// True regardless of the last recorded phase once `now - started_at`
/// strictly exceeds the timeout.
pub fn is_handshake_expired(
    state: &HandshakeState,
    now: Timestamp,
    config: &HandshakeConfig,
) -> bool {
    state.age_ms(now) > config.timeout_ms
}

/// Phase as observed at `now`: a non-terminal handshake past its timeout
/// reads as `expired`.
pub fn effective_phase(
    state: &HandshakeState,
    now: Timestamp,
    config: &HandshakeConfig,
) -> HandshakePhase {
    if !state.phase.is_terminal() && is_handshake_expired(state, now, config) {
        HandshakePhase::Expired
    } else {
        state.phase
    }
}

/// Move `state` to `next`, applying lazy expiry first.
///
/// # Errors
///
/// `InvalidTransition` when the move is not allowed from the effective
/// phase. A handshake that timed out is left in `expired`.
pub fn advance_handshake(
    state: &mut HandshakeState,
    next: HandshakePhase,
    now: Timestamp,
    config: &HandshakeConfig,
) -> Result<(), ExchangeError> {
    let current = effective_phase(state, now, config);
    state.phase = current;

    if current == next && next == HandshakePhase::Expired {
        return Ok(());
    }

    if !current.can_transition_to(next) {
        return Err(ExchangeError::InvalidTransition {
            from: current,
            to: next,
        });
    }

    state.phase = next;
    Ok(())
}
