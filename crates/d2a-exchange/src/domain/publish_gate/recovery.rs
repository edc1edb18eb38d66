//! Read-time reputation recovery.

use super::config::RECOVERY_PERIOD_MS;
use super::types::PublishReputation;
use crate::domain::Timestamp;

/// Score after adding one point per full recovery period since the last
/// action, capped at 0. Non-negative scores are returned unchanged.
pub fn recovered_score(score: i64, last_action_at: Timestamp, now: Timestamp) -> i64 {
    if score >= 0 {
        return score;
    }
    let periods = now.millis_since(last_action_at) / RECOVERY_PERIOD_MS;
    let periods = i64::try_from(periods).unwrap_or(i64::MAX);
    score.saturating_add(periods).min(0)
}

/// Copy of `rep` with recovery applied. The stored record is not touched.
pub fn apply_reputation_recovery(rep: &PublishReputation, now: Timestamp) -> PublishReputation {
    rep.with_score(recovered_score(rep.score(), rep.last_action_at(), now))
}
