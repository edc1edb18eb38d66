//! Publish reputation record and gate decision.

use serde::{Deserialize, Serialize};

use super::config::{DEPOSIT_FLOOR, FLAG_WEIGHT, FREE_PUBLISH_FLOOR};
use crate::domain::{PeerId, Timestamp};

/// Validation/flag counters for one publisher identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReputation {
    pubkey: PeerId,
    validated: u32,
    flagged: u32,
    score: i64,
    last_action_at: Timestamp,
    updated_at: Timestamp,
}

impl PublishReputation {
    /// Empty record created on the first validation or flag.
    pub fn new(pubkey: PeerId, now: Timestamp) -> Self {
        Self {
            pubkey,
            validated: 0,
            flagged: 0,
            score: 0,
            last_action_at: now,
            updated_at: now,
        }
    }

    /// Publisher identity.
    pub fn pubkey(&self) -> &PeerId {
        &self.pubkey
    }

    /// Community validations received.
    pub fn validated(&self) -> u32 {
        self.validated
    }

    /// Community flags received.
    pub fn flagged(&self) -> u32 {
        self.flagged
    }

    /// `validated - flagged * 2`, before recovery.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Time of the last validation or flag. Recovery counts from here.
    pub fn last_action_at(&self) -> Timestamp {
        self.last_action_at
    }

    /// Last mutation time.
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Record one validation.
    pub fn record_validation(&mut self, now: Timestamp) {
        self.validated = self.validated.saturating_add(1);
        self.touch(now);
    }

    /// Record one flag.
    pub fn record_flag(&mut self, now: Timestamp) {
        self.flagged = self.flagged.saturating_add(1);
        self.touch(now);
    }

    pub(crate) fn recompute(&mut self) {
        self.score = i64::from(self.validated) - i64::from(self.flagged) * FLAG_WEIGHT;
    }

    pub(super) fn with_score(&self, score: i64) -> Self {
        Self {
            score,
            ..self.clone()
        }
    }

    fn touch(&mut self, now: Timestamp) {
        self.recompute();
        self.last_action_at = now;
        self.updated_at = now;
    }
}

/// Outcome of a publish gate check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishGateDecision {
    /// Whether publishing is allowed at all
    pub can_publish: bool,
    /// Whether a deposit must accompany the publication
    pub requires_deposit: bool,
    /// Human-readable explanation
    pub reason: String,
}

impl PublishGateDecision {
    /// Decision for a publisher with no history.
    pub fn first_time() -> Self {
        Self {
            can_publish: true,
            requires_deposit: false,
            reason: "No publish history".to_string(),
        }
    }

    /// Decision for an effective (recovered) score.
    pub fn for_score(score: i64) -> Self {
        if score >= FREE_PUBLISH_FLOOR {
            Self {
                can_publish: true,
                requires_deposit: false,
                reason: format!("Reputation {score} allows free publishing"),
            }
        } else if score >= DEPOSIT_FLOOR {
            Self {
                can_publish: true,
                requires_deposit: true,
                reason: format!("Reputation {score} requires a deposit to publish"),
            }
        } else {
            Self {
                can_publish: false,
                requires_deposit: false,
                reason: format!("Reputation {score} is below {DEPOSIT_FLOOR}, publishing blocked"),
            }
        }
    }
}
