//! # Publish Gate
//!
//! Reputation of the local publisher's own signals, independent of the
//! peer ledger. Validations and flags from the community decide whether
//! the user may publish freely, must post a deposit, or is blocked.
//!
//! Negative scores heal by one point per full week since the last action.
//! Recovery is recomputed on every check and never written back.

// Semantic submodules
mod config;
mod ledger;
mod recovery;
mod types;

// Re-export public API
pub use config::{
    DEPOSIT_FLOOR, FLAG_WEIGHT, FREE_PUBLISH_FLOOR, PUBLISH_LEDGER_KEY, RECOVERY_PERIOD_MS,
};
pub use ledger::PublishGateLedger;
pub use recovery::{apply_reputation_recovery, recovered_score};
pub use types::{PublishGateDecision, PublishReputation};
