//! Publish gate constants.

/// Each flag subtracts this many points.
pub const FLAG_WEIGHT: i64 = 2;

/// Scores at or above this publish without a deposit.
pub const FREE_PUBLISH_FLOOR: i64 = -3;

/// Scores at or above this (and below the free floor) publish with a
/// deposit. Anything lower is blocked.
pub const DEPOSIT_FLOOR: i64 = -10;

/// One point of recovery per full period since the last action (7 days).
pub const RECOVERY_PERIOD_MS: u64 = 7 * 24 * 60 * 60 * 1_000;

/// Storage key for the persisted publish ledger.
pub const PUBLISH_LEDGER_KEY: &str = "d2a.publish_reputation";
