//! Peer reputation constants.

/// Each slop outcome subtracts this many points.
pub const SLOP_WEIGHT: i64 = 3;

/// A peer is blocked when its score is at or below this value.
pub const PEER_BLOCK_THRESHOLD: i64 = -5;

/// Storage key for the persisted peer ledger.
pub const PEER_LEDGER_KEY: &str = "d2a.peer_reputation";
