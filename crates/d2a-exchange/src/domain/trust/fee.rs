//! Fee lookup table.

use super::tier::TrustTier;

/// Fee for trusted peers, in the smallest currency unit.
pub const FEE_TRUSTED: u64 = 0;

/// Fee for known peers.
pub const FEE_KNOWN: u64 = 100_000;

/// Fee for unknown peers.
pub const FEE_UNKNOWN: u64 = 200_000;

/// Fee to transact with a peer in `tier`.
///
/// Restricted peers cannot transact at all, so their fee is a moot 0.
pub fn calculate_dynamic_fee(tier: TrustTier) -> u64 {
    match tier {
        TrustTier::Trusted => FEE_TRUSTED,
        TrustTier::Known => FEE_KNOWN,
        TrustTier::Unknown => FEE_UNKNOWN,
        TrustTier::Restricted => 0,
    }
}
