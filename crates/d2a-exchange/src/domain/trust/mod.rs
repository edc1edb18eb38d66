//! # Trust Tiering & Fee Schedule
//!
//! Effective trust blends graph trust (60%) with behavioural reputation
//! (40%). The resulting tier sets the fee for the next exchange: the more a
//! peer is trusted, the cheaper it is to transact with.

mod fee;
mod tier;

pub use fee::{calculate_dynamic_fee, FEE_KNOWN, FEE_TRUSTED, FEE_UNKNOWN};
pub use tier::{
    calculate_effective_trust, get_trust_tier, TrustTier, KNOWN_THRESHOLD, REPUTATION_NORMALIZER,
    REPUTATION_WEIGHT, TRUSTED_THRESHOLD, WOT_WEIGHT,
};
