//! Effective trust and tier classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Weight of graph trust in the blend.
pub const WOT_WEIGHT: f64 = 0.6;

/// Weight of normalized reputation in the blend.
pub const REPUTATION_WEIGHT: f64 = 0.4;

/// Reputation score that maps to full reputational trust.
pub const REPUTATION_NORMALIZER: f64 = 10.0;

/// Lower edge (inclusive) of the trusted band.
pub const TRUSTED_THRESHOLD: f64 = 0.8;

/// Lower edge (inclusive) of the known band.
pub const KNOWN_THRESHOLD: f64 = 0.4;

/// Discrete trust band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustTier {
    /// `>= 0.8`
    Trusted,
    /// `[0.4, 0.8)`
    Known,
    /// `[0, 0.4)`
    Unknown,
    /// `< 0`, cannot transact
    Restricted,
}

impl TrustTier {
    /// Whether exchanges with this tier are allowed.
    pub fn can_transact(&self) -> bool {
        !matches!(self, Self::Restricted)
    }

    /// Wire/log literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trusted => "trusted",
            Self::Known => "known",
            Self::Unknown => "unknown",
            Self::Restricted => "restricted",
        }
    }
}

impl fmt::Display for TrustTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blend graph trust with reputation, clamped to `[0, 1]`.
///
/// `rep_score / 10` is clamped to `[0, 1]` before weighting; a NaN graph
/// score counts as 0.
pub fn calculate_effective_trust(wot_score: f64, rep_score: i64) -> f64 {
    let wot = if wot_score.is_nan() {
        0.0
    } else {
        wot_score.clamp(0.0, 1.0)
    };
    let normalized_rep = (rep_score as f64 / REPUTATION_NORMALIZER).clamp(0.0, 1.0);

    (WOT_WEIGHT * wot + REPUTATION_WEIGHT * normalized_rep).clamp(0.0, 1.0)
}

/// Map effective trust to a tier. Bands include their lower edge.
pub fn get_trust_tier(effective_trust: f64) -> TrustTier {
    if effective_trust >= TRUSTED_THRESHOLD {
        TrustTier::Trusted
    } else if effective_trust >= KNOWN_THRESHOLD {
        TrustTier::Known
    } else if effective_trust >= 0.0 {
        TrustTier::Unknown
    } else {
        TrustTier::Restricted
    }
}
