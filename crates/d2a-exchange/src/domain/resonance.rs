//! # Resonance Matching
//!
//! Jaccard similarity between the local user's high-affinity topics and a
//! peer's declared interests. This is the only signal that decides whether
//! the local agent proposes a handshake; callers apply their own threshold.

use std::collections::BTreeSet;

use super::entities::{PeerProfile, PreferenceProfile};

/// Minimum affinity (inclusive) for a topic to count as high-affinity.
pub const HIGH_AFFINITY_THRESHOLD: f64 = 0.3;

/// Topics the local user cares about at or above [`HIGH_AFFINITY_THRESHOLD`].
pub fn high_affinity_topics(profile: &PreferenceProfile) -> BTreeSet<&str> {
    profile
        .topic_affinities
        .iter()
        .filter(|(_, affinity)| **affinity >= HIGH_AFFINITY_THRESHOLD)
        .map(|(topic, _)| topic.as_str())
        .collect()
}

/// Score affinity between `profile` and `peer` in `[0, 1]`.
///
/// Exact, case-sensitive topic match. Returns 0 when either side is empty.
pub fn resonance(profile: &PreferenceProfile, peer: &PeerProfile) -> f64 {
    let high = high_affinity_topics(profile);
    if high.is_empty() || peer.interests.is_empty() {
        return 0.0;
    }

    let intersection = peer
        .interests
        .iter()
        .filter(|topic| high.contains(topic.as_str()))
        .count();
    let union = high.len() + peer.interests.len() - intersection;

    intersection as f64 / union as f64
}
