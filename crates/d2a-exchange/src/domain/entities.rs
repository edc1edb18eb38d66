//! # Domain Entities
//!
//! Snapshots handed to the core by its collaborators: discovery, the local
//! preference profile and the trust graph.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::value_objects::{PeerId, Timestamp};

/// A peer agent as seen by the discovery layer. Immutable per observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerProfile {
    /// Peer public key.
    pub peer_id: PeerId,
    /// Declared interest topics (duplicates collapse).
    pub interests: BTreeSet<String>,
    /// Advertised number of exchanges the peer is willing to take.
    pub capacity: u32,
    /// When discovery last saw the peer.
    pub last_seen: Timestamp,
}

impl PeerProfile {
    /// Create a profile from any iterable of topics.
    pub fn new<I, S>(peer_id: PeerId, interests: I, capacity: u32, last_seen: Timestamp) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            peer_id,
            interests: interests.into_iter().map(Into::into).collect(),
            capacity,
            last_seen,
        }
    }

    /// Whether discovery saw the peer within `window_ms` of `now`.
    pub fn is_fresh(&self, now: Timestamp, window_ms: u64) -> bool {
        now.millis_since(self.last_seen) <= window_ms
    }
}

/// Local user's topic affinities. Read-only input to resonance matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceProfile {
    /// Topic -> affinity weight.
    pub topic_affinities: HashMap<String, f64>,
}

impl PreferenceProfile {
    /// Build from `(topic, affinity)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            topic_affinities: pairs.into_iter().map(|(t, a)| (t.into(), a)).collect(),
        }
    }
}

/// Trust graph answer for a single peer. `trust_score` is computed by the
/// graph owner and treated as opaque here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphTrust {
    /// Hops from the local user, `None` when unreachable.
    pub hop_distance: Option<u32>,
    /// Number of mutual follows.
    pub mutual_follows: u32,
    /// Whether the peer appears in the graph at all.
    pub is_in_graph: bool,
    /// Opaque trust in `[0, 1]`.
    pub trust_score: f64,
}

impl GraphTrust {
    /// Answer for a peer the graph has never seen.
    pub fn unknown() -> Self {
        Self::default()
    }
}
