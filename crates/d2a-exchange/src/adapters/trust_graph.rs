//! Map-backed trust graph.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{GraphTrust, PeerId};
use crate::ports::TrustGraph;

/// Trust graph answering from a fixed table. Unknown peers get
/// [`GraphTrust::unknown`].
///
/// Clones share one table, so the caller can keep updating entries after
/// handing a clone to the service.
#[derive(Debug, Clone, Default)]
pub struct StaticTrustGraph {
    entries: Arc<RwLock<HashMap<PeerId, GraphTrust>>>,
}

impl StaticTrustGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add an entry.
    #[must_use]
    pub fn with_peer(self, peer: PeerId, trust: GraphTrust) -> Self {
        self.insert(peer, trust);
        self
    }

    /// Add or replace an entry.
    pub fn insert(&self, peer: PeerId, trust: GraphTrust) {
        self.entries.write().insert(peer, trust);
    }
}

impl TrustGraph for StaticTrustGraph {
    fn lookup(&self, peer: &PeerId) -> GraphTrust {
        self.entries
            .read()
            .get(peer)
            .copied()
            .unwrap_or_else(GraphTrust::unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_and_unknown() {
        let bob = PeerId::new("bob").unwrap();
        let graph = StaticTrustGraph::new().with_peer(
            bob.clone(),
            GraphTrust {
                hop_distance: Some(1),
                mutual_follows: 4,
                is_in_graph: true,
                trust_score: 0.9,
            },
        );

        assert_eq!(graph.lookup(&bob).trust_score, 0.9);
        assert!(!graph.lookup(&PeerId::new("carol").unwrap()).is_in_graph);
    }

    #[test]
    fn test_clones_share_entries() {
        let graph = StaticTrustGraph::new();
        let handle = graph.clone();
        let bob = PeerId::new("bob").unwrap();

        handle.insert(bob.clone(), GraphTrust { trust_score: 0.5, ..GraphTrust::unknown() });
        assert_eq!(graph.lookup(&bob).trust_score, 0.5);
    }
}
