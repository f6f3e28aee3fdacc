//! Identity cache pairing classifiers with ontology nodes.
//!
//! Each translation run owns a fresh cache. A mapper records the pairing
//! for an element *before* recursing into anything the element refers to,
//! which is what terminates translation of cyclic schemas: re-entry finds
//! the pairing and stops.

use rustc_hash::FxHashMap;

use crate::metamodel::ClassifierId;
use crate::ontology::NodeId;

/// Bidirectional classifier/node pairing for one translation run.
#[derive(Debug, Default)]
pub struct IdentityCache {
    forward: FxHashMap<ClassifierId, NodeId>,
    reverse: FxHashMap<NodeId, ClassifierId>,
}

impl IdentityCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pairing in both directions.
    pub fn record(&mut self, classifier: ClassifierId, node: NodeId) {
        self.forward.insert(classifier, node);
        self.reverse.insert(node, classifier);
    }

    /// The node a classifier was translated to, if recorded.
    pub fn node_for(&self, classifier: ClassifierId) -> Option<NodeId> {
        self.forward.get(&classifier).copied()
    }

    /// The classifier a node was translated to, if recorded.
    pub fn classifier_for(&self, node: NodeId) -> Option<ClassifierId> {
        self.reverse.get(&node).copied()
    }

    /// Number of recorded pairings.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}
