//! Typed node store.
//!
//! The store owns every node and keeps a URI index over the named ones.
//! Creation through [`OntologyStore::create_named`] is idempotent per URI:
//! asking again for the same URI with the same kind of payload returns the
//! existing node, while asking with a different kind is a conflict. That
//! idempotence is what lets the forward mapper re-request shared nodes
//! (scalar datatypes, vocabulary classes) freely.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::base::Uri;
use crate::ontology::node::{Node, NodeId, NodeKind};
use crate::ontology::vocab::{self, collections};

// ============================================================================
// ERRORS
// ============================================================================

/// Failures raised by store mutations.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum StoreError {
    /// A URI is already bound to a node of a different kind.
    #[error("'{uri}' is already a {existing}, cannot redeclare it as a {requested}")]
    KindConflict {
        uri: Uri,
        existing: &'static str,
        requested: &'static str,
    },

    /// A rename target URI is already bound to another node.
    #[error("'{uri}' is already bound to another node")]
    UriTaken { uri: Uri },

    /// A node id that does not belong to this store.
    #[error("unknown node id {0:?}")]
    UnknownNode(NodeId),
}

// ============================================================================
// STORE
// ============================================================================

/// An insertion-ordered ontology node store with a URI index.
///
/// A fresh store is pre-seeded with the foundational map vocabulary so
/// encoded containers always have their superclasses at hand.
#[derive(Clone, Debug)]
pub struct OntologyStore {
    nodes: IndexMap<NodeId, Node>,
    by_uri: FxHashMap<Uri, NodeId>,
}

impl OntologyStore {
    /// Create a store seeded with the foundational map vocabulary.
    pub fn new() -> Self {
        let mut store = Self {
            nodes: IndexMap::new(),
            by_uri: FxHashMap::default(),
        };
        for class in [
            collections::KEY_VALUE_MAP,
            collections::LITERAL_KEY_MAP,
            collections::LITERAL_VALUE_MAP,
            collections::LITERAL_KEY_VALUE_MAP,
        ] {
            store.insert_named(Uri::new(class), NodeKind::class());
        }
        store.insert_named(Uri::new(collections::ENTRY), NodeKind::object_property());
        store.insert_named(Uri::new(collections::KEY_DATA), NodeKind::datatype_property());
        store.insert_named(Uri::new(collections::VALUE_DATA), NodeKind::datatype_property());
        store.insert_named(
            vocab::ontology_uri(collections::NAMESPACE),
            NodeKind::ontology(),
        );
        store
    }

    fn insert_named(&mut self, uri: Uri, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.by_uri.insert(uri.clone(), id);
        self.nodes.insert(id, Node::named(uri, kind));
        id
    }

    /// Look up a named node.
    pub fn find(&self, uri: &Uri) -> Option<NodeId> {
        self.by_uri.get(uri).copied()
    }

    /// Returns true if a node is bound to `uri`.
    pub fn contains(&self, uri: &Uri) -> bool {
        self.by_uri.contains_key(uri)
    }

    /// Get or create the named node for `uri`.
    ///
    /// Returns the existing node when one of the same kind category is
    /// already bound; a node of a different category is a
    /// [`StoreError::KindConflict`].
    pub fn create_named(&mut self, uri: Uri, kind: NodeKind) -> Result<NodeId, StoreError> {
        if let Some(&existing) = self.by_uri.get(&uri) {
            let node = &self.nodes[&existing];
            if node.kind.same_category(&kind) {
                return Ok(existing);
            }
            return Err(StoreError::KindConflict {
                uri,
                existing: node.kind.name(),
                requested: kind.name(),
            });
        }
        Ok(self.insert_named(uri, kind))
    }

    /// Create an anonymous node.
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.insert(id, Node::new(kind));
        id
    }

    /// Rebind a named node to a new URI. The node id stays stable, so
    /// edges pointing at the node survive the rename.
    pub fn rename(&mut self, id: NodeId, new_uri: Uri) -> Result<(), StoreError> {
        match self.by_uri.get(&new_uri) {
            Some(&bound) if bound == id => return Ok(()),
            Some(_) => return Err(StoreError::UriTaken { uri: new_uri }),
            None => {}
        }
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(StoreError::UnknownNode(id))?;
        if let Some(old_uri) = node.uri.take() {
            self.by_uri.remove(&old_uri);
        }
        node.uri = Some(new_uri.clone());
        self.by_uri.insert(new_uri, id);
        Ok(())
    }

    /// Get a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get a mutable node.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// All properties listing `class` among their domains, in insertion
    /// order.
    pub fn properties_with_domain(&self, class: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().filter_map(move |(&id, node)| {
            node.as_property()
                .is_some_and(|property| property.domains.contains(&class))
                .then_some(id)
        })
    }

    /// All named nodes, in insertion order.
    pub fn named_nodes(&self) -> impl Iterator<Item = (NodeId, &Uri, &Node)> {
        self.nodes
            .iter()
            .filter_map(|(&id, node)| node.uri.as_ref().map(|uri| (id, uri, node)))
    }

    /// Total node count, anonymous nodes included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Edge helpers ────────────────────────────────────────────────
    //
    // Assertions onto nodes of the wrong kind are dropped silently,
    // like triples a schema-typed reader would ignore.

    /// Add a superclass edge, ignoring duplicates.
    pub fn add_sub_class_of(&mut self, class: NodeId, super_class: NodeId) {
        if let Some(data) = self.nodes.get_mut(&class).and_then(Node::as_class_mut) {
            if !data.sub_class_of.contains(&super_class) {
                data.sub_class_of.push(super_class);
            }
        }
    }

    /// Add a domain to a property, ignoring duplicates.
    pub fn add_domain(&mut self, property: NodeId, domain: NodeId) {
        if let Some(data) = self.nodes.get_mut(&property).and_then(Node::as_property_mut) {
            if !data.domains.contains(&domain) {
                data.domains.push(domain);
            }
        }
    }

    /// Add a range to a property, ignoring duplicates.
    pub fn add_range(&mut self, property: NodeId, range: NodeId) {
        if let Some(data) = self.nodes.get_mut(&property).and_then(Node::as_property_mut) {
            if !data.ranges.contains(&range) {
                data.ranges.push(range);
            }
        }
    }

    /// Append a comment literal to a node.
    pub fn add_comment(&mut self, id: NodeId, comment: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.comments.push(comment.into());
        }
    }

    /// Append a label literal to a node.
    pub fn add_label(&mut self, id: NodeId, label: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.labels.push(label.into());
        }
    }
}

impl Default for OntologyStore {
    fn default() -> Self {
        Self::new()
    }
}
