//! Description-logic node representation.
//!
//! Every ontology entity is a [`Node`]: an optional URI plus a kind-tagged
//! payload. Named nodes are addressable through the store's URI index;
//! anonymous nodes (restrictions, mostly) are reachable only through the
//! edges that point at them.

use std::mem;

use crate::base::Uri;

// ============================================================================
// IDS
// ============================================================================

/// Identifies a node in an [`OntologyStore`](super::OntologyStore).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

// ============================================================================
// PAYLOADS
// ============================================================================

/// Payload of a class node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassNode {
    /// Superclass edges, in insertion order. Targets may be named
    /// classes or anonymous restrictions.
    pub sub_class_of: Vec<NodeId>,
    /// Closed membership list; set for classes that stand for
    /// enumerations.
    pub one_of: Option<Vec<NodeId>>,
    /// Classes declared disjoint with this one.
    pub disjoint_with: Vec<NodeId>,
}

/// Payload shared by the two property kinds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyNode {
    pub domains: Vec<NodeId>,
    pub ranges: Vec<NodeId>,
    pub sub_property_of: Vec<NodeId>,
    pub inverse_of: Option<NodeId>,
    pub is_functional: bool,
    pub is_inverse_functional: bool,
    pub is_transitive: bool,
    pub is_symmetric: bool,
}

/// The constraint a restriction places on its property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestrictionConstraint {
    MinCardinality(u32),
    MaxCardinality(u32),
    Cardinality(u32),
    AllValuesFrom(NodeId),
}

/// Payload of an anonymous restriction node.
#[derive(Clone, Debug, PartialEq)]
pub struct RestrictionNode {
    pub on_property: Option<NodeId>,
    pub constraint: RestrictionConstraint,
}

/// Payload of an ontology header node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OntologyNode {
    /// Imported ontology nodes, in insertion order.
    pub imports: Vec<NodeId>,
}

// ============================================================================
// NODE KIND
// ============================================================================

/// The kind-tagged payload of a node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Class(ClassNode),
    Datatype,
    DatatypeProperty(PropertyNode),
    ObjectProperty(PropertyNode),
    Restriction(RestrictionNode),
    Individual,
    Ontology(OntologyNode),
}

impl NodeKind {
    /// An empty class.
    pub fn class() -> Self {
        Self::Class(ClassNode::default())
    }

    /// A datatype.
    pub fn datatype() -> Self {
        Self::Datatype
    }

    /// An empty datatype property.
    pub fn datatype_property() -> Self {
        Self::DatatypeProperty(PropertyNode::default())
    }

    /// An empty object property.
    pub fn object_property() -> Self {
        Self::ObjectProperty(PropertyNode::default())
    }

    /// An individual.
    pub fn individual() -> Self {
        Self::Individual
    }

    /// An empty ontology header.
    pub fn ontology() -> Self {
        Self::Ontology(OntologyNode::default())
    }

    /// A restriction constraining `constraint` on `on_property`.
    pub fn restriction(on_property: NodeId, constraint: RestrictionConstraint) -> Self {
        Self::Restriction(RestrictionNode {
            on_property: Some(on_property),
            constraint,
        })
    }

    /// Human-readable kind name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Class(_) => "class",
            Self::Datatype => "datatype",
            Self::DatatypeProperty(_) => "datatype property",
            Self::ObjectProperty(_) => "object property",
            Self::Restriction(_) => "restriction",
            Self::Individual => "individual",
            Self::Ontology(_) => "ontology",
        }
    }

    /// Returns true if both kinds are the same variant, payloads aside.
    pub fn same_category(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

// ============================================================================
// NODE
// ============================================================================

/// A single ontology entity.
#[derive(Clone, Debug)]
pub struct Node {
    /// Unset for anonymous nodes.
    pub uri: Option<Uri>,
    pub kind: NodeKind,
    pub comments: Vec<String>,
    pub labels: Vec<String>,
    pub defined_by: Vec<String>,
}

impl Node {
    /// Create an anonymous node.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            uri: None,
            kind,
            comments: Vec::new(),
            labels: Vec::new(),
            defined_by: Vec::new(),
        }
    }

    /// Create a named node.
    pub fn named(uri: Uri, kind: NodeKind) -> Self {
        Self {
            uri: Some(uri),
            kind,
            comments: Vec::new(),
            labels: Vec::new(),
            defined_by: Vec::new(),
        }
    }

    /// Returns true if this node is a class.
    pub fn is_class(&self) -> bool {
        matches!(self.kind, NodeKind::Class(_))
    }

    /// Returns true if this node is a datatype.
    pub fn is_datatype(&self) -> bool {
        matches!(self.kind, NodeKind::Datatype)
    }

    /// Returns true if this node is a property of either kind.
    pub fn is_property(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::DatatypeProperty(_) | NodeKind::ObjectProperty(_)
        )
    }

    /// Returns true if this node is a datatype property.
    pub fn is_datatype_property(&self) -> bool {
        matches!(self.kind, NodeKind::DatatypeProperty(_))
    }

    /// Returns true if this node is an object property.
    pub fn is_object_property(&self) -> bool {
        matches!(self.kind, NodeKind::ObjectProperty(_))
    }

    /// Class payload, if this node is a class.
    pub fn as_class(&self) -> Option<&ClassNode> {
        match &self.kind {
            NodeKind::Class(class) => Some(class),
            _ => None,
        }
    }

    /// Mutable class payload, if this node is a class.
    pub fn as_class_mut(&mut self) -> Option<&mut ClassNode> {
        match &mut self.kind {
            NodeKind::Class(class) => Some(class),
            _ => None,
        }
    }

    /// Property payload of either property kind.
    pub fn as_property(&self) -> Option<&PropertyNode> {
        match &self.kind {
            NodeKind::DatatypeProperty(property) | NodeKind::ObjectProperty(property) => {
                Some(property)
            }
            _ => None,
        }
    }

    /// Mutable property payload of either property kind.
    pub fn as_property_mut(&mut self) -> Option<&mut PropertyNode> {
        match &mut self.kind {
            NodeKind::DatatypeProperty(property) | NodeKind::ObjectProperty(property) => {
                Some(property)
            }
            _ => None,
        }
    }

    /// Restriction payload, if this node is a restriction.
    pub fn as_restriction(&self) -> Option<&RestrictionNode> {
        match &self.kind {
            NodeKind::Restriction(restriction) => Some(restriction),
            _ => None,
        }
    }

    /// Ontology payload, if this node is an ontology header.
    pub fn as_ontology(&self) -> Option<&OntologyNode> {
        match &self.kind {
            NodeKind::Ontology(ontology) => Some(ontology),
            _ => None,
        }
    }

    /// Mutable ontology payload, if this node is an ontology header.
    pub fn as_ontology_mut(&mut self) -> Option<&mut OntologyNode> {
        match &mut self.kind {
            NodeKind::Ontology(ontology) => Some(ontology),
            _ => None,
        }
    }
}
