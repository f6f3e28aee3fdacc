//! Description-logic target model: nodes, the typed store, and the
//! well-known vocabulary.

mod node;
mod store;
pub mod vocab;

pub use node::{
    ClassNode, Node, NodeId, NodeKind, OntologyNode, PropertyNode, RestrictionConstraint,
    RestrictionNode,
};
pub use store::{OntologyStore, StoreError};
