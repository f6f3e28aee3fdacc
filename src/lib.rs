//! # ontomap-core
//!
//! Core library for bidirectional translation between a class-based
//! metamodel and a description-logic ontology graph.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! transform  → forward/reverse mappers, cardinality policy,
//!   ↓          collection encoding, identity cache
//! ontology   → ontology node model, in-memory store, vocabularies
//!   ↓
//! metamodel  → source model (packages, classifiers, features)
//!   ↓
//! base       → primitives (Uri, Multiplicity, Annotation)
//! ```

// ============================================================================
// MODULES (dependency order: base → metamodel → ontology → transform)
// ============================================================================

/// Foundation types: Uri, Multiplicity, Annotation
pub mod base;

/// Source model: packages, classifiers, structural features
pub mod metamodel;

/// Ontology graph: node model, in-memory store, vocabularies
pub mod ontology;

/// The mappers: forward, reverse, cardinality policy, collection encoding
pub mod transform;

// Re-export foundation types
pub use base::{Annotation, Multiplicity, UNBOUNDED, Uri};

// Re-export the surface most callers need
pub use metamodel::{Classifier, ClassifierId, Feature, FeatureId, MetaModel, Package, PackageId};
pub use ontology::{NodeId, OntologyStore, StoreError};
pub use transform::{
    ForwardMapper, NamespaceBindings, ReverseMapper, TransformError, TransformOptions,
};
