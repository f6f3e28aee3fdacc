//! Well-known vocabulary URIs.
//!
//! Constants are spelled out as full literals so a grep for any URI in a
//! serialized ontology lands here directly.

use crate::base::Uri;
use crate::metamodel::ScalarKind;

/// Core RDF vocabulary.
pub mod rdf {
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const LIST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#List";
}

/// RDF Schema vocabulary.
pub mod rdfs {
    pub const NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const IS_DEFINED_BY: &str = "http://www.w3.org/2000/01/rdf-schema#isDefinedBy";
    pub const SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
}

/// OWL vocabulary.
pub mod owl {
    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";
    pub const EQUIVALENT_CLASS: &str = "http://www.w3.org/2002/07/owl#equivalentClass";
    pub const DISJOINT_WITH: &str = "http://www.w3.org/2002/07/owl#disjointWith";
    pub const FUNCTIONAL_PROPERTY: &str = "http://www.w3.org/2002/07/owl#FunctionalProperty";
    pub const TRANSITIVE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#TransitiveProperty";
    pub const SYMMETRIC_PROPERTY: &str = "http://www.w3.org/2002/07/owl#SymmetricProperty";
    pub const INVERSE_FUNCTIONAL_PROPERTY: &str =
        "http://www.w3.org/2002/07/owl#InverseFunctionalProperty";
}

/// XML Schema datatypes and their mapping to the built-in scalars.
pub mod xsd {
    use super::*;

    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

    /// The schema datatype a built-in scalar serializes as.
    pub fn uri_for(scalar: ScalarKind) -> Uri {
        let local = match scalar {
            ScalarKind::Boolean => "boolean",
            ScalarKind::Float => "float",
            ScalarKind::Byte => "byte",
            ScalarKind::Int => "int",
            ScalarKind::Long => "long",
            ScalarKind::Double => "double",
            ScalarKind::Short => "short",
            ScalarKind::String => "string",
        };
        Uri::from_parts(NAMESPACE, local)
    }

    /// The built-in scalar a schema datatype URI stands for, if any.
    /// `integer` folds onto the same scalar as `int`.
    pub fn scalar_for(uri: &Uri) -> Option<ScalarKind> {
        if uri.namespace() != NAMESPACE {
            return None;
        }
        match uri.local_name() {
            "boolean" => Some(ScalarKind::Boolean),
            "float" => Some(ScalarKind::Float),
            "byte" => Some(ScalarKind::Byte),
            "int" | "integer" => Some(ScalarKind::Int),
            "long" => Some(ScalarKind::Long),
            "double" => Some(ScalarKind::Double),
            "short" => Some(ScalarKind::Short),
            "string" => Some(ScalarKind::String),
            _ => None,
        }
    }
}

/// Foundational map vocabulary that encoded key/value containers extend.
pub mod collections {
    pub const NAMESPACE: &str = "http://ontomap.dev/vocab/collections#";

    pub const KEY_VALUE_MAP: &str = "http://ontomap.dev/vocab/collections#KeyValueMap";
    pub const LITERAL_KEY_MAP: &str = "http://ontomap.dev/vocab/collections#LiteralKeyMap";
    pub const LITERAL_VALUE_MAP: &str = "http://ontomap.dev/vocab/collections#LiteralValueMap";
    pub const LITERAL_KEY_VALUE_MAP: &str =
        "http://ontomap.dev/vocab/collections#LiteralKeyValueMap";

    pub const ENTRY: &str = "http://ontomap.dev/vocab/collections#entry";
    pub const KEY_DATA: &str = "http://ontomap.dev/vocab/collections#keyData";
    pub const VALUE_DATA: &str = "http://ontomap.dev/vocab/collections#valueData";
}

/// The ontology header URI for a namespace: the namespace with any
/// trailing hash stripped.
pub fn ontology_uri(namespace: &str) -> Uri {
    Uri::new(namespace.trim_end_matches('#'))
}
