//! Ontology to model translation.
//!
//! The mapper rebuilds a class model from the named nodes of a store:
//!
//! ```text
//! named node
//!   ├── class with a membership list -> Enumeration
//!   ├── class                        -> Class + supertypes + features
//!   ├── recognized schema datatype   -> fixed built-in primitive
//!   └── other datatype               -> user-defined primitive
//! ```
//!
//! Only nodes whose namespace has a package binding are candidates, and
//! the core vocabulary namespaces are never translated. Properties come
//! back as features through their domain classes: an object property
//! becomes a reference unless its range is an enumeration, everything
//! else becomes an attribute. A property naming several domains ends up
//! owned by the last class translated, matching single containment.
//!
//! Within a batch each node is translated on its own; failures are
//! logged and the first one is raised once the batch has run through.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, error, trace, warn};

use crate::base::{Annotation, Multiplicity, Uri};
use crate::metamodel::{
    Classifier, ClassifierId, ClassifierKind, EnumData, EnumLiteral, Feature, FeatureId,
    FeatureKind, MetaModel, Package, PackageId, ScalarKind,
};
use crate::ontology::vocab::{self, xsd};
use crate::ontology::{Node, NodeId, NodeKind, OntologyStore, StoreError};
use crate::transform::cache::IdentityCache;
use crate::transform::error::TransformError;

// ============================================================================
// BINDINGS
// ============================================================================

/// Namespace to package-name bindings.
///
/// A binding marks its namespace as translatable and supplies the name
/// of the package built for it. Dotted names are flattened with
/// underscores; a namespace without a binding falls back to the
/// namespace string as the package name.
#[derive(Clone, Debug, Default)]
pub struct NamespaceBindings {
    names: IndexMap<SmolStr, SmolStr>,
}

impl NamespaceBindings {
    /// Create an empty binding set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a namespace to a package name.
    pub fn bind(&mut self, namespace: impl Into<SmolStr>, name: impl Into<SmolStr>) {
        self.names.insert(namespace.into(), name.into());
    }

    /// Bind a namespace to a package name, builder style.
    pub fn with(mut self, namespace: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        self.bind(namespace, name);
        self
    }

    /// Returns true if the namespace has a binding.
    pub fn is_bound(&self, namespace: &str) -> bool {
        self.names.contains_key(namespace)
    }

    /// The package name for a namespace.
    pub fn package_name(&self, namespace: &str) -> SmolStr {
        match self.names.get(namespace) {
            Some(name) => SmolStr::from(name.replace('.', "_")),
            None => SmolStr::from(namespace),
        }
    }

    /// The bound namespaces, in binding order.
    pub fn namespaces(&self) -> impl Iterator<Item = &SmolStr> {
        self.names.keys()
    }
}

/// Returns true for the core vocabulary namespaces that never translate
/// to classifiers.
fn is_builtin_namespace(namespace: &str) -> bool {
    namespace == vocab::owl::NAMESPACE || namespace == vocab::rdfs::NAMESPACE
}

// ============================================================================
// MAPPER
// ============================================================================

/// Translates ontology nodes back into a class model.
///
/// Built per run and consumed by [`ReverseMapper::translate`], which
/// hands the rebuilt model back.
pub struct ReverseMapper<'a> {
    store: &'a OntologyStore,
    bindings: NamespaceBindings,
    model: MetaModel,
    cache: IdentityCache,
    feature_memo: FxHashMap<NodeId, FeatureId>,
    packages: FxHashMap<SmolStr, PackageId>,
    scalars: FxHashMap<ScalarKind, ClassifierId>,
}

impl<'a> ReverseMapper<'a> {
    /// Create a mapper reading from `store` under `bindings`.
    pub fn new(store: &'a OntologyStore, bindings: NamespaceBindings) -> Self {
        Self {
            store,
            bindings,
            model: MetaModel::new(),
            cache: IdentityCache::new(),
            feature_memo: FxHashMap::default(),
            packages: FxHashMap::default(),
            scalars: FxHashMap::default(),
        }
    }

    /// The named class and datatype nodes whose namespaces are bound,
    /// in store order.
    pub fn candidates(&self) -> Vec<NodeId> {
        self.store
            .named_nodes()
            .filter(|(_, uri, node)| {
                (node.is_class() || node.is_datatype()) && self.bindings.is_bound(uri.namespace())
            })
            .map(|(id, _, _)| id)
            .collect()
    }

    /// Translate every candidate node.
    pub fn translate_all(self) -> Result<MetaModel, TransformError> {
        let candidates = self.candidates();
        self.translate(&candidates)
    }

    /// Translate the given nodes into a model.
    ///
    /// Nodes are independent: a failing node does not stop the rest of
    /// the batch, but the first failure is raised at the end.
    pub fn translate(mut self, candidates: &[NodeId]) -> Result<MetaModel, TransformError> {
        let mut first_error = None;
        for &node in candidates {
            if let Err(e) = self.translate_node(node) {
                error!(node = ?node, error = %e, "node translation failed");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(self.model),
        }
    }

    fn translate_node(&mut self, id: NodeId) -> Result<(), TransformError> {
        let store = self.store;
        let node = store.node(id).ok_or(StoreError::UnknownNode(id))?;
        let Some(uri) = node.uri.as_ref() else {
            trace!(node = ?id, "anonymous nodes have no classifier");
            return Ok(());
        };
        if is_builtin_namespace(uri.namespace()) {
            trace!(%uri, "skipping built-in vocabulary node");
            return Ok(());
        }
        match &node.kind {
            NodeKind::Class(_) => self.translate_class_node(id, uri),
            NodeKind::Datatype => {
                self.resolve_classifier(id, uri)?;
                Ok(())
            }
            _ => {
                trace!(%uri, kind = node.kind.name(), "node kind has no classifier");
                Ok(())
            }
        }
    }

    fn translate_class_node(&mut self, id: NodeId, uri: &Uri) -> Result<(), TransformError> {
        let classifier = self.resolve_classifier(id, uri)?;
        self.translate_supertypes(id, classifier)?;
        self.translate_properties(id, classifier)
    }

    // ── Classifiers ─────────────────────────────────────────────────

    /// The classifier for `id`, building it first if this run has not
    /// seen it yet.
    fn resolve_classifier(&mut self, id: NodeId, uri: &Uri) -> Result<ClassifierId, TransformError> {
        if let Some(classifier) = self.cache.classifier_for(id) {
            return Ok(classifier);
        }
        let store = self.store;
        let node = store.node(id).ok_or(StoreError::UnknownNode(id))?;
        if node.as_class().is_some_and(|class| class.one_of.is_some()) {
            return self.build_enumeration(id, uri);
        }
        if node.is_datatype() {
            return self.build_datatype(id, uri);
        }
        self.build_class(id, uri)
    }

    fn build_class(&mut self, id: NodeId, uri: &Uri) -> Result<ClassifierId, TransformError> {
        let package = self.ensure_package(uri.namespace());
        let mut classifier =
            Classifier::new(uri.local_name(), ClassifierKind::class()).with_package(package);
        for annotation in self.reconstructed_annotations(id, true) {
            classifier = classifier.with_annotation(annotation);
        }
        let classifier_id = self.model.add_classifier(classifier);
        self.cache.record(classifier_id, id);
        Ok(classifier_id)
    }

    fn build_enumeration(&mut self, id: NodeId, uri: &Uri) -> Result<ClassifierId, TransformError> {
        let store = self.store;
        let members = store
            .node(id)
            .and_then(Node::as_class)
            .and_then(|class| class.one_of.clone())
            .unwrap_or_default();

        let mut literals = Vec::new();
        for (index, member) in members.iter().enumerate() {
            let Some(member_uri) = store.node(*member).and_then(|node| node.uri.as_ref()) else {
                warn!(member = ?member, "skipping anonymous enumeration member");
                continue;
            };
            literals.push(EnumLiteral {
                name: SmolStr::from(member_uri.local_name()),
                value: index as i32,
            });
        }

        let package = self.ensure_package(uri.namespace());
        let mut classifier = Classifier::new(
            uri.local_name(),
            ClassifierKind::Enumeration(EnumData { literals }),
        )
        .with_package(package);
        for annotation in self.reconstructed_annotations(id, true) {
            classifier = classifier.with_annotation(annotation);
        }
        let classifier_id = self.model.add_classifier(classifier);
        self.cache.record(classifier_id, id);
        Ok(classifier_id)
    }

    /// Datatypes split on recognition: a schema datatype maps onto its
    /// fixed built-in primitive (shared across the run, owned by no
    /// package), anything else becomes a user-defined primitive in its
    /// namespace's package.
    fn build_datatype(&mut self, id: NodeId, uri: &Uri) -> Result<ClassifierId, TransformError> {
        if let Some(scalar) = xsd::scalar_for(uri) {
            let classifier = self.fixed_scalar(scalar);
            self.cache.record(classifier, id);
            return Ok(classifier);
        }
        let package = self.ensure_package(uri.namespace());
        let mut classifier = Classifier::new(uri.local_name(), ClassifierKind::user_primitive())
            .with_package(package);
        for annotation in self.reconstructed_annotations(id, false) {
            classifier = classifier.with_annotation(annotation);
        }
        let classifier_id = self.model.add_classifier(classifier);
        self.cache.record(classifier_id, id);
        Ok(classifier_id)
    }

    fn fixed_scalar(&mut self, scalar: ScalarKind) -> ClassifierId {
        if let Some(&classifier) = self.scalars.get(&scalar) {
            return classifier;
        }
        let classifier = self.model.add_classifier(Classifier::new(
            scalar_name(scalar),
            ClassifierKind::scalar(scalar, false),
        ));
        self.scalars.insert(scalar, classifier);
        classifier
    }

    // ── Supertypes ──────────────────────────────────────────────────

    /// Named class supertypes become inheritance edges. A pair of
    /// classes below each other is rewritten: no edge lands in either
    /// direction and the pair is recorded as equivalent, with a marker
    /// annotation on both sides.
    fn translate_supertypes(
        &mut self,
        id: NodeId,
        classifier: ClassifierId,
    ) -> Result<(), TransformError> {
        let store = self.store;
        let Some(class) = store.node(id).and_then(Node::as_class) else {
            return Ok(());
        };
        for &super_id in &class.sub_class_of {
            if super_id == id {
                continue;
            }
            let Some(super_node) = store.node(super_id) else {
                continue;
            };
            let Some(super_uri) = super_node.uri.as_ref() else {
                continue;
            };
            if is_builtin_namespace(super_uri.namespace()) {
                continue;
            }
            if !super_node.is_class() {
                warn!(
                    super_type = %super_uri,
                    kind = super_node.kind.name(),
                    "skipping non-class supertype"
                );
                continue;
            }
            let super_classifier = self.resolve_classifier(super_id, super_uri)?;

            let mutual = super_node
                .as_class()
                .is_some_and(|super_class| super_class.sub_class_of.contains(&id));
            if mutual {
                self.model.remove_super_type(super_classifier, classifier);
                if !self.model.are_equivalent(classifier, super_classifier) {
                    self.model.record_equivalence(classifier, super_classifier);
                    if let Some(this_uri) = store.node(id).and_then(|node| node.uri.as_ref()) {
                        self.model.classifier_mut(classifier).annotations.push(
                            Annotation::entry(
                                vocab::owl::EQUIVALENT_CLASS,
                                "equivalentClass",
                                super_uri.as_str(),
                            ),
                        );
                        self.model.classifier_mut(super_classifier).annotations.push(
                            Annotation::entry(
                                vocab::owl::EQUIVALENT_CLASS,
                                "equivalentClass",
                                this_uri.as_str(),
                            ),
                        );
                    }
                    debug!(class = %super_uri, "mutual subsumption rewritten to equivalence");
                }
                continue;
            }
            self.model.add_super_type(classifier, super_classifier);
        }
        Ok(())
    }

    // ── Properties ──────────────────────────────────────────────────

    fn translate_properties(
        &mut self,
        id: NodeId,
        classifier: ClassifierId,
    ) -> Result<(), TransformError> {
        let store = self.store;
        let properties: Vec<NodeId> = store.properties_with_domain(id).collect();
        for property in properties {
            let Some(feature) = self.feature_for(property)? else {
                continue;
            };
            self.model.attach_feature(feature, classifier);
            self.wire_opposite(property, feature)?;
        }
        Ok(())
    }

    /// The feature for a property, built once per run and moved between
    /// owners as its domains are translated.
    ///
    /// An object property comes back as a reference, open-ended since
    /// the ontology carries its bounds on domain classes rather than the
    /// property. A datatype property, or an object property ranging over
    /// an enumeration, comes back as an optional attribute.
    fn feature_for(&mut self, property: NodeId) -> Result<Option<FeatureId>, TransformError> {
        if let Some(&feature) = self.feature_memo.get(&property) {
            return Ok(Some(feature));
        }
        let store = self.store;
        let Some(node) = store.node(property) else {
            return Ok(None);
        };
        let Some(uri) = node.uri.as_ref() else {
            warn!(property = ?property, "skipping anonymous property");
            return Ok(None);
        };
        let Some(payload) = node.as_property() else {
            return Ok(None);
        };

        let target = match payload.ranges.first() {
            Some(&range) => match store.node(range).and_then(|node| node.uri.as_ref()) {
                Some(range_uri) => Some(self.resolve_classifier(range, range_uri)?),
                // An anonymous range only resolves if something already
                // built a classifier for it.
                None => self.cache.classifier_for(range),
            },
            None => None,
        };

        let enum_range = target.is_some_and(|t| self.model.classifier(t).is_enumeration());
        let mut feature = if node.is_object_property() && !enum_range {
            Feature::new(uri.local_name(), FeatureKind::Reference)
                .with_multiplicity(Multiplicity::ANY)
        } else {
            Feature::new(uri.local_name(), FeatureKind::Attribute)
                .with_multiplicity(Multiplicity::OPTIONAL)
        };
        if let Some(target) = target {
            feature = feature.with_target(target);
        }
        for annotation in self.reconstructed_annotations(property, false) {
            feature = feature.with_annotation(annotation);
        }

        let feature_id = self.model.add_feature(feature);
        self.feature_memo.insert(property, feature_id);
        self.apply_characteristics(property, feature_id);
        Ok(Some(feature_id))
    }

    /// Property characteristics survive as annotations on the feature.
    /// Hierarchy and functionality apply to both feature kinds; the
    /// relational characteristics only make sense on references.
    fn apply_characteristics(&mut self, property: NodeId, feature: FeatureId) {
        let store = self.store;
        let Some(payload) = store.node(property).and_then(Node::as_property) else {
            return;
        };
        let is_reference = self.model.feature(feature).is_reference();

        let mut annotations = Vec::new();
        for &super_property in &payload.sub_property_of {
            if let Some(super_uri) = store.node(super_property).and_then(|node| node.uri.as_ref())
            {
                annotations.push(Annotation::entry(
                    vocab::rdfs::SUB_PROPERTY_OF,
                    "subPropertyOf",
                    super_uri.as_str(),
                ));
            }
        }
        if payload.is_functional {
            annotations.push(Annotation::new(vocab::owl::FUNCTIONAL_PROPERTY));
        }
        if is_reference {
            if payload.is_transitive {
                annotations.push(Annotation::new(vocab::owl::TRANSITIVE_PROPERTY));
            }
            if payload.is_symmetric {
                annotations.push(Annotation::new(vocab::owl::SYMMETRIC_PROPERTY));
            }
            if payload.is_inverse_functional {
                annotations.push(Annotation::new(vocab::owl::INVERSE_FUNCTIONAL_PROPERTY));
            }
        }
        self.model
            .feature_mut(feature)
            .annotations
            .extend(annotations);
    }

    /// Pair a reference with the feature of its inverse property. The
    /// inverse must have a domain of its own, or the pairing waits for
    /// the side that does.
    fn wire_opposite(&mut self, property: NodeId, feature: FeatureId) -> Result<(), TransformError> {
        if !self.model.feature(feature).is_reference() {
            return Ok(());
        }
        let store = self.store;
        let Some(inverse) = store
            .node(property)
            .and_then(Node::as_property)
            .and_then(|payload| payload.inverse_of)
        else {
            return Ok(());
        };
        let inverse_ready = store
            .node(inverse)
            .and_then(Node::as_property)
            .is_some_and(|payload| !payload.domains.is_empty());
        if !inverse_ready {
            trace!(property = ?property, "inverse has no domain, leaving the opposite unset");
            return Ok(());
        }
        let Some(opposite) = self.feature_for(inverse)? else {
            return Ok(());
        };
        self.model.feature_mut(feature).opposite = Some(opposite);
        self.model.feature_mut(opposite).opposite = Some(feature);
        Ok(())
    }

    // ── Annotations ─────────────────────────────────────────────────

    /// Rebuild annotations from a node's documentation edges. Disjoint
    /// classes are only reported for class nodes.
    fn reconstructed_annotations(&self, id: NodeId, include_disjoint: bool) -> Vec<Annotation> {
        let Some(node) = self.store.node(id) else {
            return Vec::new();
        };
        let mut annotations = Vec::new();
        for comment in &node.comments {
            annotations.push(Annotation::entry(vocab::rdfs::COMMENT, "comment", comment));
        }
        for label in &node.labels {
            annotations.push(Annotation::entry(vocab::rdfs::LABEL, "label", label));
        }
        for defined_by in &node.defined_by {
            annotations.push(Annotation::entry(
                vocab::rdfs::IS_DEFINED_BY,
                "isDefinedBy",
                defined_by,
            ));
        }
        if include_disjoint {
            if let Some(class) = node.as_class() {
                for &other in &class.disjoint_with {
                    if let Some(uri) = self.store.node(other).and_then(|node| node.uri.as_ref()) {
                        annotations.push(Annotation::entry(
                            vocab::owl::DISJOINT_WITH,
                            "disjointWith",
                            uri.as_str(),
                        ));
                    }
                }
            }
        }
        annotations
    }

    // ── Packages ────────────────────────────────────────────────────

    fn ensure_package(&mut self, namespace: &str) -> PackageId {
        if let Some(&package) = self.packages.get(namespace) {
            return package;
        }
        let name = self.bindings.package_name(namespace);
        let package = self
            .model
            .add_package(Package::new(name).with_namespace(namespace));
        self.packages.insert(SmolStr::from(namespace), package);
        package
    }
}

fn scalar_name(scalar: ScalarKind) -> &'static str {
    match scalar {
        ScalarKind::Boolean => "Boolean",
        ScalarKind::Float => "Float",
        ScalarKind::Byte => "Byte",
        ScalarKind::Int => "Int",
        ScalarKind::Long => "Long",
        ScalarKind::Double => "Double",
        ScalarKind::Short => "Short",
        ScalarKind::String => "String",
    }
}
