//! Model to ontology translation.
//!
//! The mapper walks a package tree and lowers every classifier into the
//! node store:
//!
//! ```text
//! Package tree (DFS, parents first)
//!   └── classifier
//!         ├── Class        -> owl class + subclass edges + features
//!         ├── Enumeration  -> owl class with a closed membership list
//!         ├── Primitive    -> schema datatype (built-in) or named datatype
//!         ├── List marker  -> class below the rdf list class
//!         └── Map marker   -> encoded key/value class (collections module)
//! ```
//!
//! Features become properties on the owning class's node: attributes
//! with scalar value types stay datatype properties, everything else is
//! lowered to an object property so the typed range survives. Declared
//! bounds turn into anonymous cardinality restrictions below the domain
//! class.
//!
//! Identity is tracked per run in an [`IdentityCache`]; every classifier
//! records its node before recursing into supertypes or feature targets,
//! which is what keeps cyclic schemas from looping.

use tracing::{debug, trace, warn};

use crate::base::{Annotation, Multiplicity, Uri, escape_markup};
use crate::metamodel::{ClassifierId, ClassifierKind, FeatureId, FeatureKind, MetaModel, PackageId};
use crate::ontology::vocab::{self, xsd};
use crate::ontology::{Node, NodeId, NodeKind, OntologyStore, RestrictionConstraint};
use crate::transform::cache::IdentityCache;
use crate::transform::cardinality::{self, CardinalityBound};
use crate::transform::collections;
use crate::transform::error::TransformError;

// ============================================================================
// OPTIONS
// ============================================================================

/// Knobs for a translation run.
///
/// Currently carries nothing; call sites pass it so their shape stays
/// stable as options grow.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransformOptions {}

// ============================================================================
// MAPPER
// ============================================================================

/// Translates one package tree into ontology nodes.
///
/// A mapper is built per run and consumed by [`ForwardMapper::translate`];
/// the identity cache never outlives the run.
pub struct ForwardMapper<'a> {
    pub(crate) model: &'a MetaModel,
    pub(crate) store: &'a mut OntologyStore,
    pub(crate) cache: IdentityCache,
}

impl<'a> ForwardMapper<'a> {
    /// Create a mapper over `model` writing into `store`.
    pub fn new(model: &'a MetaModel, store: &'a mut OntologyStore) -> Self {
        Self {
            model,
            store,
            cache: IdentityCache::new(),
        }
    }

    /// Translate the package tree rooted at `root`.
    ///
    /// Map entry classes are skipped in the walk; they are encoded at the
    /// references that use them. After the walk, the root namespace's
    /// ontology header is made to import the map vocabulary.
    pub fn translate(
        mut self,
        root: PackageId,
        _options: &TransformOptions,
    ) -> Result<(), TransformError> {
        let model = self.model;
        let mut packages = Vec::new();
        flatten_packages(model, root, &mut packages);

        for package_id in packages {
            for &classifier_id in &model.package(package_id).classifiers {
                let classifier = model.classifier(classifier_id);
                if classifier.is_map() {
                    trace!(
                        classifier = %classifier.name,
                        "map entry class is encoded where a reference uses it"
                    );
                    continue;
                }
                self.resolve_classifier(classifier_id)?;
            }
        }
        self.register_import(root)
    }

    /// The ontology node for `id`, translating it first if this run has
    /// not seen it yet.
    pub(crate) fn resolve_classifier(
        &mut self,
        id: ClassifierId,
    ) -> Result<NodeId, TransformError> {
        if let Some(node) = self.cache.node_for(id) {
            return Ok(node);
        }
        let model = self.model;
        match &model.classifier(id).kind {
            ClassifierKind::Class(_) => self.translate_class(id),
            ClassifierKind::Enumeration(_) => self.translate_enumeration(id),
            ClassifierKind::Primitive {
                scalar: Some(scalar),
                ..
            } => {
                let node = self
                    .store
                    .create_named(xsd::uri_for(*scalar), NodeKind::datatype())?;
                self.cache.record(id, node);
                Ok(node)
            }
            ClassifierKind::Primitive { scalar: None, .. } => self.translate_user_primitive(id),
            ClassifierKind::ListCollection => {
                let uri = self.classifier_uri(id)?;
                collections::encode_list(self, id, uri)
            }
            ClassifierKind::MapCollection(_) => collections::encode_map(self, id, None),
        }
    }

    // ── Classifiers ─────────────────────────────────────────────────

    fn translate_class(&mut self, id: ClassifierId) -> Result<NodeId, TransformError> {
        let model = self.model;
        let classifier = model.classifier(id);
        let uri = self.classifier_uri(id)?;
        let node = self.store.create_named(uri, NodeKind::class())?;
        self.cache.record(id, node);
        self.apply_annotations(node, &classifier.annotations);

        if let Some(data) = classifier.class_data() {
            for &super_id in &data.super_types {
                let super_classifier = model.classifier(super_id);
                if super_classifier.is_proxy {
                    warn!(
                        class = %classifier.name,
                        super_type = %super_classifier.name,
                        "skipping unresolved supertype"
                    );
                    continue;
                }
                let super_node = self.resolve_classifier(super_id)?;
                self.store.add_sub_class_of(node, super_node);
            }
            for &feature_id in &data.features {
                self.translate_feature(node, feature_id)?;
            }
        }
        Ok(node)
    }

    fn translate_enumeration(&mut self, id: ClassifierId) -> Result<NodeId, TransformError> {
        let model = self.model;
        let classifier = model.classifier(id);
        let namespace = model
            .namespace_of(id)
            .ok_or_else(|| TransformError::unresolvable_namespace(classifier.name.clone()))?;
        let uri = Uri::from_parts(namespace, &classifier.name);
        let node = self.store.create_named(uri, NodeKind::class())?;
        self.cache.record(id, node);
        self.apply_annotations(node, &classifier.annotations);

        let mut members = Vec::new();
        if let Some(data) = classifier.enum_data() {
            for literal in &data.literals {
                let member_uri = Uri::from_parts(namespace, &literal.name);
                let member = self.store.create_named(member_uri, NodeKind::individual())?;
                members.push(member);
            }
        }
        if let Some(class) = self.store.node_mut(node).and_then(Node::as_class_mut) {
            class.one_of = Some(members);
        }
        Ok(node)
    }

    fn translate_user_primitive(&mut self, id: ClassifierId) -> Result<NodeId, TransformError> {
        let model = self.model;
        let uri = self.classifier_uri(id)?;
        let node = self.store.create_named(uri, NodeKind::datatype())?;
        self.cache.record(id, node);
        self.apply_annotations(node, &model.classifier(id).annotations);
        Ok(node)
    }

    // ── Features ────────────────────────────────────────────────────

    fn translate_feature(&mut self, domain: NodeId, id: FeatureId) -> Result<(), TransformError> {
        match self.model.feature(id).kind {
            FeatureKind::Attribute => self.translate_attribute(domain, id),
            FeatureKind::Reference => self.translate_reference(domain, id),
        }
    }

    /// Attributes with a scalar value type stay datatype properties;
    /// enumerations, user datatypes, and collections become object
    /// properties so their typed node is reachable as the range.
    /// Unresolvable value types degrade to a rangeless datatype property.
    fn translate_attribute(&mut self, domain: NodeId, id: FeatureId) -> Result<(), TransformError> {
        let model = self.model;
        let feature = model.feature(id);
        let uri = self.feature_uri(id)?;

        let target = match feature.target {
            Some(target_id) => {
                let classifier = model.classifier(target_id);
                if classifier.is_proxy {
                    warn!(
                        attribute = %feature.name,
                        value_type = %classifier.name,
                        "attribute value type is unresolved, dropping the range"
                    );
                    None
                } else {
                    Some((target_id, classifier))
                }
            }
            None => {
                warn!(attribute = %feature.name, "attribute has no value type, dropping the range");
                None
            }
        };

        let (property, range, boxed) = match target {
            None => (self.create_datatype_property(uri)?, None, false),
            Some((target_id, classifier)) => match classifier.builtin_scalar() {
                Some(scalar) => {
                    let property = self.create_datatype_property(uri)?;
                    let range = self
                        .store
                        .create_named(xsd::uri_for(scalar), NodeKind::datatype())?;
                    (property, Some(range), classifier.is_boxed_scalar())
                }
                None => {
                    let property = self.create_object_property(uri)?;
                    let range = self.resolve_classifier(target_id)?;
                    (property, Some(range), false)
                }
            },
        };

        self.apply_annotations(property, &feature.annotations);
        if let Some(range) = range {
            self.store.add_range(property, range);
            self.add_values_restriction(domain, property, range);
        }
        self.store.add_domain(property, domain);
        let bounds = cardinality::attribute_bounds(feature.multiplicity, boxed);
        self.apply_cardinality(domain, property, bounds);
        Ok(())
    }

    fn translate_reference(&mut self, domain: NodeId, id: FeatureId) -> Result<(), TransformError> {
        let model = self.model;
        let feature = model.feature(id);

        let Some(target_id) = feature.target else {
            warn!(reference = %feature.name, "skipping reference without a target");
            return Ok(());
        };
        let target = model.classifier(target_id);
        if target.is_proxy {
            warn!(
                reference = %feature.name,
                target = %target.name,
                "skipping reference to an unresolved target"
            );
            return Ok(());
        }

        let uri = self.feature_uri(id)?;
        let property = self.create_object_property(uri)?;
        self.apply_annotations(property, &feature.annotations);

        let range = if target.is_map() {
            collections::encode_map(self, target_id, Some(id))?
        } else {
            self.resolve_classifier(target_id)?
        };
        self.store.add_range(property, range);
        self.add_values_restriction(domain, property, range);
        self.store.add_domain(property, domain);
        self.apply_cardinality(domain, property, feature.multiplicity);
        Ok(())
    }

    // ── Property creation ───────────────────────────────────────────
    //
    // The two property kinds are disjoint, but one feature name can be
    // claimed for both when an attribute and a reference share a name
    // across classes. Whoever loses the clash moves to a suffixed URI:
    // a datatype property yields to an object property (object
    // properties carry the structural edges), a new datatype property
    // takes the suffixed URI itself.

    fn create_datatype_property(&mut self, uri: Uri) -> Result<NodeId, TransformError> {
        if let Some(existing) = self.store.find(&uri) {
            if self.store.node(existing).is_some_and(Node::is_object_property) {
                let moved = disjoint_property_uri(&uri);
                debug!(property = %uri, moved = %moved, "name is taken by an object property");
                return Ok(self
                    .store
                    .create_named(moved, NodeKind::datatype_property())?);
            }
        }
        Ok(self.store.create_named(uri, NodeKind::datatype_property())?)
    }

    fn create_object_property(&mut self, uri: Uri) -> Result<NodeId, TransformError> {
        if let Some(existing) = self.store.find(&uri) {
            if self.store.node(existing).is_some_and(Node::is_datatype_property) {
                let moved = disjoint_property_uri(&uri);
                debug!(property = %uri, moved = %moved, "displacing a datatype property");
                self.store.rename(existing, moved)?;
            }
        }
        Ok(self.store.create_named(uri, NodeKind::object_property())?)
    }

    // ── Restrictions ────────────────────────────────────────────────

    fn add_values_restriction(&mut self, domain: NodeId, property: NodeId, range: NodeId) {
        let restriction = self.store.create(NodeKind::restriction(
            property,
            RestrictionConstraint::AllValuesFrom(range),
        ));
        self.store.add_sub_class_of(domain, restriction);
    }

    fn apply_cardinality(&mut self, domain: NodeId, property: NodeId, bounds: Multiplicity) {
        for bound in cardinality::synthesize(bounds) {
            let constraint = match bound {
                CardinalityBound::Min(n) => RestrictionConstraint::MinCardinality(n),
                CardinalityBound::Max(n) => RestrictionConstraint::MaxCardinality(n),
                CardinalityBound::Exact(n) => RestrictionConstraint::Cardinality(n),
            };
            let restriction = self.store.create(NodeKind::restriction(property, constraint));
            self.store.add_sub_class_of(domain, restriction);
        }
    }

    // ── Annotations ─────────────────────────────────────────────────

    pub(crate) fn apply_annotations(&mut self, node: NodeId, annotations: &[Annotation]) {
        for annotation in annotations {
            self.store
                .add_comment(node, escape_markup(&annotation.flatten()));
        }
    }

    // ── URIs ────────────────────────────────────────────────────────

    pub(crate) fn classifier_uri(&self, id: ClassifierId) -> Result<Uri, TransformError> {
        let classifier = self.model.classifier(id);
        let namespace = self
            .model
            .namespace_of(id)
            .ok_or_else(|| TransformError::unresolvable_namespace(classifier.name.clone()))?;
        Ok(Uri::from_parts(namespace, &classifier.name))
    }

    fn feature_uri(&self, id: FeatureId) -> Result<Uri, TransformError> {
        let feature = self.model.feature(id);
        let namespace = feature
            .owner
            .and_then(|owner| self.model.namespace_of(owner))
            .ok_or_else(|| TransformError::unresolvable_namespace(feature.name.clone()))?;
        Ok(Uri::from_parts(namespace, &feature.name))
    }

    // ── Imports ─────────────────────────────────────────────────────

    fn register_import(&mut self, root: PackageId) -> Result<(), TransformError> {
        let model = self.model;
        let Some(namespace) = model.package_namespace(root) else {
            warn!(
                package = %model.package(root).name,
                "root package has no namespace, skipping vocabulary import"
            );
            return Ok(());
        };
        let header = self
            .store
            .create_named(vocab::ontology_uri(namespace), NodeKind::ontology())?;
        let vocabulary = self.store.create_named(
            vocab::ontology_uri(vocab::collections::NAMESPACE),
            NodeKind::ontology(),
        )?;
        if let Some(ontology) = self.store.node_mut(header).and_then(Node::as_ontology_mut) {
            if !ontology.imports.contains(&vocabulary) {
                ontology.imports.push(vocabulary);
            }
        }
        Ok(())
    }
}

/// Collect `root` and its sub-packages, parents before children.
fn flatten_packages(model: &MetaModel, root: PackageId, out: &mut Vec<PackageId>) {
    out.push(root);
    for &sub in &model.package(root).sub_packages {
        flatten_packages(model, sub, out);
    }
}

/// The fallback URI for the losing side of a property kind clash. The
/// suffix switches to `Value` when the name is already `data`, so the
/// fallback never collides with itself.
fn disjoint_property_uri(uri: &Uri) -> Uri {
    let suffix = if uri.local_name().eq_ignore_ascii_case("data") {
        "Value"
    } else {
        "Data"
    };
    Uri::new(format!("{}{}", uri.as_str(), suffix))
}
