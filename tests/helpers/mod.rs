//! Shared model and store fixtures for the mapper tests.

#![allow(dead_code)]

use ontomap::metamodel::{
    Classifier, ClassifierId, ClassifierKind, Feature, FeatureKind, MetaModel, Package, PackageId,
    ScalarKind,
};
use ontomap::ontology::{NodeId, NodeKind, OntologyStore, RestrictionNode};
use ontomap::{Multiplicity, Uri};

pub const NS: &str = "http://example.org/shapes#";

/// A fresh model holding one package bound to [`NS`].
pub fn model_with_root() -> (MetaModel, PackageId) {
    let mut model = MetaModel::new();
    let root = model.add_package(Package::new("shapes").with_namespace(NS));
    (model, root)
}

pub fn add_class(model: &mut MetaModel, package: PackageId, name: &str) -> ClassifierId {
    model.add_classifier(Classifier::new(name, ClassifierKind::class()).with_package(package))
}

pub fn add_scalar(
    model: &mut MetaModel,
    package: PackageId,
    name: &str,
    scalar: ScalarKind,
    boxed: bool,
) -> ClassifierId {
    model.add_classifier(
        Classifier::new(name, ClassifierKind::scalar(scalar, boxed)).with_package(package),
    )
}

/// `Base`, and `Derived` below it carrying a mandatory string attribute
/// `name` plus an open-ended `children` reference back to `Derived`.
pub fn two_class_schema() -> (MetaModel, PackageId, ClassifierId, ClassifierId) {
    let (mut model, root) = model_with_root();
    let base = add_class(&mut model, root, "Base");
    let derived = add_class(&mut model, root, "Derived");
    model.add_super_type(derived, base);

    let string = add_scalar(&mut model, root, "Text", ScalarKind::String, false);
    model.add_feature_to(
        derived,
        Feature::new("name", FeatureKind::Attribute)
            .with_target(string)
            .with_multiplicity(Multiplicity::ONE),
    );
    model.add_feature_to(
        derived,
        Feature::new("children", FeatureKind::Reference)
            .with_target(derived)
            .with_multiplicity(Multiplicity::ANY),
    );
    (model, root, base, derived)
}

/// Look up a named node, panicking with the URI on a miss.
pub fn find(store: &OntologyStore, uri: &str) -> NodeId {
    store
        .find(&Uri::new(uri))
        .unwrap_or_else(|| panic!("expected a node for {uri}"))
}

pub fn named_class(store: &mut OntologyStore, uri: &str) -> NodeId {
    store.create_named(Uri::new(uri), NodeKind::class()).unwrap()
}

pub fn named_datatype(store: &mut OntologyStore, uri: &str) -> NodeId {
    store.create_named(Uri::new(uri), NodeKind::datatype()).unwrap()
}

pub fn object_property(
    store: &mut OntologyStore,
    uri: &str,
    domain: NodeId,
    range: NodeId,
) -> NodeId {
    let property = store
        .create_named(Uri::new(uri), NodeKind::object_property())
        .unwrap();
    store.add_domain(property, domain);
    store.add_range(property, range);
    property
}

pub fn datatype_property(
    store: &mut OntologyStore,
    uri: &str,
    domain: NodeId,
    range: NodeId,
) -> NodeId {
    let property = store
        .create_named(Uri::new(uri), NodeKind::datatype_property())
        .unwrap();
    store.add_domain(property, domain);
    store.add_range(property, range);
    property
}

/// The restriction nodes a class sits below, in edge order.
pub fn restrictions_of<'s>(store: &'s OntologyStore, class: NodeId) -> Vec<&'s RestrictionNode> {
    store
        .node(class)
        .unwrap()
        .as_class()
        .unwrap()
        .sub_class_of
        .iter()
        .filter_map(|&id| store.node(id).unwrap().as_restriction())
        .collect()
}

/// The named classes a class sits below, in edge order.
pub fn named_super_classes(store: &OntologyStore, class: NodeId) -> Vec<String> {
    store
        .node(class)
        .unwrap()
        .as_class()
        .unwrap()
        .sub_class_of
        .iter()
        .filter_map(|&id| store.node(id).unwrap().uri.as_ref())
        .map(|uri| uri.as_str().to_owned())
        .collect()
}
