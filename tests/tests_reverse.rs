#![allow(clippy::unwrap_used)]

mod helpers;

use helpers::*;
use ontomap::metamodel::ScalarKind;
use ontomap::ontology::vocab::{owl, rdf, rdfs};
use ontomap::ontology::{NodeId, NodeKind};
use ontomap::{
    Multiplicity, NamespaceBindings, OntologyStore, ReverseMapper, StoreError, TransformError, Uri,
};

fn bindings() -> NamespaceBindings {
    NamespaceBindings::new().with(NS, "shapes")
}

#[test]
fn test_rebuilds_classes_and_features() {
    let mut store = OntologyStore::new();
    let widget = named_class(&mut store, "http://example.org/shapes#Widget");
    let part = named_class(&mut store, "http://example.org/shapes#Part");
    let string = named_datatype(&mut store, "http://www.w3.org/2001/XMLSchema#string");
    datatype_property(&mut store, "http://example.org/shapes#name", widget, string);
    object_property(&mut store, "http://example.org/shapes#parts", widget, part);

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    let widget_cls = model.find_classifier("Widget").unwrap();
    let package = model.classifier(widget_cls).package.unwrap();
    assert_eq!(model.package(package).name, "shapes");
    assert_eq!(model.package(package).namespace.as_deref(), Some(NS));

    let name = model.find_feature(widget_cls, "name").unwrap();
    let name_feature = model.feature(name);
    assert!(name_feature.is_attribute());
    assert_eq!(name_feature.multiplicity, Multiplicity::OPTIONAL);
    let target = model.classifier(name_feature.target.unwrap());
    assert_eq!(target.builtin_scalar(), Some(ScalarKind::String));
    assert!(target.package.is_none());

    let parts = model.find_feature(widget_cls, "parts").unwrap();
    let parts_feature = model.feature(parts);
    assert!(parts_feature.is_reference());
    assert_eq!(parts_feature.multiplicity, Multiplicity::ANY);
    assert_eq!(parts_feature.target, Some(model.find_classifier("Part").unwrap()));
}

#[test]
fn test_core_vocabulary_is_never_translated() {
    let mut store = OntologyStore::new();
    named_class(&mut store, "http://www.w3.org/2002/07/owl#Thing");
    named_class(&mut store, "http://www.w3.org/2000/01/rdf-schema#Resource");
    named_class(&mut store, "http://example.org/shapes#Widget");

    let bindings = bindings()
        .with(owl::NAMESPACE, "owl")
        .with(rdfs::NAMESPACE, "rdfs");
    let model = ReverseMapper::new(&store, bindings).translate_all().unwrap();

    assert!(model.find_classifier("Thing").is_none());
    assert!(model.find_classifier("Resource").is_none());
    assert!(model.find_classifier("Widget").is_some());
}

#[test]
fn test_unbound_namespaces_are_not_candidates() {
    let mut store = OntologyStore::new();
    named_class(&mut store, "http://example.org/shapes#Widget");
    named_class(&mut store, "http://elsewhere.org/x#Alien");

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    assert!(model.find_classifier("Widget").is_some());
    assert!(model.find_classifier("Alien").is_none());
    // The seeded map vocabulary is unbound too.
    assert!(model.find_classifier("KeyValueMap").is_none());
    assert_eq!(model.packages().count(), 1);
}

#[test]
fn test_recognized_datatypes_fold_onto_shared_primitives() {
    let mut store = OntologyStore::new();
    let widget = named_class(&mut store, "http://example.org/shapes#Widget");
    let int_node = named_datatype(&mut store, "http://www.w3.org/2001/XMLSchema#int");
    let integer_node = named_datatype(&mut store, "http://www.w3.org/2001/XMLSchema#integer");
    datatype_property(&mut store, "http://example.org/shapes#count", widget, int_node);
    datatype_property(&mut store, "http://example.org/shapes#total", widget, integer_node);

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    let widget_cls = model.find_classifier("Widget").unwrap();
    let count = model.feature(model.find_feature(widget_cls, "count").unwrap());
    let total = model.feature(model.find_feature(widget_cls, "total").unwrap());
    assert_eq!(count.target, total.target);
    let target = model.classifier(count.target.unwrap());
    assert_eq!(target.builtin_scalar(), Some(ScalarKind::Int));
    assert!(target.package.is_none());
}

#[test]
fn test_unknown_datatype_becomes_user_primitive() {
    let mut store = OntologyStore::new();
    let money = named_datatype(&mut store, "http://example.org/shapes#Money");
    store.add_comment(money, "amount with currency");

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    let money_cls = model.find_classifier("Money").unwrap();
    let classifier = model.classifier(money_cls);
    assert!(classifier.is_primitive());
    assert_eq!(classifier.builtin_scalar(), None);
    assert!(classifier.package.is_some());
    assert_eq!(classifier.annotations.len(), 1);
    assert_eq!(classifier.annotations[0].source, rdfs::COMMENT);
    assert_eq!(
        classifier.annotations[0].details.get("comment").map(String::as_str),
        Some("amount with currency")
    );
}

#[test]
fn test_closed_class_becomes_enumeration() {
    let mut store = OntologyStore::new();
    let color = named_class(&mut store, "http://example.org/shapes#Color");
    let red = store
        .create_named(Uri::new("http://example.org/shapes#red"), NodeKind::individual())
        .unwrap();
    let green = store
        .create_named(Uri::new("http://example.org/shapes#green"), NodeKind::individual())
        .unwrap();
    store.node_mut(color).unwrap().as_class_mut().unwrap().one_of = Some(vec![red, green]);

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    let color_cls = model.find_classifier("Color").unwrap();
    let classifier = model.classifier(color_cls);
    assert!(classifier.is_enumeration());
    let literals = &classifier.enum_data().unwrap().literals;
    assert_eq!(literals.len(), 2);
    assert_eq!(literals[0].name, "red");
    assert_eq!(literals[0].value, 0);
    assert_eq!(literals[1].name, "green");
    assert_eq!(literals[1].value, 1);
}

#[test]
fn test_enumeration_range_makes_the_property_an_attribute() {
    let mut store = OntologyStore::new();
    let widget = named_class(&mut store, "http://example.org/shapes#Widget");
    let color = named_class(&mut store, "http://example.org/shapes#Color");
    let red = store
        .create_named(Uri::new("http://example.org/shapes#red"), NodeKind::individual())
        .unwrap();
    store.node_mut(color).unwrap().as_class_mut().unwrap().one_of = Some(vec![red]);
    object_property(&mut store, "http://example.org/shapes#color", widget, color);

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    let widget_cls = model.find_classifier("Widget").unwrap();
    let feature = model.feature(model.find_feature(widget_cls, "color").unwrap());
    assert!(feature.is_attribute());
    assert_eq!(feature.multiplicity, Multiplicity::OPTIONAL);
    assert_eq!(feature.target, model.find_classifier("Color"));
}

#[test]
fn test_plain_supertype_becomes_inheritance() {
    let mut store = OntologyStore::new();
    let alpha = named_class(&mut store, "http://example.org/shapes#Alpha");
    let beta = named_class(&mut store, "http://example.org/shapes#Beta");
    store.add_sub_class_of(alpha, beta);

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    let alpha_cls = model.find_classifier("Alpha").unwrap();
    let beta_cls = model.find_classifier("Beta").unwrap();
    assert_eq!(
        model.classifier(alpha_cls).class_data().unwrap().super_types,
        vec![beta_cls]
    );
    assert!(model.classifier(beta_cls).class_data().unwrap().super_types.is_empty());
}

#[test]
fn test_mutual_subsumption_is_rewritten_as_equivalence() {
    let mut store = OntologyStore::new();
    let alpha = named_class(&mut store, "http://example.org/shapes#Alpha");
    let beta = named_class(&mut store, "http://example.org/shapes#Beta");
    store.add_sub_class_of(alpha, beta);
    store.add_sub_class_of(beta, alpha);

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    let alpha_cls = model.find_classifier("Alpha").unwrap();
    let beta_cls = model.find_classifier("Beta").unwrap();

    // No inheritance edge lands in either direction.
    assert!(model.classifier(alpha_cls).class_data().unwrap().super_types.is_empty());
    assert!(model.classifier(beta_cls).class_data().unwrap().super_types.is_empty());

    assert!(model.are_equivalent(alpha_cls, beta_cls));
    assert_eq!(model.equivalences().len(), 1);

    // Each side carries the marker once, pointing at the other.
    let alpha_annotations = &model.classifier(alpha_cls).annotations;
    assert_eq!(alpha_annotations.len(), 1);
    assert_eq!(alpha_annotations[0].source, owl::EQUIVALENT_CLASS);
    assert_eq!(
        alpha_annotations[0].details.get("equivalentClass").map(String::as_str),
        Some("http://example.org/shapes#Beta")
    );
    let beta_annotations = &model.classifier(beta_cls).annotations;
    assert_eq!(beta_annotations.len(), 1);
    assert_eq!(
        beta_annotations[0].details.get("equivalentClass").map(String::as_str),
        Some("http://example.org/shapes#Alpha")
    );
}

#[test]
fn test_self_edge_is_ignored() {
    let mut store = OntologyStore::new();
    let alpha = named_class(&mut store, "http://example.org/shapes#Alpha");
    store
        .node_mut(alpha)
        .unwrap()
        .as_class_mut()
        .unwrap()
        .sub_class_of
        .push(alpha);

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    let alpha_cls = model.find_classifier("Alpha").unwrap();
    assert!(model.classifier(alpha_cls).class_data().unwrap().super_types.is_empty());
    assert!(model.equivalences().is_empty());
}

#[test]
fn test_list_vocabulary_superclass_is_translated() {
    // Only the owl and rdfs namespaces are built-in; the rdf list class
    // comes through as a plain class in a package named after its
    // namespace.
    let mut store = OntologyStore::new();
    let items = named_class(&mut store, "http://example.org/shapes#Items");
    let list = named_class(&mut store, rdf::LIST);
    store.add_sub_class_of(items, list);

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    let items_cls = model.find_classifier("Items").unwrap();
    let supers = &model.classifier(items_cls).class_data().unwrap().super_types;
    assert_eq!(supers.len(), 1);
    let list_cls = model.classifier(supers[0]);
    assert_eq!(list_cls.name, "List");
    let package = model.package(list_cls.package.unwrap());
    assert_eq!(package.name, rdf::NAMESPACE);
}

#[test]
fn test_inverse_properties_are_paired() {
    let mut store = OntologyStore::new();
    let left = named_class(&mut store, "http://example.org/shapes#Left");
    let right = named_class(&mut store, "http://example.org/shapes#Right");
    let to_right = object_property(&mut store, "http://example.org/shapes#toRight", left, right);
    let to_left = object_property(&mut store, "http://example.org/shapes#toLeft", right, left);
    store.node_mut(to_right).unwrap().as_property_mut().unwrap().inverse_of = Some(to_left);
    store.node_mut(to_left).unwrap().as_property_mut().unwrap().inverse_of = Some(to_right);

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    let left_cls = model.find_classifier("Left").unwrap();
    let right_cls = model.find_classifier("Right").unwrap();
    let to_right_f = model.find_feature(left_cls, "toRight").unwrap();
    let to_left_f = model.find_feature(right_cls, "toLeft").unwrap();
    assert_eq!(model.feature(to_right_f).opposite, Some(to_left_f));
    assert_eq!(model.feature(to_left_f).opposite, Some(to_right_f));
    assert_eq!(model.feature(to_left_f).owner, Some(right_cls));
}

#[test]
fn test_inverse_without_domain_stays_unpaired() {
    let mut store = OntologyStore::new();
    let left = named_class(&mut store, "http://example.org/shapes#Left");
    let right = named_class(&mut store, "http://example.org/shapes#Right");
    let to_right = object_property(&mut store, "http://example.org/shapes#toRight", left, right);
    let orphan = store
        .create_named(Uri::new("http://example.org/shapes#orphan"), NodeKind::object_property())
        .unwrap();
    store.add_range(orphan, left);
    store.node_mut(to_right).unwrap().as_property_mut().unwrap().inverse_of = Some(orphan);

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    let left_cls = model.find_classifier("Left").unwrap();
    let to_right_f = model.find_feature(left_cls, "toRight").unwrap();
    assert_eq!(model.feature(to_right_f).opposite, None);
}

#[test]
fn test_characteristics_survive_as_annotations() {
    let mut store = OntologyStore::new();
    let widget = named_class(&mut store, "http://example.org/shapes#Widget");
    let part = named_class(&mut store, "http://example.org/shapes#Part");
    let int_node = named_datatype(&mut store, "http://www.w3.org/2001/XMLSchema#int");
    let related = store
        .create_named(Uri::new("http://example.org/shapes#related"), NodeKind::object_property())
        .unwrap();

    let knows = object_property(&mut store, "http://example.org/shapes#knows", widget, part);
    {
        let payload = store.node_mut(knows).unwrap().as_property_mut().unwrap();
        payload.sub_property_of.push(related);
        payload.is_functional = true;
        payload.is_transitive = true;
    }
    let age = datatype_property(&mut store, "http://example.org/shapes#age", widget, int_node);
    {
        let payload = store.node_mut(age).unwrap().as_property_mut().unwrap();
        payload.is_functional = true;
        payload.is_symmetric = true;
    }

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    let widget_cls = model.find_classifier("Widget").unwrap();
    let knows_f = model.feature(model.find_feature(widget_cls, "knows").unwrap());
    let sources: Vec<&str> = knows_f.annotations.iter().map(|a| a.source.as_str()).collect();
    assert_eq!(
        sources,
        vec![rdfs::SUB_PROPERTY_OF, owl::FUNCTIONAL_PROPERTY, owl::TRANSITIVE_PROPERTY]
    );
    assert_eq!(
        knows_f.annotations[0].details.get("subPropertyOf").map(String::as_str),
        Some("http://example.org/shapes#related")
    );

    // Relational characteristics are meaningless on a value feature.
    let age_f = model.feature(model.find_feature(widget_cls, "age").unwrap());
    let sources: Vec<&str> = age_f.annotations.iter().map(|a| a.source.as_str()).collect();
    assert_eq!(sources, vec![owl::FUNCTIONAL_PROPERTY]);
}

#[test]
fn test_anonymous_range_leaves_the_target_unset() {
    let mut store = OntologyStore::new();
    let widget = named_class(&mut store, "http://example.org/shapes#Widget");
    let anonymous = store.create(NodeKind::class());
    let thing = store
        .create_named(Uri::new("http://example.org/shapes#thing"), NodeKind::object_property())
        .unwrap();
    store.add_domain(thing, widget);
    store.add_range(thing, anonymous);

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    let widget_cls = model.find_classifier("Widget").unwrap();
    let feature = model.feature(model.find_feature(widget_cls, "thing").unwrap());
    assert!(feature.is_reference());
    assert_eq!(feature.target, None);
}

#[test]
fn test_property_with_several_domains_ends_up_on_the_last() {
    let mut store = OntologyStore::new();
    let first = named_class(&mut store, "http://example.org/shapes#First");
    let second = named_class(&mut store, "http://example.org/shapes#Second");
    let part = named_class(&mut store, "http://example.org/shapes#Part");
    let shared = object_property(&mut store, "http://example.org/shapes#shared", first, part);
    store.add_domain(shared, second);

    let model = ReverseMapper::new(&store, bindings()).translate_all().unwrap();

    let first_cls = model.find_classifier("First").unwrap();
    let second_cls = model.find_classifier("Second").unwrap();
    assert!(model.find_feature(first_cls, "shared").is_none());
    let feature = model.find_feature(second_cls, "shared").unwrap();
    assert_eq!(model.feature(feature).owner, Some(second_cls));
}

#[test]
fn test_batch_reports_the_first_failure_after_running_through() {
    let store = OntologyStore::new();
    let mapper = ReverseMapper::new(&store, NamespaceBindings::new());
    let err = mapper.translate(&[NodeId(9990), NodeId(9991)]).unwrap_err();
    assert_eq!(err, TransformError::Store(StoreError::UnknownNode(NodeId(9990))));
}
