//! Container encoding.
//!
//! List and map markers have no direct ontology counterpart, so each one
//! is lowered to an auxiliary class below the matching foundational
//! vocabulary class:
//!
//! ```text
//! list marker   ->  Class  subClassOf  rdf list class
//! map entry     ->  Class  subClassOf  KeyValueMap | LiteralKeyMap
//!                                    | LiteralValueMap | LiteralKeyValueMap
//! ```
//!
//! A map entry's `key` and `value` marker features pick the variant: a
//! side held by an attribute is literal, a side held by a reference (or
//! not declared at all) is not. Each literal side additionally pins its
//! datatype through a nested restriction pair on the shared `entry` and
//! `keyData`/`valueData` vocabulary properties.

use smol_str::SmolStr;
use tracing::warn;

use crate::base::Uri;
use crate::metamodel::{ClassifierId, FeatureId, MetaModel};
use crate::ontology::vocab::{self, rdf, xsd};
use crate::ontology::{NodeId, NodeKind, RestrictionConstraint};
use crate::transform::error::TransformError;
use crate::transform::forward::ForwardMapper;

// ============================================================================
// VARIANTS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MapVariant {
    KeyValue,
    LiteralKey,
    LiteralValue,
    LiteralKeyValue,
}

impl MapVariant {
    fn class_uri(self) -> &'static str {
        match self {
            Self::KeyValue => vocab::collections::KEY_VALUE_MAP,
            Self::LiteralKey => vocab::collections::LITERAL_KEY_MAP,
            Self::LiteralValue => vocab::collections::LITERAL_VALUE_MAP,
            Self::LiteralKeyValue => vocab::collections::LITERAL_KEY_VALUE_MAP,
        }
    }
}

fn map_markers(model: &MetaModel, entry: ClassifierId) -> (Option<FeatureId>, Option<FeatureId>) {
    (
        model.find_feature(entry, "key"),
        model.find_feature(entry, "value"),
    )
}

fn map_variant(model: &MetaModel, key: Option<FeatureId>, value: Option<FeatureId>) -> MapVariant {
    let literal_key = key.is_some_and(|feature| model.feature(feature).is_attribute());
    let literal_value = value.is_some_and(|feature| model.feature(feature).is_attribute());
    match (literal_key, literal_value) {
        (true, true) => MapVariant::LiteralKeyValue,
        (true, false) => MapVariant::LiteralKey,
        (false, true) => MapVariant::LiteralValue,
        (false, false) => MapVariant::KeyValue,
    }
}

/// The name of the auxiliary map class. A map used through a reference
/// is named after the owning class and the reference; a free-standing
/// entry class keeps its own name.
fn aux_class_name(model: &MetaModel, entry: ClassifierId, owning: Option<FeatureId>) -> SmolStr {
    if let Some(owning) = owning {
        let feature = model.feature(owning);
        if let Some(owner) = feature.owner {
            let owner_name = &model.classifier(owner).name;
            return SmolStr::from(format!("{owner_name}{}", capitalized(&feature.name)));
        }
    }
    model.classifier(entry).name.clone()
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// ENCODERS
// ============================================================================

/// Encode a list marker as a class below the rdf list class.
pub(crate) fn encode_list(
    fw: &mut ForwardMapper<'_>,
    classifier: ClassifierId,
    uri: Uri,
) -> Result<NodeId, TransformError> {
    let model = fw.model;
    let node = fw.store.create_named(uri, NodeKind::class())?;
    fw.cache.record(classifier, node);
    let list = fw.store.create_named(Uri::new(rdf::LIST), NodeKind::class())?;
    fw.store.add_sub_class_of(node, list);
    fw.apply_annotations(node, &model.classifier(classifier).annotations);
    Ok(node)
}

/// Encode a map entry class as an auxiliary class below its variant's
/// foundational class.
///
/// With `owning` set the class is minted for that reference and left out
/// of the identity cache, so each reference to a shared entry class gets
/// its own class. Without it the entry class itself is being resolved
/// and the pairing is recorded before the literal sides are, which keeps
/// self-referential entry types from looping.
pub(crate) fn encode_map(
    fw: &mut ForwardMapper<'_>,
    entry: ClassifierId,
    owning: Option<FeatureId>,
) -> Result<NodeId, TransformError> {
    let model = fw.model;
    let name = aux_class_name(model, entry, owning);
    let namespace_owner = owning
        .and_then(|feature| model.feature(feature).owner)
        .unwrap_or(entry);
    let namespace = model
        .namespace_of(namespace_owner)
        .ok_or_else(|| TransformError::unresolvable_namespace(name.clone()))?;
    let uri = Uri::from_parts(namespace, &name);

    let node = fw.store.create_named(uri, NodeKind::class())?;
    if owning.is_none() {
        fw.cache.record(entry, node);
    }
    fw.apply_annotations(node, &model.classifier(entry).annotations);

    let (key, value) = map_markers(model, entry);
    let variant = map_variant(model, key, value);
    let foundation = fw
        .store
        .create_named(Uri::new(variant.class_uri()), NodeKind::class())?;
    fw.store.add_sub_class_of(node, foundation);

    let sides = [
        (key, vocab::collections::KEY_DATA),
        (value, vocab::collections::VALUE_DATA),
    ];
    for (marker, data_property) in sides {
        let Some(marker) = marker else { continue };
        if !model.feature(marker).is_attribute() {
            continue;
        }
        let Some(datatype) = resolve_literal_type(fw, marker)? else {
            continue;
        };
        add_entry_restriction(fw, node, data_property, datatype)?;
    }
    Ok(node)
}

/// The datatype node a literal map side is pinned to, when resolvable.
fn resolve_literal_type(
    fw: &mut ForwardMapper<'_>,
    marker: FeatureId,
) -> Result<Option<NodeId>, TransformError> {
    let model = fw.model;
    let feature = model.feature(marker);
    let Some(target) = feature.target else {
        return Ok(None);
    };
    let classifier = model.classifier(target);
    if classifier.is_proxy {
        warn!(
            marker = %feature.name,
            value_type = %classifier.name,
            "skipping entry restriction for an unresolved type"
        );
        return Ok(None);
    }
    let node = match classifier.builtin_scalar() {
        Some(scalar) => fw
            .store
            .create_named(xsd::uri_for(scalar), NodeKind::datatype())?,
        None => fw.resolve_classifier(target)?,
    };
    Ok(Some(node))
}

/// Pin one literal side: the map class goes below a restriction saying
/// every `entry` value is itself restricted to carry the datatype on
/// `keyData` or `valueData`.
fn add_entry_restriction(
    fw: &mut ForwardMapper<'_>,
    map_class: NodeId,
    data_property: &str,
    datatype: NodeId,
) -> Result<(), TransformError> {
    let inner_property = fw
        .store
        .create_named(Uri::new(data_property), NodeKind::datatype_property())?;
    let inner = fw.store.create(NodeKind::restriction(
        inner_property,
        RestrictionConstraint::AllValuesFrom(datatype),
    ));
    let entry_property = fw.store.create_named(
        Uri::new(vocab::collections::ENTRY),
        NodeKind::object_property(),
    )?;
    let outer = fw.store.create(NodeKind::restriction(
        entry_property,
        RestrictionConstraint::AllValuesFrom(inner),
    ));
    fw.store.add_sub_class_of(map_class, outer);
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::metamodel::{Classifier, ClassifierKind, Feature, FeatureKind, Package};

    fn entry_with(
        model: &mut MetaModel,
        key: Option<FeatureKind>,
        value: Option<FeatureKind>,
    ) -> ClassifierId {
        let package = model.add_package(Package::new("root").with_namespace("http://example.org#"));
        let entry = model.add_classifier(
            Classifier::new("Entry", ClassifierKind::map_entry()).with_package(package),
        );
        if let Some(kind) = key {
            model.add_feature_to(entry, Feature::new("key", kind));
        }
        if let Some(kind) = value {
            model.add_feature_to(entry, Feature::new("value", kind));
        }
        entry
    }

    #[rstest]
    #[case(Some(FeatureKind::Attribute), Some(FeatureKind::Attribute), MapVariant::LiteralKeyValue)]
    #[case(Some(FeatureKind::Attribute), Some(FeatureKind::Reference), MapVariant::LiteralKey)]
    #[case(Some(FeatureKind::Reference), Some(FeatureKind::Attribute), MapVariant::LiteralValue)]
    #[case(Some(FeatureKind::Reference), Some(FeatureKind::Reference), MapVariant::KeyValue)]
    #[case(None, None, MapVariant::KeyValue)]
    #[case(None, Some(FeatureKind::Attribute), MapVariant::LiteralValue)]
    fn test_variant_from_marker_kinds(
        #[case] key: Option<FeatureKind>,
        #[case] value: Option<FeatureKind>,
        #[case] expected: MapVariant,
    ) {
        let mut model = MetaModel::new();
        let entry = entry_with(&mut model, key, value);
        let (key, value) = map_markers(&model, entry);
        assert_eq!(map_variant(&model, key, value), expected);
    }

    #[test]
    fn test_aux_class_name_prefers_owning_reference() {
        let mut model = MetaModel::new();
        let entry = entry_with(&mut model, None, None);
        let package = model.add_package(Package::new("owner"));
        let owner = model.add_classifier(
            Classifier::new("Registry", ClassifierKind::class()).with_package(package),
        );
        let reference = model.add_feature_to(
            owner,
            Feature::new("entries", FeatureKind::Reference).with_target(entry),
        );

        assert_eq!(aux_class_name(&model, entry, Some(reference)), "RegistryEntries");
        assert_eq!(aux_class_name(&model, entry, None), "Entry");
    }

    #[test]
    fn test_capitalized() {
        assert_eq!(capitalized("entries"), "Entries");
        assert_eq!(capitalized("Entries"), "Entries");
        assert_eq!(capitalized(""), "");
    }
}
