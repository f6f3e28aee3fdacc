//! Class-based source model.
//!
//! The model is an insertion-ordered arena of packages, classifiers, and
//! features, linked by index ids. This keeps ownership simple (the arena
//! owns everything, edges are ids) and iteration deterministic.
//!
//! ```text
//! MetaModel
//! ├── packages: IndexMap<PackageId, Package>        (insertion order)
//! ├── classifiers: IndexMap<ClassifierId, Classifier>
//! ├── features: IndexMap<FeatureId, Feature>
//! └── equivalences: Vec<(ClassifierId, ClassifierId)>  (unordered pairs)
//! ```

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{Annotation, Multiplicity};

// ============================================================================
// IDS
// ============================================================================

/// Identifies a package in a [`MetaModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(pub u32);

/// Identifies a classifier in a [`MetaModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassifierId(pub u32);

/// Identifies a structural feature in a [`MetaModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(pub u32);

// ============================================================================
// CLASSIFIER KINDS
// ============================================================================

/// The built-in scalar value types.
///
/// Each maps to a fixed external datatype identifier; the boxed wrappers
/// of a scalar share the same identifier as the plain form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Boolean,
    Float,
    Byte,
    Int,
    Long,
    Double,
    Short,
    String,
}

/// Structure shared by class-like classifiers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassData {
    /// Supertype edges, in declaration order.
    pub super_types: Vec<ClassifierId>,
    /// Owned structural features, in declaration order.
    pub features: Vec<FeatureId>,
}

/// A single literal of an enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumLiteral {
    pub name: SmolStr,
    pub value: i32,
}

/// The literal set of an enumeration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnumData {
    /// Literals in declaration order.
    pub literals: Vec<EnumLiteral>,
}

/// The structural variant of a classifier.
#[derive(Clone, Debug, PartialEq)]
pub enum ClassifierKind {
    /// Ordinary class with supertypes and features.
    Class(ClassData),
    /// Closed set of named literals.
    Enumeration(EnumData),
    /// Scalar value type. `scalar` is set for the built-ins; user-defined
    /// primitives leave it empty. `boxed` marks the nullable wrapper
    /// forms of the built-ins.
    Primitive {
        scalar: Option<ScalarKind>,
        boxed: bool,
    },
    /// Generic ordered-sequence container marker.
    ListCollection,
    /// Generic key/value container marker. The conventional `key` and
    /// `value` marker features, when present, live in the class data.
    MapCollection(ClassData),
}

impl ClassifierKind {
    /// An empty ordinary class.
    pub fn class() -> Self {
        Self::Class(ClassData::default())
    }

    /// An empty enumeration.
    pub fn enumeration() -> Self {
        Self::Enumeration(EnumData::default())
    }

    /// A built-in scalar type.
    pub fn scalar(scalar: ScalarKind, boxed: bool) -> Self {
        Self::Primitive {
            scalar: Some(scalar),
            boxed,
        }
    }

    /// A user-defined primitive type.
    pub fn user_primitive() -> Self {
        Self::Primitive {
            scalar: None,
            boxed: false,
        }
    }

    /// A list container marker.
    pub fn list() -> Self {
        Self::ListCollection
    }

    /// An empty map container marker.
    pub fn map_entry() -> Self {
        Self::MapCollection(ClassData::default())
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// A named type owned by a package.
#[derive(Clone, Debug)]
pub struct Classifier {
    pub name: SmolStr,
    /// Owning package; fixed primitives reconstructed by the reverse
    /// mapper belong to no package.
    pub package: Option<PackageId>,
    pub kind: ClassifierKind,
    /// Documentation annotations in declaration order.
    pub annotations: Vec<Annotation>,
    /// Unresolved placeholder from a partially loaded model. Proxies are
    /// skipped rather than translated.
    pub is_proxy: bool,
}

impl Classifier {
    /// Create a classifier with the given name and kind.
    pub fn new(name: impl Into<SmolStr>, kind: ClassifierKind) -> Self {
        Self {
            name: name.into(),
            package: None,
            kind,
            annotations: Vec::new(),
            is_proxy: false,
        }
    }

    /// Set the owning package.
    pub fn with_package(mut self, package: PackageId) -> Self {
        self.package = Some(package);
        self
    }

    /// Add a documentation annotation.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Mark this classifier as an unresolved placeholder.
    pub fn as_proxy(mut self) -> Self {
        self.is_proxy = true;
        self
    }

    /// Returns true if this is an ordinary class.
    pub fn is_class(&self) -> bool {
        matches!(self.kind, ClassifierKind::Class(_))
    }

    /// Returns true if this is an enumeration.
    pub fn is_enumeration(&self) -> bool {
        matches!(self.kind, ClassifierKind::Enumeration(_))
    }

    /// Returns true if this is a primitive (built-in or user-defined).
    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, ClassifierKind::Primitive { .. })
    }

    /// Returns true if this is a map container marker.
    pub fn is_map(&self) -> bool {
        matches!(self.kind, ClassifierKind::MapCollection(_))
    }

    /// The built-in scalar this classifier stands for, if any.
    pub fn builtin_scalar(&self) -> Option<ScalarKind> {
        match self.kind {
            ClassifierKind::Primitive { scalar, .. } => scalar,
            _ => None,
        }
    }

    /// Returns true if this is a boxed (nullable) built-in scalar.
    pub fn is_boxed_scalar(&self) -> bool {
        matches!(
            self.kind,
            ClassifierKind::Primitive {
                scalar: Some(_),
                boxed: true,
            }
        )
    }

    /// Class-shaped payload of this classifier, if it has one.
    pub fn class_data(&self) -> Option<&ClassData> {
        match &self.kind {
            ClassifierKind::Class(data) | ClassifierKind::MapCollection(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable class-shaped payload of this classifier, if it has one.
    pub fn class_data_mut(&mut self) -> Option<&mut ClassData> {
        match &mut self.kind {
            ClassifierKind::Class(data) | ClassifierKind::MapCollection(data) => Some(data),
            _ => None,
        }
    }

    /// Enumeration payload, if this is an enumeration.
    pub fn enum_data(&self) -> Option<&EnumData> {
        match &self.kind {
            ClassifierKind::Enumeration(data) => Some(data),
            _ => None,
        }
    }
}

// ============================================================================
// FEATURES
// ============================================================================

/// The two structural feature kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// Value feature: resolves to a primitive, enumeration, or collection.
    Attribute,
    /// Association feature: resolves to another class.
    Reference,
}

/// A typed, multiplicity-bounded member of a class.
#[derive(Clone, Debug)]
pub struct Feature {
    pub name: SmolStr,
    pub kind: FeatureKind,
    /// Owning class; unset while a reconstructed feature waits for its
    /// domain class to be translated.
    pub owner: Option<ClassifierId>,
    /// Declared target classifier; unset for untyped declarations.
    pub target: Option<ClassifierId>,
    pub multiplicity: Multiplicity,
    /// Documentation annotations in declaration order.
    pub annotations: Vec<Annotation>,
    /// Paired opposite end of a bidirectional reference.
    pub opposite: Option<FeatureId>,
}

impl Feature {
    /// Create a feature with the given name and kind.
    pub fn new(name: impl Into<SmolStr>, kind: FeatureKind) -> Self {
        Self {
            name: name.into(),
            kind,
            owner: None,
            target: None,
            multiplicity: Multiplicity::default(),
            annotations: Vec::new(),
            opposite: None,
        }
    }

    /// Set the target classifier.
    pub fn with_target(mut self, target: ClassifierId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the declared bounds.
    pub fn with_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    /// Add a documentation annotation.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Returns true if this is a value feature.
    pub fn is_attribute(&self) -> bool {
        self.kind == FeatureKind::Attribute
    }

    /// Returns true if this is an association feature.
    pub fn is_reference(&self) -> bool {
        self.kind == FeatureKind::Reference
    }
}

// ============================================================================
// PACKAGES
// ============================================================================

/// A container of classifiers and nested sub-packages.
#[derive(Clone, Debug)]
pub struct Package {
    pub name: SmolStr,
    /// Ontology namespace this package maps to, when declared. Nested
    /// packages without one inherit the nearest ancestor's.
    pub namespace: Option<SmolStr>,
    pub parent: Option<PackageId>,
    pub sub_packages: Vec<PackageId>,
    pub classifiers: Vec<ClassifierId>,
}

impl Package {
    /// Create a package with the given name.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            parent: None,
            sub_packages: Vec::new(),
            classifiers: Vec::new(),
        }
    }

    /// Declare the namespace this package maps to.
    pub fn with_namespace(mut self, namespace: impl Into<SmolStr>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Nest this package under a parent.
    pub fn with_parent(mut self, parent: PackageId) -> Self {
        self.parent = Some(parent);
        self
    }
}

// ============================================================================
// MODEL
// ============================================================================

/// A complete source model.
///
/// Ids handed out by the `add_*` methods index back into this model;
/// the direct accessors (`package`, `classifier`, `feature`) panic on
/// ids that did not come from it.
#[derive(Clone, Debug, Default)]
pub struct MetaModel {
    packages: IndexMap<PackageId, Package>,
    classifiers: IndexMap<ClassifierId, Classifier>,
    features: IndexMap<FeatureId, Feature>,
    /// Unordered pairs recorded when mutual subsumption is rewritten to
    /// equivalence.
    equivalences: Vec<(ClassifierId, ClassifierId)>,
}

impl MetaModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package, wiring it into its parent's sub-package list.
    pub fn add_package(&mut self, package: Package) -> PackageId {
        let id = PackageId(self.packages.len() as u32);
        let parent = package.parent;
        self.packages.insert(id, package);
        if let Some(parent) = parent {
            if let Some(parent_package) = self.packages.get_mut(&parent) {
                parent_package.sub_packages.push(id);
            }
        }
        id
    }

    /// Add a classifier, wiring it into its package's classifier list.
    pub fn add_classifier(&mut self, classifier: Classifier) -> ClassifierId {
        let id = ClassifierId(self.classifiers.len() as u32);
        let package = classifier.package;
        self.classifiers.insert(id, classifier);
        if let Some(package) = package {
            if let Some(owner) = self.packages.get_mut(&package) {
                owner.classifiers.push(id);
            }
        }
        id
    }

    /// Add a feature, wiring it into its owner's feature list when an
    /// owner is already set.
    pub fn add_feature(&mut self, feature: Feature) -> FeatureId {
        let id = FeatureId(self.features.len() as u32);
        let owner = feature.owner;
        self.features.insert(id, feature);
        if let Some(owner) = owner {
            if let Some(data) = self
                .classifiers
                .get_mut(&owner)
                .and_then(Classifier::class_data_mut)
            {
                data.features.push(id);
            }
        }
        id
    }

    /// Add a feature owned by `owner`.
    pub fn add_feature_to(&mut self, owner: ClassifierId, mut feature: Feature) -> FeatureId {
        feature.owner = Some(owner);
        self.add_feature(feature)
    }

    /// Move a feature to a new owning class, detaching it from any
    /// previous owner. Single containment: a feature belongs to the last
    /// class it was attached to.
    pub fn attach_feature(&mut self, feature: FeatureId, owner: ClassifierId) {
        let previous = match self.features.get(&feature) {
            Some(f) if f.owner == Some(owner) => return,
            Some(f) => f.owner,
            None => return,
        };
        if let Some(previous) = previous {
            if let Some(data) = self
                .classifiers
                .get_mut(&previous)
                .and_then(Classifier::class_data_mut)
            {
                data.features.retain(|&f| f != feature);
            }
        }
        if let Some(f) = self.features.get_mut(&feature) {
            f.owner = Some(owner);
        }
        if let Some(data) = self
            .classifiers
            .get_mut(&owner)
            .and_then(Classifier::class_data_mut)
        {
            data.features.push(feature);
        }
    }

    /// Add a supertype edge, ignoring duplicates.
    pub fn add_super_type(&mut self, class: ClassifierId, super_type: ClassifierId) {
        if let Some(data) = self
            .classifiers
            .get_mut(&class)
            .and_then(Classifier::class_data_mut)
        {
            if !data.super_types.contains(&super_type) {
                data.super_types.push(super_type);
            }
        }
    }

    /// Remove a supertype edge if present.
    pub fn remove_super_type(&mut self, class: ClassifierId, super_type: ClassifierId) {
        if let Some(data) = self
            .classifiers
            .get_mut(&class)
            .and_then(Classifier::class_data_mut)
        {
            data.super_types.retain(|&s| s != super_type);
        }
    }

    /// Record an equivalence pair. Pairs are unordered; recording the
    /// same pair twice (in either order) keeps a single entry.
    pub fn record_equivalence(&mut self, a: ClassifierId, b: ClassifierId) {
        if !self.are_equivalent(a, b) {
            self.equivalences.push((a.min(b), a.max(b)));
        }
    }

    /// Returns true if the two classifiers were recorded as equivalent.
    pub fn are_equivalent(&self, a: ClassifierId, b: ClassifierId) -> bool {
        self.equivalences.contains(&(a.min(b), a.max(b)))
    }

    /// All recorded equivalence pairs.
    pub fn equivalences(&self) -> &[(ClassifierId, ClassifierId)] {
        &self.equivalences
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Get a package. Panics if the id is not from this model.
    pub fn package(&self, id: PackageId) -> &Package {
        &self.packages[&id]
    }

    /// Get a classifier. Panics if the id is not from this model.
    pub fn classifier(&self, id: ClassifierId) -> &Classifier {
        &self.classifiers[&id]
    }

    /// Get a mutable classifier. Panics if the id is not from this model.
    pub fn classifier_mut(&mut self, id: ClassifierId) -> &mut Classifier {
        self.classifiers.get_mut(&id).unwrap_or_else(|| {
            panic!("classifier id {id:?} does not belong to this model");
        })
    }

    /// Get a feature. Panics if the id is not from this model.
    pub fn feature(&self, id: FeatureId) -> &Feature {
        &self.features[&id]
    }

    /// Get a mutable feature. Panics if the id is not from this model.
    pub fn feature_mut(&mut self, id: FeatureId) -> &mut Feature {
        self.features.get_mut(&id).unwrap_or_else(|| {
            panic!("feature id {id:?} does not belong to this model");
        })
    }

    /// Iterate over all packages in insertion order.
    pub fn packages(&self) -> impl Iterator<Item = (PackageId, &Package)> {
        self.packages.iter().map(|(&id, package)| (id, package))
    }

    /// Iterate over all classifiers in insertion order.
    pub fn classifiers(&self) -> impl Iterator<Item = (ClassifierId, &Classifier)> {
        self.classifiers
            .iter()
            .map(|(&id, classifier)| (id, classifier))
    }

    /// Iterate over all features in insertion order.
    pub fn features(&self) -> impl Iterator<Item = (FeatureId, &Feature)> {
        self.features.iter().map(|(&id, feature)| (id, feature))
    }

    /// Find the first classifier with the given name.
    pub fn find_classifier(&self, name: &str) -> Option<ClassifierId> {
        self.classifiers
            .iter()
            .find(|(_, classifier)| classifier.name == name)
            .map(|(&id, _)| id)
    }

    /// Find a directly owned feature of `owner` by name.
    pub fn find_feature(&self, owner: ClassifierId, name: &str) -> Option<FeatureId> {
        let data = self.classifiers.get(&owner)?.class_data()?;
        data.features
            .iter()
            .copied()
            .find(|&f| self.features.get(&f).is_some_and(|feature| feature.name == name))
    }

    /// The namespace governing a package: its own declaration, or the
    /// nearest ancestor's.
    pub fn package_namespace(&self, id: PackageId) -> Option<&SmolStr> {
        let mut current = Some(id);
        while let Some(package_id) = current {
            let package = self.packages.get(&package_id)?;
            if let Some(namespace) = &package.namespace {
                return Some(namespace);
            }
            current = package.parent;
        }
        None
    }

    /// The namespace governing a classifier, resolved by walking its
    /// package chain rootward to the first package that declares one.
    pub fn namespace_of(&self, id: ClassifierId) -> Option<&SmolStr> {
        let package = self.classifiers.get(&id)?.package?;
        self.package_namespace(package)
    }
}
