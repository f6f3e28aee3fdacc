//! Source-side model: packages, classifiers, and structural features.

mod model;

pub use model::{
    ClassData, Classifier, ClassifierId, ClassifierKind, EnumData, EnumLiteral, Feature,
    FeatureId, FeatureKind, MetaModel, Package, PackageId, ScalarKind,
};
