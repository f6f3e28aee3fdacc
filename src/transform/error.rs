//! Translation failures.

use smol_str::SmolStr;
use thiserror::Error;

use crate::ontology::StoreError;

/// Failures raised while translating in either direction.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TransformError {
    /// A classifier or feature sits in a package chain with no declared
    /// namespace, so no URI can be minted for it.
    #[error("no namespace declared for '{name}'")]
    UnresolvableNamespace { name: SmolStr },

    /// The node store rejected a mutation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TransformError {
    pub(crate) fn unresolvable_namespace(name: impl Into<SmolStr>) -> Self {
        Self::UnresolvableNamespace { name: name.into() }
    }
}
