//! Bidirectional translation between the two representations.
//!
//! ```text
//! MetaModel     → ForwardMapper → OntologyStore
//! OntologyStore → ReverseMapper → MetaModel
//! ```
//!
//! Each direction is a one-shot mapper owning a fresh identity cache.
//! The directions are not exact inverses; where they differ (bounds,
//! containers, characteristics) the mapper docs spell out the mapping.

mod cache;
mod cardinality;
mod collections;
mod error;
mod forward;
mod reverse;

pub use cache::IdentityCache;
pub use cardinality::{CardinalityBound, attribute_bounds, synthesize};
pub use error::TransformError;
pub use forward::{ForwardMapper, TransformOptions};
pub use reverse::{NamespaceBindings, ReverseMapper};
