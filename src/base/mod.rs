//! Foundation types for the ontomap engine.
//!
//! This module provides fundamental types used by both sides of the
//! translation:
//! - [`Uri`] - node and vocabulary identifiers with namespace splitting
//! - [`Multiplicity`] - lower/upper feature bounds
//! - [`Annotation`] - named key/value documentation records
//!
//! This module has NO dependencies on other ontomap modules.

mod annotation;
mod multiplicity;
mod uri;

pub use annotation::{Annotation, escape_markup};
pub use multiplicity::{Multiplicity, UNBOUNDED};
pub use uri::Uri;
