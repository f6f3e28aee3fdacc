//! URI values with namespace and local-name splitting.

use std::fmt;
use std::sync::Arc;

/// An absolute URI identifying an ontology node or vocabulary term.
///
/// Stored as a shared string so clones are cheap; equality and hashing
/// compare the full text. The namespace part runs up to and including
/// the last `#` or `/` separator, the local name is everything after it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uri(Arc<str>);

impl Uri {
    /// Create a URI from its full text.
    pub fn new(uri: impl Into<Arc<str>>) -> Self {
        Self(uri.into())
    }

    /// Join a namespace and a local name.
    ///
    /// A `#` separator is inserted when the namespace does not already
    /// end in one.
    pub fn from_parts(namespace: &str, local_name: &str) -> Self {
        if namespace.ends_with('#') || namespace.ends_with('/') {
            Self(format!("{namespace}{local_name}").into())
        } else {
            Self(format!("{namespace}#{local_name}").into())
        }
    }

    /// Get the URI as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace part, up to and including the last separator.
    ///
    /// A URI without a separator is its own namespace.
    pub fn namespace(&self) -> &str {
        match self.split_index() {
            Some(i) => &self.0[..=i],
            None => &self.0,
        }
    }

    /// The local name after the last separator; empty when there is none.
    pub fn local_name(&self) -> &str {
        match self.split_index() {
            Some(i) => &self.0[i + 1..],
            None => "",
        }
    }

    fn split_index(&self) -> Option<usize> {
        self.0.rfind(['#', '/'])
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Uri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Uri {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
