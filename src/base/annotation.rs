//! Documentation annotations and the comment escaping transform.

use indexmap::IndexMap;
use smol_str::SmolStr;

/// A named documentation record with ordered key/value details.
///
/// On the metamodel side annotations hang off classifiers and features;
/// the forward mapper flattens them into comment literals, the reverse
/// mapper reconstructs them from stored comment/label/definition text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Annotation {
    /// Identifies the annotation's origin, usually a vocabulary term URI.
    pub source: SmolStr,
    /// Detail entries in insertion order.
    pub details: IndexMap<SmolStr, String>,
}

impl Annotation {
    /// Create an annotation with no details.
    pub fn new(source: impl Into<SmolStr>) -> Self {
        Self {
            source: source.into(),
            details: IndexMap::new(),
        }
    }

    /// Create an annotation carrying a single detail entry.
    pub fn entry(
        source: impl Into<SmolStr>,
        key: impl Into<SmolStr>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(source).with_detail(key, value)
    }

    /// Add a detail entry.
    pub fn with_detail(mut self, key: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Flatten to the single-line comment layout: the source followed by
    /// `": "`, then `"  key:value"` per detail in insertion order.
    pub fn flatten(&self) -> String {
        let mut text = format!("{}: ", self.source);
        for (key, value) in &self.details {
            text.push_str("  ");
            text.push_str(key);
            text.push(':');
            text.push_str(value);
        }
        text
    }
}

/// Escape markup-significant characters for storage in comment literals.
///
/// Rewrites `&`, `<`, `>`, `'` and `"` to their entity forms. Each
/// character is rewritten independently, so running the transform over
/// already-escaped text escapes the entities' ampersands again. That gap
/// is long-standing observable behavior; callers apply the transform
/// exactly once per raw annotation string.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
