//! Attribute system for live tree elements
//!
//! Attributes are ordered `(namespace, name, value)` triples. Plain HTML
//! attributes have no namespace; namespaced attributes (e.g. `xlink:href`)
//! are keyed by namespace URI plus local name.

use compact_str::CompactString;
use smallvec::SmallVec;

/// XLink namespace URI, the namespace most commonly seen on SVG `<use>`.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// A single element attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    /// Namespace URI, `None` for plain attributes
    pub namespace: Option<CompactString>,
    /// Local name
    pub name: CompactString,
    /// Attribute value
    pub value: String,
}

impl Attr {
    /// Create a plain (non-namespaced) attribute
    pub fn new(name: impl Into<CompactString>, value: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a namespaced attribute
    pub fn namespaced(
        namespace: impl Into<CompactString>,
        name: impl Into<CompactString>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
            value: value.into(),
        }
    }

    /// Check whether this attribute is addressed by `(namespace, name)`
    #[inline]
    pub fn matches(&self, namespace: Option<&str>, name: &str) -> bool {
        self.namespace.as_deref() == namespace && self.name == name
    }
}

/// Element attributes in document order
pub type Attrs = SmallVec<[Attr; 4]>;

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute value by namespace and name
    fn get_attr(&self, namespace: Option<&str>, name: &str) -> Option<&str>;

    /// Check if an attribute exists
    fn has_attr(&self, namespace: Option<&str>, name: &str) -> bool;

    /// Set an attribute value (insert or update in place)
    fn set_attr(&mut self, namespace: Option<&str>, name: &str, value: impl Into<String>);

    /// Remove an attribute, returning the old value if present
    fn remove_attr(&mut self, namespace: Option<&str>, name: &str) -> Option<String>;
}

impl AttrsExt for Attrs {
    fn get_attr(&self, namespace: Option<&str>, name: &str) -> Option<&str> {
        self.iter()
            .find(|a| a.matches(namespace, name))
            .map(|a| a.value.as_str())
    }

    fn has_attr(&self, namespace: Option<&str>, name: &str) -> bool {
        self.iter().any(|a| a.matches(namespace, name))
    }

    fn set_attr(&mut self, namespace: Option<&str>, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(attr) = self.iter_mut().find(|a| a.matches(namespace, name)) {
            attr.value = value;
        } else {
            self.push(Attr {
                namespace: namespace.map(CompactString::from),
                name: CompactString::from(name),
                value,
            });
        }
    }

    fn remove_attr(&mut self, namespace: Option<&str>, name: &str) -> Option<String> {
        self.iter()
            .position(|a| a.matches(namespace, name))
            .map(|pos| self.remove(pos).value)
    }
}

/// Values produced by naive string interpolation of absent values.
///
/// Setting either of these on a plain attribute removes it instead.
#[inline]
pub fn is_null_sentinel(value: &str) -> bool {
    value == "null" || value == "undefined"
}

/// Map a dataset key to its `data-*` attribute name.
///
/// Follows the DOM `dataset` convention: each ASCII uppercase letter becomes
/// `-` followed by its lowercase form, so `fooBar` reads `data-foo-bar`.
pub fn dataset_attr_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 8);
    name.push_str("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

// =============================================================================
// Tests
// =============================================================================
