//! Detached tree builders
//!
//! A [`Builder`] describes a subtree without touching any document. Hand it
//! to [`super::Document::build`] to materialize live nodes.
//!
//! ```
//! use tola_morph::node::{Document, element};
//!
//! let mut doc = Document::new();
//! let list = doc.build(
//!     element("ul")
//!         .child(element("li").id("a").text("one"))
//!         .child(element("li").id("b").text("two")),
//! );
//! assert_eq!(doc.children(list).len(), 2);
//! ```

use compact_str::CompactString;

use crate::attr::AttrsExt;
use crate::dom::BoolProp;

use super::{Callback, CharacterData, ElementData, NodeData};

/// Detached node description
#[derive(Debug, Clone)]
pub struct Builder {
    pub(crate) data: NodeData,
    pub(crate) children: Vec<Builder>,
    pub(crate) proxy_for: Option<super::NodeId>,
}

/// Start an element builder
pub fn element(tag: impl Into<CompactString>) -> Builder {
    Builder::new(NodeData::Element(Box::new(ElementData::new(tag))))
}

/// Text node builder
pub fn text(data: impl Into<String>) -> Builder {
    Builder::new(NodeData::Text(CharacterData::new(data)))
}

/// Comment node builder
pub fn comment(data: impl Into<String>) -> Builder {
    Builder::new(NodeData::Comment(CharacterData::new(data)))
}

impl Builder {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            children: Vec::new(),
            proxy_for: None,
        }
    }

    /// Apply `f` to the element payload; non-elements are left unchanged
    fn with_element(mut self, f: impl FnOnce(&mut ElementData)) -> Self {
        if let Some(elem) = self.data.as_element_mut() {
            f(elem);
        }
        self
    }

    /// Set a plain attribute
    pub fn attr(self, name: &str, value: impl Into<String>) -> Self {
        self.with_element(|e| e.attrs.set_attr(None, name, value))
    }

    /// Set a namespaced attribute
    pub fn attr_ns(self, namespace: &str, name: &str, value: impl Into<String>) -> Self {
        self.with_element(|e| e.attrs.set_attr(Some(namespace), name, value))
    }

    /// Set the `id` attribute
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Assign the `value` property without touching the attribute
    pub fn value(self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.with_element(|e| e.form.value = Some(value))
    }

    /// Assign a boolean property without touching the attribute
    pub fn prop(self, prop: BoolProp, value: bool) -> Self {
        self.with_element(|e| match prop {
            BoolProp::Checked => e.form.checked = Some(value),
            BoolProp::Selected => e.form.selected = Some(value),
            BoolProp::Indeterminate => e.form.indeterminate = value,
            BoolProp::Disabled => {
                if value {
                    e.attrs.set_attr(None, "disabled", "");
                } else {
                    e.attrs.remove_attr(None, "disabled");
                }
            }
        })
    }

    /// Attach an event handler under an `on*` name
    pub fn on(self, name: &str, handler: Callback) -> Self {
        self.with_element(|e| {
            e.handlers.insert(name.into(), handler);
        })
    }

    /// Mark this node as a stand-in for the live node `target`.
    ///
    /// The materialized node's identity predicate reports true exactly for
    /// `target`, so a morph keeps `target` instead of this placeholder.
    pub fn proxy_for(mut self, target: super::NodeId) -> Self {
        self.proxy_for = Some(target);
        self
    }

    /// Append a child builder
    pub fn child(mut self, child: Builder) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child builders
    pub fn children(mut self, children: impl IntoIterator<Item = Builder>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append a text child
    pub fn text(self, data: impl Into<String>) -> Self {
        self.child(text(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_element() {
        let b = element("input")
            .attr("type", "checkbox")
            .id("agree")
            .prop(BoolProp::Checked, true)
            .prop(BoolProp::Disabled, true)
            .value("yes");

        let elem = b.data.as_element().unwrap();
        assert_eq!(elem.get_attr("type"), Some("checkbox"));
        assert_eq!(elem.id(), Some("agree"));
        assert!(elem.has_attr("disabled"));
        assert_eq!(elem.form.checked, Some(true));
        assert_eq!(elem.form.value.as_deref(), Some("yes"));
    }

    #[test]
    fn test_builder_ignores_element_ops_on_text() {
        let b = text("hello").attr("class", "x").id("nope");
        assert!(b.data.is_text());
        assert_eq!(b.data.as_text().map(|t| t.data.as_str()), Some("hello"));
    }

    #[test]
    fn test_builder_children() {
        let b = element("ul")
            .child(element("li").text("1"))
            .children([element("li"), element("li")])
            .text("tail");
        assert_eq!(b.children.len(), 4);
        assert!(b.children[3].data.is_text());
    }
}
