//! The live tree interface consumed by the morph algorithm
//!
//! The algorithm never builds or owns nodes itself. It reads and mutates a
//! live environment through this trait: a browser binding, an arena like
//! [`crate::node::Document`], or any other tree that hands out stable node
//! handles.
//!
//! # Move semantics
//!
//! [`Dom::append_child`], [`Dom::insert_before`] and [`Dom::replace_child`]
//! must detach the inserted node from its current parent first, exactly like
//! the DOM does. Child reconciliation relies on this: splicing a node taken
//! from the new tree into the old tree shrinks the new parent's child list.

use std::borrow::Cow;
use std::fmt;

use crate::attr::Attrs;

/// Node kind discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Element,
    Text,
    Comment,
    /// Multi-root container; never a valid single root for a full morph
    Fragment,
}

impl NodeKind {
    /// Text and comment nodes carry a mutable string value
    #[inline]
    pub fn is_character_data(self) -> bool {
        matches!(self, Self::Text | Self::Comment)
    }
}

/// Boolean element properties that live outside plain attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolProp {
    Checked,
    Disabled,
    /// Property-only; has no attribute form
    Indeterminate,
    Selected,
}

impl BoolProp {
    /// Attribute name mirrored by this property, if any
    pub fn attr_name(self) -> Option<&'static str> {
        match self {
            Self::Checked => Some("checked"),
            Self::Disabled => Some("disabled"),
            Self::Selected => Some("selected"),
            Self::Indeterminate => None,
        }
    }
}

/// Live tree mutation interface.
///
/// Handles are cheap copies; equality of handles means "the same live node".
/// Every mutating operation may fail with the environment's own error type,
/// which the morph algorithm propagates untouched.
pub trait Dom {
    /// Node handle
    type Node: Copy + Eq + fmt::Debug;
    /// Event handler value stored under an `on*` name
    type Handler: Clone;
    /// Environment error
    type Error: std::error::Error + 'static;

    /// Check that `node` resolves to a live node
    fn contains(&self, node: Self::Node) -> bool;

    /// Node kind
    fn kind(&self, node: Self::Node) -> NodeKind;

    /// Tag name for elements, `#text` / `#comment` / `#document-fragment` otherwise
    fn node_name(&self, node: Self::Node) -> &str;

    /// Stable identity hint. Absent or empty ids are `None`.
    fn id(&self, node: Self::Node) -> Option<&str> {
        if self.kind(node) != NodeKind::Element {
            return None;
        }
        self.get_attribute(node, None, "id").filter(|id| !id.is_empty())
    }

    /// Native identity predicate carried by `node`, applied to `other`.
    ///
    /// `None` means `node` exposes no predicate at all.
    fn same_node(&self, _node: Self::Node, _other: Self::Node) -> Option<bool> {
        None
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attributes
    // ─────────────────────────────────────────────────────────────────────────

    /// Snapshot of all attributes in document order (empty for non-elements)
    fn attributes(&self, node: Self::Node) -> Attrs;

    /// Get an attribute value
    fn get_attribute(&self, node: Self::Node, namespace: Option<&str>, name: &str) -> Option<&str>;

    /// Check if an attribute exists
    fn has_attribute(&self, node: Self::Node, namespace: Option<&str>, name: &str) -> bool {
        self.get_attribute(node, namespace, name).is_some()
    }

    /// Set an attribute value
    fn set_attribute(
        &mut self,
        node: Self::Node,
        namespace: Option<&str>,
        name: &str,
        value: &str,
    ) -> Result<(), Self::Error>;

    /// Remove an attribute. Removing an absent attribute is a no-op.
    fn remove_attribute(
        &mut self,
        node: Self::Node,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<(), Self::Error>;

    // ─────────────────────────────────────────────────────────────────────────
    // Character data
    // ─────────────────────────────────────────────────────────────────────────

    /// String value of text and comment nodes
    fn node_value(&self, node: Self::Node) -> Option<&str>;

    /// Overwrite the string value of a text or comment node
    fn set_node_value(&mut self, node: Self::Node, value: &str) -> Result<(), Self::Error>;

    // ─────────────────────────────────────────────────────────────────────────
    // Children
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of children
    fn child_count(&self, node: Self::Node) -> usize;

    /// Child at `index`, if any
    fn child_at(&self, node: Self::Node, index: usize) -> Option<Self::Node>;

    /// First child, if any
    fn first_child(&self, node: Self::Node) -> Option<Self::Node> {
        self.child_at(node, 0)
    }

    /// Move `child` to the end of `parent`'s children
    fn append_child(&mut self, parent: Self::Node, child: Self::Node) -> Result<(), Self::Error>;

    /// Detach `child` from `parent`
    fn remove_child(&mut self, parent: Self::Node, child: Self::Node) -> Result<(), Self::Error>;

    /// Put `new_child` where `old_child` is and detach `old_child`
    fn replace_child(
        &mut self,
        parent: Self::Node,
        new_child: Self::Node,
        old_child: Self::Node,
    ) -> Result<(), Self::Error>;

    /// Move `new_child` immediately before `reference`
    fn insert_before(
        &mut self,
        parent: Self::Node,
        new_child: Self::Node,
        reference: Self::Node,
    ) -> Result<(), Self::Error>;

    // ─────────────────────────────────────────────────────────────────────────
    // Element properties
    // ─────────────────────────────────────────────────────────────────────────

    /// Current `value` property of a form control (empty when not applicable)
    fn value(&self, node: Self::Node) -> Cow<'_, str>;

    /// Assign the `value` property
    fn set_value(&mut self, node: Self::Node, value: &str) -> Result<(), Self::Error>;

    /// Read a boolean property
    fn bool_property(&self, node: Self::Node, prop: BoolProp) -> bool;

    /// Assign a boolean property
    fn set_bool_property(
        &mut self,
        node: Self::Node,
        prop: BoolProp,
        value: bool,
    ) -> Result<(), Self::Error>;

    // ─────────────────────────────────────────────────────────────────────────
    // Event handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// Handler stored under `name` (e.g. `onclick`)
    fn handler(&self, node: Self::Node, name: &str) -> Option<Self::Handler>;

    /// Store or clear the handler under `name`
    fn set_handler(
        &mut self,
        node: Self::Node,
        name: &str,
        handler: Option<Self::Handler>,
    ) -> Result<(), Self::Error>;
}
