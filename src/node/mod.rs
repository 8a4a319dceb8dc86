//! In-memory live tree.
//!
//! [`Document`] is an arena of node slots addressed by [`NodeId`] handles.
//! It implements [`crate::Dom`] with live-DOM semantics (inserting a node
//! moves it, form properties go dirty once assigned), so it can stand in for
//! a browser in tests and in non-browser hosts.
//!
//! Nodes are never freed. A node detached by a morph stays addressable, which
//! keeps handles held by callers valid.

mod builder;
mod document;
mod element;
mod error;
mod text;

pub use builder::{Builder, comment, element, text};
pub use document::Document;
pub use element::{Callback, ElementData, FormState};
pub use error::DomError;
pub use text::CharacterData;

use std::fmt;

use smallvec::SmallVec;

use crate::dom::NodeKind;

// =============================================================================
// NodeId
// =============================================================================

/// Handle to a node slot inside a [`Document`]
///
/// - 4 bytes, `Copy`
/// - Only meaningful for the document that created it
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a NodeId from a raw slot index.
    ///
    /// Mostly useful in tests; ids handed out by a [`Document`] are the only
    /// ones guaranteed to resolve.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw slot index
    #[inline]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// NodeData
// =============================================================================

/// Payload of a node slot
#[derive(Debug, Clone)]
pub enum NodeData {
    Element(Box<ElementData>),
    Text(CharacterData),
    Comment(CharacterData),
    Fragment,
}

impl NodeData {
    // Generates for each variant (element -> Element, etc.):
    //   - is_xxx(&self) -> bool
    //   - as_xxx(&self) -> Option<&Type>
    //   - as_xxx_mut(&mut self) -> Option<&mut Type>
    impl_enum_accessors!(element: ElementData, text: CharacterData, comment: CharacterData);

    /// Node kind discriminant
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
            Self::Comment(_) => NodeKind::Comment,
            Self::Fragment => NodeKind::Fragment,
        }
    }

    /// Check if this is a fragment container
    #[inline]
    pub fn is_fragment(&self) -> bool {
        matches!(self, Self::Fragment)
    }

    /// Node name as the DOM reports it
    pub fn node_name(&self) -> &str {
        match self {
            Self::Element(e) => &e.tag,
            Self::Text(_) => "#text",
            Self::Comment(_) => "#comment",
            Self::Fragment => "#document-fragment",
        }
    }

    /// String value of text and comment nodes
    pub fn character_data(&self) -> Option<&CharacterData> {
        match self {
            Self::Text(t) | Self::Comment(t) => Some(t),
            _ => None,
        }
    }

    /// Mutable string value of text and comment nodes
    pub fn character_data_mut(&mut self) -> Option<&mut CharacterData> {
        match self {
            Self::Text(t) | Self::Comment(t) => Some(t),
            _ => None,
        }
    }
}

/// Child handle list
pub type Children = SmallVec<[NodeId; 8]>;

// =============================================================================
// Slot
// =============================================================================

/// One arena entry
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Children,
    /// Live node this slot stands in for (identity predicate target)
    pub(crate) proxy_for: Option<NodeId>,
    pub(crate) data: NodeData,
}

impl Slot {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Children::new(),
            proxy_for: None,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_data_accessors() {
        let mut data = NodeData::Element(Box::new(ElementData::new("div")));
        assert!(data.is_element());
        assert!(!data.is_text());
        assert_eq!(data.kind(), NodeKind::Element);
        assert_eq!(data.node_name(), "div");

        if let Some(elem) = data.as_element_mut() {
            elem.tag = "span".into();
        }
        assert_eq!(data.node_name(), "span");
        assert!(data.character_data().is_none());
    }

    #[test]
    fn test_character_data_names() {
        let text = NodeData::Text(CharacterData::new("hi"));
        let comment = NodeData::Comment(CharacterData::new("note"));

        assert_eq!(text.node_name(), "#text");
        assert_eq!(comment.node_name(), "#comment");
        assert_eq!(NodeData::Fragment.node_name(), "#document-fragment");
        assert_eq!(comment.character_data().map(|c| c.data.as_str()), Some("note"));
        assert!(NodeData::Fragment.is_fragment());
    }

    #[test]
    fn test_node_id_format() {
        let id = NodeId::from_raw(12);
        assert_eq!(format!("{id:?}"), "NodeId(12)");
        assert_eq!(id.to_string(), "#12");
        assert_eq!(id.as_raw(), 12);
    }
}
