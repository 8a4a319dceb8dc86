//! Document arena and its live tree semantics
//!
//! The arena owns every node ever created through it. Old and new trees for a
//! morph live in the same document, so moving a node from the new tree into
//! the old one is a re-parent, never a copy.

use std::borrow::Cow;

use crate::attr::{Attrs, AttrsExt};
use crate::dom::{BoolProp, Dom, NodeKind};

use super::{Builder, Callback, CharacterData, DomError, ElementData, NodeData, NodeId, Slot};

// =============================================================================
// Document
// =============================================================================

/// Arena of live nodes
///
/// Unknown handles read like an empty, detached fragment: no attributes, no
/// value, no children. Mutating through an unknown handle fails with
/// [`DomError::UnknownNode`].
#[derive(Debug, Clone, Default)]
pub struct Document {
    slots: Vec<Slot>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of nodes ever allocated (attached or not)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no node was ever allocated
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot::new(data));
        id
    }

    fn slot(&self, id: NodeId) -> Result<&Slot, DomError> {
        self.slots.get(id.index()).ok_or(DomError::UnknownNode(id))
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot, DomError> {
        self.slots.get_mut(id.index()).ok_or(DomError::UnknownNode(id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Creation
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeData::Element(Box::new(ElementData::new(tag))))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, data: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Text(CharacterData::new(data)))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, data: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Comment(CharacterData::new(data)))
    }

    /// Create an empty fragment
    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(NodeData::Fragment)
    }

    /// Materialize a builder into a detached subtree, returning its root
    pub fn build(&mut self, builder: Builder) -> NodeId {
        let Builder {
            data,
            children,
            proxy_for,
        } = builder;
        let id = self.alloc(data);
        self.slots[id.index()].proxy_for = proxy_for;
        for child in children {
            let child_id = self.build(child);
            self.attach_last(id, child_id);
        }
        id
    }

    /// Materialize several builders as the children of a new fragment
    pub fn build_fragment(&mut self, roots: impl IntoIterator<Item = Builder>) -> NodeId {
        let fragment = self.create_fragment();
        for root in roots {
            let child = self.build(root);
            self.attach_last(fragment, child);
        }
        fragment
    }

    /// Link a freshly allocated (parentless) node as the last child
    fn attach_last(&mut self, parent: NodeId, child: NodeId) {
        self.slots[child.index()].parent = Some(parent);
        self.slots[parent.index()].children.push(child);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Node payload
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.slots.get(id.index()).map(|s| &s.data)
    }

    /// Mutable node payload
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.slots.get_mut(id.index()).map(|s| &mut s.data)
    }

    /// Element payload
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(NodeData::as_element)
    }

    /// Mutable element payload
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(NodeData::as_element_mut)
    }

    /// Child handles in order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.slots.get(id.index()) {
            Some(slot) => &slot.children,
            None => &[],
        }
    }

    /// Parent handle, `None` when detached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.index()).and_then(|s| s.parent)
    }

    /// Plain attribute value
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut buf = String::new();
        self.collect_text(id, &mut buf);
        buf
    }

    fn collect_text(&self, id: NodeId, buf: &mut String) {
        match self.get(id) {
            Some(NodeData::Text(t)) => buf.push_str(&t.data),
            Some(NodeData::Comment(_)) | None => {}
            Some(_) => {
                for &child in self.children(id) {
                    self.collect_text(child, buf);
                }
            }
        }
    }

    /// Check whether `ancestor` is `id` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Mark `id` as a stand-in for `target` (or clear the mark)
    pub fn set_proxy(&mut self, id: NodeId, target: Option<NodeId>) -> Result<(), DomError> {
        self.slot_mut(id)?.proxy_for = target;
        Ok(())
    }

    /// Invoke the `on{event}` handler of `id`, returning whether one ran
    pub fn dispatch(&self, id: NodeId, event: &str) -> bool {
        let name = format!("on{event}");
        match self.element(id).and_then(|e| e.handlers.get(name.as_str())) {
            Some(handler) => {
                handler.call(event);
                true
            }
            None => false,
        }
    }

    /// Detach `id` from its parent, if any
    pub fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        self.slot(id)?;
        self.unlink(id);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Structural equality and cloning
    // ─────────────────────────────────────────────────────────────────────────

    /// DOM-style `isEqualNode`: same kind, name, attribute set, value and
    /// recursively equal children. Properties and handlers are ignored.
    pub fn is_equal_node(&self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return true;
        }
        let (Some(da), Some(db)) = (self.get(a), self.get(b)) else {
            return false;
        };
        if da.kind() != db.kind() || da.node_name() != db.node_name() {
            return false;
        }
        match (da, db) {
            (NodeData::Element(ea), NodeData::Element(eb)) => {
                if !same_attr_set(&ea.attrs, &eb.attrs) {
                    return false;
                }
            }
            (NodeData::Text(ta), NodeData::Text(tb))
            | (NodeData::Comment(ta), NodeData::Comment(tb)) => {
                if ta != tb {
                    return false;
                }
            }
            _ => {}
        }
        let (ca, cb) = (self.children(a), self.children(b));
        ca.len() == cb.len() && ca.iter().zip(cb).all(|(&x, &y)| self.is_equal_node(x, y))
    }

    /// Copy `id` into a new detached node, with its subtree when `deep`.
    ///
    /// Unlike the DOM, properties, handlers and proxy marks are copied too, so
    /// a clone morphs exactly like its source.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> Result<NodeId, DomError> {
        let slot = self.slot(id)?;
        let data = slot.data.clone();
        let proxy_for = slot.proxy_for;
        let children = if deep { slot.children.clone() } else { Default::default() };

        let copy = self.alloc(data);
        self.slots[copy.index()].proxy_for = proxy_for;
        for child in children {
            let child_copy = self.clone_node(child, true)?;
            self.attach_last(copy, child_copy);
        }
        Ok(copy)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tree mutation helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Remove `id` from its parent's child list
    fn unlink(&mut self, id: NodeId) {
        let Some(parent) = self.slots[id.index()].parent.take() else {
            return;
        };
        let siblings = &mut self.slots[parent.index()].children;
        if let Some(pos) = siblings.iter().position(|&c| c == id) {
            siblings.remove(pos);
        }
    }

    /// Validate that `child` may be placed under `parent`
    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_slot = self.slot(parent)?;
        let child_slot = self.slot(child)?;
        let accepts_children = parent_slot.data.is_element() || parent_slot.data.is_fragment();
        if !accepts_children
            || child_slot.data.is_fragment()
            || self.is_inclusive_ancestor(child, parent)
        {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    /// Position of `child` under `parent`, or `NotAChild`
    fn position_of(&self, parent: NodeId, child: NodeId) -> Result<usize, DomError> {
        self.slot(parent)?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(DomError::NotAChild { parent, child })
    }

    fn element_or_err(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        self.slot_mut(id)?
            .data
            .as_element_mut()
            .ok_or(DomError::WrongNodeKind(id))
    }
}

/// Attribute sets are equal regardless of order
fn same_attr_set(a: &Attrs, b: &Attrs) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|attr| b.get_attr(attr.namespace.as_deref(), &attr.name) == Some(attr.value.as_str()))
}

fn validate_attr_name(name: &str) -> Result<(), DomError> {
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c == '=' || c == '>') {
        return Err(DomError::InvalidAttributeName(name.to_string()));
    }
    Ok(())
}

// =============================================================================
// Dom implementation
// =============================================================================

impl Dom for Document {
    type Node = NodeId;
    type Handler = Callback;
    type Error = DomError;

    fn contains(&self, node: NodeId) -> bool {
        node.index() < self.slots.len()
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        self.get(node).map_or(NodeKind::Fragment, NodeData::kind)
    }

    fn node_name(&self, node: NodeId) -> &str {
        self.get(node).map_or("#document-fragment", NodeData::node_name)
    }

    fn same_node(&self, node: NodeId, other: NodeId) -> Option<bool> {
        let target = self.slots.get(node.index())?.proxy_for?;
        Some(target == other)
    }

    fn attributes(&self, node: NodeId) -> Attrs {
        self.element(node).map(|e| e.attrs.clone()).unwrap_or_default()
    }

    fn get_attribute(&self, node: NodeId, namespace: Option<&str>, name: &str) -> Option<&str> {
        self.element(node).and_then(|e| e.attrs.get_attr(namespace, name))
    }

    fn set_attribute(
        &mut self,
        node: NodeId,
        namespace: Option<&str>,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        validate_attr_name(name)?;
        self.element_or_err(node)?.attrs.set_attr(namespace, name, value);
        Ok(())
    }

    fn remove_attribute(
        &mut self,
        node: NodeId,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<(), DomError> {
        self.element_or_err(node)?.attrs.remove_attr(namespace, name);
        Ok(())
    }

    fn node_value(&self, node: NodeId) -> Option<&str> {
        self.get(node)
            .and_then(NodeData::character_data)
            .map(|c| c.data.as_str())
    }

    fn set_node_value(&mut self, node: NodeId, value: &str) -> Result<(), DomError> {
        let data = self
            .slot_mut(node)?
            .data
            .character_data_mut()
            .ok_or(DomError::WrongNodeKind(node))?;
        value.clone_into(&mut data.data);
        Ok(())
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    fn child_at(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.children(node).get(index).copied()
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.unlink(child);
        self.attach_last(parent, child);
        Ok(())
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.position_of(parent, child)?;
        self.unlink(child);
        Ok(())
    }

    fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> Result<(), DomError> {
        self.position_of(parent, old_child)?;
        if new_child == old_child {
            return Ok(());
        }
        self.check_insert(parent, new_child)?;
        self.unlink(new_child);
        // position may have shifted if new_child was an earlier sibling
        let pos = self.position_of(parent, old_child)?;
        self.slots[parent.index()].children[pos] = new_child;
        self.slots[new_child.index()].parent = Some(parent);
        self.slots[old_child.index()].parent = None;
        Ok(())
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        reference: NodeId,
    ) -> Result<(), DomError> {
        self.position_of(parent, reference)?;
        if new_child == reference {
            return Ok(());
        }
        self.check_insert(parent, new_child)?;
        self.unlink(new_child);
        let pos = self.position_of(parent, reference)?;
        self.slots[parent.index()].children.insert(pos, new_child);
        self.slots[new_child.index()].parent = Some(parent);
        Ok(())
    }

    fn value(&self, node: NodeId) -> Cow<'_, str> {
        let Some(elem) = self.element(node) else {
            return Cow::Borrowed("");
        };
        if let Some(value) = &elem.form.value {
            return Cow::Borrowed(value.as_str());
        }
        if elem.is("textarea") {
            return Cow::Owned(self.text_content(node));
        }
        Cow::Borrowed(elem.get_attr("value").unwrap_or(""))
    }

    fn set_value(&mut self, node: NodeId, value: &str) -> Result<(), DomError> {
        self.element_or_err(node)?.form.value = Some(value.to_string());
        Ok(())
    }

    fn bool_property(&self, node: NodeId, prop: BoolProp) -> bool {
        let Some(elem) = self.element(node) else {
            return false;
        };
        match prop {
            BoolProp::Checked => elem.form.checked.unwrap_or_else(|| elem.has_attr("checked")),
            BoolProp::Selected => elem.form.selected.unwrap_or_else(|| elem.has_attr("selected")),
            BoolProp::Disabled => elem.has_attr("disabled"),
            BoolProp::Indeterminate => elem.form.indeterminate,
        }
    }

    fn set_bool_property(
        &mut self,
        node: NodeId,
        prop: BoolProp,
        value: bool,
    ) -> Result<(), DomError> {
        let elem = self.element_or_err(node)?;
        match prop {
            BoolProp::Checked => elem.form.checked = Some(value),
            BoolProp::Selected => elem.form.selected = Some(value),
            BoolProp::Indeterminate => elem.form.indeterminate = value,
            // reflects its attribute, no separate state
            BoolProp::Disabled => {
                if value {
                    elem.attrs.set_attr(None, "disabled", "");
                } else {
                    elem.attrs.remove_attr(None, "disabled");
                }
            }
        }
        Ok(())
    }

    fn handler(&self, node: NodeId, name: &str) -> Option<Callback> {
        self.element(node).and_then(|e| e.handlers.get(name).cloned())
    }

    fn set_handler(
        &mut self,
        node: NodeId,
        name: &str,
        handler: Option<Callback>,
    ) -> Result<(), DomError> {
        let elem = self.element_or_err(node)?;
        match handler {
            Some(h) => {
                elem.handlers.insert(name.into(), h);
            }
            None => {
                elem.handlers.remove(name);
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
