//! Node patcher
//!
//! Copies the content of a new node onto an old node of the same kind.
//! Children and node identity are left alone; the walker owns both.

use compact_str::CompactString;

use crate::attr::{AttrsExt, is_null_sentinel};
use crate::dom::{BoolProp, Dom, NodeKind};

/// Make `old`'s own content match `new`.
///
/// Covers attributes, text/comment values, form-control properties of
/// `input`, `option` and `textarea`, and the handlers named in `events`.
pub fn patch<D: Dom>(
    dom: &mut D,
    new: D::Node,
    old: D::Node,
    events: &[CompactString],
) -> Result<(), D::Error> {
    match dom.kind(new) {
        NodeKind::Element => {
            copy_attrs(dom, new, old)?;

            match dom.node_name(new).to_ascii_lowercase().as_str() {
                "input" => update_input(dom, new, old)?,
                "option" => update_option(dom, new, old)?,
                "textarea" => update_textarea(dom, new, old)?,
                _ => {}
            }
        }
        NodeKind::Text | NodeKind::Comment => {
            let value = dom.node_value(new).unwrap_or_default().to_string();
            if dom.node_value(old) != Some(value.as_str()) {
                dom.set_node_value(old, &value)?;
            }
        }
        NodeKind::Fragment => {}
    }

    if !events.is_empty() {
        copy_events(dom, new, old, events)?;
    }
    Ok(())
}

// =============================================================================
// Attributes
// =============================================================================

fn copy_attrs<D: Dom>(dom: &mut D, new: D::Node, old: D::Node) -> Result<(), D::Error> {
    let new_attrs = dom.attributes(new);

    for attr in &new_attrs {
        let namespace = attr.namespace.as_deref();
        let current = dom.get_attribute(old, namespace, &attr.name);
        let differs = current != Some(attr.value.as_str());
        let present = current.is_some();

        if namespace.is_none() && is_null_sentinel(&attr.value) {
            // "null"/"undefined" mean "no attribute"
            if present {
                dom.remove_attribute(old, None, &attr.name)?;
            }
        } else if differs {
            dom.set_attribute(old, namespace, &attr.name, &attr.value)?;
        }
    }

    for attr in dom.attributes(old).iter().rev() {
        let namespace = attr.namespace.as_deref();
        if !new_attrs.has_attr(namespace, &attr.name) {
            dom.remove_attribute(old, namespace, &attr.name)?;
        }
    }
    Ok(())
}

// =============================================================================
// Form controls
// =============================================================================

/// Lowercased `type` attribute, `text` when absent
fn input_type<D: Dom>(dom: &D, node: D::Node) -> CompactString {
    match dom.get_attribute(node, None, "type") {
        Some(ty) if !ty.is_empty() => ty.to_ascii_lowercase().into(),
        _ => CompactString::new("text"),
    }
}

/// Sync a boolean property and its bare attribute
fn sync_bool<D: Dom>(dom: &mut D, new: D::Node, old: D::Node, prop: BoolProp) -> Result<(), D::Error> {
    let wanted = dom.bool_property(new, prop);
    if wanted == dom.bool_property(old, prop) {
        return Ok(());
    }

    dom.set_bool_property(old, prop, wanted)?;
    if let Some(name) = prop.attr_name() {
        if wanted {
            dom.set_attribute(old, None, name, "")?;
        } else {
            dom.remove_attribute(old, None, name)?;
        }
    }
    Ok(())
}

/// The `value` attribute of an input only seeds its value, so the property
/// has to be written as well. Same for `checked` and `disabled`.
fn update_input<D: Dom>(dom: &mut D, new: D::Node, old: D::Node) -> Result<(), D::Error> {
    let new_value = dom.value(new).into_owned();
    let old_value = dom.value(old).into_owned();

    sync_bool(dom, new, old, BoolProp::Checked)?;
    sync_bool(dom, new, old, BoolProp::Disabled)?;
    // property-only, never reflected
    let indeterminate = dom.bool_property(new, BoolProp::Indeterminate);
    if indeterminate != dom.bool_property(old, BoolProp::Indeterminate) {
        dom.set_bool_property(old, BoolProp::Indeterminate, indeterminate)?;
    }

    let ty = input_type(dom, old);
    // file inputs cannot be assigned a value
    if ty == "file" {
        return Ok(());
    }

    if new_value != old_value {
        dom.set_attribute(old, None, "value", &new_value)?;
        dom.set_value(old, &new_value)?;
    }

    if new_value == "null" {
        dom.set_value(old, "")?;
        dom.remove_attribute(old, None, "value")?;
    }

    if !dom.has_attribute(new, None, "value") {
        if dom.has_attribute(old, None, "value") {
            dom.remove_attribute(old, None, "value")?;
        }
    } else if ty == "range" {
        // sliders only move their thumb on a property write
        dom.set_value(old, &new_value)?;
    }
    Ok(())
}

fn update_option<D: Dom>(dom: &mut D, new: D::Node, old: D::Node) -> Result<(), D::Error> {
    sync_bool(dom, new, old, BoolProp::Selected)
}

/// Some environments keep a textarea's value in its first text child, so
/// that child is kept in step with the property.
fn update_textarea<D: Dom>(dom: &mut D, new: D::Node, old: D::Node) -> Result<(), D::Error> {
    let new_value = dom.value(new).into_owned();
    if dom.value(old) != new_value {
        dom.set_value(old, &new_value)?;
    }

    let Some(first) = dom.first_child(old) else {
        return Ok(());
    };
    if !dom.kind(first).is_character_data() || dom.node_value(first) == Some(new_value.as_str()) {
        return Ok(());
    }

    // Legacy engines report the placeholder as the text child. An empty
    // update must not wipe it.
    let placeholder = dom.get_attribute(old, None, "placeholder").unwrap_or_default();
    if new_value.is_empty() && dom.node_value(first) == Some(placeholder) {
        return Ok(());
    }

    dom.set_node_value(first, &new_value)
}

// =============================================================================
// Event handlers
// =============================================================================

fn copy_events<D: Dom>(
    dom: &mut D,
    new: D::Node,
    old: D::Node,
    events: &[CompactString],
) -> Result<(), D::Error> {
    for name in events {
        match dom.handler(new, name) {
            Some(handler) => dom.set_handler(old, name, Some(handler))?,
            None if dom.handler(old, name).is_some() => dom.set_handler(old, name, None)?,
            None => {}
        }
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::events::DEFAULT_EVENTS;
    use crate::node::{Callback, Document, NodeId, element};

    fn patch_default(doc: &mut Document, new: NodeId, old: NodeId) {
        patch(doc, new, old, &[]).unwrap();
    }

    fn events() -> Vec<CompactString> {
        DEFAULT_EVENTS.iter().map(|&e| CompactString::new(e)).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attributes
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_copy_attrs_adds_updates_and_removes() {
        let mut doc = Document::new();
        let old = doc.build(element("a").attr("href", "/old").attr("target", "_blank"));
        let new = doc.build(element("a").attr("href", "/new").attr("rel", "next"));

        patch_default(&mut doc, new, old);

        assert_eq!(doc.attr(old, "href"), Some("/new"));
        assert_eq!(doc.attr(old, "rel"), Some("next"));
        assert_eq!(doc.attr(old, "target"), None);
        // new node untouched
        assert_eq!(doc.attributes(new).len(), 2);
    }

    #[test]
    fn test_null_sentinel_removes_attribute() {
        let mut doc = Document::new();
        let old = doc.build(element("div").attr("title", "x").attr("lang", "en"));
        let new = doc.build(
            element("div")
                .attr("title", "null")
                .attr("lang", "undefined")
                .attr("dir", "null"),
        );

        patch_default(&mut doc, new, old);

        assert!(!doc.has_attribute(old, None, "title"));
        assert!(!doc.has_attribute(old, None, "lang"));
        assert!(!doc.has_attribute(old, None, "dir"));
    }

    #[test]
    fn test_namespaced_null_is_a_plain_value() {
        let mut doc = Document::new();
        let old = doc.build(element("use"));
        let new = doc.build(element("use").attr_ns(crate::attr::XLINK_NS, "href", "null"));

        patch_default(&mut doc, new, old);

        assert_eq!(doc.get_attribute(old, Some(crate::attr::XLINK_NS), "href"), Some("null"));
    }

    #[test]
    fn test_text_value_is_copied() {
        let mut doc = Document::new();
        let old = doc.create_text("before");
        let new = doc.create_text("after");

        patch_default(&mut doc, new, old);

        assert_eq!(doc.node_value(old), Some("after"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inputs
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_input_value_removed_when_new_has_none() {
        let mut doc = Document::new();
        let old = doc.build(element("input").attr("type", "text").attr("value", "howdy"));
        let new = doc.build(element("input").attr("type", "text"));

        patch_default(&mut doc, new, old);

        assert!(!doc.has_attribute(old, None, "value"));
        assert_eq!(doc.value(old), "");
    }

    #[test]
    fn test_input_value_set_from_new() {
        let mut doc = Document::new();
        let old = doc.build(element("input").attr("value", "a"));
        let new = doc.build(element("input").attr("value", "b"));
        doc.set_value(old, "typed").unwrap();

        patch_default(&mut doc, new, old);

        assert_eq!(doc.value(old), "b");
        assert_eq!(doc.attr(old, "value"), Some("b"));
    }

    #[test]
    fn test_input_value_property_only() {
        let mut doc = Document::new();
        let old = doc.build(element("input"));
        let new = doc.build(element("input").value("hi"));

        patch_default(&mut doc, new, old);

        assert_eq!(doc.value(old), "hi");
        // the value attribute follows the new node's markup, not its property
        assert!(!doc.has_attribute(old, None, "value"));
    }

    #[test]
    fn test_input_null_value_clears() {
        let mut doc = Document::new();
        let old = doc.build(element("input").attr("value", "x"));
        let new = doc.build(element("input").value("null"));

        patch_default(&mut doc, new, old);

        assert_eq!(doc.value(old), "");
        assert!(!doc.has_attribute(old, None, "value"));
    }

    #[test]
    fn test_file_input_value_untouched() {
        let mut doc = Document::new();
        let old = doc.build(element("input").attr("type", "file"));
        doc.set_value(old, "C:\\fakepath\\a.txt").unwrap();
        let new = doc.build(element("input").attr("type", "file").attr("value", "other"));

        patch_default(&mut doc, new, old);

        assert_eq!(doc.value(old), "C:\\fakepath\\a.txt");
        // plain attributes are still synced
        assert_eq!(doc.attr(old, "value"), Some("other"));
    }

    #[test]
    fn test_range_value_follows_new() {
        let mut doc = Document::new();
        let old = doc.build(element("input").attr("type", "range").attr("value", "5"));
        let new = doc.build(element("input").attr("type", "range").attr("value", "5"));
        doc.set_value(old, "9").unwrap();

        patch_default(&mut doc, new, old);

        assert_eq!(doc.value(old), "5");
        assert_eq!(doc.attr(old, "value"), Some("5"));
    }

    #[test]
    fn test_checked_and_disabled_follow_new() {
        let mut doc = Document::new();
        let old = doc.build(element("input").attr("type", "checkbox"));
        let new = doc.build(
            element("input")
                .attr("type", "checkbox")
                .prop(BoolProp::Checked, true)
                .prop(BoolProp::Disabled, true),
        );

        patch_default(&mut doc, new, old);

        assert!(doc.bool_property(old, BoolProp::Checked));
        assert!(doc.has_attribute(old, None, "checked"));
        assert!(doc.bool_property(old, BoolProp::Disabled));

        let unchecked = doc.build(element("input").attr("type", "checkbox"));
        patch_default(&mut doc, unchecked, old);

        assert!(!doc.bool_property(old, BoolProp::Checked));
        assert!(!doc.has_attribute(old, None, "checked"));
        assert!(!doc.has_attribute(old, None, "disabled"));
    }

    #[test]
    fn test_indeterminate_is_property_only() {
        let mut doc = Document::new();
        let old = doc.build(element("input").attr("type", "checkbox"));
        let new = doc.build(element("input").attr("type", "checkbox").prop(BoolProp::Indeterminate, true));

        patch_default(&mut doc, new, old);
        assert!(doc.bool_property(old, BoolProp::Indeterminate));
        assert!(!doc.has_attribute(old, None, "indeterminate"));

        let cleared = doc.build(element("input").attr("type", "checkbox"));
        patch_default(&mut doc, cleared, old);
        assert!(!doc.bool_property(old, BoolProp::Indeterminate));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Options and textareas
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_option_selected() {
        let mut doc = Document::new();
        let old = doc.build(element("option").attr("selected", ""));
        let new = doc.build(element("option"));
        doc.set_bool_property(new, BoolProp::Selected, false).unwrap();

        patch_default(&mut doc, new, old);
        assert!(!doc.bool_property(old, BoolProp::Selected));
        assert!(!doc.has_attribute(old, None, "selected"));

        let select = doc.build(element("option").prop(BoolProp::Selected, true));
        patch_default(&mut doc, select, old);
        assert!(doc.bool_property(old, BoolProp::Selected));
        assert!(doc.has_attribute(old, None, "selected"));
    }

    #[test]
    fn test_textarea_value_and_text_child() {
        let mut doc = Document::new();
        let old = doc.build(element("textarea").text("draft"));
        let new = doc.build(element("textarea").text("final"));
        let child = doc.children(old)[0];

        patch_default(&mut doc, new, old);

        assert_eq!(doc.value(old), "final");
        assert_eq!(doc.node_value(child), Some("final"));
    }

    #[test]
    fn test_textarea_empty_update_keeps_placeholder_text() {
        let mut doc = Document::new();
        let old = doc.build(element("textarea").attr("placeholder", "type here").text("type here"));
        let new = doc.build(element("textarea").attr("placeholder", "type here"));
        let child = doc.children(old)[0];

        patch_default(&mut doc, new, old);

        assert_eq!(doc.value(old), "");
        assert_eq!(doc.node_value(child), Some("type here"));
    }

    #[test]
    fn test_textarea_without_text_child() {
        let mut doc = Document::new();
        let old = doc.build(element("textarea").child(element("b")));
        let new = doc.build(element("textarea").value("v"));

        patch_default(&mut doc, new, old);

        assert_eq!(doc.value(old), "v");
        assert_eq!(doc.text_content(old), "");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_events_copied_and_cleared() {
        let mut doc = Document::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let click = Callback::new(move |_| counter.set(counter.get() + 1));

        let old = doc.build(element("button").on("onblur", Callback::new(|_| {})));
        let new = doc.build(element("button").on("onclick", click.clone()));

        patch(&mut doc, new, old, &events()).unwrap();

        assert_eq!(doc.handler(old, "onclick"), Some(click));
        assert!(doc.handler(old, "onblur").is_none());
        assert!(doc.dispatch(old, "click"));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_events_outside_list_untouched() {
        let mut doc = Document::new();
        let custom = Callback::new(|_| {});
        let old = doc.build(
            element("div")
                .on("onwidget", custom.clone())
                .on("onclick", Callback::new(|_| {})),
        );
        let new = doc.build(element("div"));

        patch(&mut doc, new, old, &[CompactString::new("onclick")]).unwrap();

        assert_eq!(doc.handler(old, "onwidget"), Some(custom));
        assert!(doc.handler(old, "onclick").is_none());
    }

    #[test]
    fn test_events_ignored_without_list() {
        let mut doc = Document::new();
        let handler = Callback::new(|_| {});
        let old = doc.build(element("div").on("onclick", handler.clone()));
        let new = doc.build(element("div"));

        patch_default(&mut doc, new, old);

        assert_eq!(doc.handler(old, "onclick"), Some(handler));
    }
}
