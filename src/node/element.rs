//! Element payload - tag, attributes, form-control state and handlers

use std::fmt;
use std::rc::Rc;

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::attr::{Attrs, AttrsExt};

// =============================================================================
// Callback
// =============================================================================

/// Event handler stored on an element
///
/// Cheap to clone. Two callbacks are equal only if they share the same
/// closure allocation.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(&str)>);

impl Callback {
    /// Wrap a closure. The closure receives the event name (e.g. `"click"`).
    pub fn new(f: impl Fn(&str) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the handler
    pub fn call(&self, event: &str) {
        (self.0)(event)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0))
    }
}

// =============================================================================
// FormState
// =============================================================================

/// Form-control properties that are not plain attributes.
///
/// `None` means "not assigned yet": the property still reflects its
/// attribute (or, for a textarea value, the text content).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Dirty `value` property
    pub value: Option<String>,
    /// Dirty `checked` property
    pub checked: Option<bool>,
    /// Dirty `selected` property
    pub selected: Option<bool>,
    /// `indeterminate` has no attribute form
    pub indeterminate: bool,
}

// =============================================================================
// ElementData
// =============================================================================

/// Element node payload
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Tag name as created (case preserved)
    pub tag: CompactString,
    /// Attributes in document order
    pub attrs: Attrs,
    /// Form-control property state
    pub form: FormState,
    /// Event handlers keyed by `on*` name
    pub handlers: FxHashMap<CompactString, Callback>,
}

impl ElementData {
    /// Create an element payload with no attributes
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Attrs::new(),
            form: FormState::default(),
            handlers: FxHashMap::default(),
        }
    }

    /// Case-insensitive tag check
    #[inline]
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Get plain attribute value by name
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attr(None, name)
    }

    /// Check if plain attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attr(None, name)
    }

    /// Get `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }
}
