//! Tree morphing
//!
//! Mutates a live "old" tree in place until it matches a "new" tree, reusing
//! old nodes wherever the matching heuristic finds a counterpart.
//!
//! # Algorithm
//!
//! 1. Walk: decide per node pair whether to keep, patch or replace
//! 2. Patch: copy attributes, text and form-control state onto the kept node
//! 3. Children: greedy single pass over both child lists with an offset
//!    cursor, matching by id, identity predicate or equal text
//!
//! # Ownership
//!
//! Nodes taken from the new tree are moved, not copied. After a morph the new
//! tree may be missing nodes that now live in the old tree. Clone the new tree
//! first if it must stay intact.
//!
//! # Example
//!
//! ```
//! use tola_morph::prelude::*;
//!
//! let mut doc = Document::new();
//! let old = doc.build(element("ul").child(element("li").id("a").text("one")));
//! let new = doc.build(
//!     element("ul")
//!         .child(element("li").id("b").text("zero"))
//!         .child(element("li").id("a").text("one")),
//! );
//!
//! let kept = doc.children(old)[0];
//! let result = morph(&mut doc, old, new, &MorphOptions::default()).unwrap();
//!
//! assert_eq!(result, old);
//! assert_eq!(doc.children(old)[1], kept);
//! assert_eq!(doc.text_content(old), "zeroone");
//! ```

mod patch;
mod walk;

pub use patch::patch;
pub use walk::Morpher;

use compact_str::CompactString;
use tracing::debug;

use crate::attr::dataset_attr_name;
use crate::dom::{Dom, NodeKind};
use crate::error::{MorphError, MorphResult};

/// Default component marker key (read from `data-morph`)
pub const DEFAULT_COMPONENT_KEY: &str = "morph";

// =============================================================================
// Configuration
// =============================================================================

/// Morph configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphOptions {
    /// Reconcile only the children of the two roots.
    ///
    /// The old root survives whatever its tag, and the new root may be a
    /// multi-root fragment.
    pub children_only: bool,
    /// Dataset key of the component marker (default: `"morph"`).
    ///
    /// Two same-tag elements whose markers differ are replaced, never patched.
    pub component_key: CompactString,
    /// Handler names to sync while patching. Empty disables handler sync.
    pub events: Vec<CompactString>,
}

impl Default for MorphOptions {
    fn default() -> Self {
        Self {
            children_only: false,
            component_key: CompactString::new(DEFAULT_COMPONENT_KEY),
            events: Vec::new(),
        }
    }
}

impl MorphOptions {
    /// Create the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to children-only reconciliation.
    pub fn children_only(mut self) -> Self {
        self.children_only = true;
        self
    }

    /// Use a custom component marker key.
    pub fn with_component_key(mut self, key: impl Into<CompactString>) -> Self {
        self.component_key = key.into();
        self
    }

    /// Sync the given handler names (see [`crate::DEFAULT_EVENTS`]).
    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Attribute that carries the component marker
    pub fn marker_attr(&self) -> String {
        dataset_attr_name(&self.component_key)
    }
}

// =============================================================================
// Results
// =============================================================================

/// Statistics from a morph
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MorphStats {
    /// Nodes patched in place
    pub patched: usize,
    /// Old nodes discarded for a new node of another name or component
    pub replaced: usize,
    /// New nodes adopted without an old counterpart
    pub inserted: usize,
    /// Old children removed
    pub removed: usize,
    /// Old children relocated to a new position
    pub moved: usize,
}

impl MorphStats {
    /// Number of child-list changes (everything except in-place patches)
    pub fn structural_changes(&self) -> usize {
        self.replaced + self.inserted + self.removed + self.moved
    }
}

/// Result node plus statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphOutcome<N> {
    /// The morphed old root, or the new root if the old one was replaced
    pub node: N,
    /// What the morph did
    pub stats: MorphStats,
}

// =============================================================================
// Public API
// =============================================================================

/// Morph `old` into `new` and return the resulting root.
///
/// The result is `old` unless the roots differ in name or component marker,
/// in which case `new` is returned and `old` is left untouched. The caller is
/// responsible for swapping the returned root into place.
///
/// # Errors
///
/// Precondition failures are reported before any mutation:
///
/// * [`MorphError::InvalidOldTree`] / [`MorphError::InvalidNewTree`] if a
///   handle does not resolve to a live node
/// * [`MorphError::FragmentRoot`] if `new` is a fragment and
///   [`MorphOptions::children_only`] is off
///
/// Errors raised by `dom` mid-walk are returned as [`MorphError::Dom`] and
/// leave `old` partially morphed.
pub fn morph<D: Dom>(
    dom: &mut D,
    old: D::Node,
    new: D::Node,
    options: &MorphOptions,
) -> MorphResult<D::Node, D::Error> {
    morph_with_stats(dom, old, new, options).map(|outcome| outcome.node)
}

/// Same as [`morph`], also reporting what was done.
pub fn morph_with_stats<D: Dom>(
    dom: &mut D,
    old: D::Node,
    new: D::Node,
    options: &MorphOptions,
) -> MorphResult<MorphOutcome<D::Node>, D::Error> {
    if !dom.contains(old) {
        return Err(MorphError::InvalidOldTree);
    }
    if !dom.contains(new) {
        return Err(MorphError::InvalidNewTree);
    }
    if !options.children_only && dom.kind(new) == NodeKind::Fragment {
        return Err(MorphError::FragmentRoot);
    }

    debug!(?old, ?new, children_only = options.children_only, "morph");

    let mut morpher = Morpher::new(dom, options);
    let node = if options.children_only {
        morpher.update_children(new, old)?;
        old
    } else {
        morpher.walk_nodes(old, new)?
    };

    let stats = morpher.into_stats();
    debug!(?node, ?stats, "morph done");
    Ok(MorphOutcome { node, stats })
}

// =============================================================================
// Tests
// =============================================================================
