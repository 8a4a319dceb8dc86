//! tola-morph - In-place tree morphing
//!
//! Reconciles a live "old" tree against a freshly rendered "new" tree by
//! mutating the old tree until it matches, reusing nodes wherever possible.
//! Reused nodes keep their local state (focus, caret, running media).
//!
//! ## Core Concepts
//!
//! **Live trees, not virtual ones**: the algorithm works on handles into a
//! live environment described by the [`Dom`] trait. Nothing is diffed into an
//! intermediate patch list; every decision is applied immediately.
//!
//! **Matching**: children are matched by `id`, then by an optional identity
//! predicate, then by equal text. Unmatched unkeyed nodes are patched in
//! place positionally.
//!
//! ## Modules
//! - `dom`: The live tree interface (`Dom`, `NodeKind`, `BoolProp`)
//! - `morph`: Walker, child reconciliation and node patcher
//! - `node`: In-memory arena implementing `Dom`
//! - `attr`: Attribute system
//! - `events`: Conventional handler names for handler sync
//!
//! ## Usage
//!
//! ```
//! use tola_morph::prelude::*;
//!
//! let mut doc = Document::new();
//! let old = doc.build(element("p").attr("class", "old").text("hello"));
//! let new = doc.build(element("p").attr("class", "new").text("world"));
//!
//! let root = morph(&mut doc, old, new, &MorphOptions::default()).unwrap();
//! assert_eq!(root, old);
//! assert_eq!(doc.attr(old, "class"), Some("new"));
//! assert_eq!(doc.text_content(old), "world");
//! ```

#[macro_use]
mod macros;

// =============================================================================
// Core modules
// =============================================================================

/// Attribute types
pub mod attr;

/// Live tree interface
pub mod dom;

/// Error types
pub mod error;

/// Inline event-handler names
pub mod events;

/// Walker and patcher
pub mod morph;

/// In-memory live tree
pub mod node;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Interface
pub use dom::{BoolProp, Dom, NodeKind};

// Algorithm
pub use morph::{
    DEFAULT_COMPONENT_KEY, MorphOptions, MorphOutcome, MorphStats, Morpher, morph,
    morph_with_stats, patch,
};

// Events
pub use events::DEFAULT_EVENTS;

// Attribute types
pub use attr::{Attr, Attrs, AttrsExt, XLINK_NS};

// Arena
pub use node::{Callback, Document, DomError, NodeId};

// Error types
pub use error::{MorphError, MorphResult};
