//! Prelude module for common imports.
//!
//! ```
//! use tola_morph::prelude::*;
//! ```

// Interface
pub use crate::dom::{BoolProp, Dom, NodeKind};

// Algorithm
pub use crate::morph::{MorphOptions, MorphOutcome, MorphStats, Morpher, morph, morph_with_stats};

// Events
pub use crate::events::DEFAULT_EVENTS;

// Attributes
pub use crate::attr::{Attr, Attrs, AttrsExt, XLINK_NS};

// Arena
pub use crate::node::{Builder, Callback, Document, DomError, NodeId, comment, element, text};

// Error
pub use crate::error::{MorphError, MorphResult};
