//! Error types for tola-morph.
//!
//! Precondition failures are reported before any mutation happens. Errors
//! raised by the live tree mid-walk are passed through unchanged.

use thiserror::Error;

/// Errors that can occur during a morph.
#[derive(Debug, Error)]
pub enum MorphError<E> {
    /// The old tree handle does not resolve to a live node
    #[error("invalid argument: old tree must be a live node")]
    InvalidOldTree,

    /// The new tree handle does not resolve to a live node
    #[error("invalid argument: new tree must be a live node")]
    InvalidNewTree,

    /// A full morph was requested against a multi-root fragment
    #[error("new tree must have one root node (not a fragment); use children-only mode for fragments")]
    FragmentRoot,

    /// The live tree rejected a mutation
    #[error(transparent)]
    Dom(#[from] E),
}

/// Result type alias for morph operations.
pub type MorphResult<T, E> = Result<T, MorphError<E>>;

impl<E> MorphError<E> {
    /// Check if this is a caller-side precondition failure (nothing was mutated)
    pub fn is_precondition(&self) -> bool {
        !matches!(self, Self::Dom(_))
    }

    /// Get the underlying environment error, if any
    pub fn dom_error(&self) -> Option<&E> {
        match self {
            Self::Dom(err) => Some(err),
            _ => None,
        }
    }
}
