//! Errors raised by the in-memory tree.

use thiserror::Error;

use super::NodeId;

/// Mutation rejected by a [`super::Document`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// Handle does not belong to this document
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Reference node is not a child of the given parent
    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Insertion would create a cycle or put a node under a leaf
    #[error("cannot insert {child} under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Operation needs an element or character data node
    #[error("node {0} does not support this operation")]
    WrongNodeKind(NodeId),

    /// Attribute name is empty or contains whitespace, `=` or `>`
    #[error("invalid attribute name {0:?}")]
    InvalidAttributeName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomError::NotAChild {
            parent: NodeId::from_raw(1),
            child: NodeId::from_raw(4),
        };
        assert_eq!(err.to_string(), "node #4 is not a child of #1");

        let err = DomError::InvalidAttributeName("a b".into());
        assert_eq!(err.to_string(), "invalid attribute name \"a b\"");
    }
}
