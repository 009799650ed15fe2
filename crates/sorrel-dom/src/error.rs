use thiserror::Error;

use crate::NodeId;

/// Rejected tree mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomError {
    /// The id is not allocated in this document.
    #[error("node {0} does not belong to this document")]
    UnknownNode(NodeId),
    /// Text, comment, doctype, void and self-closing nodes stay childless.
    #[error("node {0} cannot have children")]
    LeafParent(NodeId),
    /// The child is the parent itself or one of its ancestors.
    #[error("appending node {child} under node {parent} would create a cycle")]
    Cycle {
        /// Requested parent.
        parent: NodeId,
        /// Requested child.
        child: NodeId,
    },
}
