//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Structural precondition that a mutation refused to break.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    #[error("node already has a parent")]
    AlreadyAttached,

    #[error("node is the prospective parent or one of its ancestors")]
    WouldCreateCycle,

    #[error("node is still owned by a parent")]
    StillAttached,
}

/// Domain errors represent violations of the tree invariants.
///
/// Every failing operation leaves the tree exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("precondition violation: {0}")]
    PreconditionViolation(Precondition),

    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("unknown node key: {0}")]
    UnknownKey(String),
}

impl NodeError {
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, Self::PreconditionViolation(_))
    }
}

impl From<Precondition> for NodeError {
    fn from(precondition: Precondition) -> Self {
        Self::PreconditionViolation(precondition)
    }
}

/// Result type for tree operations.
pub type NodeResult<T> = Result<T, NodeError>;
