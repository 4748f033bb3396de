//! Shared domain value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Structural state of a node.
///
/// A node moves Detached -> Attached through `add_child` on its prospective
/// parent and back through `remove_all_children` on that parent. There is no
/// direct Attached -> Attached transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    Detached,
    Attached,
}

impl NodeState {
    pub fn is_attached(self) -> bool {
        self == NodeState::Attached
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeState::Detached => write!(f, "detached"),
            NodeState::Attached => write!(f, "attached"),
        }
    }
}
