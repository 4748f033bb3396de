//! Domain layer: node hierarchy and its invariant-preserving mutators
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod node;

pub use arena::{ArenaNode, NodeArena, NodeId, Subtree};
pub use builder::{Forest, TreeBuilder};
pub use entities::NodeState;
pub use error::{NodeError, NodeResult, Precondition};
pub use node::{Node, WeakNode};
