//! Parent-owned node hierarchy with non-owning back-references.
//!
//! A node owns its children; a child only keeps a non-owning link to its
//! parent. Two realizations share that contract:
//!
//! - [`Node`]: reference-counted handles (`Rc` down, `Weak` up).
//! - [`NodeArena`]: generational arena addressed by [`NodeId`].
//!
//! ```
//! use nodetree::{Node, NodeError, Precondition};
//!
//! let a = Node::new("a");
//! let b = Node::new("b");
//! let c = Node::new("c");
//! a.add_child(&b).unwrap();
//! a.add_child(&c).unwrap();
//!
//! assert_eq!(
//!     b.add_child(&c),
//!     Err(NodeError::PreconditionViolation(Precondition::AlreadyAttached))
//! );
//!
//! a.remove_all_children();
//! assert!(c.parent().is_none());
//! b.add_child(&c).unwrap();
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod tree_traits;
pub mod util;

pub use crate::config::{RenderConfig, Settings};
pub use domain::{
    Forest, Node, NodeArena, NodeError, NodeId, NodeResult, NodeState, Precondition, TreeBuilder,
    WeakNode,
};
pub use errors::{TreeError, TreeResult};
pub use tree_traits::TreeNodeConvert;
