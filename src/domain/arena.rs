use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, warn};

use crate::config::Settings;
use crate::domain::entities::NodeState;
use crate::domain::error::{NodeError, NodeResult, Precondition};

/// Stable handle to a node stored in a [`NodeArena`].
///
/// Handles are generational: once a node is destroyed its id never resolves
/// again, even if the slot gets reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{slot}.{generation}")
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct ArenaNode<T> {
    data: T,
    /// Parent id, None for detached nodes
    parent: Option<NodeId>,
    /// Children in insertion order
    children: Vec<NodeId>,
}

impl<T> ArenaNode<T> {
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-based forest of nodes.
///
/// The arena owns the storage of every node. Structural ownership follows the
/// parent -> children edges: a subtree is reclaimed with [`NodeArena::destroy`]
/// once its root has been detached.
#[derive(Debug)]
pub struct NodeArena<T> {
    arena: Arena<ArenaNode<T>>,
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeArena<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_capacity(settings.arena_capacity)
    }

    /// Inserts a detached node.
    #[instrument(level = "trace", skip_all)]
    pub fn create_node(&mut self, data: T) -> NodeId {
        NodeId(self.arena.insert(ArenaNode {
            data,
            parent: None,
            children: Vec::new(),
        }))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn get(&self, id: NodeId) -> Option<&ArenaNode<T>> {
        self.arena.get(id.0)
    }

    fn node(&self, id: NodeId) -> NodeResult<&ArenaNode<T>> {
        self.arena.get(id.0).ok_or(NodeError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> NodeResult<&mut ArenaNode<T>> {
        self.arena.get_mut(id.0).ok_or(NodeError::UnknownNode(id))
    }

    pub fn data(&self, id: NodeId) -> NodeResult<&T> {
        Ok(&self.node(id)?.data)
    }

    pub fn data_mut(&mut self, id: NodeId) -> NodeResult<&mut T> {
        Ok(&mut self.node_mut(id)?.data)
    }

    pub fn parent(&self, id: NodeId) -> NodeResult<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Children of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> NodeResult<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    pub fn state(&self, id: NodeId) -> NodeResult<NodeState> {
        Ok(match self.node(id)?.parent {
            Some(_) => NodeState::Attached,
            None => NodeState::Detached,
        })
    }

    /// Appends `node` as the last child of `parent`.
    ///
    /// Same contract as [`crate::domain::Node::add_child`]: re-adding an
    /// existing child is a no-op, an attached node or an ancestor of `parent`
    /// is refused, and a failing call modifies nothing.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, node: NodeId) -> NodeResult<()> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(node)?;

        if parent_node.children.contains(&node) {
            debug!("node already a child, nothing to do");
            return Ok(());
        }
        if child_node.parent.is_some() {
            warn!(%node, "refusing to add a node that already has a parent");
            return Err(Precondition::AlreadyAttached.into());
        }
        if node == parent || self.ancestors(parent).any(|ancestor| ancestor == node) {
            warn!(%node, "refusing to add an ancestor as a child");
            return Err(Precondition::WouldCreateCycle.into());
        }

        self.node_mut(node)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(node);
        debug!("child added");
        Ok(())
    }

    /// Detaches every direct child of `parent` and returns them in order.
    ///
    /// The detached nodes stay in the arena as roots of their own subtrees.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_all_children(&mut self, parent: NodeId) -> NodeResult<Vec<NodeId>> {
        let children = std::mem::take(&mut self.node_mut(parent)?.children);
        for &child in &children {
            if let Some(node) = self.arena.get_mut(child.0) {
                node.parent = None;
            }
        }
        debug!(removed = children.len(), "children detached");
        Ok(children)
    }

    /// Frees a detached node together with its whole subtree.
    ///
    /// Returns the number of nodes freed.
    #[instrument(level = "debug", skip(self))]
    pub fn destroy(&mut self, id: NodeId) -> NodeResult<usize> {
        if self.node(id)?.parent.is_some() {
            warn!("refusing to destroy an attached node");
            return Err(Precondition::StillAttached.into());
        }

        let mut freed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current.0) {
                stack.extend(node.children);
                freed += 1;
            }
        }
        debug!(freed, "subtree destroyed");
        Ok(freed)
    }

    /// Iterates over the ancestors of `id`, nearest first.
    ///
    /// Unknown ids yield an empty walk.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, T> {
        Ancestors {
            arena: self,
            next: self.get(id).and_then(ArenaNode::parent),
        }
    }

    pub fn root_of(&self, id: NodeId) -> NodeResult<NodeId> {
        self.node(id)?;
        Ok(self.ancestors(id).last().unwrap_or(id))
    }

    /// True if `ancestor` is a strict ancestor of `id`.
    #[instrument(level = "trace", skip(self))]
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> NodeResult<bool> {
        self.node(id)?;
        self.node(ancestor)?;
        Ok(self.ancestors(id).any(|current| current == ancestor))
    }

    /// All detached nodes, in slot order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.arena
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    /// Read-only view of the subtree rooted at `id`.
    pub fn subtree(&self, id: NodeId) -> NodeResult<Subtree<'_, T>> {
        self.node(id)?;
        Ok(Subtree { arena: self, root: id })
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}

/// Subtree view produced by [`NodeArena::subtree`].
#[derive(Debug)]
pub struct Subtree<'a, T> {
    pub arena: &'a NodeArena<T>,
    pub root: NodeId,
}

/// Upward walk produced by [`NodeArena::ancestors`].
pub struct Ancestors<'a, T> {
    arena: &'a NodeArena<T>,
    next: Option<NodeId>,
}

impl<'a, T> Iterator for Ancestors<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.arena.get(current).and_then(ArenaNode::parent);
        Some(current)
    }
}
