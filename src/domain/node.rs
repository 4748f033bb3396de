//! Reference-counted node handles.
//!
//! The parent -> child edge is an `Rc` stored in the parent's children vector;
//! the child -> parent edge is a `Weak`. A node therefore lives as long as its
//! parent (or any external clone) holds it, and a parent is never kept alive by
//! its children.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, instrument, warn};

use crate::domain::entities::NodeState;
use crate::domain::error::{NodeResult, Precondition};

type Link<T> = Rc<RefCell<NodeInner<T>>>;
type BackLink<T> = Weak<RefCell<NodeInner<T>>>;

struct NodeInner<T> {
    data: T,
    parent: BackLink<T>,
    children: Vec<Node<T>>,
}

// Drops descendants from a work stack so that freeing a deep chain does not
// recurse once per level.
impl<T> Drop for NodeInner<T> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(child) = pending.pop() {
            if let Ok(cell) = Rc::try_unwrap(child.inner) {
                let mut inner = cell.into_inner();
                pending.append(&mut inner.children);
            }
        }
    }
}

/// Owning handle to a tree node.
///
/// Cloning the handle shares ownership of the same node. Equality is identity:
/// two handles are equal only if they point at the same node.
pub struct Node<T> {
    inner: Link<T>,
}

/// Non-owning handle to a node, see [`Node::downgrade`].
pub struct WeakNode<T> {
    inner: BackLink<T>,
}

impl<T> Node<T> {
    /// Creates a detached node with no parent and no children.
    pub fn new(data: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NodeInner {
                data,
                parent: Weak::new(),
                children: Vec::new(),
            })),
        }
    }

    /// Appends `node` as the last child of `self`.
    ///
    /// Adding a node that is already a child of `self` is a no-op. The node
    /// must otherwise be detached, and must not be `self` or one of its
    /// ancestors. On error nothing is modified.
    ///
    /// # Panics
    ///
    /// Panics if a [`Node::data`] or [`Node::data_mut`] guard of `self` or
    /// `node` is alive during the call.
    #[instrument(level = "debug", skip_all)]
    pub fn add_child(&self, node: &Node<T>) -> NodeResult<()> {
        if self.contains_child(node) {
            debug!("node already a child, nothing to do");
            return Ok(());
        }
        if node.is_attached() {
            warn!("refusing to add a node that already has a parent");
            return Err(Precondition::AlreadyAttached.into());
        }
        if node == self || self.ancestors().any(|ancestor| &ancestor == node) {
            warn!("refusing to add an ancestor as a child");
            return Err(Precondition::WouldCreateCycle.into());
        }

        node.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        self.inner.borrow_mut().children.push(node.clone());
        debug!(child_count = self.child_count(), "child added");
        Ok(())
    }

    /// Detaches every direct child of `self`.
    ///
    /// Grandchildren stay attached to their own parents. The detached children
    /// are returned in their former order; whatever the caller does not keep
    /// is dropped, and nodes without another owner are freed.
    ///
    /// # Panics
    ///
    /// Panics if a [`Node::data`] or [`Node::data_mut`] guard of `self` or of
    /// one of its children is alive during the call.
    #[instrument(level = "debug", skip_all)]
    pub fn remove_all_children(&self) -> Vec<Node<T>> {
        let children = std::mem::take(&mut self.inner.borrow_mut().children);
        for child in &children {
            child.inner.borrow_mut().parent = Weak::new();
        }
        debug!(removed = children.len(), "children detached");
        children
    }

    /// Current parent, or `None` for a detached node.
    ///
    /// A node whose parent was dropped while the node itself was still owned
    /// elsewhere reports `None` as well.
    pub fn parent(&self) -> Option<Node<T>> {
        self.inner
            .borrow()
            .parent
            .upgrade()
            .map(|inner| Node { inner })
    }

    /// Snapshot of the children in insertion order.
    pub fn children(&self) -> Vec<Node<T>> {
        self.inner.borrow().children.clone()
    }

    pub fn child(&self, index: usize) -> Option<Node<T>> {
        self.inner.borrow().children.get(index).cloned()
    }

    pub fn child_count(&self) -> usize {
        self.inner.borrow().children.len()
    }

    pub fn has_children(&self) -> bool {
        !self.inner.borrow().children.is_empty()
    }

    pub fn contains_child(&self, node: &Node<T>) -> bool {
        self.inner.borrow().children.iter().any(|child| child == node)
    }

    pub fn state(&self) -> NodeState {
        if self.is_attached() {
            NodeState::Attached
        } else {
            NodeState::Detached
        }
    }

    pub fn is_attached(&self) -> bool {
        self.inner.borrow().parent.strong_count() > 0
    }

    pub fn is_root(&self) -> bool {
        !self.is_attached()
    }

    /// Iterates over the ancestors of `self`, nearest first.
    pub fn ancestors(&self) -> Ancestors<T> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Topmost ancestor, or `self` when detached.
    pub fn root(&self) -> Node<T> {
        self.ancestors().last().unwrap_or_else(|| self.clone())
    }

    /// True if `other` is a strict ancestor of `self`.
    #[instrument(level = "trace", skip_all)]
    pub fn is_descendant_of(&self, other: &Node<T>) -> bool {
        self.ancestors().any(|ancestor| &ancestor == other)
    }

    /// Shared access to the payload.
    ///
    /// # Panics
    ///
    /// Panics if a [`Node::data_mut`] guard of the same node is alive. Structural
    /// mutators borrow the node mutably, so the guard must not be held across
    /// [`Node::add_child`] or [`Node::remove_all_children`].
    pub fn data(&self) -> Ref<'_, T> {
        Ref::map(self.inner.borrow(), |inner| &inner.data)
    }

    /// Exclusive access to the payload.
    ///
    /// # Panics
    ///
    /// Panics if any other guard of the same node is alive, including the
    /// borrows taken by [`Node::add_child`] and [`Node::remove_all_children`].
    pub fn data_mut(&self) -> RefMut<'_, T> {
        RefMut::map(self.inner.borrow_mut(), |inner| &mut inner.data)
    }

    pub fn downgrade(&self) -> WeakNode<T> {
        WeakNode {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<T> WeakNode<T> {
    /// Returns an owning handle if the node has not been freed yet.
    pub fn upgrade(&self) -> Option<Node<T>> {
        self.inner.upgrade().map(|inner| Node { inner })
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl<T: Default> Default for Node<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Clone for WeakNode<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Eq for Node<T> {}

// Recurses once per level; very deep trees should be inspected through
// `ancestors` or rendered with a `max_depth` instead.
impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Node")
            .field("data", &inner.data)
            .field("attached", &(inner.parent.strong_count() > 0))
            .field("children", &inner.children)
            .finish()
    }
}

impl<T> fmt::Debug for WeakNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakNode")
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Upward walk produced by [`Node::ancestors`].
pub struct Ancestors<T> {
    next: Option<Node<T>>,
}

impl<T> Iterator for Ancestors<T> {
    type Item = Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}
