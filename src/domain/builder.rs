//! Tree builder for assembling arena forests from parent/child relations.
//!
//! Intended for layers that deserialize a tree from an external format: every
//! edge goes through [`NodeArena::add_child`], so malformed input surfaces as a
//! typed error instead of a corrupted tree.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, instrument};

use crate::domain::arena::{NodeArena, NodeId};
use crate::domain::error::{NodeError, NodeResult};

/// Constructs a [`Forest`] from keyed nodes and `(parent, child)` relations.
#[derive(Debug)]
pub struct TreeBuilder<K, T> {
    nodes: Vec<(K, T)>,
    relations: Vec<(K, K)>,
    capacity: usize,
}

impl<K, T> Default for TreeBuilder<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> TreeBuilder<K, T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            relations: Vec::new(),
            capacity: 0,
        }
    }

    /// Reserves room for at least `capacity` nodes in the resulting arena.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Registers a node payload under `key`. A later registration of the same
    /// key replaces the payload.
    pub fn node(&mut self, key: K, data: T) -> &mut Self {
        self.nodes.push((key, data));
        self
    }

    /// Records `child` as the next child of `parent`.
    pub fn relate(&mut self, parent: K, child: K) -> &mut Self {
        self.relations.push((parent, child));
        self
    }
}

impl<K, T> TreeBuilder<K, T>
where
    K: Eq + Hash + Debug,
{
    /// Builds the forest, applying relations in the order they were recorded.
    #[instrument(level = "debug", skip_all)]
    pub fn build(self) -> NodeResult<Forest<K, T>> {
        debug!(
            nodes = self.nodes.len(),
            relations = self.relations.len(),
            "building forest"
        );
        let mut arena = NodeArena::with_capacity(self.capacity.max(self.nodes.len()));
        let mut ids: HashMap<K, NodeId> = HashMap::with_capacity(self.nodes.len());

        for (key, data) in self.nodes {
            match ids.get(&key).copied() {
                Some(id) => *arena.data_mut(id)? = data,
                None => {
                    let id = arena.create_node(data);
                    ids.insert(key, id);
                }
            }
        }

        for (parent, child) in &self.relations {
            let parent_id = lookup(&ids, parent)?;
            let child_id = lookup(&ids, child)?;
            arena.add_child(parent_id, child_id)?;
        }

        debug!(roots = arena.roots().len(), "forest built");
        Ok(Forest { arena, ids })
    }
}

fn lookup<K: Eq + Hash + Debug>(ids: &HashMap<K, NodeId>, key: &K) -> NodeResult<NodeId> {
    ids.get(key)
        .copied()
        .ok_or_else(|| NodeError::UnknownKey(format!("{key:?}")))
}

/// Result of [`TreeBuilder::build`]: the arena plus a key -> id index.
#[derive(Debug)]
pub struct Forest<K, T> {
    arena: NodeArena<T>,
    ids: HashMap<K, NodeId>,
}

impl<K: Eq + Hash, T> Forest<K, T> {
    pub fn arena(&self) -> &NodeArena<T> {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena<T> {
        self.arena
    }

    pub fn id(&self, key: &K) -> Option<NodeId> {
        self.ids.get(key).copied()
    }

    /// Ids of every node without a parent.
    pub fn roots(&self) -> Vec<NodeId> {
        self.arena.roots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reregistered_key_replaces_payload() {
        let mut builder = TreeBuilder::new();
        builder.node("a", 1).node("a", 2);
        let forest = builder.build().unwrap();

        let id = forest.id(&"a").unwrap();
        assert_eq!(forest.arena().len(), 1);
        assert_eq!(forest.arena().data(id), Ok(&2));
    }
}
