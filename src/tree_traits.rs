//! Text rendering of node hierarchies via `termtree`.

use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::config::RenderConfig;
use crate::domain::{Node, NodeId, Subtree};

pub trait TreeNodeConvert {
    fn to_tree_string_with(&self, render: &RenderConfig) -> Tree<String>;

    fn to_tree_string(&self) -> Tree<String> {
        self.to_tree_string_with(&RenderConfig::default())
    }
}

fn truncated(render: &RenderConfig, depth: usize) -> bool {
    render.max_depth.is_some_and(|max| depth >= max)
}

impl<T: Display> TreeNodeConvert for Node<T> {
    #[instrument(level = "debug", skip_all)]
    fn to_tree_string_with(&self, render: &RenderConfig) -> Tree<String> {
        fn build<T: Display>(node: &Node<T>, depth: usize, render: &RenderConfig) -> Tree<String> {
            let mut tree = Tree::new(node.data().to_string());
            if !node.has_children() {
                return tree;
            }
            if truncated(render, depth) {
                tree.push(Tree::new(render.elision_label.clone()));
            } else {
                for child in node.children() {
                    tree.push(build(&child, depth + 1, render));
                }
            }
            tree
        }

        build(self, 0, render)
    }
}

impl<T: Display> TreeNodeConvert for Subtree<'_, T> {
    #[instrument(level = "debug", skip_all)]
    fn to_tree_string_with(&self, render: &RenderConfig) -> Tree<String> {
        fn build<T: Display>(
            subtree: &Subtree<'_, T>,
            id: NodeId,
            depth: usize,
            render: &RenderConfig,
        ) -> Tree<String> {
            let Some(node) = subtree.arena.get(id) else {
                return Tree::new(format!("<missing {id}>"));
            };
            let mut tree = Tree::new(node.data().to_string());
            if node.children().is_empty() {
                return tree;
            }
            if truncated(render, depth) {
                tree.push(Tree::new(render.elision_label.clone()));
            } else {
                for &child in node.children() {
                    tree.push(build(subtree, child, depth + 1, render));
                }
            }
            tree
        }

        build(self, self.root, 0, render)
    }
}
