//! Tests for termtree rendering of both realizations

use rstest::rstest;

use nodetree::{Node, NodeArena, RenderConfig, TreeNodeConvert};

fn sample_node_tree() -> Node<&'static str> {
    let root = Node::new("root");
    let left = Node::new("left");
    let right = Node::new("right");
    let deep = Node::new("deep");
    root.add_child(&left).unwrap();
    root.add_child(&right).unwrap();
    left.add_child(&deep).unwrap();
    root
}

#[rstest]
fn given_node_tree_when_rendering_then_lists_every_node_in_order() {
    let rendered = sample_node_tree().to_tree_string().to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "root");
    assert!(lines[1].ends_with("left"));
    assert!(lines[2].ends_with("deep"));
    assert!(lines[3].ends_with("right"));
}

#[rstest]
#[case(0, 2)]
#[case(1, 4)]
#[case(2, 4)]
fn given_max_depth_when_rendering_then_truncates(
    #[case] max_depth: usize,
    #[case] expected_lines: usize,
) {
    let render = RenderConfig {
        max_depth: Some(max_depth),
        ..RenderConfig::default()
    };

    let rendered = sample_node_tree().to_tree_string_with(&render).to_string();

    assert_eq!(rendered.lines().count(), expected_lines);
    assert_eq!(rendered.contains("..."), max_depth < 2);
}

#[rstest]
fn given_arena_subtree_when_rendering_then_matches_node_rendering() {
    let mut arena = NodeArena::new();
    let root = arena.create_node("root");
    let left = arena.create_node("left");
    let right = arena.create_node("right");
    let deep = arena.create_node("deep");
    arena.add_child(root, left).unwrap();
    arena.add_child(root, right).unwrap();
    arena.add_child(left, deep).unwrap();

    let from_arena = arena.subtree(root).unwrap().to_tree_string().to_string();
    let from_nodes = sample_node_tree().to_tree_string().to_string();

    assert_eq!(from_arena, from_nodes);
}

#[rstest]
fn given_inner_node_when_rendering_subtree_then_starts_there() {
    let mut arena = NodeArena::new();
    let root = arena.create_node("root");
    let inner = arena.create_node("inner");
    arena.add_child(root, inner).unwrap();

    let rendered = arena.subtree(inner).unwrap().to_tree_string().to_string();

    assert_eq!(rendered.trim_end(), "inner");
}
