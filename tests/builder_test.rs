//! Tests for TreeBuilder

use nodetree::{NodeError, Precondition, TreeBuilder};

fn builder(keys: &[&'static str]) -> TreeBuilder<&'static str, String> {
    let mut builder = TreeBuilder::new();
    for key in keys {
        builder.node(*key, key.to_uppercase());
    }
    builder
}

#[test]
fn given_relations_when_building_then_creates_forest_in_order() {
    // Arrange
    let mut builder = builder(&["root", "a", "b", "lonely"]);
    builder.relate("root", "a").relate("root", "b");

    // Act
    let forest = builder.build().unwrap();

    // Assert
    let root = forest.id(&"root").unwrap();
    let a = forest.id(&"a").unwrap();
    let b = forest.id(&"b").unwrap();
    assert_eq!(forest.arena().children(root).unwrap(), &[a, b]);
    assert_eq!(forest.arena().data(a).unwrap(), "A");
    assert_eq!(forest.roots().len(), 2);
}

#[test]
fn given_repeated_relation_when_building_then_no_duplicate_child() {
    // Arrange
    let mut builder = builder(&["p", "c"]);
    builder.relate("p", "c").relate("p", "c");

    // Act
    let forest = builder.build().unwrap();

    // Assert
    let p = forest.id(&"p").unwrap();
    assert_eq!(forest.arena().children(p).unwrap().len(), 1);
}

#[test]
fn given_child_with_two_parents_when_building_then_errors() {
    // Arrange
    let mut builder = builder(&["p1", "p2", "c"]);
    builder.relate("p1", "c").relate("p2", "c");

    // Act
    let result = builder.build();

    // Assert
    assert_eq!(
        result.unwrap_err(),
        NodeError::PreconditionViolation(Precondition::AlreadyAttached)
    );
}

#[test]
fn given_cycle_when_building_then_errors() {
    // Arrange
    let mut builder = builder(&["a", "b"]);
    builder.relate("a", "b").relate("b", "a");

    // Act
    let result = builder.build();

    // Assert
    assert_eq!(
        result.unwrap_err(),
        NodeError::PreconditionViolation(Precondition::WouldCreateCycle)
    );
}

#[test]
fn given_unregistered_key_when_building_then_errors() {
    // Arrange
    let mut builder = builder(&["a"]);
    builder.relate("a", "ghost");

    // Act
    let result = builder.build();

    // Assert
    assert_eq!(
        result.unwrap_err(),
        NodeError::UnknownKey("\"ghost\"".to_string())
    );
}

#[test]
fn given_built_forest_when_taking_arena_then_nodes_remain_mutable() {
    // Arrange
    let mut builder = builder(&["p", "c"]).with_capacity(8);
    builder.relate("p", "c");
    let forest = builder.build().unwrap();
    let p = forest.id(&"p").unwrap();
    let c = forest.id(&"c").unwrap();

    // Act
    let mut arena = forest.into_arena();
    let removed = arena.remove_all_children(p).unwrap();

    // Assert
    assert_eq!(removed, vec![c]);
    assert_eq!(arena.roots().len(), 2);
}
