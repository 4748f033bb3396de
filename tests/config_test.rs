//! Integration tests for Settings loading from a single TOML file.
//!
//! `Settings::from_file` ignores the environment, so these tests run in
//! parallel. Layering through `Settings::load` lives in
//! `config_layering_test.rs`.

use std::fs;

use tempfile::TempDir;

use nodetree::{RenderConfig, Settings, TreeError};

#[test]
fn given_partial_file_when_loading_then_defaults_fill_the_rest() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nodetree.toml");
    fs::write(&path, "[render]\nmax_depth = 2\n").unwrap();

    // Act
    let settings = Settings::from_file(&path).expect("load settings");

    // Assert
    assert_eq!(settings.arena_capacity, Settings::default().arena_capacity);
    assert_eq!(settings.render.max_depth, Some(2));
    assert_eq!(settings.render.elision_label, "...");
}

#[test]
fn given_full_file_when_loading_then_all_values_applied() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nodetree.toml");
    let content = r#"
arena_capacity = 1024

[render]
max_depth = 1
elision_label = "(more)"
"#;
    fs::write(&path, content).unwrap();

    // Act
    let settings = Settings::from_file(&path).expect("load settings");

    // Assert
    assert_eq!(
        settings,
        Settings {
            arena_capacity: 1024,
            render: RenderConfig {
                max_depth: Some(1),
                elision_label: "(more)".into(),
            },
        }
    );
}

#[test]
fn given_malformed_file_when_loading_then_config_error() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nodetree.toml");
    fs::write(&path, "arena_capacity = \"lots\"\n").unwrap();

    // Act
    let result = Settings::from_file(&path);

    // Assert
    match result {
        Err(TreeError::Config { message }) => assert!(message.contains("parse")),
        other => panic!("expected config error, got {other:?}"),
    }
}
