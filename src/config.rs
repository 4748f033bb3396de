//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/nodetree/nodetree.toml`
//! 3. Local config: an explicit TOML file passed by the caller
//! 4. Environment variables: `NODETREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::TreeError;

/// Rendering options for [`crate::tree_traits::TreeNodeConvert`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Deepest level rendered below the starting node (None: unlimited)
    pub max_depth: Option<usize>,
    /// Leaf label standing in for truncated children
    pub elision_label: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            elision_label: "...".into(),
        }
    }
}

/// Raw render config for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderConfig {
    pub max_depth: Option<usize>,
    pub elision_label: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub arena_capacity: Option<usize>,
    pub render: RawRenderConfig,
}

/// Unified configuration for nodetree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Slots preallocated by `NodeArena::from_settings`
    pub arena_capacity: usize,
    pub render: RenderConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_capacity: 64,
            render: RenderConfig::default(),
        }
    }
}

/// Get the XDG config directory for nodetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nodetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("nodetree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, TreeError> {
    let content = std::fs::read_to_string(path).map_err(|e| TreeError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| TreeError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> TreeError {
    TreeError::Config {
        message: e.to_string(),
    }
}

/// Read one override: absent keys yield None, unparsable values an error.
fn env_override<T: DeserializeOwned>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, TreeError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => {
            warn!(key, error = %e, "invalid environment override");
            Err(TreeError::Config {
                message: format!("env override {key}: {e}"),
            })
        }
    }
}

impl Settings {
    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            arena_capacity: overlay.arena_capacity.unwrap_or(self.arena_capacity),
            render: RenderConfig {
                max_depth: overlay.render.max_depth.or(self.render.max_depth),
                elision_label: overlay
                    .render
                    .elision_label
                    .clone()
                    .unwrap_or_else(|| self.render.elision_label.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional TOML file layered on top of the global config
    ///
    /// A missing global file is skipped; a missing local file is an error.
    pub fn load(local: Option<&Path>) -> Result<Self, TreeError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(local_path) = local {
            current = current.merge_with(&load_raw_settings(local_path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Load a single TOML file on top of the compiled defaults.
    ///
    /// Ignores the global config and environment variables.
    pub fn from_file(path: &Path) -> Result<Self, TreeError> {
        Ok(Self::default().merge_with(&load_raw_settings(path)?))
    }

    /// Apply NODETREE_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__`, e.g. `NODETREE_RENDER__MAX_DEPTH=3`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, TreeError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("NODETREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_override::<usize>(&config, "arena_capacity")? {
            settings.arena_capacity = val;
        }
        if let Some(val) = env_override::<usize>(&config, "render.max_depth")? {
            settings.render.max_depth = Some(val);
        }
        if let Some(val) = env_override::<String>(&config, "render.elision_label")? {
            settings.render.elision_label = val;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let overlay = RawSettings {
            arena_capacity: None,
            render: RawRenderConfig {
                max_depth: Some(2),
                elision_label: None,
            },
        };

        let merged = Settings::default().merge_with(&overlay);

        assert_eq!(merged.arena_capacity, 64);
        assert_eq!(merged.render.max_depth, Some(2));
        assert_eq!(merged.render.elision_label, "...");
    }
}
