//! Launch configuration loading with 4-tier priority.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use launch_core::{LaunchContext, LaunchError};
use serde::{Deserialize, Serialize};

/// Values seeding a [`LaunchContext`].
///
/// ```toml
/// inherit_environment = true
///
/// [environment]
/// ROS_DOMAIN_ID = "7"
///
/// [launch_configurations]
/// robot = "turtle"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Seed the context from the process environment.
    /// `None` = not specified (inherit from lower-priority layer; defaults to `true`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherit_environment: Option<bool>,

    /// Entries overlaid on the environment snapshot.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub launch_configurations: BTreeMap<String, String>,
}

impl LaunchConfig {
    /// Parse a config document, failing on malformed input.
    pub fn from_toml_str(content: &str) -> Result<Self, LaunchError> {
        toml::from_str(content).map_err(|e| LaunchError::Config(e.to_string()))
    }

    /// Load from a TOML file, returning empty config on error.
    fn load_from_file(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse launch config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read launch config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Merge another config into self, with other taking priority.
    fn merge_with(&mut self, other: Self) {
        if other.inherit_environment.is_some() {
            self.inherit_environment = other.inherit_environment;
        }
        self.environment.extend(other.environment);
        self.launch_configurations.extend(other.launch_configurations);
    }

    pub fn inherits_environment(&self) -> bool {
        self.inherit_environment.unwrap_or(true)
    }

    /// Build a context on top of an explicit base environment.
    ///
    /// The base is ignored when `inherit_environment = false`.
    pub fn build_context(&self, base_environment: BTreeMap<String, String>) -> LaunchContext {
        let mut environment = if self.inherits_environment() {
            base_environment
        } else {
            BTreeMap::new()
        };
        environment.extend(
            self.environment
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        self.launch_configurations.iter().fold(
            LaunchContext::new().with_environment(environment),
            |ctx, (name, value)| ctx.with_launch_configuration(name.clone(), value.clone()),
        )
    }

    /// Build a context seeded from the current process environment.
    pub fn into_context(self) -> LaunchContext {
        let base = if self.inherits_environment() {
            LaunchContext::from_process_env().environment().clone()
        } else {
            BTreeMap::new()
        };
        self.build_context(base)
    }
}

/// Load launch config with 4-tier priority:
/// 1. runtime_overrides (caller-supplied) — highest
/// 2. project config (`<project>/launch.toml`)
/// 3. global config (`~/.config/launch/launch.toml`)
/// 4. built-in defaults — lowest
///
/// Maps merge per key; `inherit_environment` only overrides when set.
pub fn load_launch_config(
    project_config_path: Option<&Path>,
    global_config_path: Option<&Path>,
    runtime_overrides: Option<&LaunchConfig>,
) -> LaunchConfig {
    let mut config = LaunchConfig::default();

    if let Some(path) = global_config_path {
        config.merge_with(LaunchConfig::load_from_file(path));
    }

    if let Some(path) = project_config_path {
        config.merge_with(LaunchConfig::load_from_file(path));
    }

    if let Some(overrides) = runtime_overrides {
        config.merge_with(overrides.clone());
    }

    tracing::debug!(
        environment = config.environment.len(),
        launch_configurations = config.launch_configurations.len(),
        inherit_environment = config.inherits_environment(),
        "Loaded launch config"
    );
    config
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
