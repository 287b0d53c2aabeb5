//! Layered configuration seeding a [`launch_core::LaunchContext`].
//!
//! ## Configuration Priority
//!
//! 1. Runtime overrides — highest
//! 2. Project config (`<project>/launch.toml`)
//! 3. Global config (`~/.config/launch/launch.toml`)
//! 4. Built-in defaults — lowest
//!
//! Missing or malformed files are skipped with a warning.

pub mod config;
pub mod paths;

pub use config::{LaunchConfig, load_launch_config};
pub use paths::{global_config_path, project_config_path};
