use std::path::{Path, PathBuf};

/// XDG app name used for the global config directory.
pub const APP_NAME: &str = "launch";

/// File name of both the global and the project config.
pub const CONFIG_FILE_NAME: &str = "launch.toml";

fn project_config_dir(app_name: &str) -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", app_name).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Resolve the global launch config path (`~/.config/launch/launch.toml` on Linux).
pub fn global_config_path() -> Option<PathBuf> {
    project_config_dir(APP_NAME).map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Project-level config path for a project root.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}
