#[derive(thiserror::Error, Debug)]
pub enum LaunchError {
    #[error("{handler} requires a process action as the target, got {found}")]
    InvalidTargetAction { handler: &'static str, found: String },

    #[error("Launch configuration '{0}' does not exist")]
    LaunchConfigurationNotFound(String),

    #[error("Invalid launch config: {0}")]
    Config(String),
}
