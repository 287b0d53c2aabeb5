//! Process actions that feed the event handlers.

pub mod execute_process;

pub use execute_process::{ExecuteProcess, ResolvedProcess};
