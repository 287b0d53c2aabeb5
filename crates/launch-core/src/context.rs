//! Runtime context consulted when substitutions are performed.

use std::collections::BTreeMap;

/// Environment snapshot and launch configurations visible to substitutions.
///
/// Substitutions and handlers only ever borrow the context immutably, so
/// independent contexts can be evaluated from several threads at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchContext {
    environment: BTreeMap<String, String>,
    launch_configurations: BTreeMap<String, String>,
}

impl LaunchContext {
    /// Empty context: no environment variables, no launch configurations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process_env() -> Self {
        let environment: BTreeMap<String, String> = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        tracing::trace!(count = environment.len(), "Captured process environment");
        Self {
            environment,
            launch_configurations: BTreeMap::new(),
        }
    }

    pub fn with_environment(mut self, environment: BTreeMap<String, String>) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(name.into(), value.into());
        self
    }

    pub fn with_launch_configuration(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.launch_configurations.insert(name.into(), value.into());
        self
    }

    pub fn environment(&self) -> &BTreeMap<String, String> {
        &self.environment
    }

    pub fn env_var(&self, name: &str) -> Option<&str> {
        self.environment.get(name).map(String::as_str)
    }

    pub fn launch_configurations(&self) -> &BTreeMap<String, String> {
        &self.launch_configurations
    }

    pub fn launch_configuration(&self, name: &str) -> Option<&str> {
        self.launch_configurations.get(name).map(String::as_str)
    }
}
