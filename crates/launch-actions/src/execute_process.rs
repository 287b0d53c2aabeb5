//! Declarative description of a process to run.
//!
//! `ExecuteProcess` never spawns anything. It resolves its substitutions into
//! a [`ResolvedProcess`], which the process monitor uses to build events that
//! point back at this exact action instance.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use launch_core::{ActionHandle, Entity, LaunchContext, LaunchError, ProcessAction, ProcessActionRef};
use launch_events::{ProcessExited, ProcessStarted, ProcessStderr, ProcessStdout, ProcessTarget};
use launch_substitutions::SubstitutionList;

/// A process action: command line, working directory and environment, all
/// given as substitutions.
///
/// Not `Clone`: each instance has its own identity and handle.
#[derive(Debug)]
pub struct ExecuteProcess {
    handle: ActionHandle,
    cmd: Vec<SubstitutionList>,
    cwd: Option<SubstitutionList>,
    env: Option<Vec<(SubstitutionList, SubstitutionList)>>,
    name: Option<SubstitutionList>,
}

impl ExecuteProcess {
    /// Each element of `cmd` is one argument.
    pub fn new<I, T>(cmd: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SubstitutionList>,
    {
        Self {
            handle: ActionHandle::next(),
            cmd: cmd.into_iter().map(Into::into).collect(),
            cwd: None,
            env: None,
            name: None,
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<SubstitutionList>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Add an environment entry. Once any entry is set the process gets an
    /// explicit environment instead of inheriting.
    pub fn with_env(
        mut self,
        name: impl Into<SubstitutionList>,
        value: impl Into<SubstitutionList>,
    ) -> Self {
        self.env
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    pub fn with_name(mut self, name: impl Into<SubstitutionList>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn cmd(&self) -> &[SubstitutionList] {
        &self.cmd
    }

    pub fn into_ref(self) -> ProcessActionRef {
        ProcessActionRef::new(Arc::new(self))
    }

    /// Perform every substitution against the context.
    pub fn resolve(self: &Arc<Self>, context: &LaunchContext) -> Result<ResolvedProcess, LaunchError> {
        let cmd = self
            .cmd
            .iter()
            .map(|arg| arg.perform(context))
            .collect::<Result<Vec<_>, _>>()?;
        let cwd = self
            .cwd
            .as_ref()
            .map(|cwd| cwd.perform(context))
            .transpose()?;
        let env = match &self.env {
            Some(entries) => {
                let mut env = BTreeMap::new();
                for (name, value) in entries {
                    env.insert(name.perform(context)?, value.perform(context)?);
                }
                Some(env)
            }
            None => None,
        };
        let name = match &self.name {
            Some(name) => name.perform(context)?,
            None => self.default_name(&cmd),
        };
        tracing::debug!(name = %name, handle = %self.handle, "Resolved process action");

        Ok(ResolvedProcess {
            action: ProcessActionRef::new(self.clone()),
            name,
            cmd,
            cwd,
            env,
        })
    }

    fn default_name(&self, cmd: &[String]) -> String {
        let base = cmd
            .first()
            .and_then(|exe| Path::new(exe).file_name())
            .and_then(|name| name.to_str())
            .unwrap_or("process");
        format!("{base}-{}", self.handle.as_u64())
    }
}

impl Entity for ExecuteProcess {
    fn describe(&self) -> String {
        let cmd = self
            .cmd
            .iter()
            .map(SubstitutionList::describe)
            .collect::<Vec<_>>()
            .join(", ");
        format!("ExecuteProcess(cmd=[{cmd}])")
    }

    fn as_process_action(self: Arc<Self>) -> Option<Arc<dyn ProcessAction>> {
        Some(self)
    }
}

impl ProcessAction for ExecuteProcess {
    fn handle(&self) -> ActionHandle {
        self.handle
    }
}

/// A process action with every substitution performed.
#[derive(Debug, Clone)]
pub struct ResolvedProcess {
    action: ProcessActionRef,
    name: String,
    cmd: Vec<String>,
    cwd: Option<String>,
    env: Option<BTreeMap<String, String>>,
}

impl ResolvedProcess {
    pub fn action(&self) -> &ProcessActionRef {
        &self.action
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cmd(&self) -> &[String] {
        &self.cmd
    }

    pub fn cwd(&self) -> Option<&str> {
        self.cwd.as_deref()
    }

    pub fn env(&self) -> Option<&BTreeMap<String, String>> {
        self.env.as_ref()
    }

    fn target(&self, pid: u32) -> ProcessTarget {
        ProcessTarget {
            action: self.action.clone(),
            name: self.name.clone(),
            cmd: self.cmd.clone(),
            cwd: self.cwd.clone(),
            env: self.env.clone(),
            pid,
        }
    }

    pub fn started(&self, pid: u32) -> ProcessStarted {
        ProcessStarted::new(self.target(pid))
    }

    pub fn exited(&self, pid: u32, returncode: i32) -> ProcessExited {
        ProcessExited::new(self.target(pid), returncode)
    }

    pub fn stdout(&self, text: impl Into<String>) -> ProcessStdout {
        ProcessStdout::new(
            self.action.clone(),
            self.cmd.clone(),
            self.cwd.clone(),
            self.env.clone(),
            text,
        )
    }

    pub fn stderr(&self, text: impl Into<String>) -> ProcessStderr {
        ProcessStderr::new(
            self.action.clone(),
            self.cmd.clone(),
            self.cwd.clone(),
            self.env.clone(),
            text,
        )
    }
}
