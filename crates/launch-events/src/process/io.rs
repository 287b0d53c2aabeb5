use std::collections::BTreeMap;
use std::ops::Deref;

use chrono::{DateTime, Utc};
use launch_core::ProcessActionRef;

use crate::event::{Event, impl_event};

/// File descriptor an I/O chunk was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fd {
    Stdout = 1,
    Stderr = 2,
}

impl Fd {
    pub fn from_raw(fd: i32) -> Option<Self> {
        match fd {
            1 => Some(Self::Stdout),
            2 => Some(Self::Stderr),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> i32 {
        *self as i32
    }
}

/// One chunk of output read from a process.
///
/// `text` is exactly one observed read. Chunk boundaries belong to the
/// monitor that produced the event.
#[derive(Debug, Clone)]
pub struct ProcessIO {
    action: ProcessActionRef,
    cmd: Vec<String>,
    cwd: Option<String>,
    env: Option<BTreeMap<String, String>>,
    text: String,
    fd: Fd,
    observed_at: DateTime<Utc>,
}

impl ProcessIO {
    pub const KIND: &'static str = "launch.events.process.ProcessIO";

    pub fn new(
        action: ProcessActionRef,
        cmd: Vec<String>,
        cwd: Option<String>,
        env: Option<BTreeMap<String, String>>,
        text: impl Into<String>,
        fd: Fd,
    ) -> Self {
        Self {
            action,
            cmd,
            cwd,
            env,
            text: text.into(),
            fd,
            observed_at: Utc::now(),
        }
    }

    pub fn action(&self) -> &ProcessActionRef {
        &self.action
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

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fd(&self) -> Fd {
        self.fd
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

impl_event!(ProcessIO);

/// Output read from a process's stdout.
#[derive(Debug, Clone)]
pub struct ProcessStdout(ProcessIO);

impl ProcessStdout {
    pub const KIND: &'static str = "launch.events.process.ProcessStdout";

    pub fn new(
        action: ProcessActionRef,
        cmd: Vec<String>,
        cwd: Option<String>,
        env: Option<BTreeMap<String, String>>,
        text: impl Into<String>,
    ) -> Self {
        Self(ProcessIO::new(action, cmd, cwd, env, text, Fd::Stdout))
    }
}

impl Deref for ProcessStdout {
    type Target = ProcessIO;

    fn deref(&self) -> &ProcessIO {
        &self.0
    }
}

impl_event!(ProcessStdout);

/// Output read from a process's stderr.
#[derive(Debug, Clone)]
pub struct ProcessStderr(ProcessIO);

impl ProcessStderr {
    pub const KIND: &'static str = "launch.events.process.ProcessStderr";

    pub fn new(
        action: ProcessActionRef,
        cmd: Vec<String>,
        cwd: Option<String>,
        env: Option<BTreeMap<String, String>>,
        text: impl Into<String>,
    ) -> Self {
        Self(ProcessIO::new(action, cmd, cwd, env, text, Fd::Stderr))
    }
}

impl Deref for ProcessStderr {
    type Target = ProcessIO;

    fn deref(&self) -> &ProcessIO {
        &self.0
    }
}

impl_event!(ProcessStderr);

/// View any event of the I/O family as its [`ProcessIO`] payload.
pub fn as_process_io(event: &dyn Event) -> Option<&ProcessIO> {
    if let Some(io) = event.downcast_ref::<ProcessIO>() {
        return Some(io);
    }
    if let Some(stdout) = event.downcast_ref::<ProcessStdout>() {
        return Some(&**stdout);
    }
    event.downcast_ref::<ProcessStderr>().map(|stderr| &**stderr)
}
