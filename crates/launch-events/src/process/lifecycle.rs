use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use launch_core::ProcessActionRef;

use crate::event::impl_event;

/// Fields shared by events about a running process.
#[derive(Debug, Clone)]
pub struct ProcessTarget {
    pub action: ProcessActionRef,
    pub name: String,
    /// Final command after substitution expansion.
    pub cmd: Vec<String>,
    pub cwd: Option<String>,
    pub env: Option<BTreeMap<String, String>>,
    pub pid: u32,
}

/// A process action's OS process has started.
#[derive(Debug, Clone)]
pub struct ProcessStarted {
    target: ProcessTarget,
    observed_at: DateTime<Utc>,
}

impl ProcessStarted {
    pub const KIND: &'static str = "launch.events.process.ProcessStarted";

    pub fn new(target: ProcessTarget) -> Self {
        Self {
            target,
            observed_at: Utc::now(),
        }
    }

    pub fn target(&self) -> &ProcessTarget {
        &self.target
    }

    pub fn action(&self) -> &ProcessActionRef {
        &self.target.action
    }

    pub fn pid(&self) -> u32 {
        self.target.pid
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

impl_event!(ProcessStarted);

/// A process action's OS process has exited.
#[derive(Debug, Clone)]
pub struct ProcessExited {
    target: ProcessTarget,
    returncode: i32,
    observed_at: DateTime<Utc>,
}

impl ProcessExited {
    pub const KIND: &'static str = "launch.events.process.ProcessExited";

    pub fn new(target: ProcessTarget, returncode: i32) -> Self {
        Self {
            target,
            returncode,
            observed_at: Utc::now(),
        }
    }

    pub fn target(&self) -> &ProcessTarget {
        &self.target
    }

    pub fn action(&self) -> &ProcessActionRef {
        &self.target.action
    }

    pub fn returncode(&self) -> i32 {
        self.returncode
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

impl_event!(ProcessExited);
