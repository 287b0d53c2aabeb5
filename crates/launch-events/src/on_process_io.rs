//! Handler for process output events, dispatched by file descriptor.

use std::sync::Arc;

use anyhow::Result;
use launch_core::{Entity, LaunchContext, LaunchError, ProcessActionRef, SomeEntities};

use crate::event::Event;
use crate::handler::{EventHandler, resolve_target, target_matches};
use crate::process::{Fd, ProcessIO, as_process_io};

/// Callback invoked with one chunk of process output.
pub type IoCallback =
    Arc<dyn Fn(&ProcessIO, &LaunchContext) -> Result<Option<SomeEntities>> + Send + Sync>;

/// Reacts to [`ProcessIO`]-family events.
///
/// Only descriptors with a registered callback match. There is no stdin
/// event in this layer, so `on_stdin` is kept for configuration parity and
/// never fires.
#[derive(Default)]
pub struct OnProcessIO {
    target_action: Option<ProcessActionRef>,
    on_stdin: Option<IoCallback>,
    on_stdout: Option<IoCallback>,
    on_stderr: Option<IoCallback>,
}

impl OnProcessIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target_action: ProcessActionRef) -> Self {
        self.target_action = Some(target_action);
        self
    }

    pub fn try_with_target_entity(
        mut self,
        target_action: Option<Arc<dyn Entity>>,
    ) -> Result<Self, LaunchError> {
        self.target_action = resolve_target("OnProcessIO", target_action)?;
        Ok(self)
    }

    pub fn on_stdin<F>(mut self, f: F) -> Self
    where
        F: Fn(&ProcessIO, &LaunchContext) -> Result<Option<SomeEntities>> + Send + Sync + 'static,
    {
        self.on_stdin = Some(Arc::new(f));
        self
    }

    pub fn on_stdout<F>(mut self, f: F) -> Self
    where
        F: Fn(&ProcessIO, &LaunchContext) -> Result<Option<SomeEntities>> + Send + Sync + 'static,
    {
        self.on_stdout = Some(Arc::new(f));
        self
    }

    pub fn on_stderr<F>(mut self, f: F) -> Self
    where
        F: Fn(&ProcessIO, &LaunchContext) -> Result<Option<SomeEntities>> + Send + Sync + 'static,
    {
        self.on_stderr = Some(Arc::new(f));
        self
    }

    pub fn target_action(&self) -> Option<&ProcessActionRef> {
        self.target_action.as_ref()
    }

    fn callback_for(&self, fd: Fd) -> Option<&IoCallback> {
        match fd {
            Fd::Stdout => self.on_stdout.as_ref(),
            Fd::Stderr => self.on_stderr.as_ref(),
        }
    }
}

impl EventHandler for OnProcessIO {
    fn matches(&self, event: &dyn Event) -> bool {
        as_process_io(event).is_some_and(|io| {
            self.callback_for(io.fd()).is_some()
                && target_matches(self.target_action.as_ref(), io.action())
        })
    }

    fn handle(&self, event: &dyn Event, context: &LaunchContext) -> Result<Option<SomeEntities>> {
        let Some(io) = as_process_io(event) else {
            anyhow::bail!("OnProcessIO received non-I/O event {}", event.kind());
        };
        tracing::trace!(fd = io.fd().as_raw(), bytes = io.text().len(), "OnProcessIO handling chunk");
        match self.callback_for(io.fd()) {
            Some(callback) => callback(io, context),
            None => Ok(None),
        }
    }

    fn matcher_description(&self) -> String {
        match &self.target_action {
            Some(target) => format!(
                "event == ProcessIO and event.action == ExecuteProcess({})",
                target.handle()
            ),
            None => "event == ProcessIO".to_string(),
        }
    }

    fn describe(&self) -> (String, SomeEntities) {
        let mut handlers = Vec::new();
        if self.on_stdin.is_some() {
            handlers.push("on_stdin");
        }
        if self.on_stdout.is_some() {
            handlers.push("on_stdout");
        }
        if self.on_stderr.is_some() {
            handlers.push("on_stderr");
        }
        (
            format!(
                "OnProcessIO(matcher='{}', handlers=[{}])",
                self.matcher_description(),
                handlers.join(", ")
            ),
            Vec::new(),
        )
    }
}
