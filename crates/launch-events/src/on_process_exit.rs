//! Handler for process exit events.

use std::sync::Arc;

use anyhow::Result;
use launch_core::{Entity, LaunchContext, LaunchError, ProcessActionRef, SomeEntities};

use crate::event::Event;
use crate::handler::{EventHandler, OnEvent, ResponseFn, resolve_target, target_matches};
use crate::process::ProcessExited;

/// Reacts to [`ProcessExited`] events, optionally only for one target action.
///
/// The target is compared by identity: a different action instance with the
/// same command line does not match.
pub struct OnProcessExit {
    target_action: Option<ProcessActionRef>,
    on_exit: ResponseFn,
    actions_on_exit: SomeEntities,
    has_callback: bool,
}

impl OnProcessExit {
    pub fn new(on_exit: impl Into<OnEvent>) -> Self {
        let on_exit = on_exit.into();
        let has_callback = on_exit.is_callback();
        let (on_exit, actions_on_exit) = on_exit.normalize();
        Self {
            target_action: None,
            on_exit,
            actions_on_exit,
            has_callback,
        }
    }

    pub fn from_entity(entity: Arc<dyn Entity>) -> Self {
        Self::new(OnEvent::SingleEntity(entity))
    }

    pub fn from_entities<I>(entities: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Entity>>,
    {
        Self::new(OnEvent::entities(entities))
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&dyn Event, &LaunchContext) -> Result<Option<SomeEntities>> + Send + Sync + 'static,
    {
        Self::new(OnEvent::callback(f))
    }

    /// Only match exits of this exact action instance.
    pub fn with_target(mut self, target_action: ProcessActionRef) -> Self {
        self.target_action = Some(target_action);
        tracing::debug!(matcher = %self.matcher_description(), "Targeted OnProcessExit");
        self
    }

    /// Set the target from an untyped entity reference.
    ///
    /// Fails immediately when the entity is not a process action; `None`
    /// leaves the handler matching every process.
    pub fn try_with_target_entity(
        mut self,
        target_action: Option<Arc<dyn Entity>>,
    ) -> Result<Self, LaunchError> {
        self.target_action = resolve_target("OnProcessExit", target_action)?;
        Ok(self)
    }

    pub fn target_action(&self) -> Option<&ProcessActionRef> {
        self.target_action.as_ref()
    }
}

impl EventHandler for OnProcessExit {
    fn matches(&self, event: &dyn Event) -> bool {
        event
            .downcast_ref::<ProcessExited>()
            .is_some_and(|exited| target_matches(self.target_action.as_ref(), exited.action()))
    }

    fn handle(&self, event: &dyn Event, context: &LaunchContext) -> Result<Option<SomeEntities>> {
        tracing::debug!(kind = event.kind(), "OnProcessExit handling event");
        (self.on_exit)(event, context)
    }

    fn matcher_description(&self) -> String {
        match &self.target_action {
            Some(target) => format!(
                "event == ProcessExited and event.action == ExecuteProcess({})",
                target.handle()
            ),
            None => "event == ProcessExited".to_string(),
        }
    }

    fn describe(&self) -> (String, SomeEntities) {
        let handler = if self.has_callback {
            "<callable>"
        } else {
            "<actions>"
        };
        (
            format!(
                "OnProcessExit(matcher='{}', handler={handler})",
                self.matcher_description()
            ),
            self.actions_on_exit.clone(),
        )
    }
}
