use std::sync::Arc;

use anyhow::Result;
use launch_core::{Entity, LaunchContext, LaunchError, ProcessActionRef, SomeEntities};

use crate::event::Event;
use crate::handler::{EventHandler, OnEvent, ResponseFn, resolve_target, target_matches};
use crate::process::ProcessStarted;

/// Reacts to [`ProcessStarted`] events, optionally only for one target action.
pub struct OnProcessStart {
    target_action: Option<ProcessActionRef>,
    on_start: ResponseFn,
    actions_on_start: SomeEntities,
    has_callback: bool,
}

impl OnProcessStart {
    pub fn new(on_start: impl Into<OnEvent>) -> Self {
        let on_start = on_start.into();
        let has_callback = on_start.is_callback();
        let (on_start, actions_on_start) = on_start.normalize();
        Self {
            target_action: None,
            on_start,
            actions_on_start,
            has_callback,
        }
    }

    pub fn with_target(mut self, target_action: ProcessActionRef) -> Self {
        self.target_action = Some(target_action);
        self
    }

    pub fn try_with_target_entity(
        mut self,
        target_action: Option<Arc<dyn Entity>>,
    ) -> Result<Self, LaunchError> {
        self.target_action = resolve_target("OnProcessStart", target_action)?;
        Ok(self)
    }

    pub fn target_action(&self) -> Option<&ProcessActionRef> {
        self.target_action.as_ref()
    }
}

impl EventHandler for OnProcessStart {
    fn matches(&self, event: &dyn Event) -> bool {
        event
            .downcast_ref::<ProcessStarted>()
            .is_some_and(|started| target_matches(self.target_action.as_ref(), started.action()))
    }

    fn handle(&self, event: &dyn Event, context: &LaunchContext) -> Result<Option<SomeEntities>> {
        tracing::debug!(kind = event.kind(), "OnProcessStart handling event");
        (self.on_start)(event, context)
    }

    fn matcher_description(&self) -> String {
        match &self.target_action {
            Some(target) => format!(
                "event == ProcessStarted and event.action == ExecuteProcess({})",
                target.handle()
            ),
            None => "event == ProcessStarted".to_string(),
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
                "OnProcessStart(matcher='{}', handler={handler})",
                self.matcher_description()
            ),
            self.actions_on_start.clone(),
        )
    }
}
