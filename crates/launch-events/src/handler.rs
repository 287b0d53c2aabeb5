//! Event handler contract and response normalization.
//!
//! A handler pairs a pure predicate over events with a response producing
//! zero or more entities for the external scheduler. Responses are accepted
//! in three shapes ([`OnEvent`]) and normalized once, at construction, into
//! a single [`ResponseFn`].

use std::sync::Arc;

use anyhow::Result;
use launch_core::{Entity, LaunchContext, LaunchError, ProcessActionRef, SomeEntities};

use crate::event::Event;

/// Normalized response contract: `(event, context) -> none | entities`.
pub type ResponseFn =
    Arc<dyn Fn(&dyn Event, &LaunchContext) -> Result<Option<SomeEntities>> + Send + Sync>;

/// Pure predicate over events.
pub type MatcherFn = Arc<dyn Fn(&dyn Event) -> bool + Send + Sync>;

/// A reactive rule evaluated once per event by the dispatcher.
pub trait EventHandler: Send + Sync {
    /// Whether this handler wants the event. Must not have side effects.
    fn matches(&self, event: &dyn Event) -> bool;

    /// Run the response. Errors propagate to the dispatcher unchanged.
    fn handle(&self, event: &dyn Event, context: &LaunchContext) -> Result<Option<SomeEntities>>;

    fn matcher_description(&self) -> String;

    /// Human-readable description plus a snapshot of the static entities.
    fn describe(&self) -> (String, SomeEntities);
}

/// The accepted response shapes.
#[derive(Clone)]
pub enum OnEvent {
    /// Always returns this one entity, ignoring the event.
    SingleEntity(Arc<dyn Entity>),
    /// Always returns this fixed sequence, ignoring the event.
    EntitySequence(SomeEntities),
    /// Called with the event and context; its result is returned as-is.
    Callback(ResponseFn),
}

impl OnEvent {
    pub fn entity(entity: impl Entity + 'static) -> Self {
        Self::SingleEntity(Arc::new(entity))
    }

    /// Snapshot the entities now. One-shot iterators are fully drained here.
    pub fn entities<I>(entities: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Entity>>,
    {
        Self::EntitySequence(entities.into_iter().collect())
    }

    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&dyn Event, &LaunchContext) -> Result<Option<SomeEntities>> + Send + Sync + 'static,
    {
        Self::Callback(Arc::new(f))
    }

    /// Callback over a concrete event type.
    ///
    /// Receiving an event of another type is an error returned to the
    /// dispatcher.
    pub fn typed_callback<E, F>(f: F) -> Self
    where
        E: Event,
        F: Fn(&E, &LaunchContext) -> Result<Option<SomeEntities>> + Send + Sync + 'static,
    {
        Self::callback(move |event, context| match event.downcast_ref::<E>() {
            Some(typed) => f(typed, context),
            None => anyhow::bail!(
                "handler expected {} but received {}",
                std::any::type_name::<E>(),
                event.kind()
            ),
        })
    }

    pub fn is_callback(&self) -> bool {
        matches!(self, Self::Callback(_))
    }

    /// Resolve into the response function and the introspection snapshot.
    pub(crate) fn normalize(self) -> (ResponseFn, SomeEntities) {
        match self {
            Self::SingleEntity(entity) => {
                let snapshot = vec![entity.clone()];
                let response: ResponseFn =
                    Arc::new(move |_event: &dyn Event, _context: &LaunchContext| {
                        Ok(Some(vec![entity.clone()]))
                    });
                (response, snapshot)
            }
            Self::EntitySequence(entities) => {
                let snapshot = entities.clone();
                let response: ResponseFn =
                    Arc::new(move |_event: &dyn Event, _context: &LaunchContext| {
                        Ok(Some(entities.clone()))
                    });
                (response, snapshot)
            }
            Self::Callback(response) => (response, Vec::new()),
        }
    }
}

impl From<Arc<dyn Entity>> for OnEvent {
    fn from(entity: Arc<dyn Entity>) -> Self {
        Self::SingleEntity(entity)
    }
}

impl From<SomeEntities> for OnEvent {
    fn from(entities: SomeEntities) -> Self {
        Self::EntitySequence(entities)
    }
}

impl From<ResponseFn> for OnEvent {
    fn from(response: ResponseFn) -> Self {
        Self::Callback(response)
    }
}

impl std::fmt::Debug for OnEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SingleEntity(entity) => f.debug_tuple("SingleEntity").field(entity).finish(),
            Self::EntitySequence(entities) => {
                f.debug_tuple("EntitySequence").field(entities).finish()
            }
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// Generic handler built from an arbitrary matcher.
pub struct Handler {
    matcher: MatcherFn,
    matcher_description: String,
    response: ResponseFn,
    entities: SomeEntities,
    has_callback: bool,
}

impl Handler {
    pub fn new<M>(matcher: M, matcher_description: impl Into<String>, on_event: OnEvent) -> Self
    where
        M: Fn(&dyn Event) -> bool + Send + Sync + 'static,
    {
        let has_callback = on_event.is_callback();
        let (response, entities) = on_event.normalize();
        let matcher_description = matcher_description.into();
        tracing::debug!(matcher = %matcher_description, "Created event handler");
        Self {
            matcher: Arc::new(matcher),
            matcher_description,
            response,
            entities,
            has_callback,
        }
    }

    /// Handler matching every event of the given kind.
    pub fn for_kind(kind: &'static str, on_event: OnEvent) -> Self {
        Self::new(
            move |event| event.kind() == kind,
            format!("event.kind == '{kind}'"),
            on_event,
        )
    }
}

impl EventHandler for Handler {
    fn matches(&self, event: &dyn Event) -> bool {
        (self.matcher)(event)
    }

    fn handle(&self, event: &dyn Event, context: &LaunchContext) -> Result<Option<SomeEntities>> {
        tracing::debug!(kind = event.kind(), matcher = %self.matcher_description, "Handling event");
        (self.response)(event, context)
    }

    fn matcher_description(&self) -> String {
        self.matcher_description.clone()
    }

    fn describe(&self) -> (String, SomeEntities) {
        let handler = if self.has_callback {
            "<callable>"
        } else {
            "<actions>"
        };
        (
            format!(
                "EventHandler(matcher='{}', handler={handler})",
                self.matcher_description
            ),
            self.entities.clone(),
        )
    }
}

/// Identity check shared by the targeted process handlers.
pub(crate) fn target_matches(target: Option<&ProcessActionRef>, action: &ProcessActionRef) -> bool {
    target.is_none_or(|target| target.same_action(action))
}

/// Validate an untyped target reference. `None` means "any process".
pub(crate) fn resolve_target(
    handler: &'static str,
    target: Option<Arc<dyn Entity>>,
) -> Result<Option<ProcessActionRef>, LaunchError> {
    let Some(entity) = target else {
        return Ok(None);
    };
    let found = entity.describe();
    match entity.as_process_action() {
        Some(action) => Ok(Some(ProcessActionRef::new(action))),
        None => Err(LaunchError::InvalidTargetAction { handler, found }),
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
