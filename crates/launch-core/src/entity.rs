//! Orchestratable entities and the opaque process-action capability.
//!
//! Handlers never depend on a concrete action type. They only see
//! [`Entity`] values (what they return) and [`ProcessAction`] references
//! (what they filter on, by identity).

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Zero or more entities produced by a handler response.
pub type SomeEntities = Vec<Arc<dyn Entity>>;

/// A unit of work the external engine knows how to schedule.
pub trait Entity: fmt::Debug + Send + Sync {
    /// Short human-readable description used in handler introspection.
    fn describe(&self) -> String;

    /// Returns this entity as a process action when it is one.
    ///
    /// Used to validate heterogeneous entity references at construction
    /// time (see `OnProcessExit::try_with_target_entity`).
    fn as_process_action(self: Arc<Self>) -> Option<Arc<dyn ProcessAction>> {
        None
    }
}

/// Capability implemented by actions that run an OS process.
///
/// Handlers only compare references for identity and print the handle;
/// they never invoke the action.
pub trait ProcessAction: Entity {
    fn handle(&self) -> ActionHandle;
}

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Stable debug identifier assigned once per action instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionHandle(u64);

impl ActionHandle {
    /// Allocate the next handle. Handles are never reused within a process.
    pub fn next() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Shared reference to a process action, compared by identity.
#[derive(Clone)]
pub struct ProcessActionRef(Arc<dyn ProcessAction>);

impl ProcessActionRef {
    pub fn new(action: Arc<dyn ProcessAction>) -> Self {
        Self(action)
    }

    /// True when both references point at the same action instance.
    ///
    /// Two distinct instances with equal fields are never the same action.
    pub fn same_action(&self, other: &ProcessActionRef) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }

    pub fn handle(&self) -> ActionHandle {
        self.0.handle()
    }

    pub fn action(&self) -> &Arc<dyn ProcessAction> {
        &self.0
    }

    /// The referenced action as a plain entity, e.g. to return it from a handler.
    pub fn as_entity(&self) -> Arc<dyn Entity> {
        self.0.clone()
    }
}

impl From<Arc<dyn ProcessAction>> for ProcessActionRef {
    fn from(action: Arc<dyn ProcessAction>) -> Self {
        Self(action)
    }
}

impl fmt::Debug for ProcessActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcessActionRef({})", self.handle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FakeProcess {
        handle: ActionHandle,
        cmd: String,
    }

    impl FakeProcess {
        fn new(cmd: &str) -> Self {
            Self {
                handle: ActionHandle::next(),
                cmd: cmd.to_string(),
            }
        }
    }

    impl Entity for FakeProcess {
        fn describe(&self) -> String {
            format!("FakeProcess(cmd='{}')", self.cmd)
        }

        fn as_process_action(self: Arc<Self>) -> Option<Arc<dyn ProcessAction>> {
            Some(self)
        }
    }

    impl ProcessAction for FakeProcess {
        fn handle(&self) -> ActionHandle {
            self.handle
        }
    }

    #[derive(Debug)]
    struct Note;

    impl Entity for Note {
        fn describe(&self) -> String {
            "Note".to_string()
        }
    }

    #[test]
    fn test_handles_are_monotonic() {
        let a = ActionHandle::next();
        let b = ActionHandle::next();
        assert!(b > a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_handle_display_is_hex() {
        assert_eq!(ActionHandle(255).to_string(), "0xff");
        assert_eq!(ActionHandle(1).to_string(), "0x1");
    }

    #[test]
    fn test_same_action_is_identity() {
        let action: Arc<dyn ProcessAction> = Arc::new(FakeProcess::new("talker"));
        let a = ProcessActionRef::new(action.clone());
        let b = ProcessActionRef::new(action);
        assert!(a.same_action(&b));
        assert_eq!(a.handle(), b.handle());
    }

    #[test]
    fn test_equal_fields_are_not_same_action() {
        let a = ProcessActionRef::new(Arc::new(FakeProcess::new("talker")));
        let b = ProcessActionRef::new(Arc::new(FakeProcess::new("talker")));
        assert!(!a.same_action(&b));
    }

    #[test]
    fn test_as_process_action_default_is_none() {
        let note: Arc<dyn Entity> = Arc::new(Note);
        assert!(note.as_process_action().is_none());

        let process: Arc<dyn Entity> = Arc::new(FakeProcess::new("ls"));
        let action = process.as_process_action().expect("process action");
        assert_eq!(action.describe(), "FakeProcess(cmd='ls')");
    }

    #[test]
    fn test_debug_uses_handle() {
        let process = FakeProcess::new("ls");
        let expected = format!("ProcessActionRef({})", process.handle);
        let r = ProcessActionRef::new(Arc::new(process));
        assert_eq!(format!("{r:?}"), expected);
    }
}
