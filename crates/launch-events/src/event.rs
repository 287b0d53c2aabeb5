//! Base event contract.

use std::any::Any;
use std::fmt;

/// Immutable record of something that happened during a launch.
///
/// `kind` is a stable identifier so modules can match on events without
/// depending on each other's concrete types.
pub trait Event: fmt::Debug + Send + Sync + Any {
    fn kind(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

impl dyn Event {
    pub fn is<T: Event>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Event>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Implement [`Event`] for a type exposing an associated `KIND` constant.
macro_rules! impl_event {
    ($ty:ty) => {
        impl $crate::event::Event for $ty {
            fn kind(&self) -> &'static str {
                <$ty>::KIND
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}

pub(crate) use impl_event;
