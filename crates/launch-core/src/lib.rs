//! Shared types for the reactive launch core.
//!
//! - [`LaunchContext`]: environment and launch configurations read by substitutions
//! - [`Entity`] / [`ProcessAction`]: what handlers return and what they filter on
//! - [`LaunchError`]: configuration and substitution failures

pub mod context;
pub mod entity;
pub mod error;

pub use context::LaunchContext;
pub use entity::{ActionHandle, Entity, ProcessAction, ProcessActionRef, SomeEntities};
pub use error::LaunchError;
