//! Events and reactive event handlers for process lifecycle occurrences.
//!
//! The process monitor builds an [`Event`] per occurrence and hands it to the
//! dispatcher, which asks every registered [`EventHandler`] whether it
//! [`matches`](EventHandler::matches) and, on a match, calls
//! [`handle`](EventHandler::handle). Handlers never do work inline: they
//! return entities for the scheduler to run later.
//!
//! Built-in handlers:
//! - [`OnProcessExit`]: `ProcessExited`, optionally for one target action
//! - [`OnProcessStart`]: `ProcessStarted`, optionally for one target action
//! - [`OnProcessIO`]: stdout/stderr chunks, dispatched by file descriptor
//! - [`Handler`]: arbitrary matcher closure

pub mod event;
pub mod handler;
pub mod on_process_exit;
pub mod on_process_io;
pub mod on_process_start;
pub mod process;

#[cfg(test)]
mod test_support;

pub use event::Event;
pub use handler::{EventHandler, Handler, MatcherFn, OnEvent, ResponseFn};
pub use on_process_exit::OnProcessExit;
pub use on_process_io::{IoCallback, OnProcessIO};
pub use on_process_start::OnProcessStart;
pub use process::{
    Fd, ProcessExited, ProcessIO, ProcessStarted, ProcessStderr, ProcessStdout, ProcessTarget,
    as_process_io,
};
