//! Events about process actions: lifecycle and captured output.

mod io;
mod lifecycle;

pub use io::{Fd, ProcessIO, ProcessStderr, ProcessStdout, as_process_io};
pub use lifecycle::{ProcessExited, ProcessStarted, ProcessTarget};
