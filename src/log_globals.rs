//! Global log stream instance.
//!
//! Written by the console worker, drained by the log drain.

use crate::logging::LogStream;

/// Log stream written by the console worker and its commands.
pub static CONSOLE_LOG: LogStream = LogStream::new();
