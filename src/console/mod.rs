//! Serial command console
//!
//! Single worker, fed one character per receive completion.
//! Zero heap allocation - three fixed buffers (input line, last command,
//! output chunk).

pub mod commands;
#[allow(clippy::module_inception)]
pub mod console;
pub mod dispatch;
pub mod editor;
pub mod error;
pub mod line_buffer;
pub mod output;
pub mod parser;
pub mod registry;
pub mod transmitter;

pub use console::{Console, WorkerState};
pub use dispatch::{Cursor, DispatchReport, Dispatcher, Flow, Interpreter};
pub use editor::{LineEditor, LineEvent, Submit};
pub use error::ConsoleError;
pub use line_buffer::LineBuffer;
pub use output::OutputBuffer;
pub use registry::{CommandEntry, CommandRegistry, Handler, Invocation, ParamCount};
pub use transmitter::{PacedTransmitter, SendOutcome, Transmit};
