//! # SerialCommandConsole
//!
//! Interactive line-oriented command console over an interrupt-driven
//! serial transport.
//!
//! ## Architecture
//!
//! ```text
//! UART ISR ──▶ CompletionBridge ──▶ Console worker ──▶ LineEditor
//!   (rx/tx done)  (2 signals)          │                  │ line ready
//!                                      ▼                  ▼
//! UART  ◀──── PacedTransmitter ◀──── Dispatcher ──▶ Interpreter
//! ```
//!
//! - Completion context only gives signals, never touches line state
//! - One receive armed at a time: characters are handled in arrival order
//! - Every send waits for transmit-complete (bounded) before the buffer is
//!   reused
//! - No heap allocation in the console core

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod bridge;
pub mod config;
pub mod console;
pub mod log_globals;
pub mod logging;
pub mod signal;
pub mod stats;
pub mod transport;

#[cfg(feature = "std")]
pub mod host;
#[cfg(feature = "std")]
pub mod log_drain;

pub use bridge::{ChannelId, CompletionBridge};
pub use config::ConsoleConfig;
pub use console::{Console, ConsoleError, CommandRegistry, Interpreter};
pub use log_globals::CONSOLE_LOG;
pub use signal::CompletionSignal;
pub use stats::{ConsoleStats, CONSOLE_STATS};
pub use transport::Transport;

#[cfg(feature = "std")]
pub use signal::BinarySignal;
