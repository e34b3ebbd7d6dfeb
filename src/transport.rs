//! Serial transport interface required by the console.
//!
//! The driver itself (UART registers, DMA, framing) lives outside this
//! crate. It must:
//! - keep at most one operation outstanding per direction
//! - call the matching [`CompletionBridge`](crate::bridge::CompletionBridge)
//!   notification exactly once per completed operation, with its channel id

use crate::console::ConsoleError;

/// Asynchronous single-channel serial transport.
pub trait Transport {
    /// Arm a one-character receive. Returns immediately.
    fn start_receive(&mut self) -> Result<(), ConsoleError>;

    /// Character delivered by the last completed receive, if any.
    ///
    /// Consumes the character: a second call returns `None`.
    fn take_received(&mut self) -> Option<u8>;

    /// Start transmitting `bytes`. Returns immediately.
    ///
    /// The caller keeps `bytes` borrowed until the transmit-complete signal
    /// arrives or its wait times out; drivers that outlive that window
    /// (late DMA) must copy.
    fn start_transmit(&mut self, bytes: &[u8]) -> Result<(), ConsoleError>;
}
