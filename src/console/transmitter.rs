//! Paced transmitter
//!
//! Every send waits (bounded) for transmit-complete before returning, so
//! the caller can never overwrite a buffer the transport is still reading.
//! The buffer stays borrowed for the whole call.

use core::time::Duration;

use crate::bridge::CompletionBridge;
use crate::log_globals::CONSOLE_LOG;
use crate::logging::Clock;
use crate::signal::CompletionSignal;
use crate::stats::ConsoleStats;
use crate::transport::Transport;
use crate::{console_trace, console_warn};

/// Result of one paced send.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing to send; the transport was not touched.
    Skipped,
    /// Transmit-complete arrived within the timeout.
    Completed,
    /// No transmit-complete within the timeout. The data may be lost.
    TimedOut,
    /// The transport refused to start the transmit.
    Failed,
}

/// Sink for console output that returns only once the bytes are out.
pub trait Transmit {
    /// Send `bytes` and wait for completion.
    ///
    /// Never escalates: a lost message must not stop the console.
    fn send_and_wait(&mut self, bytes: &[u8]) -> SendOutcome;
}

/// [`Transmit`] over a [`Transport`] paced by the bridge's Tx signal.
pub struct PacedTransmitter<'a, T, S> {
    transport: &'a mut T,
    bridge: &'a CompletionBridge<S>,
    timeout: Duration,
    stats: &'a ConsoleStats,
    clock: Clock,
}

impl<'a, T, S> PacedTransmitter<'a, T, S>
where
    T: Transport,
    S: CompletionSignal,
{
    pub fn new(
        transport: &'a mut T,
        bridge: &'a CompletionBridge<S>,
        timeout: Duration,
        stats: &'a ConsoleStats,
        clock: Clock,
    ) -> Self {
        Self {
            transport,
            bridge,
            timeout,
            stats,
            clock,
        }
    }
}

impl<T, S> Transmit for PacedTransmitter<'_, T, S>
where
    T: Transport,
    S: CompletionSignal,
{
    fn send_and_wait(&mut self, bytes: &[u8]) -> SendOutcome {
        if bytes.is_empty() {
            return SendOutcome::Skipped;
        }

        // A completion left over from an earlier timed-out send.
        if self.bridge.clear_transmit() {
            console_trace!(CONSOLE_LOG, (self.clock)(), "tx: discarded late completion");
        }

        if let Err(err) = self.transport.start_transmit(bytes) {
            self.stats.record_tx_failure();
            console_warn!(CONSOLE_LOG, (self.clock)(), "tx: {} bytes not started: {}", bytes.len(), err);
            return SendOutcome::Failed;
        }

        if self.bridge.wait_transmit(self.timeout) {
            SendOutcome::Completed
        } else {
            self.stats.record_tx_timeout();
            console_warn!(
                CONSOLE_LOG,
                (self.clock)(),
                "tx: no completion for {} bytes within {} ms",
                bytes.len(),
                self.timeout.as_millis()
            );
            SendOutcome::TimedOut
        }
    }
}
