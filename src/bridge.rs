//! Transport completion bridge.
//!
//! Turns the transport's two completion callbacks into the two signals the
//! console worker sleeps on. The callbacks run in completion (interrupt)
//! context: they only release a signal, never touch line or output state.

use core::time::Duration;

use crate::signal::CompletionSignal;

/// Transport instance identifier.
///
/// Multi-channel transports report completions for every channel through
/// the same callbacks; the bridge only reacts to its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u8);

/// Receive/transmit completion signals for one transport channel.
pub struct CompletionBridge<S> {
    channel: ChannelId,
    rx: S,
    tx: S,
}

impl<S> CompletionBridge<S> {
    /// Create a bridge for `channel`. Both signals must start taken.
    pub const fn new(channel: ChannelId, rx: S, tx: S) -> Self {
        Self { channel, rx, tx }
    }

    /// Channel this bridge listens to.
    pub fn channel(&self) -> ChannelId {
        self.channel
    }
}

impl<S: CompletionSignal> CompletionBridge<S> {
    /// Receive-complete callback.
    ///
    /// Returns `true` if the worker may have been woken and the caller
    /// should yield to it (`portYIELD_FROM_ISR` on an RTOS).
    #[inline]
    pub fn notify_receive_complete(&self, channel: ChannelId) -> bool {
        channel == self.channel && self.rx.give_from_isr()
    }

    /// Transmit-complete callback. Same contract as
    /// [`notify_receive_complete`](Self::notify_receive_complete).
    #[inline]
    pub fn notify_transmit_complete(&self, channel: ChannelId) -> bool {
        channel == self.channel && self.tx.give_from_isr()
    }

    /// Block until a receive completes.
    pub fn wait_receive(&self) -> bool {
        self.rx.take(None)
    }

    /// Block until a receive completes or `timeout` expires.
    pub fn wait_receive_for(&self, timeout: Duration) -> bool {
        self.rx.take(Some(timeout))
    }

    /// Block until a transmit completes or `timeout` expires.
    pub fn wait_transmit(&self, timeout: Duration) -> bool {
        self.tx.take(Some(timeout))
    }

    /// Discard a transmit completion nobody waited for.
    ///
    /// A transmit that timed out may still complete later; its give must not
    /// be mistaken for the completion of the next transmit.
    pub fn clear_transmit(&self) -> bool {
        self.tx.try_take()
    }
}
