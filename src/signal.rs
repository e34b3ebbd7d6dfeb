//! Single-slot completion signals.
//!
//! A completion signal is a binary semaphore given from completion
//! (interrupt) context and taken by exactly one waiter:
//!
//! ```text
//! completion ctx          signal             worker
//! ──────────────          ──────             ──────
//! give_from_isr() ──────▶ [pending] ──────▶ take(timeout)
//! never blocks            one slot           suspends, no polling
//! ```
//!
//! Gives that happen while a give is already pending collapse into one.

use core::time::Duration;

/// Binary, edge-triggered, single-slot signal.
pub trait CompletionSignal: Sync {
    /// Release the signal from completion context.
    ///
    /// Must not allocate or block. Returns `true` if a waiting consumer may
    /// have been woken, so the caller can request a reschedule.
    fn give_from_isr(&self) -> bool;

    /// Wait for the signal and consume it.
    ///
    /// `None` waits forever. Returns `false` if the timeout expired first.
    fn take(&self, timeout: Option<Duration>) -> bool;

    /// Consume a pending give without waiting.
    fn try_take(&self) -> bool {
        self.take(Some(Duration::ZERO))
    }
}

#[cfg(feature = "std")]
pub use binary::BinarySignal;

#[cfg(feature = "std")]
mod binary {
    use core::sync::atomic::{AtomicBool, Ordering};
    use core::time::Duration;
    use std::sync::OnceLock;
    use std::thread::{self, Thread};
    use std::time::Instant;

    use super::CompletionSignal;

    /// Completion signal built on an atomic flag and thread parking.
    ///
    /// The first thread to call [`take`](CompletionSignal::take) becomes
    /// the signal's only consumer for its whole life.
    pub struct BinarySignal {
        pending: AtomicBool,
        waiter: OnceLock<Thread>,
    }

    impl BinarySignal {
        /// Create a signal in the taken state.
        pub const fn new() -> Self {
            Self {
                pending: AtomicBool::new(false),
                waiter: OnceLock::new(),
            }
        }

        /// Whether a give is waiting to be taken.
        pub fn is_pending(&self) -> bool {
            self.pending.load(Ordering::Acquire)
        }
    }

    impl Default for BinarySignal {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CompletionSignal for BinarySignal {
        fn give_from_isr(&self) -> bool {
            self.pending.store(true, Ordering::Release);
            match self.waiter.get() {
                Some(waiter) => {
                    waiter.unpark();
                    true
                }
                None => false,
            }
        }

        fn take(&self, timeout: Option<Duration>) -> bool {
            // Register before the first check: a give that lands between
            // the check and park() leaves an unpark token behind.
            let waiter = self.waiter.get_or_init(thread::current);
            debug_assert_eq!(
                waiter.id(),
                thread::current().id(),
                "completion signal taken from a second thread"
            );

            // A timeout too large for Instant waits forever.
            let deadline = timeout.and_then(|t| Instant::now().checked_add(t));
            loop {
                if self.pending.swap(false, Ordering::AcqRel) {
                    return true;
                }
                match deadline {
                    None => thread::park(),
                    Some(deadline) => {
                        let now = Instant::now();
                        if now >= deadline {
                            return false;
                        }
                        thread::park_timeout(deadline - now);
                    }
                }
            }
        }
    }

}
