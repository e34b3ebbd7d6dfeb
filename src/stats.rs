//! Console counters.
//!
//! Written by the console worker, read by the `stats` command and by
//! whoever embeds the console. Atomics only, so a snapshot can be taken
//! from any thread without stopping the worker.

use core::sync::atomic::{AtomicU32, Ordering};

/// Lock-free console statistics.
///
/// # Usage
///
/// ```ignore
/// static STATS: ConsoleStats = ConsoleStats::new();
///
/// // In the worker:
/// STATS.record_char();
///
/// // Anywhere:
/// let snap = STATS.snapshot();
/// ```
pub struct ConsoleStats {
    chars_received: AtomicU32,
    chars_dropped: AtomicU32,
    lines_dispatched: AtomicU32,
    repeats: AtomicU32,
    chunks_sent: AtomicU32,
    chunks_truncated: AtomicU32,
    tx_timeouts: AtomicU32,
    tx_failures: AtomicU32,
    rx_failures: AtomicU32,
}

impl ConsoleStats {
    /// All counters at zero.
    pub const fn new() -> Self {
        Self {
            chars_received: AtomicU32::new(0),
            chars_dropped: AtomicU32::new(0),
            lines_dispatched: AtomicU32::new(0),
            repeats: AtomicU32::new(0),
            chunks_sent: AtomicU32::new(0),
            chunks_truncated: AtomicU32::new(0),
            tx_timeouts: AtomicU32::new(0),
            tx_failures: AtomicU32::new(0),
            rx_failures: AtomicU32::new(0),
        }
    }

    #[inline]
    pub fn record_char(&self) {
        self.chars_received.fetch_add(1, Ordering::Relaxed);
    }

    /// A printable character arrived with the input line already full.
    #[inline]
    pub fn record_dropped_char(&self) {
        self.chars_dropped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dispatch(&self, repeated: bool, chunks: u32, truncated: u32) {
        self.lines_dispatched.fetch_add(1, Ordering::Relaxed);
        if repeated {
            self.repeats.fetch_add(1, Ordering::Relaxed);
        }
        self.chunks_sent.fetch_add(chunks, Ordering::Relaxed);
        self.chunks_truncated.fetch_add(truncated, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_tx_timeout(&self) {
        self.tx_timeouts.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_tx_failure(&self) {
        self.tx_failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_rx_failure(&self) {
        self.rx_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            chars_received: self.chars_received.load(Ordering::Relaxed),
            chars_dropped: self.chars_dropped.load(Ordering::Relaxed),
            lines_dispatched: self.lines_dispatched.load(Ordering::Relaxed),
            repeats: self.repeats.load(Ordering::Relaxed),
            chunks_sent: self.chunks_sent.load(Ordering::Relaxed),
            chunks_truncated: self.chunks_truncated.load(Ordering::Relaxed),
            tx_timeouts: self.tx_timeouts.load(Ordering::Relaxed),
            tx_failures: self.tx_failures.load(Ordering::Relaxed),
            rx_failures: self.rx_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for ConsoleStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the console counters at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub chars_received: u32,
    pub chars_dropped: u32,
    pub lines_dispatched: u32,
    pub repeats: u32,
    pub chunks_sent: u32,
    pub chunks_truncated: u32,
    pub tx_timeouts: u32,
    pub tx_failures: u32,
    pub rx_failures: u32,
}

/// Counters of the console wired up by the binary.
pub static CONSOLE_STATS: ConsoleStats = ConsoleStats::new();
