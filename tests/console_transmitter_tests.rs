//! Paced transmitter tests

use std::time::{Duration, Instant};

use serial_command_console::console::{ConsoleError, PacedTransmitter, SendOutcome, Transmit};
use serial_command_console::logging::zero_clock;
use serial_command_console::{BinarySignal, ChannelId, CompletionBridge, ConsoleStats, Transport};

const CHANNEL: ChannelId = ChannelId(2);

fn leak_bridge() -> &'static CompletionBridge<BinarySignal> {
    Box::leak(Box::new(CompletionBridge::new(
        CHANNEL,
        BinarySignal::new(),
        BinarySignal::new(),
    )))
}

/// Transmit-only transport that completes synchronously unless told not to.
struct TxTransport {
    bridge: &'static CompletionBridge<BinarySignal>,
    sends: Vec<Vec<u8>>,
    complete: bool,
    refuse: bool,
}

impl TxTransport {
    fn new(bridge: &'static CompletionBridge<BinarySignal>) -> Self {
        Self {
            bridge,
            sends: Vec::new(),
            complete: true,
            refuse: false,
        }
    }
}

impl Transport for TxTransport {
    fn start_receive(&mut self) -> Result<(), ConsoleError> {
        Err(ConsoleError::Transport)
    }

    fn take_received(&mut self) -> Option<u8> {
        None
    }

    fn start_transmit(&mut self, bytes: &[u8]) -> Result<(), ConsoleError> {
        if self.refuse {
            return Err(ConsoleError::Transport);
        }
        self.sends.push(bytes.to_vec());
        if self.complete {
            self.bridge.notify_transmit_complete(CHANNEL);
        }
        Ok(())
    }
}

#[test]
fn test_send_completes() {
    let bridge = leak_bridge();
    let stats = ConsoleStats::new();
    let mut transport = TxTransport::new(bridge);

    {
        let mut tx = PacedTransmitter::new(&mut transport, bridge, Duration::from_millis(100), &stats, zero_clock);
        assert_eq!(tx.send_and_wait(b"hello"), SendOutcome::Completed);
        assert_eq!(tx.send_and_wait(b"world"), SendOutcome::Completed);
    }

    assert_eq!(transport.sends, [b"hello".to_vec(), b"world".to_vec()]);
    assert_eq!(stats.snapshot().tx_timeouts, 0);
}

#[test]
fn test_zero_length_send_skipped() {
    let bridge = leak_bridge();
    let stats = ConsoleStats::new();
    let mut transport = TxTransport::new(bridge);

    {
        let mut tx = PacedTransmitter::new(&mut transport, bridge, Duration::from_millis(100), &stats, zero_clock);
        assert_eq!(tx.send_and_wait(b""), SendOutcome::Skipped);
    }

    assert!(transport.sends.is_empty());
}

#[test]
fn test_missing_completion_times_out() {
    let bridge = leak_bridge();
    let stats = ConsoleStats::new();
    let mut transport = TxTransport::new(bridge);
    transport.complete = false;

    let timeout = Duration::from_millis(20);
    let started = Instant::now();
    {
        let mut tx = PacedTransmitter::new(&mut transport, bridge, timeout, &stats, zero_clock);
        assert_eq!(tx.send_and_wait(b"lost"), SendOutcome::TimedOut);
    }

    assert!(started.elapsed() >= timeout);
    assert_eq!(transport.sends.len(), 1);
    assert_eq!(stats.snapshot().tx_timeouts, 1);
}

#[test]
fn test_refused_transmit_fails_without_waiting() {
    let bridge = leak_bridge();
    let stats = ConsoleStats::new();
    let mut transport = TxTransport::new(bridge);
    transport.refuse = true;

    {
        let mut tx = PacedTransmitter::new(&mut transport, bridge, Duration::from_secs(10), &stats, zero_clock);
        assert_eq!(tx.send_and_wait(b"x"), SendOutcome::Failed);
    }

    assert_eq!(stats.snapshot().tx_failures, 1);
    assert_eq!(stats.snapshot().tx_timeouts, 0);
}

#[test]
fn test_late_completion_not_credited_to_next_send() {
    let bridge = leak_bridge();
    let stats = ConsoleStats::new();
    let mut transport = TxTransport::new(bridge);
    transport.complete = false;

    // Completion of an earlier send that already timed out
    bridge.notify_transmit_complete(CHANNEL);

    {
        let mut tx = PacedTransmitter::new(&mut transport, bridge, Duration::from_millis(10), &stats, zero_clock);
        assert_eq!(tx.send_and_wait(b"next"), SendOutcome::TimedOut);
    }
}

#[test]
fn test_completion_for_other_channel_ignored() {
    let bridge = leak_bridge();
    let stats = ConsoleStats::new();
    let mut transport = TxTransport::new(bridge);
    transport.complete = false;

    bridge.notify_transmit_complete(ChannelId(7));

    {
        let mut tx = PacedTransmitter::new(&mut transport, bridge, Duration::from_millis(10), &stats, zero_clock);
        assert_eq!(tx.send_and_wait(b"x"), SendOutcome::TimedOut);
    }
}
