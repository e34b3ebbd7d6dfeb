//! Threaded transport over a byte reader and writer.
//!
//! Emulates an interrupt-driven UART on top of blocking I/O:
//!
//! ```text
//! worker                     console-rx thread          console-tx thread
//! ──────                     ─────────────────          ─────────────────
//! start_receive() ──arm───▶  read 1 byte
//!                            notify_receive_complete
//! start_transmit() ─copy──────────────────────────────▶ write + flush
//!                                                       notify_transmit_complete
//! ```
//!
//! On ESP-IDF, stdin/stdout are the UART console, so the same transport
//! serves the hardware target.

use std::io::{self, ErrorKind, Read, Write};
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::bridge::{ChannelId, CompletionBridge};
use crate::console::ConsoleError;
use crate::signal::BinarySignal;
use crate::transport::Transport;

/// Marks the received slot as holding a character.
const RX_VALID: u16 = 0x100;

/// [`Transport`] backed by a reader thread and a writer thread.
pub struct HostTransport {
    arm: Sender<()>,
    outbound: Sender<Vec<u8>>,
    received: Arc<AtomicU16>,
    closed: Arc<AtomicBool>,
}

impl HostTransport {
    /// Spawn the I/O threads. Completions are reported on `bridge`'s channel.
    pub fn spawn<R, W>(
        reader: R,
        writer: W,
        bridge: &'static CompletionBridge<BinarySignal>,
    ) -> io::Result<Self>
    where
        R: Read + Send + 'static,
        W: Write + Send + 'static,
    {
        let channel = bridge.channel();
        let (arm, arm_rx) = mpsc::channel();
        let (outbound, outbound_rx) = mpsc::channel();
        let received = Arc::new(AtomicU16::new(0));
        let closed = Arc::new(AtomicBool::new(false));

        {
            let received = Arc::clone(&received);
            let closed = Arc::clone(&closed);
            thread::Builder::new()
                .name("console-rx".into())
                .spawn(move || receive_loop(reader, &arm_rx, &received, &closed, bridge, channel))?;
        }

        thread::Builder::new()
            .name("console-tx".into())
            .spawn(move || transmit_loop(writer, &outbound_rx, bridge, channel))?;

        Ok(Self {
            arm,
            outbound,
            received,
            closed,
        })
    }

    /// Whether the reader hit end of input or an I/O error.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Transport for HostTransport {
    fn start_receive(&mut self) -> Result<(), ConsoleError> {
        if self.is_closed() {
            return Err(ConsoleError::Transport);
        }
        self.arm.send(()).map_err(|_| ConsoleError::Transport)
    }

    fn take_received(&mut self) -> Option<u8> {
        let slot = self.received.swap(0, Ordering::AcqRel);
        ((slot & RX_VALID) != 0).then_some(slot as u8)
    }

    fn start_transmit(&mut self, bytes: &[u8]) -> Result<(), ConsoleError> {
        self.outbound
            .send(bytes.to_vec())
            .map_err(|_| ConsoleError::Transport)
    }
}

fn receive_loop<R: Read>(
    mut reader: R,
    arm: &Receiver<()>,
    slot: &AtomicU16,
    closed: &AtomicBool,
    bridge: &CompletionBridge<BinarySignal>,
    channel: ChannelId,
) {
    let mut byte = [0u8; 1];

    while arm.recv().is_ok() {
        loop {
            match reader.read(&mut byte) {
                Ok(1) => {
                    slot.store(RX_VALID | u16::from(byte[0]), Ordering::Release);
                    break;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Ok(_) | Err(_) => {
                    // End of input: wake the worker with nothing to read.
                    closed.store(true, Ordering::Release);
                    bridge.notify_receive_complete(channel);
                    return;
                }
            }
        }
        bridge.notify_receive_complete(channel);
    }
}

fn transmit_loop<W: Write>(
    mut writer: W,
    outbound: &Receiver<Vec<u8>>,
    bridge: &CompletionBridge<BinarySignal>,
    channel: ChannelId,
) {
    for chunk in outbound {
        if writer.write_all(&chunk).and_then(|()| writer.flush()).is_err() {
            // Leave the worker to time out; nothing was delivered.
            continue;
        }
        bridge.notify_transmit_complete(channel);
    }
}
