//! Console worker: the one task that owns the line state
//!
//! ```text
//!            ┌──────────────┐  LineReady   ┌────────────────┐
//!  start ──▶ │ AwaitingChar │ ───────────▶ │ ProcessingLine │
//!            │ (Rx armed,   │ ◀─────────── │ (dispatch +    │
//!            │  waits)      │   trailer    │  trailer)      │
//!            └──────────────┘              └────────────────┘
//! ```
//!
//! The worker blocks in exactly two places: on the Rx signal (forever) and
//! on the Tx signal (bounded, inside the paced transmitter).

use super::dispatch::{DispatchReport, Dispatcher, Interpreter};
use super::editor::{LineEditor, LineEvent};
use super::line_buffer::LineBuffer;
use super::transmitter::{PacedTransmitter, SendOutcome, Transmit};
use crate::bridge::CompletionBridge;
use crate::config::{ConsoleConfig, INPUT_CAPACITY, NEWLINE, OUTPUT_BUFFER_SIZE, VERSION};
use crate::log_globals::CONSOLE_LOG;
use crate::signal::CompletionSignal;
use crate::stats::ConsoleStats;
use crate::transport::Transport;
use crate::{console_debug, console_error, console_info};

/// Where the worker is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
    /// A receive is armed (or about to be) and the worker waits for it.
    AwaitingChar,
    /// A completed line is being dispatched.
    ProcessingLine,
}

/// Serial command console.
pub struct Console<'a, T, S, I, const N: usize = INPUT_CAPACITY, const M: usize = OUTPUT_BUFFER_SIZE>
{
    transport: T,
    bridge: &'a CompletionBridge<S>,
    editor: LineEditor<N>,
    dispatcher: Dispatcher<I, N, M>,
    config: ConsoleConfig,
    stats: &'a ConsoleStats,
    state: WorkerState,
}

impl<'a, T, S, I, const N: usize, const M: usize> Console<'a, T, S, I, N, M>
where
    T: Transport,
    S: CompletionSignal,
    I: Interpreter,
{
    /// Create console. Nothing is sent until [`start`](Self::start).
    pub fn new(
        transport: T,
        bridge: &'a CompletionBridge<S>,
        interpreter: I,
        config: ConsoleConfig,
        stats: &'a ConsoleStats,
    ) -> Self {
        Self {
            transport,
            bridge,
            editor: LineEditor::new(config.erase_echo),
            dispatcher: Dispatcher::new(interpreter),
            config,
            stats,
            state: WorkerState::AwaitingChar,
        }
    }

    /// Send the welcome banner.
    pub fn start(&mut self) -> SendOutcome {
        console_info!(CONSOLE_LOG, (self.config.clock)(), "{} started", VERSION);
        let welcome = self.config.welcome;
        self.transmitter().send_and_wait(welcome.as_bytes())
    }

    /// Banner, then serve forever.
    pub fn run(&mut self) -> ! {
        self.start();
        loop {
            self.poll();
        }
    }

    /// One worker step: arm a receive, wait for it, feed the character.
    ///
    /// Returns `None` if no character was delivered (receive could not be
    /// armed, or the completion carried no data).
    pub fn poll(&mut self) -> Option<LineEvent> {
        self.state = WorkerState::AwaitingChar;

        if let Err(err) = self.transport.start_receive() {
            self.stats.record_rx_failure();
            console_error!(CONSOLE_LOG, (self.config.clock)(), "rx: receive not armed: {}", err);
            self.bridge.wait_receive_for(self.config.rx_retry_delay);
            return None;
        }

        self.bridge.wait_receive();
        let byte = self.transport.take_received()?;
        Some(self.process_byte(byte))
    }

    /// Feed one received character; dispatches the line when it completes.
    pub fn process_byte(&mut self, byte: u8) -> LineEvent {
        self.stats.record_char();
        let clock = self.config.clock;
        let mut tx = PacedTransmitter::new(
            &mut self.transport,
            self.bridge,
            self.config.tx_timeout,
            self.stats,
            clock,
        );

        let event = self.editor.feed(byte, &mut tx);
        if self.editor.take_overflow() {
            self.stats.record_dropped_char();
            console_debug!(CONSOLE_LOG, clock(), "input line full, dropped {:#04x}", byte);
        }

        if let LineEvent::LineReady(submit) = event {
            self.state = WorkerState::ProcessingLine;

            tx.send_and_wait(NEWLINE.as_bytes());
            let report = self
                .dispatcher
                .dispatch(self.editor.line_mut(), submit, self.stats, &mut tx);
            tx.send_and_wait(self.config.end_of_output.as_bytes());

            self.record(report);
            self.state = WorkerState::AwaitingChar;
        }

        event
    }

    fn record(&self, report: DispatchReport) {
        self.stats
            .record_dispatch(report.repeated, report.chunks, report.truncated);

        let clock = self.config.clock;
        console_info!(
            CONSOLE_LOG,
            clock(),
            "dispatched '{}'{} in {} chunk(s)",
            self.dispatcher.last_command().as_str(),
            if report.repeated { " (repeat)" } else { "" },
            report.chunks
        );
        if report.truncated > 0 {
            console_debug!(CONSOLE_LOG, clock(), "{} chunk(s) truncated", report.truncated);
        }
    }

    fn transmitter(&mut self) -> PacedTransmitter<'_, T, S> {
        PacedTransmitter::new(
            &mut self.transport,
            self.bridge,
            self.config.tx_timeout,
            self.stats,
            self.config.clock,
        )
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Line currently being typed.
    pub fn input_line(&self) -> &LineBuffer<N> {
        self.editor.line()
    }

    /// Most recently dispatched line.
    pub fn last_command(&self) -> &LineBuffer<N> {
        self.dispatcher.last_command()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn interpreter(&self) -> &I {
        self.dispatcher.interpreter()
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn stats(&self) -> &'a ConsoleStats {
        self.stats
    }
}
