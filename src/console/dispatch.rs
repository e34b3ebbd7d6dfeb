//! Command dispatch loop
//!
//! Runs one completed line through the interpreter until it reports no
//! more output, sending each chunk before asking for the next one. Owns
//! the two buffers that outlive a single line: the last dispatched command
//! and the shared output buffer.

use super::editor::Submit;
use super::line_buffer::LineBuffer;
use super::output::OutputBuffer;
use super::transmitter::Transmit;
use crate::config::{INPUT_CAPACITY, OUTPUT_BUFFER_SIZE};
use crate::stats::ConsoleStats;

/// Continuation state of a multi-chunk command.
///
/// Starts at [`Cursor::START`] for every dispatched line; whatever the
/// interpreter returns with [`Flow::More`] comes back on the next call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor(u32);

impl Cursor {
    /// First call for a line.
    pub const START: Self = Self(0);

    pub const fn new(position: u32) -> Self {
        Self(position)
    }

    pub const fn position(self) -> u32 {
        self.0
    }

    pub const fn is_start(self) -> bool {
        self.0 == 0
    }

    /// Cursor one step further on.
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Whether the interpreter has more output for the current line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Call again with this cursor.
    More(Cursor),
    /// Response complete.
    Done,
}

/// Pluggable command interpreter.
pub trait Interpreter {
    /// Produce the chunk of `line`'s response selected by `cursor` into
    /// `out` (which starts empty). `stats` are the counters of the console
    /// running the line.
    fn interpret(
        &mut self,
        line: &str,
        cursor: Cursor,
        stats: &ConsoleStats,
        out: &mut OutputBuffer<'_>,
    ) -> Flow;
}

/// What one dispatch did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Interpreter calls, one chunk each (empty chunks included).
    pub chunks: u32,
    /// Chunks that did not fit the output buffer.
    pub truncated: u32,
    /// Line was the previous command replayed.
    pub repeated: bool,
}

/// Dispatch loop state: interpreter, last command, output buffer.
pub struct Dispatcher<I, const N: usize = INPUT_CAPACITY, const M: usize = OUTPUT_BUFFER_SIZE> {
    interpreter: I,
    last: LineBuffer<N>,
    output: [u8; M],
}

impl<I: Interpreter, const N: usize, const M: usize> Dispatcher<I, N, M> {
    pub const fn new(interpreter: I) -> Self {
        Self {
            interpreter,
            last: LineBuffer::new(),
            output: [0u8; M],
        }
    }

    /// Run `input` (or, for a repeat, the last command) to completion.
    ///
    /// Afterwards the dispatched line is the last command and `input` is
    /// cleared.
    pub fn dispatch(
        &mut self,
        input: &mut LineBuffer<N>,
        submit: Submit,
        stats: &ConsoleStats,
        tx: &mut impl Transmit,
    ) -> DispatchReport {
        let repeated = submit == Submit::Repeat;
        if repeated {
            input.copy_from(&self.last);
        }

        let mut report = DispatchReport {
            repeated,
            ..DispatchReport::default()
        };
        let mut cursor = Cursor::START;

        loop {
            let mut out = OutputBuffer::new(&mut self.output);
            let flow = self.interpreter.interpret(input.as_str(), cursor, stats, &mut out);

            report.chunks += 1;
            if out.is_truncated() {
                report.truncated += 1;
            }
            tx.send_and_wait(out.as_bytes());

            match flow {
                Flow::More(next) => cursor = next,
                Flow::Done => break,
            }
        }

        self.last.copy_from(input);
        input.clear();
        report
    }

    /// Most recently dispatched line.
    pub fn last_command(&self) -> &LineBuffer<N> {
        &self.last
    }

    pub fn interpreter(&self) -> &I {
        &self.interpreter
    }
}
