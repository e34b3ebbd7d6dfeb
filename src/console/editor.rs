//! Line editor
//!
//! Turns received characters into a line, one character per call. Every
//! accepted or edited character is echoed through the transmitter as part
//! of the same call.
//!
//! ```text
//! input          condition                         event
//! ─────          ─────────                         ─────
//! CR / LF        other terminator just before      Ignored (pair swallowed)
//! CR / LF        otherwise                         LineReady(Fresh | Repeat)
//! BS / DEL       any                               Continue (erase if len > 0)
//! ' '..='~'      any                               Continue (drop if full)
//! other control  any                               Ignored
//! ```

use super::line_buffer::LineBuffer;
use super::transmitter::Transmit;
use crate::config::{EraseEcho, INPUT_CAPACITY};

/// Backspace.
pub const ASCII_BS: u8 = 0x08;
/// Delete, treated as backspace.
pub const ASCII_DEL: u8 = 0x7F;
pub const ASCII_CR: u8 = b'\r';
pub const ASCII_LF: u8 = b'\n';

const ERASE_SEQUENCE: &[u8] = b"\x08 \x08";

/// How a completed line is to be dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submit {
    /// The line holds a new command.
    Fresh,
    /// The line is empty: run the previous command again.
    Repeat,
}

/// Outcome of feeding one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineEvent {
    /// Character consumed (or harmlessly dropped); keep reading.
    Continue,
    /// A terminator completed the line.
    LineReady(Submit),
    /// Character had no effect on the line.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CharClass {
    Terminator(u8),
    Erase,
    Printable,
    Control,
}

impl CharClass {
    fn of(byte: u8) -> Self {
        match byte {
            ASCII_CR | ASCII_LF => Self::Terminator(byte),
            ASCII_BS | ASCII_DEL => Self::Erase,
            b' '..=b'~' => Self::Printable,
            _ => Self::Control,
        }
    }
}

/// Input line plus the editing state machine around it.
pub struct LineEditor<const N: usize = INPUT_CAPACITY> {
    line: LineBuffer<N>,
    /// Terminator that ended the previous line, while it can still pair.
    last_terminator: Option<u8>,
    erase_echo: EraseEcho,
    overflowed: bool,
}

impl<const N: usize> LineEditor<N> {
    pub const fn new(erase_echo: EraseEcho) -> Self {
        Self {
            line: LineBuffer::new(),
            last_terminator: None,
            erase_echo,
            overflowed: false,
        }
    }

    /// Feed one received character, echoing it through `tx` if accepted.
    pub fn feed(&mut self, byte: u8, tx: &mut impl Transmit) -> LineEvent {
        match CharClass::of(byte) {
            CharClass::Terminator(t) => {
                if self.last_terminator.is_some_and(|prev| prev != t) {
                    // Second half of CRLF / LFCR
                    self.last_terminator = None;
                    return LineEvent::Ignored;
                }
                self.last_terminator = Some(t);
                tx.send_and_wait(&[byte]);

                if self.line.is_empty() {
                    LineEvent::LineReady(Submit::Repeat)
                } else {
                    LineEvent::LineReady(Submit::Fresh)
                }
            }
            CharClass::Erase => {
                self.last_terminator = None;
                if self.line.backspace() {
                    match self.erase_echo {
                        EraseEcho::Verbatim => tx.send_and_wait(&[byte]),
                        EraseEcho::Destructive => tx.send_and_wait(ERASE_SEQUENCE),
                    };
                }
                LineEvent::Continue
            }
            CharClass::Printable => {
                self.last_terminator = None;
                if self.line.push(byte) {
                    tx.send_and_wait(&[byte]);
                } else {
                    self.overflowed = true;
                }
                LineEvent::Continue
            }
            CharClass::Control => LineEvent::Ignored,
        }
    }

    /// Line being edited.
    pub fn line(&self) -> &LineBuffer<N> {
        &self.line
    }

    /// Line being edited, for the dispatch loop.
    pub fn line_mut(&mut self) -> &mut LineBuffer<N> {
        &mut self.line
    }

    /// Whether a character was dropped for lack of space since the last
    /// call. Clears the flag.
    pub fn take_overflow(&mut self) -> bool {
        core::mem::take(&mut self.overflowed)
    }
}

impl<const N: usize> Default for LineEditor<N> {
    fn default() -> Self {
        Self::new(EraseEcho::Verbatim)
    }
}
