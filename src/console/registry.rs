//! Command registry and default interpreter
//!
//! Static allocation: a fixed table of [`CommandEntry`] slots, filled at
//! startup and never modified while the console runs. `help` always
//! occupies the first slot.

use core::fmt::Write;

use super::commands;
use super::dispatch::{Cursor, Flow, Interpreter};
use super::output::OutputBuffer;
use super::parser;
use super::ConsoleError;
use crate::config::MAX_COMMANDS;
use crate::stats::{ConsoleStats, StatsSnapshot};

/// Command handler.
///
/// Called once per chunk. Must not be called for a line whose parameter
/// count the registry rejected.
pub type Handler = fn(&Invocation<'_>, &mut OutputBuffer<'_>) -> Flow;

/// Parameters a command expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamCount {
    /// Exactly this many.
    Exact(u8),
    /// Any number.
    Variable,
}

impl ParamCount {
    /// Whether a line with `count` parameters is acceptable.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exact(n) => count == usize::from(n),
            Self::Variable => true,
        }
    }
}

/// Command descriptor
#[derive(Clone, Copy)]
pub struct CommandEntry {
    pub name: &'static str,
    pub help: &'static str,
    pub handler: Handler,
    pub params: ParamCount,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        help: &'static str,
        handler: Handler,
        params: ParamCount,
    ) -> Self {
        Self {
            name,
            help,
            handler,
            params,
        }
    }
}

impl core::fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// One handler call: the line, the continuation cursor, the command table
/// and the counters of the console running it.
pub struct Invocation<'a> {
    line: &'a str,
    cursor: Cursor,
    commands: &'a [Option<CommandEntry>],
    stats: &'a ConsoleStats,
}

impl<'a> Invocation<'a> {
    pub fn new(
        line: &'a str,
        cursor: Cursor,
        commands: &'a [Option<CommandEntry>],
        stats: &'a ConsoleStats,
    ) -> Self {
        Self {
            line,
            cursor,
            commands,
            stats,
        }
    }

    /// Full command line as typed.
    pub fn line(&self) -> &'a str {
        self.line
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Parameter `index`, 1-based.
    pub fn parameter(&self, index: usize) -> Option<&'a str> {
        parser::parameter(self.line, index)
    }

    /// Current counters of the console.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Registered commands, in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &'a CommandEntry> + 'a {
        self.commands.iter().flatten()
    }
}

/// Fixed-capacity command table that interprets lines.
pub struct CommandRegistry<const N: usize = MAX_COMMANDS> {
    entries: [Option<CommandEntry>; N],
    len: usize,
    /// Command currently producing a multi-chunk response.
    active: Option<CommandEntry>,
}

impl<const N: usize> CommandRegistry<N> {
    /// Table holding only `help`.
    pub const fn new() -> Self {
        assert!(N > 0, "command table needs room for help");

        let mut entries = [None; N];
        entries[0] = Some(commands::HELP);
        Self {
            entries,
            len: 1,
            active: None,
        }
    }

    /// Table with `help` and the built-in commands.
    pub fn with_builtins() -> Result<Self, ConsoleError> {
        let mut registry = Self::new();
        for entry in commands::BUILTINS {
            registry.add(*entry)?;
        }
        Ok(registry)
    }

    /// Register a command.
    pub fn register(
        &mut self,
        name: &'static str,
        help: &'static str,
        handler: Handler,
        params: ParamCount,
    ) -> Result<(), ConsoleError> {
        self.add(CommandEntry::new(name, help, handler, params))
    }

    /// Register a prepared entry.
    pub fn add(&mut self, entry: CommandEntry) -> Result<(), ConsoleError> {
        if entry.name.is_empty() || !entry.name.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(ConsoleError::InvalidName);
        }
        if self.find(entry.name).is_some() {
            return Err(ConsoleError::DuplicateCommand);
        }
        if self.len >= N {
            return Err(ConsoleError::RegistryFull);
        }

        self.entries[self.len] = Some(entry);
        self.len += 1;
        Ok(())
    }

    /// Look up a command by exact name.
    pub fn find(&self, name: &str) -> Option<&CommandEntry> {
        self.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries[..self.len].iter().flatten()
    }

    /// Get all command names
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().map(|c| c.name)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn report(err: ConsoleError, out: &mut OutputBuffer<'_>) -> Flow {
        let _ = write!(
            out,
            "{}.  Enter 'help' to view a list of available commands.\r\n\r\n",
            err
        );
        Flow::Done
    }
}

impl<const N: usize> Default for CommandRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Interpreter for CommandRegistry<N> {
    fn interpret(
        &mut self,
        line: &str,
        cursor: Cursor,
        stats: &ConsoleStats,
        out: &mut OutputBuffer<'_>,
    ) -> Flow {
        if cursor.is_start() {
            let name = parser::command_name(line);
            if name.is_empty() {
                return Flow::Done; // Blank line, nothing to run
            }

            let Some(entry) = self.find(name).copied() else {
                return Self::report(ConsoleError::UnknownCommand, out);
            };
            if !entry.params.accepts(parser::parameter_count(line)) {
                return Self::report(ConsoleError::IncorrectParameters, out);
            }
            self.active = Some(entry);
        }

        let Some(entry) = self.active else {
            // Continuation without a start: the previous command finished.
            return Flow::Done;
        };

        let invocation = Invocation::new(line, cursor, &self.entries[..self.len], stats);
        let flow = (entry.handler)(&invocation, out);
        if flow == Flow::Done {
            self.active = None;
        }
        flow
    }
}
