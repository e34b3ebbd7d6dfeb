//! Command handlers

use core::fmt::Write;

use super::dispatch::Flow;
use super::output::OutputBuffer;
use super::registry::{CommandEntry, Invocation, ParamCount};
use crate::log_globals::CONSOLE_LOG;
use crate::logging::LogLevel;

/// Always registered, always first.
pub const HELP: CommandEntry = CommandEntry::new(
    "help",
    "Lists all the registered commands",
    cmd_help,
    ParamCount::Exact(0),
);

/// Commands added by `CommandRegistry::with_builtins`.
pub static BUILTINS: &[CommandEntry] = &[
    CommandEntry::new(
        "echo-3-parameters",
        "echo-3-parameters <param1> <param2> <param3>\r\n Expects three parameters, echoes each in turn",
        cmd_echo_three,
        ParamCount::Exact(3),
    ),
    CommandEntry::new(
        "echo-parameters",
        "echo-parameters <...>\r\n Takes any number of parameters, echoes each in turn",
        cmd_echo_all,
        ParamCount::Variable,
    ),
    CommandEntry::new(
        "stats",
        "Displays console counters",
        cmd_stats,
        ParamCount::Exact(0),
    ),
    CommandEntry::new(
        "log-level",
        "log-level <error|warn|info|debug|trace>\r\n Sets the most verbose console log level",
        cmd_log_level,
        ParamCount::Exact(1),
    ),
];

// --- Command Implementations ---

/// One registered command per chunk.
fn cmd_help(inv: &Invocation<'_>, out: &mut OutputBuffer<'_>) -> Flow {
    let index = inv.cursor().position() as usize;
    let mut commands = inv.commands().skip(index);

    if let Some(c) = commands.next() {
        let _ = write!(out, "\r\n{}:\r\n {}\r\n", c.name, c.help);
    }

    if commands.next().is_some() {
        Flow::More(inv.cursor().next())
    } else {
        Flow::Done
    }
}

/// Header, then parameters 1..=3 one per chunk.
fn cmd_echo_three(inv: &Invocation<'_>, out: &mut OutputBuffer<'_>) -> Flow {
    let cursor = inv.cursor();
    if cursor.is_start() {
        let _ = out.write_str("The three parameters were:\r\n");
        return Flow::More(cursor.next());
    }

    let n = cursor.position() as usize;
    let Some(param) = inv.parameter(n) else {
        // The registry checked the count before the first call.
        panic!("echo-3-parameters: parameter {} missing from {:?}", n, inv.line());
    };
    let _ = write!(out, "{}: {}\r\n", n, param);

    if n == 3 {
        Flow::Done
    } else {
        Flow::More(cursor.next())
    }
}

/// Header, one parameter per chunk, then an empty closing chunk.
fn cmd_echo_all(inv: &Invocation<'_>, out: &mut OutputBuffer<'_>) -> Flow {
    let cursor = inv.cursor();
    if cursor.is_start() {
        let _ = out.write_str("The parameters were:\r\n");
        return Flow::More(cursor.next());
    }

    let n = cursor.position() as usize;
    match inv.parameter(n) {
        Some(param) => {
            let _ = write!(out, "{}: {}\r\n", n, param);
            Flow::More(cursor.next())
        }
        None => Flow::Done,
    }
}

/// Header, then one counter per chunk.
fn cmd_stats(inv: &Invocation<'_>, out: &mut OutputBuffer<'_>) -> Flow {
    let cursor = inv.cursor();
    if cursor.is_start() {
        let _ = out.write_str("Counter            Value\r\n************************\r\n");
        return Flow::More(cursor.next());
    }

    let s = inv.stats();
    let rows: [(&str, u32); 10] = [
        ("chars received", s.chars_received),
        ("chars dropped", s.chars_dropped),
        ("lines dispatched", s.lines_dispatched),
        ("repeats", s.repeats),
        ("chunks sent", s.chunks_sent),
        ("chunks truncated", s.chunks_truncated),
        ("tx timeouts", s.tx_timeouts),
        ("tx failures", s.tx_failures),
        ("rx failures", s.rx_failures),
        ("log dropped", CONSOLE_LOG.dropped_total()),
    ];

    let row = cursor.position() as usize - 1;
    if let Some((name, value)) = rows.get(row) {
        let _ = write!(out, "{:<18} {}\r\n", name, value);
    }

    if row + 1 < rows.len() {
        Flow::More(cursor.next())
    } else {
        Flow::Done
    }
}

fn cmd_log_level(inv: &Invocation<'_>, out: &mut OutputBuffer<'_>) -> Flow {
    let Some(name) = inv.parameter(1) else {
        panic!("log-level: parameter missing from {:?}", inv.line());
    };

    match LogLevel::parse(name) {
        Some(level) => {
            CONSOLE_LOG.set_max_level(level);
            let _ = write!(out, "log level={}\r\n", level.as_str());
        }
        None => {
            let _ = write!(out, "unknown log level '{}'\r\n", name);
        }
    }
    Flow::Done
}
