//! Command registry and built-in command tests

use core::fmt::Write;

use serial_command_console::config::OUTPUT_BUFFER_SIZE;
use serial_command_console::console::{
    CommandRegistry, ConsoleError, Cursor, Flow, Interpreter, Invocation, OutputBuffer, ParamCount,
};
use serial_command_console::ConsoleStats;

/// Run `line` to completion, one string per chunk.
fn run<I: Interpreter>(interpreter: &mut I, line: &str) -> Vec<String> {
    run_with(interpreter, line, &ConsoleStats::new())
}

fn run_with<I: Interpreter>(interpreter: &mut I, line: &str, stats: &ConsoleStats) -> Vec<String> {
    let mut storage = [0u8; OUTPUT_BUFFER_SIZE];
    let mut chunks = Vec::new();
    let mut cursor = Cursor::START;

    loop {
        let mut out = OutputBuffer::new(&mut storage);
        let flow = interpreter.interpret(line, cursor, stats, &mut out);
        chunks.push(out.as_str().to_string());
        match flow {
            Flow::More(next) => cursor = next,
            Flow::Done => return chunks,
        }
    }
}

fn cmd_ping(_inv: &Invocation<'_>, out: &mut OutputBuffer<'_>) -> Flow {
    let _ = out.write_str("pong\r\n");
    Flow::Done
}

fn cmd_count(inv: &Invocation<'_>, out: &mut OutputBuffer<'_>) -> Flow {
    let limit: u32 = inv.parameter(1).and_then(|p| p.parse().ok()).unwrap_or(0);
    let n = inv.cursor().position();
    let _ = write!(out, "{}", n);
    if n < limit {
        Flow::More(inv.cursor().next())
    } else {
        Flow::Done
    }
}

#[test]
fn test_help_always_first() {
    let registry: CommandRegistry = CommandRegistry::new();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.names().next(), Some("help"));

    let registry: CommandRegistry = CommandRegistry::with_builtins().unwrap();
    let names: Vec<_> = registry.names().collect();
    assert_eq!(
        names,
        ["help", "echo-3-parameters", "echo-parameters", "stats", "log-level"]
    );
}

#[test]
fn test_register_and_find() {
    let mut registry: CommandRegistry = CommandRegistry::new();
    registry
        .register("ping", "ping:\r\n Replies pong", cmd_ping, ParamCount::Exact(0))
        .unwrap();

    let entry = registry.find("ping").unwrap();
    assert_eq!(entry.params, ParamCount::Exact(0));
    assert!(registry.find("pin").is_none());
    assert!(registry.find("pingx").is_none());
}

#[test]
fn test_register_rejects_duplicate() {
    let mut registry: CommandRegistry = CommandRegistry::new();
    registry.register("ping", "", cmd_ping, ParamCount::Exact(0)).unwrap();

    assert_eq!(
        registry.register("ping", "", cmd_ping, ParamCount::Variable),
        Err(ConsoleError::DuplicateCommand)
    );
    assert_eq!(
        registry.register("help", "", cmd_ping, ParamCount::Exact(0)),
        Err(ConsoleError::DuplicateCommand)
    );
}

#[test]
fn test_register_rejects_invalid_name() {
    let mut registry: CommandRegistry = CommandRegistry::new();

    for name in ["", "two words", "tab\there"] {
        assert_eq!(
            registry.register(name, "", cmd_ping, ParamCount::Exact(0)),
            Err(ConsoleError::InvalidName),
            "name {:?}",
            name
        );
    }
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_register_when_full() {
    let mut registry = CommandRegistry::<2>::new();
    registry.register("ping", "", cmd_ping, ParamCount::Exact(0)).unwrap();

    assert_eq!(
        registry.register("count", "", cmd_count, ParamCount::Exact(1)),
        Err(ConsoleError::RegistryFull)
    );
}

#[test]
fn test_param_count_accepts() {
    assert!(ParamCount::Variable.accepts(0));
    assert!(ParamCount::Variable.accepts(7));
    assert!(ParamCount::Exact(2).accepts(2));
    assert!(!ParamCount::Exact(2).accepts(1));
}

#[test]
fn test_unknown_command_message() {
    let mut registry: CommandRegistry = CommandRegistry::new();

    let chunks = run(&mut registry, "foobar 1 2");
    assert_eq!(
        chunks,
        ["E01: command not recognised.  Enter 'help' to view a list of available commands.\r\n\r\n"]
    );
}

#[test]
fn test_incorrect_parameter_count() {
    let mut registry: CommandRegistry = CommandRegistry::with_builtins().unwrap();

    let chunks = run(&mut registry, "echo-3-parameters a b");
    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].starts_with("E02: incorrect command parameter(s)."));

    let chunks = run(&mut registry, "help me");
    assert!(chunks[0].starts_with("E02"));
}

#[test]
fn test_blank_line_produces_nothing() {
    let mut registry: CommandRegistry = CommandRegistry::with_builtins().unwrap();

    assert_eq!(run(&mut registry, ""), [""]);
    assert_eq!(run(&mut registry, "   "), [""]);
}

#[test]
fn test_multi_chunk_handler() {
    let mut registry: CommandRegistry = CommandRegistry::new();
    registry.register("count", "", cmd_count, ParamCount::Exact(1)).unwrap();

    assert_eq!(run(&mut registry, "count 3"), ["0", "1", "2", "3"]);
    // Cursor restarts for every line
    assert_eq!(run(&mut registry, "count 1"), ["0", "1"]);
}

#[test]
fn test_continuation_after_done_is_done() {
    let mut registry: CommandRegistry = CommandRegistry::new();
    registry.register("ping", "", cmd_ping, ParamCount::Exact(0)).unwrap();
    run(&mut registry, "ping");

    let mut storage = [0u8; 16];
    let mut out = OutputBuffer::new(&mut storage);
    assert_eq!(registry.interpret("ping", Cursor::new(4), &ConsoleStats::new(), &mut out), Flow::Done);
    assert!(out.is_empty());
}

#[test]
fn test_help_lists_one_command_per_chunk() {
    let mut registry: CommandRegistry = CommandRegistry::with_builtins().unwrap();

    let chunks = run(&mut registry, "help");
    assert_eq!(chunks.len(), registry.len());
    assert_eq!(chunks[0], "\r\nhelp:\r\n Lists all the registered commands\r\n");
    assert!(chunks[1].starts_with("\r\necho-3-parameters:\r\n"));
    assert!(chunks.last().unwrap().starts_with("\r\nlog-level:\r\n"));
}

#[test]
fn test_echo_three_parameters() {
    let mut registry: CommandRegistry = CommandRegistry::with_builtins().unwrap();

    let chunks = run(&mut registry, "echo-3-parameters one two three");
    assert_eq!(
        chunks,
        [
            "The three parameters were:\r\n",
            "1: one\r\n",
            "2: two\r\n",
            "3: three\r\n"
        ]
    );
}

#[test]
fn test_echo_parameters() {
    let mut registry: CommandRegistry = CommandRegistry::with_builtins().unwrap();

    let chunks = run(&mut registry, "echo-parameters a b");
    assert_eq!(chunks, ["The parameters were:\r\n", "1: a\r\n", "2: b\r\n", ""]);

    let chunks = run(&mut registry, "echo-parameters");
    assert_eq!(chunks, ["The parameters were:\r\n", ""]);
}

#[test]
fn test_stats_one_row_per_chunk() {
    let mut registry: CommandRegistry = CommandRegistry::with_builtins().unwrap();

    let chunks = run(&mut registry, "stats");
    assert_eq!(chunks.len(), 11);
    assert!(chunks[0].starts_with("Counter"));
    assert!(chunks[1].starts_with("chars received"));
    assert!(chunks[10].starts_with("log dropped"));
    assert!(chunks[1..].iter().all(|row| row.ends_with("\r\n")));
}

#[test]
fn test_log_level_rejects_unknown_level() {
    let mut registry: CommandRegistry = CommandRegistry::with_builtins().unwrap();

    let chunks = run(&mut registry, "log-level loud");
    assert_eq!(chunks, ["unknown log level 'loud'\r\n"]);
}

#[test]
fn test_log_level_sets_stream_level() {
    use serial_command_console::logging::LogLevel;
    use serial_command_console::CONSOLE_LOG;

    let mut registry: CommandRegistry = CommandRegistry::with_builtins().unwrap();

    let chunks = run(&mut registry, "log-level debug");
    assert_eq!(chunks, ["log level=DEBUG\r\n"]);
    assert_eq!(CONSOLE_LOG.max_level(), LogLevel::Debug);
    assert!(CONSOLE_LOG.enabled(LogLevel::Debug));
    assert!(!CONSOLE_LOG.enabled(LogLevel::Trace));
}

#[test]
fn test_echo_parameters_single_word_repeatable() {
    let mut registry: CommandRegistry = CommandRegistry::with_builtins().unwrap();

    let first = run(&mut registry, "echo-parameters ab");
    let second = run(&mut registry, "echo-parameters ab");

    assert_eq!(first, ["The parameters were:\r\n", "1: ab\r\n", ""]);
    assert_eq!(first, second);
}

#[test]
fn test_stats_reads_given_counters() {
    let mut registry: CommandRegistry = CommandRegistry::with_builtins().unwrap();
    let stats = ConsoleStats::new();
    stats.record_dispatch(false, 1, 0);
    stats.record_dispatch(true, 2, 1);
    stats.record_tx_timeout();

    let chunks = run_with(&mut registry, "stats", &stats);

    assert!(chunks.contains(&"lines dispatched   2\r\n".to_string()));
    assert!(chunks.contains(&"repeats            1\r\n".to_string()));
    assert!(chunks.contains(&"chunks truncated   1\r\n".to_string()));
    assert!(chunks.contains(&"tx timeouts        1\r\n".to_string()));
}
