//! Parser tests for console command line parsing

use serial_command_console::console::parser::{command_name, parameter, parameter_count};

#[test]
fn test_command_name() {
    assert_eq!(command_name("help"), "help");
    assert_eq!(command_name("echo-parameters a b"), "echo-parameters");
}

#[test]
fn test_command_name_skips_leading_spaces() {
    assert_eq!(command_name("   stats  "), "stats");
}

#[test]
fn test_command_name_blank_line() {
    assert_eq!(command_name(""), "");
    assert_eq!(command_name("    "), "");
}

#[test]
fn test_parameters_are_one_based() {
    let line = "echo-3-parameters one two three";

    assert_eq!(parameter(line, 0), None);
    assert_eq!(parameter(line, 1), Some("one"));
    assert_eq!(parameter(line, 2), Some("two"));
    assert_eq!(parameter(line, 3), Some("three"));
    assert_eq!(parameter(line, 4), None);
}

#[test]
fn test_parameter_runs_of_spaces() {
    let line = "echo-parameters   a    bcd ";

    assert_eq!(parameter(line, 1), Some("a"));
    assert_eq!(parameter(line, 2), Some("bcd"));
    assert_eq!(parameter(line, 2).map(str::len), Some(3));
    assert_eq!(parameter_count(line), 2);
}

#[test]
fn test_parameter_count() {
    assert_eq!(parameter_count("help"), 0);
    assert_eq!(parameter_count(""), 0);
    assert_eq!(parameter_count("echo-3-parameters a b c"), 3);
    assert_eq!(parameter_count("  log-level   debug  "), 1);
}
