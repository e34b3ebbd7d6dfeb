//! Line buffer tests

use serial_command_console::config::INPUT_CAPACITY;
use serial_command_console::console::line_buffer::LineBuffer;

#[test]
fn test_line_buffer_push() {
    let mut buf: LineBuffer = LineBuffer::new();

    assert!(buf.push(b'h'));
    assert!(buf.push(b'e'));
    assert!(buf.push(b'l'));
    assert!(buf.push(b'p'));

    assert_eq!(buf.as_str(), "help");
    assert_eq!(buf.len(), 4);
}

#[test]
fn test_line_buffer_backspace() {
    let mut buf: LineBuffer = LineBuffer::new();
    buf.set("help");

    assert!(buf.backspace());
    assert!(buf.backspace());

    assert_eq!(buf.as_str(), "he");
    // Erased positions are zeroed
    assert_eq!(&buf.raw()[..4], b"he\0\0");
}

#[test]
fn test_line_buffer_backspace_empty() {
    let mut buf: LineBuffer = LineBuffer::new();

    assert!(!buf.backspace()); // should not panic
    assert_eq!(buf.as_str(), "");
    assert_eq!(buf.len(), 0);
}

#[test]
fn test_line_buffer_clear() {
    let mut buf: LineBuffer = LineBuffer::new();
    buf.set("echo-parameters a b");
    buf.clear();

    assert_eq!(buf.as_str(), "");
    assert!(buf.is_empty());
    assert!(buf.raw().iter().all(|&b| b == 0));
}

#[test]
fn test_line_buffer_set_from_str() {
    let mut buf: LineBuffer = LineBuffer::new();

    buf.set("echo-3-parameters a b c");
    assert_eq!(buf.as_str(), "echo-3-parameters a b c");

    buf.set("help");
    assert_eq!(buf.as_str(), "help");
    assert_eq!(buf.raw()[4], 0);
}

#[test]
fn test_line_buffer_overflow() {
    let mut buf: LineBuffer = LineBuffer::new();

    // One more than fits
    for i in 0..=INPUT_CAPACITY {
        buf.push(b'a' + (i % 26) as u8);
    }

    assert_eq!(buf.len(), INPUT_CAPACITY);
    assert!(buf.is_full());
    assert!(!buf.push(b'z'));
    assert_eq!(buf.as_bytes()[INPUT_CAPACITY - 1], b'a' + ((INPUT_CAPACITY - 1) % 26) as u8);
}

#[test]
fn test_line_buffer_copy_from() {
    let mut last = LineBuffer::<8>::new();
    let mut input = LineBuffer::<8>::new();
    input.set("stats");

    last.copy_from(&input);
    input.clear();

    assert_eq!(last.as_str(), "stats");
    assert!(input.is_empty());
    assert_eq!(last.capacity(), 8);
}
