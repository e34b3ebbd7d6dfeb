//! Log output.
//!
//! Drains a [`LogStream`] into any byte sink. The binary points it at
//! stderr so log text never mixes with the console's own serial stream.

use std::io::{self, Write};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::logging::{LogEntry, LogStream};

/// Idle sleep between drain passes.
const IDLE_DELAY: Duration = Duration::from_millis(10);

/// How often dropped-message counts are reported.
const DROPPED_REPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Format log entry to string.
///
/// Format: `[timestamp_us] LEVEL: message\n`
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    crate::logging::format_to_buffer(
        buf,
        format_args!(
            "[{:10}] {}: {}\n",
            entry.timestamp_us,
            entry.level.as_str(),
            entry.message()
        ),
    )
}

/// Write every pending entry of `stream` to `out`.
///
/// Returns the number of entries written.
pub fn drain_into<const N: usize, W: Write>(stream: &LogStream<N>, out: &mut W) -> io::Result<usize> {
    let mut format_buf = [0u8; 160];
    let mut written = 0;

    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, &mut format_buf);
        out.write_all(&format_buf[..len])?;
        written += 1;
    }

    if written > 0 {
        out.flush()?;
    }
    Ok(written)
}

/// Report and reset the dropped counter, if anything was dropped.
pub fn report_dropped<const N: usize, W: Write>(stream: &LogStream<N>, out: &mut W) -> io::Result<()> {
    let dropped = stream.take_dropped();
    if dropped > 0 {
        writeln!(out, "[WARN] Dropped: {}", dropped)?;
    }
    Ok(())
}

/// Log drain task.
///
/// Runs until `out` fails.
pub fn spawn<W>(stream: &'static LogStream, mut out: W) -> io::Result<JoinHandle<()>>
where
    W: Write + Send + 'static,
{
    thread::Builder::new()
        .name("console-log".into())
        .spawn(move || {
            let mut last_dropped_report = Instant::now();

            loop {
                let work_done = match drain_into(stream, &mut out) {
                    Ok(n) => n > 0,
                    Err(_) => return,
                };

                if last_dropped_report.elapsed() >= DROPPED_REPORT_INTERVAL {
                    if report_dropped(stream, &mut out).is_err() {
                        return;
                    }
                    last_dropped_report = Instant::now();
                }

                // If no work, wait before checking again
                if !work_done {
                    thread::sleep(IDLE_DELAY);
                }
            }
        })
}
