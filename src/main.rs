//! SerialCommandConsole - Main entry point
//!
//! 1. Start the log drain (stderr)
//! 2. Start the transport I/O threads (stdin/stdout, the UART console on ESP-IDF)
//! 3. Serve commands on the main thread

use std::io;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use serial_command_console::{
    config::MAX_COMMANDS,
    host::HostTransport,
    log_drain,
    BinarySignal, ChannelId, CommandRegistry, CompletionBridge, Console, ConsoleConfig,
    CONSOLE_LOG, CONSOLE_STATS,
};

/// How long to wait for the log drain at end of input.
const FLUSH_GRACE: Duration = Duration::from_millis(200);

/// Channel id reported by the transport for the console UART.
const CONSOLE_CHANNEL: ChannelId = ChannelId(0);

// Static so the transport threads can signal it for the life of the process.
static BRIDGE: CompletionBridge<BinarySignal> =
    CompletionBridge::new(CONSOLE_CHANNEL, BinarySignal::new(), BinarySignal::new());

fn main() -> ExitCode {
    // Initialize ESP-IDF
    #[cfg(target_os = "espidf")]
    esp_idf_svc::sys::link_patches();

    let config = match ConsoleConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}; using defaults", err);
            ConsoleConfig::default()
        }
    };

    if let Err(err) = log_drain::spawn(&CONSOLE_LOG, io::stderr()) {
        eprintln!("log drain not started: {}", err);
    }

    let commands = match CommandRegistry::<MAX_COMMANDS>::with_builtins() {
        Ok(commands) => commands,
        Err(err) => {
            eprintln!("command table: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let transport = match HostTransport::spawn(io::stdin(), io::stdout(), &BRIDGE) {
        Ok(transport) => transport,
        Err(err) => {
            eprintln!("transport: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut console: Console<'_, _, _, _> =
        Console::new(transport, &BRIDGE, commands, config, &CONSOLE_STATS);

    #[cfg(target_os = "espidf")]
    console.run();

    #[cfg(not(target_os = "espidf"))]
    {
        console.start();
        while !console.transport().is_closed() {
            console.poll();
        }

        // Let the drain flush what the last command logged.
        let deadline = Instant::now() + FLUSH_GRACE;
        while CONSOLE_LOG.has_entries() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        ExitCode::SUCCESS
    }
}
