//! Module: config
//!
//! Purpose: Console configuration.
//!
//! Architecture:
//! - Buffer capacities are compile-time constants (fixed static buffers)
//! - Runtime knobs live in [`ConsoleConfig`], copied into the console
//! - With `std`, knobs can be overridden from the environment
//!
//! Safety: `ConsoleConfig` is plain data, read only by the worker.

use core::time::Duration;

use crate::logging::Clock;

/// Input line capacity in characters.
pub const INPUT_CAPACITY: usize = 50;

/// Output buffer size shared by every command chunk.
pub const OUTPUT_BUFFER_SIZE: usize = 256;

/// Maximum number of registered commands.
pub const MAX_COMMANDS: usize = 16;

/// Default bound on the wait for transmit-complete.
pub const TX_TIMEOUT: Duration = Duration::from_millis(100);

/// Default back-off after the transport refuses to arm a receive.
pub const RX_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Sent once when the console starts.
pub const WELCOME_MESSAGE: &str = concat!(
    "\r\n\r\n",
    env!("VERSION_STRING"),
    " command server.\r\nType help to view a list of registered commands.\r\n\r\n>"
);

/// Sent after every command response.
pub const END_OF_OUTPUT_MESSAGE: &str =
    "\r\n[Press ENTER to execute the previous command again]\r\n>";

/// Separates the echoed input from the command output.
pub const NEWLINE: &str = "\r\n";

/// Environment variable overriding [`ConsoleConfig::tx_timeout`], in ms.
pub const ENV_TX_TIMEOUT_MS: &str = "CONSOLE_TX_TIMEOUT_MS";

/// Environment variable overriding [`ConsoleConfig::erase_echo`].
pub const ENV_ERASE_ECHO: &str = "CONSOLE_ERASE_ECHO";

/// What is echoed when backspace/delete removes a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EraseEcho {
    /// Echo the received byte unchanged.
    Verbatim,
    /// Echo `\b \b` so the erased glyph disappears from the terminal.
    Destructive,
}

impl EraseEcho {
    /// Parse `verbatim` / `destructive`, case-insensitive.
    pub fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("verbatim") {
            Some(Self::Verbatim)
        } else if name.eq_ignore_ascii_case("destructive") {
            Some(Self::Destructive)
        } else {
            None
        }
    }
}

/// Runtime console configuration.
#[derive(Clone, Copy, Debug)]
pub struct ConsoleConfig {
    /// Banner sent by `Console::start`.
    pub welcome: &'static str,
    /// Trailer sent after each command response, ends with the prompt.
    pub end_of_output: &'static str,
    /// Bound on each transmit-complete wait.
    pub tx_timeout: Duration,
    /// Back-off when arming a receive fails.
    pub rx_retry_delay: Duration,
    /// Backspace echo style.
    pub erase_echo: EraseEcho,
    /// Timestamp source for log entries.
    pub clock: Clock,
}

impl ConsoleConfig {
    pub const DEFAULT: Self = Self {
        welcome: WELCOME_MESSAGE,
        end_of_output: END_OF_OUTPUT_MESSAGE,
        tx_timeout: TX_TIMEOUT,
        rx_retry_delay: RX_RETRY_DELAY,
        erase_echo: EraseEcho::Verbatim,
        clock: default_clock(),
    };

    pub const fn with_tx_timeout(mut self, timeout: Duration) -> Self {
        self.tx_timeout = timeout;
        self
    }

    pub const fn with_rx_retry_delay(mut self, delay: Duration) -> Self {
        self.rx_retry_delay = delay;
        self
    }

    pub const fn with_erase_echo(mut self, erase_echo: EraseEcho) -> Self {
        self.erase_echo = erase_echo;
        self
    }

    pub const fn with_welcome(mut self, welcome: &'static str) -> Self {
        self.welcome = welcome;
        self
    }

    pub const fn with_end_of_output(mut self, end_of_output: &'static str) -> Self {
        self.end_of_output = end_of_output;
        self
    }

    pub const fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Defaults overridden by `CONSOLE_TX_TIMEOUT_MS` and `CONSOLE_ERASE_ECHO`.
    #[cfg(feature = "std")]
    pub fn from_env() -> Result<Self, crate::console::ConsoleError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F, V>(lookup: F) -> Result<Self, crate::console::ConsoleError>
    where
        F: Fn(&str) -> Option<V>,
        V: AsRef<str>,
    {
        use crate::console::ConsoleError;

        let mut config = Self::DEFAULT;

        if let Some(raw) = lookup(ENV_TX_TIMEOUT_MS) {
            let ms: u64 = raw
                .as_ref()
                .trim()
                .parse()
                .map_err(|_| ConsoleError::InvalidConfig)?;
            config.tx_timeout = Duration::from_millis(ms);
        }

        if let Some(raw) = lookup(ENV_ERASE_ECHO) {
            config.erase_echo =
                EraseEcho::parse(raw.as_ref().trim()).ok_or(ConsoleError::InvalidConfig)?;
        }

        Ok(config)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const fn default_clock() -> Clock {
    #[cfg(feature = "std")]
    {
        crate::logging::uptime_us
    }
    #[cfg(not(feature = "std"))]
    {
        crate::logging::zero_clock
    }
}
