//! Console error types

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: No registered command has this name
    UnknownCommand,
    /// E02: Parameter count does not match the command's declaration
    IncorrectParameters,
    /// E03: Command table has no free slot
    RegistryFull,
    /// E04: A command with this name is already registered
    DuplicateCommand,
    /// E05: Command name is empty or contains non-printable characters/spaces
    InvalidName,
    /// E06: Transport refused to start an operation
    Transport,
    /// E07: Malformed configuration value
    InvalidConfig,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::IncorrectParameters => "E02",
            Self::RegistryFull => "E03",
            Self::DuplicateCommand => "E04",
            Self::InvalidName => "E05",
            Self::Transport => "E06",
            Self::InvalidConfig => "E07",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "command not recognised",
            Self::IncorrectParameters => "incorrect command parameter(s)",
            Self::RegistryFull => "command table full",
            Self::DuplicateCommand => "command already registered",
            Self::InvalidName => "invalid command name",
            Self::Transport => "transport fault",
            Self::InvalidConfig => "invalid configuration",
        }
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConsoleError {}
