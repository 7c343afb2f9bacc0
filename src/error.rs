//! Error types and Result aliases for plainsh

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Result type alias for plainsh operations
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code reported when an external command cannot be found
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit code reported when an external command exceeds its time budget
pub const EXIT_TIMEOUT: i32 = 124;

/// Generic failure exit code
pub const EXIT_FAILURE: i32 = 1;

/// Main error type for plainsh
#[derive(Debug)]
pub enum Error {
    // === Command errors ===
    /// Command not found in PATH
    CommandNotFound {
        command: String,
    },

    /// Command could not be started
    CommandSpawnFailed {
        command: String,
        reason: String,
    },

    /// Command exceeded its time budget and was killed
    CommandTimeout {
        command: String,
        duration: Duration,
    },

    /// Empty command
    EmptyCommand,

    // === Backend usage errors ===
    /// A required operand was not supplied (`rm: missing operand`)
    MissingOperand {
        command: String,
        message: String,
    },

    /// An argument could not be interpreted
    InvalidArgument {
        command: String,
        message: String,
    },

    /// A backend operation failed; `message` is already in the command's own phrasing
    OperationFailed {
        command: String,
        message: String,
    },

    /// A filesystem target does not exist
    PathNotFound {
        command: String,
        path: String,
    },

    /// The path exists but is not a directory
    NotADirectory {
        command: String,
        path: String,
    },

    /// Access to the path was refused
    PermissionDenied {
        command: String,
        path: String,
    },

    /// Failed to send signal to process
    SignalSendFailed {
        signal: String,
        reason: String,
    },

    /// Host facility not available on this platform
    Unsupported {
        feature: String,
        platform: String,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound,

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    /// Failed to serialize configuration
    ConfigSerializationFailed {
        format: String,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    /// Regex compilation errors
    Regex(regex::Error),

    /// Errors reported by the host through `nix`
    Nix(nix::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors
    Other(String),
}

impl Error {
    /// Backend failure reported as `command: message`
    pub fn failed(command: &str, message: impl Into<String>) -> Self {
        Error::OperationFailed {
            command: command.to_string(),
            message: message.into(),
        }
    }

    /// Shell exit code that represents this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::CommandNotFound { .. } => EXIT_NOT_FOUND,
            Error::CommandTimeout { .. } => EXIT_TIMEOUT,
            _ => EXIT_FAILURE,
        }
    }

    /// Build an I/O-derived error in coreutils phrasing for `command` acting on `path`
    pub fn from_io(command: &str, path: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Error::PathNotFound {
                command: command.to_string(),
                path: path.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => Error::PermissionDenied {
                command: command.to_string(),
                path: path.to_string(),
            },
            _ => Error::Other(format!("{}: {}: {}", command, path, err)),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Command errors
            Error::CommandNotFound { command } => {
                write!(f, "Command '{}' not found", command)
            }
            Error::CommandSpawnFailed { command, reason } => {
                write!(f, "Failed to execute '{}': {}", command, reason)
            }
            Error::CommandTimeout { duration, .. } => {
                write!(f, "Command timed out after {} seconds", duration.as_secs())
            }
            Error::EmptyCommand => {
                write!(f, "Command cannot be empty")
            }

            // Backend usage errors
            Error::MissingOperand { command, message } => {
                write!(f, "{}: {}", command, message)
            }
            Error::InvalidArgument { command, message } => {
                write!(f, "{}: {}", command, message)
            }
            Error::OperationFailed { command, message } => {
                write!(f, "{}: {}", command, message)
            }
            Error::PathNotFound { command, path } => {
                write!(f, "{}: {}: No such file or directory", command, path)
            }
            Error::NotADirectory { command, path } => {
                write!(f, "{}: not a directory: {}", command, path)
            }
            Error::PermissionDenied { command, path } => {
                write!(f, "{}: {}: Permission denied", command, path)
            }
            Error::SignalSendFailed { signal, reason } => {
                write!(f, "Failed to send signal '{}': {}", signal, reason)
            }
            Error::Unsupported { feature, platform } => {
                write!(f, "{}: not supported on {}", feature, platform)
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound => {
                write!(f, "Configuration file not found")
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigSerializationFailed { format, reason } => {
                write!(f, "Failed to serialize config as {}: {}", format, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),
            Error::Regex(err) => write!(f, "Regex compilation error: {}", err),
            Error::Nix(err) => write!(f, "System error: {}", err),

            // Generic fallback
            Error::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Regex(err)
    }
}

impl From<nix::Error> for Error {
    fn from(err: nix::Error) -> Self {
        Error::Nix(err)
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
