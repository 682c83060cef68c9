//! Error types for the syslog-notify daemon
//!
//! Every unrecoverable startup condition has its own variant and its own
//! process exit code, so service managers and wrapper scripts can tell a
//! missing FIFO apart from an unreachable notification server.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration value for '{key}': {value}")]
    InvalidConfigValue { key: String, value: String },

    #[error("TOML parsing error: {context}")]
    TomlParsing {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // FIFO errors
    #[error("Unable to open FIFO for read: {path}")]
    FifoOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error while clearing old messages from {path}")]
    FifoDrain {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading from FIFO {path}")]
    FifoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Notification service errors
    #[error("Unable to init notification service: {message}")]
    NotificationInit { message: String },

    #[error("Failed to show notification '{summary}': {reason}")]
    NotificationSend { summary: String, reason: String },

    // Process supervision errors
    #[error("Unable to spawn daemon process")]
    Spawn {
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to set new process session")]
    Session {
        #[source]
        source: std::io::Error,
    },

    #[error("Daemon process exited during startup with status {code}")]
    ChildExited { code: i32 },

    // I/O errors
    #[error("File I/O error for '{path}': {operation}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Generic/catch-all errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("{message}")]
    Other {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_value(key: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidConfigValue {
            key: key.into(),
            value: value.to_string(),
        }
    }

    pub fn fifo_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FifoOpen {
            path: path.into(),
            source,
        }
    }

    pub fn fifo_drain(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FifoDrain {
            path: path.into(),
            source,
        }
    }

    pub fn fifo_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FifoRead {
            path: path.into(),
            source,
        }
    }

    pub fn notification_init(message: impl Into<String>) -> Self {
        Self::NotificationInit {
            message: message.into(),
        }
    }

    pub fn notification_send(summary: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotificationSend {
            summary: summary.into(),
            reason: reason.into(),
        }
    }

    /// Create a new I/O error with source
    pub fn io_with_source(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Io {
            path: path.into(),
            operation: operation.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Process exit code for this error
    ///
    /// The FIFO, notification-init, spawn, session and drain codes (2, 3, 4,
    /// 5, 7) are stable and part of the command-line interface.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FifoOpen { .. } => 2,
            Self::NotificationInit { .. } => 3,
            Self::Spawn { .. } => 4,
            Self::Session { .. } => 5,
            Self::FifoDrain { .. } => 7,
            Self::NotificationSend { .. } | Self::FifoRead { .. } => 8,
            Self::ChildExited { code } => *code,
            Self::Config { .. }
            | Self::ConfigNotFound { .. }
            | Self::InvalidConfigValue { .. }
            | Self::TomlParsing { .. }
            | Self::Io { .. }
            | Self::Internal { .. }
            | Self::Other { .. } => 1,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. }
            | Self::ConfigNotFound { .. }
            | Self::InvalidConfigValue { .. }
            | Self::TomlParsing { .. } => "config",
            Self::FifoOpen { .. } | Self::FifoDrain { .. } | Self::FifoRead { .. } => "fifo",
            Self::NotificationInit { .. } | Self::NotificationSend { .. } => "notification",
            Self::Spawn { .. } | Self::Session { .. } | Self::ChildExited { .. } => "process",
            Self::Io { .. } => "io",
            Self::Internal { .. } | Self::Other { .. } => "internal",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let operation = match err.kind() {
            std::io::ErrorKind::NotFound => "file not found",
            std::io::ErrorKind::PermissionDenied => "permission denied",
            _ => "I/O operation",
        }
        .to_string();

        Self::Io {
            path: PathBuf::from("unknown"),
            operation,
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::TomlParsing {
            context: err.message().to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = AppError::config("test config error");
        assert_eq!(err.to_string(), "Configuration error: test config error");
    }

    #[test]
    fn test_startup_exit_codes() {
        let io = || std::io::Error::new(std::io::ErrorKind::Other, "boom");

        assert_eq!(AppError::fifo_open("/tmp/x", io()).exit_code(), 2);
        assert_eq!(AppError::notification_init("no bus").exit_code(), 3);
        assert_eq!(AppError::Spawn { source: io() }.exit_code(), 4);
        assert_eq!(AppError::Session { source: io() }.exit_code(), 5);
        assert_eq!(AppError::fifo_drain("/tmp/x", io()).exit_code(), 7);
        assert_eq!(AppError::config("bad").exit_code(), 1);
    }

    #[test]
    fn test_child_exit_code_is_propagated() {
        assert_eq!(AppError::ChildExited { code: 2 }.exit_code(), 2);
    }

    #[test]
    fn test_error_category() {
        assert_eq!(AppError::config("test").category(), "config");
        assert_eq!(
            AppError::notification_send("title", "rejected").category(),
            "notification"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();

        match app_err {
            AppError::Io { operation, .. } => {
                assert_eq!(operation, "file not found");
            }
            _ => panic!("Wrong error type"),
        }
    }
}
