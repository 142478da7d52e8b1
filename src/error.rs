//! Error types for jrobo
//!
//! All modules use `JroboResult<T>` as their return type. Fatal conditions
//! are plain variants returned up to the command dispatcher in `main`,
//! which alone decides the process exit status.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for jrobo operations
pub type JroboResult<T> = Result<T, JroboError>;

/// All errors that can occur in jrobo
#[derive(Error, Debug)]
pub enum JroboError {
    // Provisioning errors
    #[error("Cannot delete {path}, please remove it manually and re-run")]
    UndeletableDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open source directory {path} for listing")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Driver resolution errors
    #[error("No driver mapping for browser '{0}'")]
    UnknownBrowser(String),

    #[error("No driver path for browser '{browser}' on {os}")]
    DriverPathMissing { browser: String, os: String },

    // Suite configuration errors
    #[error("Cannot read suite configuration {path}")]
    SuiteConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid suite configuration at {path}: {reason}")]
    SuiteConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed to start: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command exited unsuccessfully: {command}, stderr: {stderr}")]
    CommandExecution { command: String, stderr: String },
}

impl JroboError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownBrowser(_) | Self::DriverPathMissing { .. } => Some(
                "Check the browser in tests/acceptance.suite.yml and the webdrivers table in codeception.yml",
            ),
            Self::UndeletableDir { .. } => {
                Some("Directory deletion usually fails on permissions; check ownership")
            }
            _ => None,
        }
    }
}
