//! Error types for `VcpTune`
//!
//! One crate-wide error enum covers the whole invocation failure taxonomy:
//! tool not found, spawn failures, the out-of-range exit status a `/GetValue`
//! read can report, and non-zero `/SetValue` exits. The `Display` texts of
//! the invocation variants are the exact one-line diagnostics shown in the
//! status bar, so the controller can surface any error with `to_string()`.

use std::path::PathBuf;
use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `VcpTune`
#[derive(Debug, Error)]
pub enum VcpTuneError {
    /// The external VCP tool binary could not be located
    #[error("Error: {} not found.", .path.display())]
    ToolNotFound {
        /// Configured path of the missing binary
        path: PathBuf,
    },

    /// A `/GetValue` read reported an exit status outside the single-byte
    /// value range (negative statuses represent termination by signal)
    #[error("Error fetching value (Code {code}): {stderr}")]
    GetValueOutOfRange {
        /// Raw process exit code
        code: i32,
        /// Captured standard error text, trimmed
        stderr: String,
    },

    /// A `/SetValue` write reported a non-zero exit status
    #[error(
        "Command Error (Exit Code {code}): Failed to set {feature}. Monitor/VCP Code may not be supported."
    )]
    SetValueFailed {
        /// Human-readable feature name, for the diagnostic only
        feature: String,
        /// Raw process exit code
        code: i32,
    },

    /// The external tool could not be spawned for a reason other than a
    /// missing binary
    #[error("An unexpected error occurred: {0}")]
    Invocation(#[source] std::io::Error),

    /// A VCP code token was not a 1-2 digit hexadecimal value
    #[error("Invalid VCP code token: {0}")]
    InvalidVcpCode(String),

    /// A loaded configuration violated a registry invariant
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for `VcpTune` operations
pub type Result<T> = std::result::Result<T, VcpTuneError>;

/// Convert an error to a user-friendly message
///
/// Only used for the fatal startup dialog; everything after startup
/// surfaces through the status bar instead.
pub fn get_user_friendly_error(error: &VcpTuneError) -> String {
    match error {
        VcpTuneError::ToolNotFound { path } => {
            format!(
                "The monitor control tool was not found:\n\n{}\n\n\
                 Download ControlMyMonitor from NirSoft and place it next to\n\
                 vcptune.exe, or point tool_path at it in config.json.",
                path.display()
            )
        }
        VcpTuneError::ConfigError(_) | VcpTuneError::InvalidConfig(_) => {
            "Failed to load or save configuration.\n\n\
             Check that you have write permissions to:\n\
             %APPDATA%\\VcpTune"
                .to_string()
        }
        VcpTuneError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        VcpTuneError::JsonError(e) => {
            format!(
                "Configuration file is corrupted:\n\n{e}\n\n\
                 The application will use default settings."
            )
        }
        other => other.to_string(),
    }
}
