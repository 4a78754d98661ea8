//! External tool invocation
//!
//! Builds the exact `/GetValue` and `/SetValue` argument lists, runs the
//! tool as a blocking child process, and maps the process outcome onto
//! `Result`. Invocation is deliberately synchronous: each user action runs
//! one child process to completion on the calling thread, so no two
//! commands can ever race against the same monitor.

use crate::error::{Result, VcpTuneError};
use crate::vcp::VcpCode;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Seam between the controller and process execution
///
/// The production implementation is [`CommandInvoker`]; tests substitute a
/// scripted fake to simulate exit statuses without spawning processes.
pub trait VcpTool {
    /// Read the current value of a VCP feature
    ///
    /// The returned value is the tool's process exit status, which the
    /// tool's `/GetValue` command uses as its value channel.
    fn get_value(&self, monitor_id: &str, code: &VcpCode) -> Result<u8>;

    /// Write a VCP feature value
    ///
    /// `feature` is the human-readable name used in failure diagnostics.
    /// The value is passed to the tool as its decimal string representation,
    /// unclamped.
    fn set_value(&self, monitor_id: &str, code: &VcpCode, value: i32, feature: &str) -> Result<()>;
}

/// Invokes the external VCP control tool as a child process
pub struct CommandInvoker {
    /// Path to the tool binary
    tool_path: PathBuf,
}

impl CommandInvoker {
    /// Create an invoker for the tool at the given path
    pub fn new(tool_path: impl Into<PathBuf>) -> Self {
        Self {
            tool_path: tool_path.into(),
        }
    }

    /// Configured path of the tool binary
    pub fn tool_path(&self) -> &Path {
        &self.tool_path
    }

    /// Build the `/GetValue` command line
    fn read_command(&self, monitor_id: &str, code: &VcpCode) -> Command {
        let mut command = Command::new(&self.tool_path);
        command.arg("/GetValue").arg(monitor_id).arg(code.as_str());
        command
    }

    /// Build the `/SetValue` command line
    fn write_command(&self, monitor_id: &str, code: &VcpCode, value: i32) -> Command {
        let mut command = Command::new(&self.tool_path);
        command
            .arg("/SetValue")
            .arg(monitor_id)
            .arg(code.as_str())
            .arg(value.to_string());
        command
    }

    /// Map a spawn failure to the error taxonomy
    ///
    /// A missing binary gets its own diagnostic; everything else is a
    /// generic invocation failure.
    fn spawn_error(&self, error: std::io::Error) -> VcpTuneError {
        if error.kind() == std::io::ErrorKind::NotFound {
            VcpTuneError::ToolNotFound {
                path: self.tool_path.clone(),
            }
        } else {
            VcpTuneError::Invocation(error)
        }
    }
}

impl VcpTool for CommandInvoker {
    fn get_value(&self, monitor_id: &str, code: &VcpCode) -> Result<u8> {
        debug!("GetValue {} {}", monitor_id, code);
        let output = self
            .read_command(monitor_id, code)
            .output()
            .map_err(|e| self.spawn_error(e))?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        let value = value_from_exit_code(raw_exit_code(output.status), &stderr)?;
        debug!("GetValue {} {} -> {}", monitor_id, code, value);
        Ok(value)
    }

    fn set_value(&self, monitor_id: &str, code: &VcpCode, value: i32, feature: &str) -> Result<()> {
        debug!("SetValue {} {} {}", monitor_id, code, value);
        let output = self
            .write_command(monitor_id, code, value)
            .output()
            .map_err(|e| self.spawn_error(e))?;
        if output.status.success() {
            Ok(())
        } else {
            Err(VcpTuneError::SetValueFailed {
                feature: feature.to_string(),
                code: raw_exit_code(output.status),
            })
        }
    }
}

/// Map a raw `/GetValue` exit code onto the single-byte value channel
///
/// An exit code in `[0, 255]` is the value itself; anything else is an
/// error carrying the raw code and captured stderr text.
pub fn value_from_exit_code(code: i32, stderr: &str) -> Result<u8> {
    u8::try_from(code).map_err(|_| VcpTuneError::GetValueOutOfRange {
        code,
        stderr: stderr.trim().to_string(),
    })
}

/// Flatten an `ExitStatus` to the raw integer code
///
/// Signal termination has no exit code; report it as the negated signal
/// number so the diagnostic matches the convention of a negative code.
fn raw_exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status
            .code()
            .or_else(|| status.signal().map(|s| -s))
            .unwrap_or(-1)
    }
    #[cfg(not(unix))]
    {
        status.code().unwrap_or(-1)
    }
}
