//! VCP command invocation module
//!
//! This module wraps the external VCP control tool (NirSoft's
//! `ControlMyMonitor.exe`) behind a small trait so the rest of the
//! application never touches `std::process` directly.
//!
//! # Overview
//!
//! - `VcpCode`: validated 1-2 digit hexadecimal feature token ("10", "D6")
//! - `VcpTool`: the read/write seam the controller calls through
//! - `CommandInvoker`: production implementation that spawns the tool
//!
//! # Exit-code contract
//!
//! The tool has no structured output channel; `/GetValue` encodes the read
//! value in the process exit status. An exit status in `[0, 255]` *is* the
//! value; anything else (including signal termination) is a failure. This
//! convention is external-interface compatibility and is preserved exactly,
//! which bounds readable VCP values to a single byte.

pub mod code;
pub mod invoker;

pub use code::VcpCode;
pub use invoker::{CommandInvoker, VcpTool};
