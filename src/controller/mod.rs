//! Application logic controller module
//!
//! The controller owns the session state (selected monitor, selected
//! feature, displayed value, last status line) and is the single place
//! user actions are interpreted.
//!
//! # Architecture
//!
//! - `Action`: the explicit dispatch surface; every widget callback in the
//!   GUI maps to exactly one variant
//! - `SessionState`: the mutable session context, snapshotted by the GUI
//!   after each dispatch
//! - `AppController`: resolves registry lookups and drives the `VcpTool`
//!   seam
//!
//! # Failure semantics
//!
//! Every external-command failure is non-fatal and surfaces only as the
//! one-line status text; nothing here raises past `dispatch` and nothing
//! shows a blocking dialog.

pub mod app_controller;

pub use app_controller::{Action, AppController, SessionState};
