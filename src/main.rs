//! `VcpTune` - Monitor VCP control front-end
//!
//! Reads and writes monitor display settings through NirSoft's
//! `ControlMyMonitor.exe`. Startup wires logging, configuration, the
//! command invoker, and the controller together, then hands the thread to
//! the Slint event loop.

// Set Windows subsystem to hide console window
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![expect(
    missing_docs,
    reason = "Slint-generated code from include_modules! lacks doc comments"
)]
#![allow(clippy::unwrap_used)] // Slint-generated code from include_modules! uses .unwrap() extensively

// GUI module is only in the binary, not the library
mod gui;

use anyhow::{Context, Result};
use gui::GuiController;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info};
use vcptune::{
    config::ConfigManager,
    controller::AppController,
    error::{VcpTuneError, get_user_friendly_error},
    utils,
    vcp::CommandInvoker,
};

// Include Slint-generated code
slint::include_modules!();

/// Main entry point for the application
fn main() -> Result<()> {
    utils::init_logging().context("Failed to initialize logging system")?;

    info!("VcpTune v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = ConfigManager::load().context("Failed to load application configuration")?;
    info!(
        "Configuration loaded: {} monitors, {} features, {} themes; tool: {}",
        config.monitors.len(),
        config.features.len(),
        config.themes.len(),
        config.tool_path.display()
    );

    if !config.tool_path.exists() {
        // Not fatal: a bare filename still resolves through PATH, and any
        // invocation failure surfaces in the status bar with its own
        // diagnostic
        info!("Tool binary not present at the configured path; relying on PATH lookup");
    }

    let invoker = CommandInvoker::new(config.tool_path.clone());
    let controller = Arc::new(Mutex::new(AppController::new(config, Box::new(invoker))));

    let gui_controller = match GuiController::new(Arc::clone(&controller))
        .context("Failed to create GUI controller")
    {
        Ok(gui_controller) => gui_controller,
        Err(e) => {
            error!("Failed to initialize GUI: {:#}", e);

            let error_message = if let Some(vcptune_error) = e.downcast_ref::<VcpTuneError>() {
                get_user_friendly_error(vcptune_error)
            } else {
                format!("{e:#}")
            };

            show_error_and_exit(&format!(
                "Failed to initialize VcpTune:\n\n{error_message}"
            ));
            return Err(e);
        }
    };

    info!("Starting GUI event loop");
    gui_controller
        .run()
        .context("GUI event loop terminated with error")?;

    info!("VcpTune shutting down");

    Ok(())
}

/// Shows an error dialog and exits the application.
#[cfg(windows)]
fn show_error_and_exit(message: &str) {
    use rfd::MessageDialog;

    MessageDialog::new()
        .set_title("VcpTune - Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .set_level(rfd::MessageLevel::Error)
        .show();

    std::process::exit(1);
}

/// Shows an error dialog and exits the application (non-Windows fallback).
#[cfg(not(windows))]
fn show_error_and_exit(message: &str) {
    eprintln!("ERROR: {message}");
    std::process::exit(1);
}
