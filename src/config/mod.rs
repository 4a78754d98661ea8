//! Configuration management module
//!
//! This module holds the three static registries the application is driven
//! by (monitors, VCP features, theme presets) plus the external tool path.
//! Built-in defaults cover a standard two-monitor setup; an optional
//! `%APPDATA%\VcpTune\config.json` overrides them at startup. Registries
//! are populated once before the window opens and never mutated afterwards.

pub mod manager;
pub mod models;

pub use manager::ConfigManager;
pub use models::{AppConfig, Monitor, ThemePreset, VcpFeature};
