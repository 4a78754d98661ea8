//! GUI controller implementation
//!
//! Owns the Slint main window and the shared `AppController`. Every widget
//! callback locks the controller, dispatches exactly one [`Action`], and
//! refreshes the widgets from the resulting session snapshot. Callbacks run
//! on the UI thread and any tool invocation blocks it until the child
//! process exits; the mutex exists only for Slint's `'static` callback
//! requirement, not for parallelism.

use crate::{MainWindow, ThemeEntry};
use anyhow::{Result, anyhow};
use parking_lot::Mutex;
use slint::{Color, ComponentHandle, ModelRc, SharedString, VecModel};
use std::sync::Arc;
use vcptune::config::AppConfig;
use vcptune::controller::{Action, AppController};

/// GUI controller owning the main window
///
/// The controller itself is kept alive by the `Arc` clones captured in the
/// widget callbacks.
pub struct GuiController {
    window: MainWindow,
}

impl GuiController {
    /// Build the main window, populate the registry models, and wire the
    /// widget callbacks to the controller
    pub fn new(controller: Arc<Mutex<AppController>>) -> Result<Self> {
        let window =
            MainWindow::new().map_err(|e| anyhow!("Failed to create main window: {e}"))?;

        {
            let mut guard = controller.lock();
            populate_registries(&window, guard.config());

            // Preselect the first monitor and feature, mirroring the
            // dropdown defaults
            let first_monitor = guard.config().monitors.first().map(|m| m.name.clone());
            let first_feature = guard.config().features.first().map(|f| f.name.clone());
            if let Some(name) = first_monitor {
                guard.dispatch(Action::SelectMonitor(name));
            }
            if let Some(name) = first_feature {
                guard.dispatch(Action::SelectFeature(name));
            }
            refresh(&window, &guard);
        }

        install_callbacks(&window, &controller);

        Ok(Self { window })
    }

    /// Run the Slint event loop until the window is closed
    pub fn run(&self) -> Result<()> {
        self.window
            .run()
            .map_err(|e| anyhow!("GUI event loop failed: {e}"))
    }
}

/// Fill the static registry models: monitor names, feature names, theme
/// buttons (in declaration order, so themes run lightest to darkest)
fn populate_registries(window: &MainWindow, config: &AppConfig) {
    let monitor_names: Vec<SharedString> = config
        .monitors
        .iter()
        .map(|m| SharedString::from(m.name.as_str()))
        .collect();
    window.set_monitor_names(ModelRc::new(VecModel::from(monitor_names)));

    let feature_names: Vec<SharedString> = config
        .features
        .iter()
        .map(|f| SharedString::from(f.name.as_str()))
        .collect();
    window.set_feature_names(ModelRc::new(VecModel::from(feature_names)));

    let themes: Vec<ThemeEntry> = config
        .themes
        .iter()
        .map(|t| ThemeEntry {
            name: SharedString::from(t.name.as_str()),
            label: SharedString::from(format!(
                "\u{2b50} {}\n(B{}, C{})",
                t.name, t.brightness, t.contrast
            )),
            background: parse_color(&t.background).unwrap_or(Color::from_rgb_u8(136, 136, 136)),
            foreground: parse_color(&t.foreground).unwrap_or(Color::from_rgb_u8(0, 0, 0)),
        })
        .collect();
    window.set_themes(ModelRc::new(VecModel::from(themes)));
}

/// Wire each widget callback to one controller dispatch plus a refresh
fn install_callbacks(window: &MainWindow, controller: &Arc<Mutex<AppController>>) {
    let weak = window.as_weak();
    let shared = Arc::clone(controller);
    window.on_monitor_selected(move |name| {
        let Some(window) = weak.upgrade() else { return };
        let mut guard = shared.lock();
        guard.dispatch(Action::SelectMonitor(name.to_string()));
        refresh(&window, &guard);
    });

    let weak = window.as_weak();
    let shared = Arc::clone(controller);
    window.on_feature_selected(move |name| {
        let Some(window) = weak.upgrade() else { return };
        let mut guard = shared.lock();
        guard.dispatch(Action::SelectFeature(name.to_string()));
        refresh(&window, &guard);
    });

    let weak = window.as_weak();
    let shared = Arc::clone(controller);
    window.on_get_value_clicked(move || {
        let Some(window) = weak.upgrade() else { return };
        let mut guard = shared.lock();
        guard.dispatch(Action::GetValue);
        refresh(&window, &guard);
    });

    let weak = window.as_weak();
    let shared = Arc::clone(controller);
    window.on_set_value_clicked(move |raw| {
        let Some(window) = weak.upgrade() else { return };
        let mut guard = shared.lock();
        guard.dispatch(Action::SetValue(raw.to_string()));
        refresh(&window, &guard);
    });

    let weak = window.as_weak();
    let shared = Arc::clone(controller);
    window.on_theme_clicked(move |name| {
        let Some(window) = weak.upgrade() else { return };
        let mut guard = shared.lock();
        guard.dispatch(Action::ApplyTheme(name.to_string()));
        refresh(&window, &guard);
    });

    let weak = window.as_weak();
    let shared = Arc::clone(controller);
    window.on_slider_moved(move |value| {
        let Some(window) = weak.upgrade() else { return };
        let mut guard = shared.lock();
        guard.dispatch(Action::SliderMoved(value));
        // Only the value field mirrors slider motion; a full refresh would
        // fight the drag by rewriting the slider position
        window.set_value_text(SharedString::from(guard.session().value.to_string()));
    });
}

/// Mirror the session snapshot into the widgets
#[expect(
    clippy::cast_precision_loss,
    reason = "Displayed values are single-byte VCP values; f32 is exact here"
)]
fn refresh(window: &MainWindow, controller: &AppController) {
    let session = controller.session();
    let config = controller.config();

    window.set_status_text(SharedString::from(session.status.as_str()));
    window.set_value_text(SharedString::from(session.value.to_string()));
    window.set_slider_value(session.value as f32);

    if let Some(name) = &session.feature {
        if let Some(feature) = config.feature(name) {
            window.set_range_label(SharedString::from(format!(
                "VCP Code: {} (Range: {}-{})",
                feature.code, feature.min, feature.max
            )));
            window.set_slider_min(f32::from(feature.min));
            window.set_slider_max(f32::from(feature.max));
        }
        if let Some(index) = config.features.iter().position(|f| &f.name == name) {
            window.set_feature_index(i32::try_from(index).unwrap_or(0));
        }
    }

    if let Some(name) = &session.monitor {
        if let Some(index) = config.monitors.iter().position(|m| &m.name == name) {
            window.set_monitor_index(i32::try_from(index).unwrap_or(0));
        }
    }
}

/// Parse a preset color: a few named colors or "#rrggbb"
fn parse_color(value: &str) -> Option<Color> {
    match value {
        "black" => return Some(Color::from_rgb_u8(0, 0, 0)),
        "white" => return Some(Color::from_rgb_u8(255, 255, 255)),
        _ => {}
    }
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::from_rgb_u8(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color("black"), Some(Color::from_rgb_u8(0, 0, 0)));
        assert_eq!(parse_color("white"), Some(Color::from_rgb_u8(255, 255, 255)));
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(
            parse_color("#1a1a1a"),
            Some(Color::from_rgb_u8(0x1a, 0x1a, 0x1a))
        );
        assert_eq!(
            parse_color("#f0f0f0"),
            Some(Color::from_rgb_u8(0xf0, 0xf0, 0xf0))
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_color("#ff"), None);
        assert_eq!(parse_color("ff0000"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
        assert_eq!(parse_color("blue-ish"), None);
    }
}
