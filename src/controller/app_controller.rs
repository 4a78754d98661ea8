//! Application controller implementation
//!
//! Maps user actions onto the two external tool operations and folds the
//! results back into the session state. Invocation is synchronous by
//! design: a dispatch returns only after any child process it started has
//! exited, so actions can never overlap on the wire.

use crate::config::models::{BRIGHTNESS_VCP_CODE, CONTRAST_VCP_CODE};
use crate::config::{AppConfig, VcpFeature};
use crate::vcp::VcpTool;
use tracing::{debug, info, warn};

/// Mutable session context owned by the controller
///
/// Lifetime is the process lifetime; everything resets to defaults on
/// restart. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Selected monitor display name, if any
    pub monitor: Option<String>,
    /// Selected feature display name, if any
    pub feature: Option<String>,
    /// Current displayed value (entry field and slider)
    pub value: i32,
    /// Last one-line status message
    pub status: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            monitor: None,
            feature: None,
            value: 50,
            status: "Ready. Select monitor and feature, or use a theme preset.".to_string(),
        }
    }
}

/// A user action forwarded from the GUI
///
/// The dispatch table the widget callbacks map onto; handlers take the
/// session context plus the action payload and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Monitor selection changed; no invocation
    SelectMonitor(String),
    /// Feature selection changed; resets the displayed value to the
    /// feature's minimum, no invocation
    SelectFeature(String),
    /// Read the current value of the selected feature from the device
    GetValue,
    /// Parse the entry text and write it to the selected feature
    SetValue(String),
    /// Apply a theme preset: brightness write followed by contrast write
    ApplyTheme(String),
    /// Slider moved; mirrors the position into the displayed value
    SliderMoved(i32),
}

/// Application logic controller
pub struct AppController {
    /// Static registries and tool path
    config: AppConfig,
    /// Seam to the external tool
    tool: Box<dyn VcpTool + Send>,
    /// Mutable session context
    session: SessionState,
}

impl AppController {
    /// Create a controller over the given registries and tool
    pub fn new(config: AppConfig, tool: Box<dyn VcpTool + Send>) -> Self {
        Self {
            config,
            tool,
            session: SessionState::default(),
        }
    }

    /// The static registries
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Snapshot of the current session context
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Handle one user action
    ///
    /// Never panics and never returns an error: every failure path ends in
    /// the session status line.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::SelectMonitor(name) => self.select_monitor(name),
            Action::SelectFeature(name) => self.select_feature(&name),
            Action::GetValue => self.get_value(),
            Action::SetValue(raw) => self.set_value(&raw),
            Action::ApplyTheme(name) => self.apply_theme(&name),
            Action::SliderMoved(value) => self.session.value = value,
        }
    }

    fn select_monitor(&mut self, name: String) {
        debug!("Monitor selected: {}", name);
        self.session.monitor = Some(name);
    }

    fn select_feature(&mut self, name: &str) {
        let Some(feature) = self.config.feature(name) else {
            warn!("Unknown feature selected: {}", name);
            return;
        };
        self.session.value = i32::from(feature.min);
        self.session.feature = Some(name.to_string());
        self.session.status =
            format!("Selected: {name}. Press 'Get Current Value' to check status.");
        debug!("Feature selected: {}", name);
    }

    fn get_value(&mut self) {
        let Some((device_id, feature)) = self.selection() else {
            debug!("Get ignored: no monitor/feature selected");
            return;
        };
        match self.tool.get_value(&device_id, &feature.code) {
            Ok(value) => {
                self.session.value = i32::from(value);
                self.session.status = format!("Current Value for {}: {}", feature.name, value);
                info!("Read {} = {} from {}", feature.name, value, device_id);
            }
            Err(e) => {
                warn!("Read of {} failed: {}", feature.name, e);
                self.session.status = e.to_string();
            }
        }
    }

    fn set_value(&mut self, raw: &str) {
        let Ok(value) = raw.trim().parse::<i32>() else {
            self.session.status = "Error: Value must be an integer.".to_string();
            return;
        };
        self.session.value = value;
        let Some((device_id, feature)) = self.selection() else {
            debug!("Set ignored: no monitor/feature selected");
            return;
        };
        // The value goes to the device as typed; the declared range is
        // informational only and is not clamped against.
        match self
            .tool
            .set_value(&device_id, &feature.code, value, feature.short_name())
        {
            Ok(()) => info!("Wrote {} = {} to {}", feature.name, value, device_id),
            Err(e) => {
                warn!("Write of {} failed: {}", feature.name, e);
                self.session.status = e.to_string();
            }
        }
    }

    fn apply_theme(&mut self, name: &str) {
        let Some(theme) = self.config.theme(name).cloned() else {
            warn!("Unknown theme: {}", name);
            return;
        };

        let device_id = match self
            .session
            .monitor
            .as_deref()
            .and_then(|m| self.config.monitor(m))
        {
            Some(monitor) => monitor.device_id.clone(),
            None => {
                self.session.status = "Error: Please select a monitor first.".to_string();
                return;
            }
        };

        let (Some(brightness), Some(contrast)) = (
            self.config.feature_by_code(BRIGHTNESS_VCP_CODE).cloned(),
            self.config.feature_by_code(CONTRAST_VCP_CODE).cloned(),
        ) else {
            warn!("Theme ignored: registry lacks brightness/contrast features");
            return;
        };

        // Both writes always run, in fixed order; a brightness failure does
        // not skip the contrast write.
        let set_brightness = self.tool.set_value(
            &device_id,
            &brightness.code,
            i32::from(theme.brightness),
            "Brightness",
        );
        if let Err(e) = &set_brightness {
            warn!("Theme '{}' brightness write failed: {}", name, e);
            self.session.status = e.to_string();
        }

        let set_contrast = self.tool.set_value(
            &device_id,
            &contrast.code,
            i32::from(theme.contrast),
            "Contrast",
        );
        if let Err(e) = &set_contrast {
            warn!("Theme '{}' contrast write failed: {}", name, e);
            self.session.status = e.to_string();
        }

        if set_brightness.is_ok() && set_contrast.is_ok() {
            // Show the contrast feature afterwards so the write has visible
            // feedback in the manual controls.
            self.session.feature = Some(contrast.name.clone());
            self.session.value = i32::from(theme.contrast);
            let monitor_name = self.session.monitor.as_deref().unwrap_or_default();
            self.session.status = format!(
                "SUCCESS: Applied '{}' Theme (B:{}, C:{}) to {}",
                name, theme.brightness, theme.contrast, monitor_name
            );
            info!(
                "Applied theme '{}' (B:{}, C:{}) to {}",
                name, theme.brightness, theme.contrast, device_id
            );
        }
    }

    /// Resolve the selected monitor's device identifier and the selected
    /// feature, if both are set and present in the registries
    fn selection(&self) -> Option<(String, VcpFeature)> {
        let monitor = self.config.monitor(self.session.monitor.as_deref()?)?;
        let feature = self.config.feature(self.session.feature.as_deref()?)?;
        Some((monitor.device_id.clone(), feature.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, VcpTuneError};
    use crate::vcp::VcpCode;
    use std::cell::RefCell;

    /// Minimal recording fake; the integration tests carry the scripted one
    struct RecordingTool {
        calls: RefCell<Vec<String>>,
    }

    impl RecordingTool {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl VcpTool for RecordingTool {
        fn get_value(&self, monitor_id: &str, code: &VcpCode) -> Result<u8> {
            self.calls.borrow_mut().push(format!("get {monitor_id} {code}"));
            Ok(0)
        }

        fn set_value(
            &self,
            monitor_id: &str,
            code: &VcpCode,
            value: i32,
            _feature: &str,
        ) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("set {monitor_id} {code} {value}"));
            Ok(())
        }
    }

    fn controller() -> AppController {
        AppController::new(AppConfig::default(), Box::new(RecordingTool::new()))
    }

    #[test]
    fn test_monitor_selection_triggers_nothing() {
        let mut controller = controller();
        controller.dispatch(Action::SelectMonitor("Primary Monitor".to_string()));
        assert_eq!(
            controller.session().monitor.as_deref(),
            Some("Primary Monitor")
        );
        // Status untouched by monitor selection
        assert!(controller.session().status.starts_with("Ready."));
    }

    #[test]
    fn test_feature_selection_resets_value_to_minimum() {
        let mut controller = controller();
        controller.dispatch(Action::SelectFeature("Power Mode".to_string()));
        assert_eq!(controller.session().value, 1);
        assert!(controller.session().status.contains("Power Mode"));
    }

    #[test]
    fn test_unknown_feature_is_ignored() {
        let mut controller = controller();
        controller.dispatch(Action::SelectFeature("Sharpness".to_string()));
        assert_eq!(controller.session().feature, None);
        assert_eq!(controller.session().value, 50);
    }

    #[test]
    fn test_slider_mirrors_into_value() {
        let mut controller = controller();
        controller.dispatch(Action::SliderMoved(73));
        assert_eq!(controller.session().value, 73);
    }

    #[test]
    fn test_set_value_rejects_non_integer() {
        let mut controller = controller();
        controller.dispatch(Action::SelectMonitor("Primary Monitor".to_string()));
        controller.dispatch(Action::SelectFeature("Brightness (0-100)".to_string()));
        controller.dispatch(Action::SetValue("abc".to_string()));
        assert_eq!(controller.session().status, "Error: Value must be an integer.");
    }

    #[test]
    fn test_set_value_is_not_clamped() {
        let tool = Box::new(RecordingTool::new());
        let mut controller = AppController::new(AppConfig::default(), tool);
        controller.dispatch(Action::SelectMonitor("Primary Monitor".to_string()));
        controller.dispatch(Action::SelectFeature("Brightness (0-100)".to_string()));
        controller.dispatch(Action::SetValue("300".to_string()));
        assert_eq!(controller.session().value, 300);
    }

    #[test]
    fn test_theme_write_order_is_brightness_then_contrast() {
        let mut controller = controller();
        controller.dispatch(Action::SelectMonitor("Primary Monitor".to_string()));
        controller.dispatch(Action::ApplyTheme("Medium".to_string()));
        // Downcast through the session outcome instead of the tool: the
        // success status proves both writes ran and succeeded in order.
        assert_eq!(
            controller.session().status,
            "SUCCESS: Applied 'Medium' Theme (B:50, C:45) to Primary Monitor"
        );
        assert_eq!(
            controller.session().feature.as_deref(),
            Some("Contrast (0-100)")
        );
        assert_eq!(controller.session().value, 45);
    }

    #[test]
    fn test_get_with_no_selection_is_silent() {
        let mut controller = controller();
        let status_before = controller.session().status.clone();
        controller.dispatch(Action::GetValue);
        assert_eq!(controller.session().status, status_before);
        assert_eq!(controller.session().value, 50);
    }

    #[test]
    fn test_read_error_keeps_displayed_value() {
        struct FailingTool;
        impl VcpTool for FailingTool {
            fn get_value(&self, _: &str, _: &VcpCode) -> Result<u8> {
                Err(VcpTuneError::GetValueOutOfRange {
                    code: -9,
                    stderr: String::new(),
                })
            }
            fn set_value(&self, _: &str, _: &VcpCode, _: i32, _: &str) -> Result<()> {
                Ok(())
            }
        }

        let mut controller = AppController::new(AppConfig::default(), Box::new(FailingTool));
        controller.dispatch(Action::SelectMonitor("Primary Monitor".to_string()));
        controller.dispatch(Action::SelectFeature("Brightness (0-100)".to_string()));
        controller.dispatch(Action::SliderMoved(42));
        controller.dispatch(Action::GetValue);
        assert_eq!(controller.session().value, 42);
        assert!(controller.session().status.contains("Code -9"));
    }
}
