//! Configuration data models
//!
//! Registries are Vec-backed to preserve declaration order: the UI renders
//! monitors and features in the order listed, and theme buttons top-to-bottom
//! from lightest to darkest.

use crate::error::{Result, VcpTuneError};
use crate::vcp::VcpCode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// VCP code of the brightness feature, used by theme presets
pub const BRIGHTNESS_VCP_CODE: &str = "10";
/// VCP code of the contrast feature, used by theme presets
pub const CONTRAST_VCP_CODE: &str = "12";

/// A monitor the external tool can address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monitor {
    /// Display name shown in the UI
    pub name: String,
    /// Identifier string passed to the external tool ("Primary",
    /// "\\.\DISPLAY1\Monitor0", a serial number, ...)
    pub device_id: String,
}

/// A controllable VCP feature with its declared value range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VcpFeature {
    /// Display name shown in the UI
    pub name: String,
    /// VCP code token passed to the external tool
    pub code: VcpCode,
    /// Declared minimum value
    pub min: u16,
    /// Declared maximum value
    pub max: u16,
}

impl VcpFeature {
    /// First word of the display name, used in write diagnostics
    /// ("Brightness (0-100)" -> "Brightness")
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// A brightness/contrast preset applied as one user action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemePreset {
    /// Preset name shown on the button and in the status line
    pub name: String,
    /// Brightness value written first
    pub brightness: u16,
    /// Contrast value written second
    pub contrast: u16,
    /// Button background, "#rrggbb"
    pub background: String,
    /// Button text color, named ("black", "white") or "#rrggbb"
    pub foreground: String,
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the external VCP control binary
    pub tool_path: PathBuf,
    /// Monitor registry, in UI order
    pub monitors: Vec<Monitor>,
    /// Feature registry, in UI order
    pub features: Vec<VcpFeature>,
    /// Theme presets, lightest to darkest
    pub themes: Vec<ThemePreset>,
}

impl AppConfig {
    /// Look up a monitor by display name
    pub fn monitor(&self, name: &str) -> Option<&Monitor> {
        self.monitors.iter().find(|m| m.name == name)
    }

    /// Look up a feature by display name
    pub fn feature(&self, name: &str) -> Option<&VcpFeature> {
        self.features.iter().find(|f| f.name == name)
    }

    /// Look up a feature by VCP code token
    pub fn feature_by_code(&self, code: &str) -> Option<&VcpFeature> {
        self.features.iter().find(|f| f.code.as_str() == code)
    }

    /// Look up a theme preset by name
    pub fn theme(&self, name: &str) -> Option<&ThemePreset> {
        self.themes.iter().find(|t| t.name == name)
    }

    /// Check the registry invariants
    ///
    /// Monitors need non-empty names and identifiers, feature ranges must
    /// satisfy min <= max, and every theme's brightness/contrast must lie
    /// within the declared range of the corresponding feature.
    pub fn validate(&self) -> Result<()> {
        for monitor in &self.monitors {
            if monitor.name.is_empty() {
                return Err(VcpTuneError::InvalidConfig(
                    "monitor with empty display name".to_string(),
                ));
            }
            if monitor.device_id.is_empty() {
                return Err(VcpTuneError::InvalidConfig(format!(
                    "monitor '{}' has an empty device identifier",
                    monitor.name
                )));
            }
        }

        for feature in &self.features {
            if feature.name.is_empty() {
                return Err(VcpTuneError::InvalidConfig(
                    "feature with empty display name".to_string(),
                ));
            }
            if feature.min > feature.max {
                return Err(VcpTuneError::InvalidConfig(format!(
                    "feature '{}' declares min {} > max {}",
                    feature.name, feature.min, feature.max
                )));
            }
        }

        if !self.themes.is_empty() {
            let brightness = self.feature_by_code(BRIGHTNESS_VCP_CODE).ok_or_else(|| {
                VcpTuneError::InvalidConfig(format!(
                    "themes are defined but no feature has VCP code {BRIGHTNESS_VCP_CODE}"
                ))
            })?;
            let contrast = self.feature_by_code(CONTRAST_VCP_CODE).ok_or_else(|| {
                VcpTuneError::InvalidConfig(format!(
                    "themes are defined but no feature has VCP code {CONTRAST_VCP_CODE}"
                ))
            })?;

            for theme in &self.themes {
                if theme.brightness < brightness.min || theme.brightness > brightness.max {
                    return Err(VcpTuneError::InvalidConfig(format!(
                        "theme '{}' brightness {} outside range {}-{}",
                        theme.name, theme.brightness, brightness.min, brightness.max
                    )));
                }
                if theme.contrast < contrast.min || theme.contrast > contrast.max {
                    return Err(VcpTuneError::InvalidConfig(format!(
                        "theme '{}' contrast {} outside range {}-{}",
                        theme.name, theme.contrast, contrast.min, contrast.max
                    )));
                }
            }
        }

        Ok(())
    }
}

fn monitor(name: &str, device_id: &str) -> Monitor {
    Monitor {
        name: name.to_string(),
        device_id: device_id.to_string(),
    }
}

fn feature(name: &str, code: &str, min: u16, max: u16) -> VcpFeature {
    VcpFeature {
        name: name.to_string(),
        code: VcpCode::new(code).expect("built-in VCP code is valid"),
        min,
        max,
    }
}

fn theme(name: &str, brightness: u16, contrast: u16, background: &str, foreground: &str) -> ThemePreset {
    ThemePreset {
        name: name.to_string(),
        brightness,
        contrast,
        background: background.to_string(),
        foreground: foreground.to_string(),
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tool_path: PathBuf::from("ControlMyMonitor.exe"),
            monitors: vec![
                monitor("Primary Monitor", "Primary"),
                monitor("Secondary Monitor", "Secondary"),
            ],
            features: vec![
                feature("Brightness (0-100)", "10", 0, 100),
                feature("Contrast (0-100)", "12", 0, 100),
                feature("Volume (0-100)", "62", 0, 100),
                feature("Input Select", "60", 1, 20),
                feature("Power Mode", "D6", 1, 5),
                feature("OSD Language", "CC", 1, 10),
                feature("Restore Factory Defaults", "04", 1, 1),
            ],
            themes: vec![
                theme("Lightest", 80, 70, "#f0f0f0", "black"),
                theme("Light", 65, 58, "#cccccc", "black"),
                theme("Medium", 50, 45, "#888888", "white"),
                theme("Dark", 35, 33, "#444444", "white"),
                theme("Darkest", 20, 20, "#1a1a1a", "white"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.monitors.len(), 2);
        assert_eq!(config.features.len(), 7);
        assert_eq!(config.themes.len(), 5);
    }

    #[test]
    fn test_lookups() {
        let config = AppConfig::default();
        assert_eq!(config.monitor("Primary Monitor").unwrap().device_id, "Primary");
        assert_eq!(
            config.feature("Brightness (0-100)").unwrap().code.as_str(),
            "10"
        );
        assert_eq!(config.feature_by_code("12").unwrap().name, "Contrast (0-100)");
        assert_eq!(config.theme("Darkest").unwrap().brightness, 20);
        assert!(config.monitor("Third Monitor").is_none());
    }

    #[test]
    fn test_themes_ordered_lightest_to_darkest() {
        let config = AppConfig::default();
        let names: Vec<_> = config.themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Lightest", "Light", "Medium", "Dark", "Darkest"]);
    }

    #[test]
    fn test_short_name() {
        let config = AppConfig::default();
        assert_eq!(config.feature("Brightness (0-100)").unwrap().short_name(), "Brightness");
        assert_eq!(config.feature("Input Select").unwrap().short_name(), "Input");
    }

    #[test]
    fn test_validate_rejects_empty_device_id() {
        let mut config = AppConfig::default();
        config.monitors[0].device_id.clear();
        assert!(matches!(
            config.validate(),
            Err(VcpTuneError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut config = AppConfig::default();
        config.features[0].min = 80;
        config.features[0].max = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_theme_out_of_range() {
        let mut config = AppConfig::default();
        config.themes[0].brightness = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_theme_features() {
        let mut config = AppConfig::default();
        config.features.retain(|f| f.code.as_str() != "12");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.tool_path, deserialized.tool_path);
        assert_eq!(config.features.len(), deserialized.features.len());
        assert_eq!(config.themes[4].name, deserialized.themes[4].name);
    }
}
