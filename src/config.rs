//! Picker and lookup configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::HslColor;
use crate::error::{Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Largest accepted raster side, in pixels.
pub const MAX_RASTER_SIDE: u32 = 4096;

/// Top-level configuration for [`crate::hsl_picker_with_config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Color shown when the picker mounts.
    pub initial: HslColor,
    /// Raster side of the color wheel, in pixels.
    pub wheel_size: u32,
    pub slider_width: u32,
    pub slider_height: u32,
    /// How long a copy button shows its confirmation.
    pub copy_feedback_ms: u64,
    pub lookup: LookupConfig,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            initial: HslColor::default(),
            wheel_size: 250,
            slider_width: 250,
            slider_height: 25,
            copy_feedback_ms: 2000,
            lookup: LookupConfig::default(),
        }
    }
}

impl PickerConfig {
    /// Parse from a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.wheel_size == 0 {
            return Err(Error::Config("wheel_size must be positive".into()));
        }
        if self.slider_width == 0 || self.slider_height == 0 {
            return Err(Error::Config("slider dimensions must be positive".into()));
        }
        if [self.wheel_size, self.slider_width, self.slider_height]
            .iter()
            .any(|&side| side > MAX_RASTER_SIDE)
        {
            return Err(Error::Config(format!(
                "raster sizes must not exceed {MAX_RASTER_SIDE}px"
            )));
        }
        Ok(())
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

/// Settings for the Pantone name lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub enabled: bool,
    /// Base URL of the generative language REST API.
    pub endpoint: String,
    pub model: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Quiet period after the last color change before a lookup fires.
    pub debounce_ms: u64,
    pub timeout_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            debounce_ms: 800,
            timeout_ms: 15_000,
        }
    }
}

impl LookupConfig {
    /// Defaults overlaid with `API_KEY` (or `GEMINI_API_KEY`),
    /// `PANTONE_LOOKUP_MODEL` and `PANTONE_LOOKUP_ENDPOINT`.
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    fn with_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_empty("API_KEY").or_else(|| non_empty("GEMINI_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(model) = non_empty("PANTONE_LOOKUP_MODEL") {
            self.model = model;
        }
        if let Some(endpoint) = non_empty("PANTONE_LOOKUP_ENDPOINT") {
            self.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        self
    }

    /// Lookup runs only when enabled and a key is present.
    pub fn is_active(&self) -> bool {
        self.enabled && self.api_key.is_some()
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.wheel_size, 250);
        assert_eq!(config.copy_feedback(), Duration::from_millis(2000));
        assert_eq!(config.lookup.debounce(), Duration::from_millis(800));
        assert!(!config.lookup.is_active());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = PickerConfig::from_json(
            r#"{"wheel_size": 300, "initial": {"hue": 400, "saturation": 50, "lightness": 40}}"#,
        )
        .unwrap();
        assert_eq!(config.wheel_size, 300);
        assert_eq!(config.slider_height, 25);
        assert_eq!(config.initial.hue(), 40.0);
        assert_eq!(config.lookup.model, DEFAULT_MODEL);
    }

    #[test]
    fn rejects_zero_sizes() {
        assert!(matches!(
            PickerConfig::from_json(r#"{"wheel_size": 0}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            PickerConfig::from_json("not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn rejects_oversized_rasters() {
        assert!(matches!(
            PickerConfig::from_json(r#"{"wheel_size": 40000}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            PickerConfig::from_json(r#"{"slider_width": 4097}"#),
            Err(Error::Config(_))
        ));
        let largest = PickerConfig::from_json(r#"{"wheel_size": 4096, "slider_height": 4096}"#)
            .expect("limit is inclusive");
        assert_eq!(largest.wheel_size, MAX_RASTER_SIDE);
    }

    #[test]
    fn env_overlay() {
        let env = |key: &str| match key {
            "GEMINI_API_KEY" => Some("secret".to_string()),
            "API_KEY" => Some("  ".to_string()),
            "PANTONE_LOOKUP_ENDPOINT" => Some("http://localhost:9000/".to_string()),
            _ => None,
        };
        let config = LookupConfig::default().with_env(env);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.endpoint, "http://localhost:9000");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.is_active());
    }
}
