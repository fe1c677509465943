//! Configuration file support for sigpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sigpad/config.toml`. Settings include pen appearance, pad size
//! and orientation, input sampling, and export defaults.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{BackgroundImageConfig, CanvasConfig, ExportConfig, PenConfig, SamplingConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;


/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [pen]
/// color = "#1a1a80"
/// min_width = 0.5
/// max_width = 3.0
///
/// [canvas]
/// width = 600
/// height = 240
/// background_color = "transparent"
/// rotate = -90
///
/// [sampling]
/// throttle_ms = 16
///
/// [export]
/// format = "jpeg"
/// quality = 0.8
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Pen color and width bounds
    #[serde(default)]
    pub pen: PenConfig,

    /// Pad size, background and orientation
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Input sampling and width modulation tuning
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Export format defaults
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// This method ensures that user-provided config values won't produce a pad that
    /// fails to build. Invalid values are clamped to the nearest valid value and a
    /// warning is logged.
    ///
    /// Validated ranges:
    /// - `pen.min_width`: 0.1 - 100.0
    /// - `pen.max_width`: above `min_width`, at most 200.0
    /// - `canvas.width` / `canvas.height`: 1 - 8192
    /// - `sampling.throttle_ms`: 1 - 1000
    /// - `sampling.min_distance` / `max_distance`: positive
    /// - `export.quality`: 0.0 - 1.0
    pub fn validate_and_clamp(&mut self) {
        // Min width: 0.1 - 100.0
        if !(0.1..=100.0).contains(&self.pen.min_width) {
            log::warn!(
                "Invalid min_width {:.2}, clamping to 0.1-100.0 range",
                self.pen.min_width
            );
            self.pen.min_width = if self.pen.min_width.is_nan() {
                1.0
            } else {
                self.pen.min_width.clamp(0.1, 100.0)
            };
        }

        // Max width must leave room for the pen to grow
        if !(self.pen.max_width > self.pen.min_width && self.pen.max_width <= 200.0) {
            let fallback = (self.pen.min_width * 4.0).min(200.0);
            log::warn!(
                "Invalid max_width {:.2} (min_width {:.2}), using {:.2}",
                self.pen.max_width,
                self.pen.min_width,
                fallback
            );
            self.pen.max_width = fallback;
        }

        if !(self.pen.min_width..=self.pen.max_width).contains(&self.pen.default_width) {
            log::warn!(
                "Invalid default_width {:.2}, clamping to {:.2}-{:.2} range",
                self.pen.default_width,
                self.pen.min_width,
                self.pen.max_width
            );
            self.pen.default_width = if self.pen.default_width.is_nan() {
                self.pen.min_width
            } else {
                self.pen
                    .default_width
                    .clamp(self.pen.min_width, self.pen.max_width)
            };
        }

        // Pad size: 1 - 8192
        for (label, value, fallback) in [
            ("width", &mut self.canvas.width, 400.0),
            ("height", &mut self.canvas.height, 200.0),
        ] {
            if !(1.0..=8192.0).contains(&*value) {
                log::warn!("Invalid canvas {} {:.1}, clamping to 1-8192 range", label, value);
                *value = if value.is_nan() {
                    fallback
                } else {
                    value.clamp(1.0, 8192.0)
                };
            }
        }

        if !matches!(self.canvas.rotate, 0 | 90 | -90 | 180 | -180) && self.canvas.vertical.is_none()
        {
            log::warn!(
                "Unsupported rotate {}°, input will be mapped without rotation",
                self.canvas.rotate
            );
        }

        for (label, spec) in [
            ("pen color", &self.pen.color),
            ("background_color", &self.canvas.background_color),
        ] {
            if !spec.is_valid() {
                log::warn!("Invalid {} {:?}, it will render as black", label, spec);
            }
        }

        // Throttle: 1 - 1000 ms
        if !(1..=1000).contains(&self.sampling.throttle_ms) {
            log::warn!(
                "Invalid throttle_ms {}, clamping to 1-1000 range",
                self.sampling.throttle_ms
            );
            self.sampling.throttle_ms = self.sampling.throttle_ms.clamp(1, 1000);
        }

        if !(self.sampling.min_distance > 0.0 && self.sampling.min_distance.is_finite()) {
            log::warn!(
                "Invalid min_distance {:.1}, falling back to {:.1}",
                self.sampling.min_distance,
                crate::input::width::DEFAULT_MIN_DISTANCE
            );
            self.sampling.min_distance = crate::input::width::DEFAULT_MIN_DISTANCE;
        }

        if !(self.sampling.max_distance > 0.0 && self.sampling.max_distance.is_finite()) {
            log::warn!(
                "Invalid max_distance {:.1}, falling back to {:.1}",
                self.sampling.max_distance,
                crate::input::width::DEFAULT_MAX_DISTANCE
            );
            self.sampling.max_distance = crate::input::width::DEFAULT_MAX_DISTANCE;
        }

        // Quality: 0.0 - 1.0
        if !(0.0..=1.0).contains(&self.export.quality) {
            log::warn!(
                "Invalid export quality {:.2}, falling back to {:.2}",
                self.export.quality,
                crate::export::DEFAULT_QUALITY
            );
            self.export.quality = crate::export::DEFAULT_QUALITY;
        }
    }

    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.sampling.throttle_ms)
    }

    /// Returns the JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sigpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sigpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// Attempts to read and parse the config file at `~/.config/sigpad/config.toml`.
    /// If the file doesn't exist, returns a Config with default values. All loaded values
    /// are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates the configuration at an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error here.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }
}
