//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::export::ImageFormat;
use crate::input::Orientation;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pen appearance and width bounds.
///
/// The pen starts each stroke at `default_width`, then thickens towards
/// `max_width` while the writer slows down and thins towards `min_width`
/// while they speed up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PenConfig {
    /// Ink color - a named color, a hex string like `"#1a1a80"`, or an RGB array
    #[serde(default = "default_pen_color")]
    pub color: ColorSpec,

    /// Width each stroke starts with (clamped into `min_width..=max_width`)
    #[serde(default = "default_pen_width")]
    pub default_width: f64,

    /// Thinnest line width (valid range: 0.1 - 100.0)
    #[serde(default = "default_min_width")]
    pub min_width: f64,

    /// Thickest line width, must exceed `min_width`
    #[serde(default = "default_max_width")]
    pub max_width: f64,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            color: default_pen_color(),
            default_width: default_pen_width(),
            min_width: default_min_width(),
            max_width: default_max_width(),
        }
    }
}

/// Image painted over the background color when the pad is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BackgroundImageConfig {
    /// File path, `file://` URL or `data:` URL
    pub src: String,
    /// Left edge in pad units
    #[serde(default)]
    pub x: f64,
    /// Top edge in pad units
    #[serde(default)]
    pub y: f64,
}

/// Pad surface settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Pad width in logical pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_width")]
    pub width: f64,

    /// Pad height in logical pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_height")]
    pub height: f64,

    /// Background fill; use "transparent" to export with alpha
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,

    /// Optional image drawn on top of the background fill
    #[serde(default)]
    pub background_image: Option<BackgroundImageConfig>,

    /// Rotation of the displayed pad in degrees (0, 90, -90, 180, -180)
    #[serde(default)]
    pub rotate: i32,

    /// Swap width and height of the backing surface. When set, `rotate` is ignored.
    #[serde(default)]
    pub vertical: Option<bool>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background_color: default_background_color(),
            background_image: None,
            rotate: 0,
            vertical: None,
        }
    }
}

impl CanvasConfig {
    /// Orientation selected by `rotate` / `vertical`.
    pub fn orientation(&self) -> Orientation {
        match self.vertical {
            Some(vertical) => Orientation::AxisSwap { vertical },
            None => Orientation::Rotation(self.rotate),
        }
    }
}

/// Input sampling settings.
///
/// Most users won't need to change these; they trade smoothness against how
/// eagerly the width reacts to speed changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SamplingConfig {
    /// Minimum time between rendered samples in milliseconds (valid range: 1 - 1000)
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,

    /// Travel per sample below which the pen thickens
    #[serde(default = "default_min_distance")]
    pub min_distance: f64,

    /// Expected worst-case travel per sample; bounds how fast the pen thins
    #[serde(default = "default_max_distance")]
    pub max_distance: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            throttle_ms: default_throttle_ms(),
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
        }
    }
}

/// Export defaults used by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Output format (png or jpeg)
    #[serde(default)]
    pub format: ImageFormat,

    /// Lossy quality between 0.0 and 1.0
    #[serde(default = "default_quality")]
    pub quality: f64,

    /// Filename template for exports without an explicit path (chrono format specifiers)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ImageFormat::default(),
            quality: default_quality(),
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_pen_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_pen_width() -> f64 {
    3.0
}

fn default_min_width() -> f64 {
    1.0
}

fn default_max_width() -> f64 {
    4.0
}

fn default_canvas_width() -> f64 {
    400.0
}

fn default_canvas_height() -> f64 {
    200.0
}

fn default_background_color() -> ColorSpec {
    ColorSpec::Name("#fff".to_string())
}

fn default_throttle_ms() -> u64 {
    16
}

fn default_min_distance() -> f64 {
    crate::input::width::DEFAULT_MIN_DISTANCE
}

fn default_max_distance() -> f64 {
    crate::input::width::DEFAULT_MAX_DISTANCE
}

fn default_quality() -> f64 {
    crate::export::DEFAULT_QUALITY
}

fn default_filename_template() -> String {
    "signature_%Y-%m-%d_%H%M%S".to_string()
}
