//! Configuration enum types.

use crate::draw::{Color, color::BLACK};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a name, a hex string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// color = "black"
///
/// # CSS hex notation
/// background_color = "#fff"
///
/// # Custom RGB color (0-255 per component)
/// color = [0, 32, 96]  # Navy ink
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, white, black, transparent) or `#rgb` / `#rrggbb` / `#rrggbbaa`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Hex strings are parsed directly, other strings are looked up with
    /// `util::name_to_color()`. Unrecognized values fall back to black with a
    /// warning, matching how an unknown ink color renders.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => {
                let parsed = if name.starts_with('#') {
                    Color::from_hex(name)
                } else {
                    crate::util::name_to_color(name)
                };
                parsed.unwrap_or_else(|| {
                    warn!("Unknown color '{}', using black", name);
                    BLACK
                })
            }
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }

    /// Returns true if the color resolves without falling back.
    pub fn is_valid(&self) -> bool {
        match self {
            ColorSpec::Name(name) if name.starts_with('#') => Color::from_hex(name).is_some(),
            ColorSpec::Name(name) => crate::util::name_to_color(name).is_some(),
            ColorSpec::Rgb(_) => true,
        }
    }
}
