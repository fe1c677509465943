//! Encoding the pad surface into image files.

use std::fmt::Write as _;
use std::io::Cursor;

use cairo::ImageSurface;
use chrono::Local;
use image::ImageEncoder;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PadResult;
use crate::image_source::encode_data_url;

/// Quality used for lossy formats when the caller gives none.
pub const DEFAULT_QUALITY: f64 = 0.92;

/// Output encoding for [`encode_surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossless PNG with alpha
    #[default]
    Png,
    /// JPEG; transparent pixels are flattened onto white
    Jpeg,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// Resolves a MIME type or file extension.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "png" | "image/png" => Some(Self::Png),
            "jpg" | "jpeg" | "image/jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }
}

/// Encodes a surface. `quality` (0.0 - 1.0) only affects lossy formats.
pub fn encode_surface(
    surface: &mut ImageSurface,
    format: ImageFormat,
    quality: Option<f64>,
) -> PadResult<Vec<u8>> {
    match format {
        ImageFormat::Png => {
            let mut buf = Vec::new();
            surface.write_to_png(&mut buf)?;
            Ok(buf)
        }
        ImageFormat::Jpeg => {
            let width = surface.width() as u32;
            let height = surface.height() as u32;
            let rgb = flatten_to_rgb(surface)?;

            let quality = quality
                .filter(|q| (0.0..=1.0).contains(q))
                .unwrap_or(DEFAULT_QUALITY);
            let jpeg_quality = ((quality * 100.0).round() as u8).max(1);

            let mut buf = Cursor::new(Vec::new());
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, jpeg_quality);
            encoder.write_image(&rgb, width, height, image::ExtendedColorType::Rgb8)?;
            Ok(buf.into_inner())
        }
    }
}

/// Encodes a surface as a `data:` URL.
pub fn surface_data_url(
    surface: &mut ImageSurface,
    format: ImageFormat,
    quality: Option<f64>,
) -> PadResult<String> {
    let bytes = encode_surface(surface, format, quality)?;
    Ok(encode_data_url(format.mime_type(), &bytes))
}

/// Generates a filename from a chrono template and the current local time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - Output format providing the extension
///
/// Templates chrono cannot format fall back to `signature`.
pub fn generate_filename(template: &str, format: ImageFormat) -> String {
    let now = Local::now();
    let mut filename = String::new();
    if write!(filename, "{}", now.format(template)).is_err() || filename.is_empty() {
        log::warn!("Unusable filename template '{}', using 'signature'", template);
        filename = "signature".to_string();
    }
    format!("{}.{}", filename, format.extension())
}

/// Composites premultiplied ARGB pixels over white into packed RGB.
fn flatten_to_rgb(surface: &mut ImageSurface) -> PadResult<Vec<u8>> {
    surface.flush();
    let width = surface.width() as usize;
    let height = surface.height() as usize;
    let stride = surface.stride() as usize;
    let data = surface.data()?;

    let mut rgb = Vec::with_capacity(width * height * 3);
    for row in data.chunks(stride).take(height) {
        for px in row[..width * 4].chunks_exact(4) {
            let argb = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
            let inv_alpha = 255 - (argb >> 24);
            for shift in [16, 8, 0] {
                let channel = (argb >> shift) & 0xff;
                rgb.push((channel + inv_alpha).min(255) as u8);
            }
        }
    }
    Ok(rgb)
}
