//! Asynchronous image loading for backgrounds and undo redraws.
//!
//! Decoding happens on a tokio runtime so the input path never waits on it.
//! Each request hands back a single-shot receiver; the pad polls or awaits
//! it and paints the image once it resolves.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use cairo::{Format, ImageSurface};
use tokio::sync::oneshot;

use crate::error::{PadError, PadResult};

/// Straight-alpha RGBA pixels decoded from an encoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Decodes PNG or JPEG bytes.
    pub fn from_bytes(bytes: &[u8]) -> PadResult<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    /// Converts to a Cairo surface (premultiplied native-endian ARGB).
    pub fn to_surface(&self) -> PadResult<ImageSurface> {
        let width = self.width as i32;
        let height = self.height as i32;
        let stride = Format::ARgb32.stride_for_width(self.width)?;
        let mut data = vec![0u8; stride as usize * self.height as usize];

        for (y, row) in self.rgba.chunks_exact(self.width as usize * 4).enumerate() {
            let out_row = &mut data[y * stride as usize..];
            for (x, px) in row.chunks_exact(4).enumerate() {
                let a = px[3] as u32;
                let premul = |c: u8| (c as u32 * a + 127) / 255;
                let argb = (a << 24) | (premul(px[0]) << 16) | (premul(px[1]) << 8) | premul(px[2]);
                out_row[x * 4..x * 4 + 4].copy_from_slice(&argb.to_ne_bytes());
            }
        }

        Ok(ImageSurface::create_for_data(
            data,
            Format::ARgb32,
            width,
            height,
            stride,
        )?)
    }
}

/// Splits a `data:` URL and decodes its base64 payload.
pub fn parse_data_url(url: &str) -> PadResult<Vec<u8>> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| PadError::DataUrl("missing data: prefix".to_string()))?;
    let (metadata, payload) = rest
        .split_once(',')
        .ok_or_else(|| PadError::DataUrl("missing comma".to_string()))?;
    if !metadata.ends_with(";base64") {
        return Err(PadError::DataUrl(format!(
            "only base64 payloads are supported (got '{metadata}')"
        )));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| PadError::DataUrl(format!("invalid base64: {e}")))
}

/// Builds a base64 `data:` URL for the given MIME type.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{mime};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Fetches encoded image bytes by source reference.
///
/// `data:` URLs never reach the source; the decoder resolves them itself.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, src: &str) -> PadResult<Vec<u8>>;
}

/// Loads images from the local filesystem.
///
/// Relative paths and `file://` URLs resolve against `root` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FileImageSource {
    root: Option<PathBuf>,
}

impl FileImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, src: &str) -> PathBuf {
        let path = PathBuf::from(src.strip_prefix("file://").unwrap_or(src));
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path,
        }
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    async fn fetch(&self, src: &str) -> PadResult<Vec<u8>> {
        let path = self.resolve(src);
        log::debug!("Reading image from {}", path.display());
        Ok(tokio::fs::read(&path).await?)
    }
}

/// Receiver side of a decode request.
pub type DecodeReceiver = oneshot::Receiver<PadResult<DecodedImage>>;

/// Spawns decode jobs on a runtime and reports each result over a oneshot.
#[derive(Clone)]
pub struct ImageDecoder {
    runtime: tokio::runtime::Handle,
    source: Arc<dyn ImageSource>,
}

impl ImageDecoder {
    pub fn new(runtime: tokio::runtime::Handle, source: Arc<dyn ImageSource>) -> Self {
        Self { runtime, source }
    }

    /// Starts loading `src` and returns the channel its result arrives on.
    pub fn request(&self, src: String) -> DecodeReceiver {
        let (tx, rx) = oneshot::channel();
        let source = self.source.clone();

        self.runtime.spawn(async move {
            let bytes = if src.starts_with("data:") {
                parse_data_url(&src)
            } else {
                source.fetch(&src).await
            };
            let result = match bytes {
                Ok(bytes) => tokio::task::spawn_blocking(move || DecodedImage::from_bytes(&bytes))
                    .await
                    .unwrap_or(Err(PadError::DecodeCancelled)),
                Err(err) => Err(err),
            };
            // The pad may have been dropped meanwhile
            let _ = tx.send(result);
        });

        rx
    }
}
