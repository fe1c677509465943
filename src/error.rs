//! Error types shared by the pad and its collaborators.

use thiserror::Error;

/// Result alias used throughout the library.
pub type PadResult<T> = Result<T, PadError>;

/// Errors raised while constructing or operating a signature pad.
///
/// Construction errors are fatal. Runtime failures (background image loads,
/// undo redraws) are logged and tolerated by the pad rather than surfaced.
#[derive(Debug, Error)]
pub enum PadError {
    #[error("No container surface supplied; the pad needs a host to bind to")]
    MissingContainer,

    #[error("Invalid pad configuration: {0}")]
    InvalidConfig(String),

    #[error("Cairo surface error: {0}")]
    Surface(#[from] cairo::Error),

    #[error("PNG stream error: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Surface data is still borrowed: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Malformed data URL: {0}")]
    DataUrl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No tokio runtime available to decode images on")]
    NoRuntime,

    #[error("Image decode was dropped before completing")]
    DecodeCancelled,
}
