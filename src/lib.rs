//! Library exports for the sigpad signature capture pad.
//!
//! The pad converts a raw stream of pointer positions into smoothed,
//! variable-width strokes on a Cairo surface. The modules are layered:
//! input normalization and sampling live in [`input`], rasterization in
//! [`draw`], undo snapshots in [`history`], and [`pad`] ties them together
//! behind a single facade.

pub mod config;
pub mod draw;
pub mod error;
pub mod export;
pub mod history;
pub mod image_source;
pub mod input;
pub mod pad;
pub mod replay;
pub mod util;

pub use config::Config;
pub use error::{PadError, PadResult};
pub use pad::{PadBuilder, SignaturePad};
