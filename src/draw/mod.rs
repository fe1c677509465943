//! Rendering primitives for the signature surface (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Canvas`]: The pad's backing surface with pixel-ratio scaling
//! - Rendering functions for stroke segments, backgrounds, and images

pub mod canvas;
pub mod color;
pub mod render;

// Re-export commonly used types at module level
pub use canvas::Canvas;
pub use color::Color;
pub use render::{clear_area, render_background, render_image, render_segment};
