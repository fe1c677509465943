//! Backing raster surface for the pad.

use std::f64::consts::FRAC_PI_2;

use cairo::{Context, Format, ImageSurface};

use super::color::Color;
use super::render;
use crate::error::{PadError, PadResult};
use crate::input::Segment;

/// The pad's pixel buffer plus the transforms needed to draw into it.
///
/// Drawing happens in logical units; the surface itself is allocated at
/// `pixel_ratio` times that size. When `swapped` is set the surface stores
/// the pad with width and height exchanged (the pad is shown rotated on the
/// physical input area) and [`Canvas::upright`] turns it back for export.
pub struct Canvas {
    surface: ImageSurface,
    width: f64,
    height: f64,
    pixel_ratio: f64,
    swapped: bool,
}

impl Canvas {
    /// Allocates a cleared canvas for a `width` x `height` pad.
    pub fn new(width: f64, height: f64, pixel_ratio: f64, swapped: bool) -> PadResult<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(PadError::InvalidConfig(format!(
                "pad size must be positive, got {width}x{height}"
            )));
        }
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };

        let (draw_w, draw_h) = if swapped {
            (height, width)
        } else {
            (width, height)
        };
        let surface = ImageSurface::create(
            Format::ARgb32,
            (draw_w * pixel_ratio).round() as i32,
            (draw_h * pixel_ratio).round() as i32,
        )?;

        Ok(Self {
            surface,
            width,
            height,
            pixel_ratio,
            swapped,
        })
    }

    /// Logical pad size as configured (upright).
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Logical extent of the drawing coordinate space.
    pub fn drawing_size(&self) -> (f64, f64) {
        if self.swapped {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn pixel_size(&self) -> (i32, i32) {
        (self.surface.width(), self.surface.height())
    }

    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    /// Returns a context in logical units.
    pub fn context(&self) -> PadResult<Context> {
        let ctx = Context::new(&self.surface)?;
        ctx.scale(self.pixel_ratio, self.pixel_ratio);
        Ok(ctx)
    }

    pub fn draw_segment(&self, segment: &Segment, color: Color) -> PadResult<()> {
        let ctx = self.context()?;
        render::render_segment(&ctx, segment.from, segment.to, segment.width, color);
        Ok(())
    }

    /// Erases every pixel.
    pub fn wipe(&self) -> PadResult<()> {
        let ctx = self.context()?;
        let (w, h) = self.drawing_size();
        render::clear_area(&ctx, w, h);
        Ok(())
    }

    pub fn fill_background(&self, color: Color) -> PadResult<()> {
        let ctx = self.context()?;
        let (w, h) = self.drawing_size();
        render::render_background(&ctx, w, h, color);
        Ok(())
    }

    /// Paints an image at its natural size with its corner at `(x, y)`.
    pub fn paint_image(&self, image: &ImageSurface, x: f64, y: f64) -> PadResult<()> {
        let ctx = self.context()?;
        render::render_image(&ctx, image, x, y, None);
        Ok(())
    }

    /// Paints an upright snapshot so that it fills the whole pad.
    ///
    /// On swapped canvases the snapshot is rotated back into storage layout.
    pub fn paint_snapshot(&self, image: &ImageSurface) -> PadResult<()> {
        let ctx = self.context()?;
        if self.swapped {
            ctx.translate(self.height, 0.0);
            ctx.rotate(FRAC_PI_2);
        }
        render::render_image(&ctx, image, 0.0, 0.0, Some((self.width, self.height)));
        Ok(())
    }

    /// Copies the canvas into a new surface in upright orientation.
    pub fn upright(&self) -> PadResult<ImageSurface> {
        let (px_w, px_h) = self.pixel_size();
        let (out_w, out_h) = if self.swapped {
            (px_h, px_w)
        } else {
            (px_w, px_h)
        };

        let out = ImageSurface::create(Format::ARgb32, out_w, out_h)?;
        {
            let ctx = Context::new(&out)?;
            if self.swapped {
                ctx.translate(0.0, out_h as f64);
                ctx.rotate(-FRAC_PI_2);
            }
            ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
            ctx.paint()?;
        }
        out.flush();
        Ok(out)
    }
}
