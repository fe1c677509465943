//! Cairo-based rendering functions for strokes and pad backgrounds.

use super::color::Color;
use crate::util::Point;

/// Renders a single pen segment.
///
/// The segment uses round caps and joins so consecutive segments of
/// different widths blend into one continuous stroke. A segment whose end
/// points coincide renders as a dot.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `from` - Previous sample point
/// * `to` - Current sample point
/// * `width` - Line width in surface units
/// * `color` - Pen color
pub fn render_segment(ctx: &cairo::Context, from: Point, to: Point, width: f64, color: Color) {
    ctx.new_path();
    color.apply(ctx);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(from.x as f64, from.y as f64);
    ctx.line_to(to.x as f64, to.y as f64);
    let _ = ctx.stroke(); // A failed stroke leaves the surface unchanged
}

/// Fills the pad area with its background color.
///
/// Transparent backgrounds are skipped so the wiped surface stays clear.
pub fn render_background(ctx: &cairo::Context, width: f64, height: f64, color: Color) {
    if color.a <= 0.0 {
        return;
    }
    color.apply(ctx);
    ctx.rectangle(0.0, 0.0, width, height);
    let _ = ctx.fill();
}

/// Resets the given area to fully transparent pixels.
pub fn clear_area(ctx: &cairo::Context, width: f64, height: f64) {
    ctx.save().ok();
    ctx.set_operator(cairo::Operator::Clear);
    ctx.rectangle(0.0, 0.0, width, height);
    let _ = ctx.fill();
    ctx.restore().ok();
}

/// Paints an image with its top-left corner at `(x, y)`.
///
/// When `size` is given the image is scaled to exactly that width and height,
/// otherwise it is drawn at its natural size.
pub fn render_image(
    ctx: &cairo::Context,
    image: &cairo::ImageSurface,
    x: f64,
    y: f64,
    size: Option<(f64, f64)>,
) {
    let (img_w, img_h) = (image.width() as f64, image.height() as f64);
    if img_w <= 0.0 || img_h <= 0.0 {
        return;
    }

    ctx.save().ok();
    ctx.translate(x, y);
    if let Some((w, h)) = size {
        ctx.scale(w / img_w, h / img_h);
    }
    if ctx.set_source_surface(image, 0.0, 0.0).is_ok() {
        ctx.rectangle(0.0, 0.0, img_w, img_h);
        let _ = ctx.fill();
    }
    ctx.restore().ok();
}
