use std::time::{Duration, Instant};

use cairo::{Context, ImageSurface};
use sigpad::draw::color::{BLACK, BLUE, TRANSPARENT};
use sigpad::draw::{render_background, render_segment};
use sigpad::input::{Phase, PointerInput, RawInput};
use sigpad::pad::{FixedHost, PadBuilder, SignaturePad};
use sigpad::util::Point;

fn surface_with_context(width: i32, height: i32) -> (ImageSurface, Context) {
    let surface = ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    let ctx = Context::new(&surface).unwrap();
    (surface, ctx)
}

fn surface_has_pixels(surface: &mut ImageSurface) -> bool {
    surface
        .data()
        .map(|data| data.iter().any(|byte| *byte != 0))
        .unwrap_or(false)
}

fn alpha_at(surface: &mut ImageSurface, x: i32, y: i32) -> u8 {
    let stride = surface.stride();
    let data = surface.data().unwrap();
    let offset = (y * stride + x * 4) as usize;
    let argb = u32::from_ne_bytes(data[offset..offset + 4].try_into().unwrap());
    (argb >> 24) as u8
}

fn mouse(phase: Phase, x: f64, y: f64, at: Instant) -> RawInput {
    RawInput::Mouse(PointerInput {
        phase,
        client_x: x,
        client_y: y,
        at,
    })
}

fn stroke(pad: &mut SignaturePad, points: &[(f64, f64)]) {
    let t0 = Instant::now();
    let (first, rest) = points.split_first().unwrap();
    pad.handle_input(mouse(Phase::Down, first.0, first.1, t0))
        .unwrap();
    for (i, (x, y)) in rest.iter().enumerate() {
        let at = t0 + Duration::from_millis(20 * (i as u64 + 1));
        pad.handle_input(mouse(Phase::Move, *x, *y, at)).unwrap();
    }
    let last = points[points.len() - 1];
    pad.handle_input(mouse(Phase::Up, last.0, last.1, t0 + Duration::from_secs(1)))
        .unwrap();
}

#[test]
fn segment_renders_pixels() {
    let (mut surface, ctx) = surface_with_context(100, 100);
    render_segment(&ctx, Point::new(10, 10), Point::new(90, 90), 3.0, BLACK);
    drop(ctx);
    assert!(surface_has_pixels(&mut surface));
    assert!(alpha_at(&mut surface, 50, 50) > 0);
}

#[test]
fn zero_length_segment_renders_a_dot() {
    let (mut surface, ctx) = surface_with_context(20, 20);
    render_segment(&ctx, Point::new(10, 10), Point::new(10, 10), 4.0, BLACK);
    drop(ctx);
    assert!(alpha_at(&mut surface, 10, 10) > 0);
    assert_eq!(alpha_at(&mut surface, 2, 2), 0);
}

#[test]
fn transparent_background_leaves_surface_clear() {
    let (mut surface, ctx) = surface_with_context(20, 20);
    render_background(&ctx, 20.0, 20.0, TRANSPARENT);
    drop(ctx);
    assert!(!surface_has_pixels(&mut surface));
}

#[tokio::test]
async fn pen_color_and_background_come_from_builder() {
    let mut pad = PadBuilder::new()
        .host(FixedHost::at_origin(200.0, 100.0))
        .size(200.0, 100.0)
        .pen_color(BLUE)
        .background_color(TRANSPARENT)
        .build()
        .unwrap();

    stroke(&mut pad, &[(20.0, 50.0), (180.0, 50.0)]);

    let mut surface = pad.canvas().upright().unwrap();
    assert_eq!(alpha_at(&mut surface, 5, 5), 0);
    assert_eq!(alpha_at(&mut surface, 100, 50), 255);
}

#[tokio::test]
async fn rotated_pad_maps_client_motion() {
    // Displayed rotated by -90 degrees: client y runs along surface x
    let mut pad = PadBuilder::new()
        .host(FixedHost::at_origin(200.0, 400.0))
        .rotation(-90)
        .background_color(TRANSPARENT)
        .build()
        .unwrap();

    stroke(&mut pad, &[(50.0, 100.0), (100.0, 100.0)]);

    let mut surface = pad.canvas().upright().unwrap();
    assert!(alpha_at(&mut surface, 300, 75) > 0);
    assert_eq!(alpha_at(&mut surface, 75, 100), 0);
    assert_eq!(pad.history().len(), 1);
}

#[tokio::test]
async fn unsupported_rotation_maps_offset_only() {
    let mut pad = PadBuilder::new()
        .host(FixedHost::at_origin(400.0, 200.0))
        .rotation(45)
        .background_color(TRANSPARENT)
        .build()
        .unwrap();

    stroke(&mut pad, &[(50.0, 100.0), (100.0, 100.0)]);

    let mut surface = pad.canvas().upright().unwrap();
    assert!(alpha_at(&mut surface, 75, 100) > 0);
    assert_eq!(alpha_at(&mut surface, 300, 75), 0);
}
