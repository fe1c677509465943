use super::*;
use crate::input::{HostCapabilities, PadEventKind, Phase, PointerInput, TouchInput, TouchPoint};
use crate::util::Bounds;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const WHITE_ARGB: u32 = 0xffff_ffff;
const BLACK_ARGB: u32 = 0xff00_0000;
const RED_ARGB: u32 = 0xffff_0000;

// 1x1 opaque red PNG
const RED_PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn mouse(phase: Phase, x: f64, y: f64, at: Instant) -> RawInput {
    RawInput::Mouse(PointerInput {
        phase,
        client_x: x,
        client_y: y,
        at,
    })
}

fn pad() -> SignaturePad {
    PadBuilder::new()
        .host(FixedHost::at_origin(400.0, 200.0))
        .build()
        .unwrap()
}

fn draw_stroke(pad: &mut SignaturePad, from: (f64, f64), to: (f64, f64), at: Instant) {
    pad.handle_input(mouse(Phase::Down, from.0, from.1, at)).unwrap();
    pad.handle_input(mouse(Phase::Move, to.0, to.1, at)).unwrap();
    pad.handle_input(mouse(Phase::Up, to.0, to.1, at + ms(1)))
        .unwrap();
}

fn upright_pixels(pad: &SignaturePad) -> (i32, Vec<u8>) {
    let mut surface = pad.canvas().upright().unwrap();
    let stride = surface.stride();
    let data = surface.data().unwrap().to_vec();
    (stride, data)
}

fn pixel(pad: &SignaturePad, x: i32, y: i32) -> u32 {
    let (stride, data) = upright_pixels(pad);
    let offset = (y * stride + x * 4) as usize;
    u32::from_ne_bytes(data[offset..offset + 4].try_into().unwrap())
}

#[tokio::test]
async fn build_requires_a_host() {
    let result = PadBuilder::new().build();
    assert!(matches!(result, Err(PadError::MissingContainer)));
}

#[tokio::test]
async fn build_rejects_inverted_width_bounds() {
    let result = PadBuilder::new()
        .host(FixedHost::at_origin(400.0, 200.0))
        .widths(4.0, 1.0, 2.0)
        .build();
    assert!(matches!(result, Err(PadError::InvalidConfig(_))));
}

#[test]
fn build_without_runtime_fails() {
    let result = PadBuilder::new()
        .host(FixedHost::at_origin(400.0, 200.0))
        .build();
    assert!(matches!(result, Err(PadError::NoRuntime)));
}

#[test]
fn build_accepts_explicit_runtime() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let pad = PadBuilder::new()
        .host(FixedHost::at_origin(400.0, 200.0))
        .runtime(runtime.handle().clone())
        .build()
        .unwrap();
    assert!(pad.is_empty());
}

#[tokio::test]
async fn new_pad_is_empty_and_shows_background() {
    let pad = pad();
    assert!(pad.is_empty());
    assert_eq!(pixel(&pad, 0, 0), WHITE_ARGB);
    assert_eq!(pixel(&pad, 399, 199), WHITE_ARGB);
    assert_eq!(pad.listeners(), Listeners::for_capabilities(HostCapabilities::default()));
}

#[tokio::test]
async fn width_grows_when_slow_and_shrinks_when_fast() {
    let mut pad = pad();
    let t0 = Instant::now();

    pad.handle_input(mouse(Phase::Down, 0.0, 0.0, t0)).unwrap();
    pad.handle_input(mouse(Phase::Move, 1.0, 1.0, t0)).unwrap();
    let slow = pad.input().current_width();
    assert!(slow > 3.0);

    pad.handle_input(mouse(Phase::Move, 400.0, 400.0, t0 + ms(20)))
        .unwrap();
    let fast = pad.input().current_width();
    assert!(fast < slow);

    pad.handle_input(mouse(Phase::Up, 400.0, 400.0, t0 + ms(30)))
        .unwrap();
    assert_eq!(pad.history().len(), 1);
    assert_eq!(pad.input().current_width(), 3.0);
}

#[tokio::test]
async fn callbacks_fire_once_per_stroke() {
    let begins = Rc::new(RefCell::new(0));
    let ends = Rc::new(RefCell::new(Vec::new()));
    let begins_seen = begins.clone();
    let ends_seen = ends.clone();

    let mut pad = PadBuilder::new()
        .host(FixedHost::at_origin(400.0, 200.0))
        .on_begin(move |_| *begins_seen.borrow_mut() += 1)
        .on_end(move |event| ends_seen.borrow_mut().push(event.kind))
        .build()
        .unwrap();

    let t0 = Instant::now();
    pad.handle_input(mouse(Phase::Down, 10.0, 10.0, t0)).unwrap();
    for step in 1..5 {
        let x = 10.0 + step as f64 * 10.0;
        pad.handle_input(mouse(Phase::Move, x, 10.0, t0 + ms(step * 20)))
            .unwrap();
    }
    pad.handle_input(mouse(Phase::Leave, 50.0, 10.0, t0 + ms(100)))
        .unwrap();
    // A second mouseup after leaving is deduplicated
    pad.handle_input(mouse(Phase::Up, 50.0, 10.0, t0 + ms(110)))
        .unwrap();

    assert_eq!(*begins.borrow(), 1);
    assert_eq!(*ends.borrow(), vec![PadEventKind::Leave]);
    assert_eq!(pad.history().len(), 1);
}

#[tokio::test]
async fn click_without_motion_ends_stroke_but_records_nothing() {
    let ends = Rc::new(RefCell::new(0));
    let ends_seen = ends.clone();
    let mut pad = PadBuilder::new()
        .host(FixedHost::at_origin(400.0, 200.0))
        .on_end(move |_| *ends_seen.borrow_mut() += 1)
        .build()
        .unwrap();

    let t0 = Instant::now();
    pad.handle_input(mouse(Phase::Down, 10.0, 10.0, t0)).unwrap();
    pad.handle_input(mouse(Phase::Up, 10.0, 10.0, t0 + ms(5)))
        .unwrap();

    assert_eq!(*ends.borrow(), 1);
    assert!(pad.is_empty());
}

#[tokio::test]
async fn stroke_renders_in_pen_color() {
    let mut pad = pad();
    draw_stroke(&mut pad, (50.0, 50.0), (100.0, 50.0), Instant::now());

    assert_eq!(pixel(&pad, 75, 50), BLACK_ARGB);
    assert_eq!(pixel(&pad, 75, 100), WHITE_ARGB);
}

#[tokio::test]
async fn tick_renders_held_back_sample() {
    let mut pad = pad();
    let t0 = Instant::now();

    pad.handle_input(mouse(Phase::Down, 10.0, 10.0, t0)).unwrap();
    pad.handle_input(mouse(Phase::Move, 20.0, 10.0, t0)).unwrap();
    pad.handle_input(mouse(Phase::Move, 30.0, 10.0, t0 + ms(5)))
        .unwrap();
    assert_eq!(pixel(&pad, 27, 10), WHITE_ARGB);

    pad.tick(t0 + ms(10)).unwrap();
    assert_eq!(pixel(&pad, 27, 10), WHITE_ARGB);

    pad.tick(t0 + ms(20)).unwrap();
    assert_eq!(pixel(&pad, 27, 10), BLACK_ARGB);
}

#[tokio::test]
async fn undo_n_times_empties_history_and_restores_background() {
    let mut pad = pad();
    let t0 = Instant::now();
    for i in 0..3 {
        let y = 40.0 + i as f64 * 50.0;
        draw_stroke(&mut pad, (50.0, y), (150.0, y), t0 + ms(i * 100));
    }
    assert_eq!(pad.history().len(), 3);

    for _ in 0..3 {
        pad.undo().unwrap();
        pad.settle().await.unwrap();
    }

    assert!(pad.is_empty());
    assert_eq!(pixel(&pad, 100, 40), WHITE_ARGB);
    assert_eq!(pixel(&pad, 100, 140), WHITE_ARGB);
}

#[tokio::test]
async fn undo_on_empty_history_is_a_no_op() {
    let mut pad = pad();
    pad.undo().unwrap();

    assert!(pad.is_empty());
    assert_eq!(pad.pending_draws(), 0);
    assert_eq!(pixel(&pad, 10, 10), WHITE_ARGB);
}

#[tokio::test]
async fn undo_redraws_previous_snapshot() {
    let mut pad = pad();
    let t0 = Instant::now();
    draw_stroke(&mut pad, (50.0, 50.0), (100.0, 50.0), t0);
    draw_stroke(&mut pad, (250.0, 150.0), (350.0, 150.0), t0 + ms(100));

    pad.undo().unwrap();
    assert_eq!(pad.pending_draws(), 1);
    pad.settle().await.unwrap();

    assert_eq!(pad.history().len(), 1);
    assert_eq!(pixel(&pad, 75, 50), BLACK_ARGB);
    assert_eq!(pixel(&pad, 300, 150), WHITE_ARGB);
}

#[tokio::test]
async fn full_clear_discards_history() {
    let mut pad = pad();
    draw_stroke(&mut pad, (50.0, 50.0), (100.0, 50.0), Instant::now());

    pad.clear(false).unwrap();

    assert!(pad.is_empty());
    assert_eq!(pixel(&pad, 75, 50), WHITE_ARGB);
}

#[tokio::test]
async fn preserving_clear_keeps_history_twice() {
    let mut pad = pad();
    draw_stroke(&mut pad, (50.0, 50.0), (100.0, 50.0), Instant::now());

    pad.clear(true).unwrap();
    pad.clear(true).unwrap();

    assert_eq!(pad.history().len(), 1);
    // Only pixels are wiped; the background comes back with the snapshot
    assert_eq!(pixel(&pad, 75, 50) >> 24, 0);
}

#[tokio::test]
async fn preserving_clear_on_empty_history_draws_background() {
    let mut pad = pad();
    pad.clear(true).unwrap();
    assert_eq!(pixel(&pad, 10, 10), WHITE_ARGB);
}

#[tokio::test]
async fn detached_pad_ignores_input_until_reattached() {
    let mut pad = pad();
    let t0 = Instant::now();

    pad.detach_listeners();
    assert!(!pad.listeners().is_attached());
    draw_stroke(&mut pad, (50.0, 50.0), (100.0, 50.0), t0);
    assert!(pad.is_empty());

    pad.attach_listeners();
    draw_stroke(&mut pad, (50.0, 50.0), (100.0, 50.0), t0 + ms(100));
    assert_eq!(pad.history().len(), 1);
}

#[tokio::test]
async fn pointer_host_ignores_legacy_mouse_events() {
    let host = FixedHost::at_origin(400.0, 200.0).with_capabilities(HostCapabilities {
        pointer_events: true,
        touch_events: true,
    });
    let mut pad = PadBuilder::new().host(host).build().unwrap();
    let t0 = Instant::now();

    draw_stroke(&mut pad, (50.0, 50.0), (100.0, 50.0), t0);
    assert!(pad.is_empty());

    let pointer = |phase, x, at| {
        RawInput::Pointer(PointerInput {
            phase,
            client_x: x,
            client_y: 50.0,
            at,
        })
    };
    pad.handle_input(pointer(Phase::Down, 50.0, t0)).unwrap();
    pad.handle_input(pointer(Phase::Move, 100.0, t0)).unwrap();
    pad.handle_input(pointer(Phase::Up, 100.0, t0 + ms(1)))
        .unwrap();
    assert_eq!(pad.history().len(), 1);
}

#[tokio::test]
async fn touch_start_draws_a_dot() {
    let host = FixedHost::new(Bounds::new(100.0, 100.0, 400.0, 200.0)).with_capabilities(
        HostCapabilities {
            pointer_events: false,
            touch_events: true,
        },
    );
    let mut pad = PadBuilder::new().host(host).build().unwrap();
    let t0 = Instant::now();
    let finger = TouchPoint {
        id: 1,
        client_x: 160.0,
        client_y: 150.0,
    };

    pad.handle_input(RawInput::Touch(TouchInput {
        phase: Phase::Down,
        target_touches: vec![finger],
        changed_touches: vec![finger],
        at: t0,
    }))
    .unwrap();
    pad.handle_input(RawInput::Touch(TouchInput {
        phase: Phase::Up,
        target_touches: Vec::new(),
        changed_touches: vec![finger],
        at: t0 + ms(40),
    }))
    .unwrap();

    assert_eq!(pad.history().len(), 1);
    assert_eq!(pixel(&pad, 60, 50), BLACK_ARGB);
}

#[tokio::test]
async fn loaded_snapshot_counts_as_content() {
    let mut source = pad();
    draw_stroke(&mut source, (50.0, 50.0), (100.0, 50.0), Instant::now());
    let url = source.to_data_url(ImageFormat::Png, None).unwrap();

    let mut pad = pad();
    pad.load_snapshot(url.clone());
    assert!(!pad.is_empty());
    assert_eq!(pad.history()[0].as_str(), url);

    pad.settle().await.unwrap();
    assert_eq!(pixel(&pad, 75, 50), BLACK_ARGB);

    pad.clear(false).unwrap();
    assert!(pad.is_empty());
}

#[tokio::test]
async fn background_image_lands_after_settle() {
    let mut pad = PadBuilder::new()
        .host(FixedHost::at_origin(400.0, 200.0))
        .background_image(format!("data:image/png;base64,{RED_PIXEL_PNG}"), 10.0, 20.0)
        .build()
        .unwrap();

    pad.settle().await.unwrap();

    assert_eq!(pixel(&pad, 10, 20), RED_ARGB);
    assert_eq!(pixel(&pad, 11, 20), WHITE_ARGB);
}

#[tokio::test]
async fn missing_background_image_is_tolerated() {
    let mut pad = PadBuilder::new()
        .host(FixedHost::at_origin(400.0, 200.0))
        .background_image("/nonexistent/sigpad-background.png", 0.0, 0.0)
        .build()
        .unwrap();

    pad.settle().await.unwrap();
    assert_eq!(pixel(&pad, 0, 0), WHITE_ARGB);
}

#[tokio::test]
async fn export_scales_with_device_pixel_ratio() {
    let host = FixedHost::at_origin(400.0, 200.0).with_pixel_ratio(2.0);
    let pad = PadBuilder::new().host(host).build().unwrap();

    let png = pad.export_image(ImageFormat::Png, None).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (800, 400));

    let jpeg = pad.to_data_url(ImageFormat::Jpeg, Some(0.5)).unwrap();
    assert!(jpeg.starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn vertical_pad_exports_upright_and_undoes_in_place() {
    let mut pad = PadBuilder::new()
        .host(FixedHost::at_origin(200.0, 400.0))
        .vertical(true)
        .build()
        .unwrap();
    let t0 = Instant::now();

    draw_stroke(&mut pad, (50.0, 50.0), (100.0, 50.0), t0);
    let (_, after_first) = upright_pixels(&pad);
    draw_stroke(&mut pad, (50.0, 300.0), (150.0, 300.0), t0 + ms(100));

    let png = pad.export_image(ImageFormat::Png, None).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (400, 200));

    pad.undo().unwrap();
    pad.settle().await.unwrap();

    let (_, restored) = upright_pixels(&pad);
    let differing = restored
        .iter()
        .zip(&after_first)
        .filter(|(a, b)| a.abs_diff(**b) > 2)
        .count();
    assert_eq!(differing, 0);
}
