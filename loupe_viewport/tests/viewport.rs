// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `loupe_viewport` against a recording surface and capture platform.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Affine, Point, Rect, Vec2};
use loupe_drag_lock::{
    CaptureHandle, CapturePlatform, CaptureRequest, CaptureResolver, DragPhase, capture_channel,
};
use loupe_input::{
    InputEvent, KeyInput, PointerButton, PointerButtons, PointerInput, PointerKind,
};
use loupe_view::FitScale;
use loupe_viewport::{PixelBuffer, Surface, Viewport, ViewportConfig};
use ui_events::keyboard::{Key, Modifiers, NamedKey};

#[derive(Debug)]
struct RecordingSurface {
    rect: Rect,
    dpr: f64,
    resized: Option<(u32, u32)>,
    transforms: Vec<Affine>,
    presented: usize,
    focused: usize,
}

impl RecordingSurface {
    fn new(rect: Rect, dpr: f64) -> Self {
        Self {
            rect,
            dpr,
            resized: None,
            transforms: Vec::new(),
            presented: 0,
            focused: 0,
        }
    }
}

impl Surface for RecordingSurface {
    fn container_rect(&self) -> Rect {
        self.rect
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn resize_buffer(&mut self, width: u32, height: u32) {
        self.resized = Some((width, height));
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transforms.push(transform);
    }

    fn present(&mut self, _buffer: &PixelBuffer) {
        self.presented += 1;
    }

    fn focus_container(&mut self) {
        self.focused += 1;
    }
}

#[derive(Debug, Default)]
struct Platform {
    pending: Option<CaptureResolver>,
    released: usize,
}

impl CapturePlatform for Platform {
    fn request_capture(&mut self) -> CaptureRequest {
        let (resolver, request) = capture_channel();
        self.pending = Some(resolver);
        request
    }

    fn release_capture(&mut self, _handle: CaptureHandle) {
        self.released += 1;
    }
}

type TestViewport = Viewport<RecordingSurface, Platform>;

fn viewport(rect: Rect, dpr: f64) -> TestViewport {
    Viewport::new(
        RecordingSurface::new(rect, dpr),
        Platform::default(),
        ViewportConfig::default(),
    )
}

fn loaded() -> TestViewport {
    let mut viewport = viewport(Rect::new(0.0, 0.0, 800.0, 600.0), 1.0);
    viewport.load(400, 300);
    viewport
}

fn pan_down() -> InputEvent {
    InputEvent::PointerDown(
        PointerInput::at(Point::new(100.0, 100.0)).with_button(PointerButton::Auxiliary),
    )
}

fn pan_move(movement: Vec2) -> InputEvent {
    InputEvent::PointerMove(
        PointerInput::at(Point::new(100.0, 100.0))
            .with_buttons(PointerButtons::AUXILIARY)
            .with_movement(movement),
    )
}

fn pan_up() -> InputEvent {
    InputEvent::PointerUp(
        PointerInput::at(Point::new(100.0, 100.0)).with_button(PointerButton::Auxiliary),
    )
}

fn grant(viewport: &mut TestViewport) -> bool {
    let resolver = viewport.platform_mut().pending.take().unwrap();
    resolver.grant()
}

#[test]
fn load_fits_presents_and_hands_out_pixels() {
    let mut viewport = viewport(Rect::new(0.0, 0.0, 800.0, 600.0), 1.0);
    let pixels = viewport.load(400, 300).unwrap();
    assert_eq!(pixels.len(), 400 * 300);
    pixels[0] = PixelBuffer::pack(1, 2, 3, 4);

    assert_eq!(viewport.surface().resized, Some((400, 300)));
    assert_eq!(viewport.surface().presented, 1);
    assert_eq!(viewport.view().get().scale, 2.0);
    assert_eq!(viewport.view().get().offset, Vec2::ZERO);
    assert_eq!(viewport.surface().transforms.last(), Some(&Affine::scale(2.0)));
    assert_eq!(viewport.buffer().unwrap().pixels()[0], PixelBuffer::pack(1, 2, 3, 4));

    viewport.refresh();
    assert_eq!(viewport.surface().presented, 2);
}

#[test]
fn reload_replaces_the_buffer() {
    let mut viewport = loaded();
    viewport.pixels_mut().unwrap().fill(7);
    let pixels = viewport.load(10, 10).unwrap();
    assert_eq!(pixels.len(), 100);
    assert!(pixels.iter().all(|&p| p == 0));
    // 800x600 / 10x10 -> 60, snapped to 32.
    assert_eq!(viewport.view().get().scale, 32.0);
}

#[test]
fn refresh_before_load_does_nothing() {
    let mut viewport = viewport(Rect::new(0.0, 0.0, 800.0, 600.0), 1.0);
    viewport.refresh();
    assert_eq!(viewport.surface().presented, 0);
    assert!(viewport.buffer().is_none());
}

#[test]
fn drag_pans_after_capture_is_granted() {
    let mut viewport = loaded();
    assert!(viewport.handle(&pan_down()));
    assert_eq!(viewport.drag_phase(), DragPhase::Acquiring);

    // Motion before confirmation does nothing.
    viewport.handle(&pan_move(Vec2::new(-50.0, 0.0)));
    assert_eq!(viewport.view().get().offset, Vec2::ZERO);

    assert!(grant(&mut viewport));
    assert_eq!(viewport.capture_changed(), DragPhase::Active);

    // The first sample after confirmation is discarded.
    viewport.handle(&pan_move(Vec2::new(-50.0, -50.0)));
    assert_eq!(viewport.view().get().offset, Vec2::ZERO);

    viewport.handle(&pan_move(Vec2::new(-10.0, -4.0)));
    assert_eq!(viewport.view().get().offset, Vec2::new(10.0, 4.0));

    assert!(viewport.handle(&pan_up()));
    assert_eq!(viewport.drag_phase(), DragPhase::Idle);
    assert_eq!(viewport.platform().released, 1);
}

#[test]
fn drag_delta_is_divided_by_device_pixel_ratio() {
    let mut viewport = viewport(Rect::new(0.0, 0.0, 800.0, 600.0), 2.0);
    viewport.load(400, 300);
    let start = viewport.view().get().offset;

    viewport.handle(&pan_down());
    assert!(grant(&mut viewport));
    viewport.capture_changed();
    viewport.handle(&pan_move(Vec2::new(1.0, 1.0)));
    viewport.handle(&pan_move(Vec2::new(-10.0, 6.0)));
    assert_eq!(viewport.view().get().offset, start + Vec2::new(5.0, -3.0));
}

#[test]
fn release_before_confirmation_ignores_late_grant() {
    let mut viewport = loaded();
    viewport.handle(&pan_down());
    viewport.handle(&pan_up());
    assert_eq!(viewport.drag_phase(), DragPhase::Idle);

    // The platform confirms after the button was already released.
    assert!(!grant(&mut viewport));
    assert_eq!(viewport.capture_changed(), DragPhase::Idle);

    viewport.handle(&pan_move(Vec2::new(-10.0, 0.0)));
    viewport.handle(&pan_move(Vec2::new(-10.0, 0.0)));
    assert_eq!(viewport.view().get().offset, Vec2::ZERO);
    assert_eq!(viewport.platform().released, 0);
}

#[test]
fn capture_lost_stops_panning() {
    let mut viewport = loaded();
    viewport.handle(&pan_down());
    assert!(grant(&mut viewport));
    viewport.capture_changed();
    viewport.capture_lost();
    assert_eq!(viewport.drag_phase(), DragPhase::Idle);

    viewport.handle(&pan_move(Vec2::new(-10.0, 0.0)));
    viewport.handle(&pan_move(Vec2::new(-10.0, 0.0)));
    assert_eq!(viewport.view().get().offset, Vec2::ZERO);
}

#[test]
fn pointer_handler_receives_image_points() {
    let mut viewport = viewport(Rect::new(20.0, 10.0, 820.0, 610.0), 1.0);
    viewport.load(400, 300);

    let hits = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&hits);
    viewport.set_pointer_handler(move |hit, _| sink.borrow_mut().push(*hit));

    let click = PointerInput::at(Point::new(20.0 + 13.0, 10.0 + 9.0))
        .with_button(PointerButton::Primary);
    assert!(viewport.handle(&InputEvent::PointerDown(click)));

    let hits = hits.borrow();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kind, PointerKind::Down);
    assert_eq!(hits[0].position, Point::new(13.0, 9.0));
    assert!(hits[0].point.inside);
    assert_eq!(hits[0].point.x, 6.5);
    assert_eq!(hits[0].point.index, Some(4 * 400 + 6));
}

#[test]
fn pointer_handler_paints_and_redraws() {
    let mut viewport = loaded();
    let presented = viewport.surface().presented;
    let red = PixelBuffer::pack(255, 0, 0, 255);
    viewport.set_pointer_handler(move |hit, cx| {
        let Some(index) = hit.point.index else {
            return;
        };
        if let Some(pixels) = cx.pixels_mut() {
            pixels[index] = red;
            cx.request_redraw();
        }
    });

    // Image pixel (3, 2) at scale 2.
    let click = PointerInput::at(Point::new(7.0, 5.0)).with_button(PointerButton::Primary);
    assert!(viewport.handle(&InputEvent::PointerDown(click)));
    assert_eq!(viewport.buffer().unwrap().pixels()[2 * 400 + 3], red);
    assert_eq!(viewport.surface().presented, presented + 1);

    // A click outside the image neither paints nor redraws.
    let miss = PointerInput::at(Point::new(-5.0, 5.0)).with_button(PointerButton::Primary);
    viewport.handle(&InputEvent::PointerDown(miss));
    assert_eq!(viewport.surface().presented, presented + 1);
}

#[test]
fn oversized_load_keeps_the_current_image() {
    let mut viewport = loaded();
    let scale = viewport.view().get().scale;
    assert!(viewport.load(u32::MAX, u32::MAX).is_none());
    assert_eq!(viewport.buffer().unwrap().size().width, 400.0);
    assert_eq!(viewport.surface().resized, Some((400, 300)));
    assert_eq!(viewport.view().get().scale, scale);
}

#[test]
fn modified_events_are_not_consumed() {
    let mut viewport = loaded();
    let click = PointerInput::at(Point::new(10.0, 10.0))
        .with_button(PointerButton::Primary)
        .with_modifiers(Modifiers::CONTROL);
    assert!(!viewport.handle(&InputEvent::PointerDown(click)));

    let key = KeyInput::new(Key::Named(NamedKey::ArrowLeft)).with_modifiers(Modifiers::ALT);
    assert!(!viewport.handle(&InputEvent::KeyDown(key)));
    assert_eq!(viewport.view().get().offset, Vec2::ZERO);
}

#[test]
fn keyboard_pans_and_fits() {
    let mut viewport = loaded();
    let key = |k| InputEvent::KeyDown(KeyInput::new(k));

    assert!(viewport.handle(&key(Key::Named(NamedKey::ArrowRight))));
    assert_eq!(viewport.view().get().offset, Vec2::new(-32.0, 0.0));

    assert!(viewport.handle(&key(Key::Character("f".into()))));
    assert_eq!(viewport.view().get().scale, 1.0);

    assert!(viewport.handle(&key(Key::Named(NamedKey::Home))));
    assert_eq!(viewport.view().get().scale, 2.0);
    assert_eq!(viewport.view().get().offset, Vec2::ZERO);
}

#[test]
fn resize_refits_to_the_new_container() {
    let mut viewport = loaded();
    viewport.surface_mut().rect = Rect::new(0.0, 0.0, 1600.0, 1200.0);
    assert!(viewport.handle(&InputEvent::Resize));
    assert_eq!(viewport.view().get().scale, 4.0);
    assert_eq!(viewport.view().container_size().width, 1600.0);
}

#[test]
fn degenerate_container_keeps_the_transform() {
    let mut viewport = loaded();
    let before = viewport.view().get();
    viewport.surface_mut().rect = Rect::new(0.0, 0.0, 0.0, 0.0);
    viewport.fit(FitScale::Contain);
    assert_eq!(viewport.view().get(), before);
}

#[test]
fn blur_to_outside_refocuses() {
    let mut viewport = loaded();
    assert!(!viewport.handle(&InputEvent::FocusLost { to_outside: false }));
    assert_eq!(viewport.surface().focused, 0);
    assert!(viewport.handle(&InputEvent::FocusLost { to_outside: true }));
    assert_eq!(viewport.surface().focused, 1);
}

#[test]
fn transform_is_pushed_only_when_it_changes() {
    let mut viewport = loaded();
    let pushed = viewport.surface().transforms.len();

    let miss = PointerInput::at(Point::new(10.0, 10.0)).with_button(PointerButton::Primary);
    viewport.handle(&InputEvent::PointerDown(miss));
    assert_eq!(viewport.surface().transforms.len(), pushed);

    viewport.handle(&InputEvent::KeyDown(KeyInput::new(Key::Named(
        NamedKey::ArrowUp,
    ))));
    assert_eq!(viewport.surface().transforms.len(), pushed + 1);
    assert_eq!(
        viewport.surface().transforms.last(),
        Some(&(Affine::translate(Vec2::new(0.0, 32.0)) * Affine::scale(2.0)))
    );
}

#[test]
fn wheel_zoom_keeps_the_pointer_fixed() {
    let mut viewport = loaded();
    let anchor = Point::new(250.0, 120.0);
    let before = viewport.view().to_image_space(anchor);
    let wheel = InputEvent::Wheel(loupe_input::WheelInput {
        position: anchor,
        delta: Vec2::new(0.0, -1.0),
        modifiers: Modifiers::empty(),
    });
    assert!(viewport.handle(&wheel));
    let after = viewport.view().to_image_space(anchor);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
    assert!((viewport.view().get().scale - 2.4).abs() < 1e-12);
}
