// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use loupe_view::FitScale;
use smallvec::SmallVec;
use ui_events::keyboard::{Key, Modifiers, NamedKey};

use crate::{
    InputConfig, InputEvent, KeyInput, PointerHit, PointerInput, PointerKind, ViewAction,
    ViewTarget, WheelInput, is_gated,
};

/// Actions produced by routing a single event.
///
/// No event produces more than two actions.
pub type Routed = SmallVec<[ViewAction; 2]>;

/// Maps [`InputEvent`]s to [`ViewAction`]s.
///
/// Events with Ctrl, Shift or Alt held are left to the host application,
/// with two exceptions: releasing the pan button always ends a drag, and
/// `F` ignores Shift since it takes Shift to type.
#[derive(Clone, Debug, Default)]
pub struct InputRouter {
    config: InputConfig,
}

impl InputRouter {
    /// Creates a router.
    #[must_use]
    pub fn new(config: InputConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this router was built with.
    #[must_use]
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Computes the actions for `event` without applying them.
    #[must_use]
    pub fn route<T: ViewTarget + ?Sized>(&self, event: &InputEvent, target: &T) -> Routed {
        let mut routed = Routed::new();
        match event {
            InputEvent::PointerDown(input) => {
                self.route_pointer(PointerKind::Down, input, target, &mut routed);
            }
            InputEvent::PointerMove(input) => {
                self.route_pointer(PointerKind::Move, input, target, &mut routed);
            }
            InputEvent::PointerUp(input) => {
                self.route_pointer(PointerKind::Up, input, target, &mut routed);
            }
            InputEvent::Wheel(input) => self.route_wheel(input, target, &mut routed),
            InputEvent::KeyDown(input) => self.route_key(input, &mut routed),
            InputEvent::KeyUp(_) => {}
            InputEvent::Resize => routed.push(ViewAction::Fit(FitScale::Contain)),
            InputEvent::FocusLost { to_outside } => {
                if *to_outside {
                    routed.push(ViewAction::Refocus);
                }
            }
        }
        routed
    }

    /// Routes `event` and applies the result to `target`.
    ///
    /// Returns `true` if any action was applied, i.e. the event was consumed.
    pub fn dispatch<T: ViewTarget + ?Sized>(&self, event: &InputEvent, target: &mut T) -> bool {
        let routed = self.route(event, target);
        let consumed = !routed.is_empty();
        for action in routed {
            target.apply(action);
        }
        consumed
    }

    fn route_pointer<T: ViewTarget + ?Sized>(
        &self,
        kind: PointerKind,
        input: &PointerInput,
        target: &T,
        routed: &mut Routed,
    ) {
        let gated = is_gated(input.modifiers);
        let pan_button = self.config.pan_button;
        match kind {
            PointerKind::Down if input.button == Some(pan_button) && !gated => {
                routed.push(ViewAction::BeginDrag);
                return;
            }
            // Only the pan button may be held.
            PointerKind::Move if input.buttons == pan_button.mask() && !gated => {
                let dpr = target.device_pixel_ratio();
                routed.push(ViewAction::Drag(-input.movement / dpr));
                return;
            }
            PointerKind::Up if input.button == Some(pan_button) => {
                routed.push(ViewAction::EndDrag);
            }
            _ => {}
        }
        if gated {
            return;
        }
        let position = container_point(target, input.position);
        routed.push(ViewAction::Pointer(PointerHit {
            kind,
            button: input.button,
            buttons: input.buttons,
            position,
            point: target.image_point(position),
        }));
    }

    fn route_wheel<T: ViewTarget + ?Sized>(
        &self,
        input: &WheelInput,
        target: &T,
        routed: &mut Routed,
    ) {
        if input.delta.y == 0.0 || input.delta.y.is_nan() {
            return;
        }
        let allowed = if self.config.shift_to_zoom {
            input.modifiers.contains(Modifiers::SHIFT)
                && !input
                    .modifiers
                    .intersects(Modifiers::CONTROL | Modifiers::ALT)
        } else {
            !is_gated(input.modifiers)
        };
        if !allowed {
            return;
        }
        let anchor = container_point(target, input.position);
        routed.push(ViewAction::Zoom {
            zoom_out: input.delta.y > 0.0,
            anchor: Some(anchor),
        });
    }

    fn route_key(&self, input: &KeyInput, routed: &mut Routed) {
        let modifiers = input.modifiers;
        let action = match &input.key {
            Key::Named(named) => {
                if is_gated(modifiers) {
                    return;
                }
                let step = self.config.pan_step;
                match named {
                    NamedKey::ArrowLeft => ViewAction::Pan(Vec2::new(step, 0.0)),
                    NamedKey::ArrowRight => ViewAction::Pan(Vec2::new(-step, 0.0)),
                    NamedKey::ArrowUp => ViewAction::Pan(Vec2::new(0.0, step)),
                    NamedKey::ArrowDown => ViewAction::Pan(Vec2::new(0.0, -step)),
                    NamedKey::Home => ViewAction::Fit(FitScale::Contain),
                    NamedKey::End => ViewAction::Fit(FitScale::Actual),
                    _ => return,
                }
            }
            Key::Character(text) => {
                // `F` is typed with Shift, so only Ctrl and Alt gate it.
                let gated = if text.as_str() == "F" {
                    modifiers.intersects(Modifiers::CONTROL | Modifiers::ALT)
                } else {
                    is_gated(modifiers)
                };
                if gated {
                    return;
                }
                match text.as_str() {
                    "F" => ViewAction::Fit(FitScale::Contain),
                    "f" => ViewAction::Fit(FitScale::Actual),
                    "+" | "=" => ViewAction::Zoom {
                        zoom_out: false,
                        anchor: None,
                    },
                    "-" => ViewAction::Zoom {
                        zoom_out: true,
                        anchor: None,
                    },
                    _ => return,
                }
            }
        };
        routed.push(action);
    }
}

fn container_point<T: ViewTarget + ?Sized>(target: &T, client: Point) -> Point {
    (client - target.container_origin()).to_point()
}
