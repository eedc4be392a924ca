// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions from DOM events to Loupe input events.

use kurbo::{Point, Vec2};
use loupe_input::{KeyInput, PointerButton, PointerButtons, PointerInput, WheelInput};
use ui_events::keyboard::{Key, Modifiers, NamedKey};
use web_sys::{KeyboardEvent, MouseEvent, WheelEvent};

fn modifiers(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::CONTROL, ctrl);
    modifiers.set(Modifiers::SHIFT, shift);
    modifiers.set(Modifiers::ALT, alt);
    modifiers.set(Modifiers::META, meta);
    modifiers
}

pub(crate) fn pointer_input(event: &MouseEvent) -> PointerInput {
    PointerInput {
        position: Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
        movement: Vec2::new(
            f64::from(event.movement_x()),
            f64::from(event.movement_y()),
        ),
        button: PointerButton::from_dom(event.button()),
        buttons: PointerButtons::from_bits_truncate(event.buttons()),
        modifiers: modifiers(
            event.ctrl_key(),
            event.shift_key(),
            event.alt_key(),
            event.meta_key(),
        ),
    }
}

pub(crate) fn wheel_input(event: &WheelEvent) -> WheelInput {
    WheelInput {
        position: Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
        delta: Vec2::new(event.delta_x(), event.delta_y()),
        modifiers: modifiers(
            event.ctrl_key(),
            event.shift_key(),
            event.alt_key(),
            event.meta_key(),
        ),
    }
}

pub(crate) fn key_input(event: &KeyboardEvent) -> KeyInput {
    KeyInput::new(key(&event.key())).with_modifiers(modifiers(
        event.ctrl_key(),
        event.shift_key(),
        event.alt_key(),
        event.meta_key(),
    ))
}

/// Maps a `KeyboardEvent.key` value.
///
/// Only the named keys a viewport reacts to are recognized; other named keys
/// become [`NamedKey::Unidentified`].
fn key(value: &str) -> Key {
    let named = match value {
        "ArrowLeft" => NamedKey::ArrowLeft,
        "ArrowRight" => NamedKey::ArrowRight,
        "ArrowUp" => NamedKey::ArrowUp,
        "ArrowDown" => NamedKey::ArrowDown,
        "Home" => NamedKey::Home,
        "End" => NamedKey::End,
        _ if value.chars().count() == 1 => return Key::Character(value.into()),
        _ => NamedKey::Unidentified,
    };
    Key::Named(named)
}
