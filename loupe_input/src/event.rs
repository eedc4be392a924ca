// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-neutral input events.
//!
//! Pointer buttons follow the DOM numbering so that a browser binding can
//! pass `MouseEvent.button` and `MouseEvent.buttons` straight through.
//! Keys and modifiers are the [`ui_events::keyboard`] types.

use kurbo::{Point, Vec2};
use ui_events::keyboard::{Key, Modifiers};

/// A single pointer button, numbered as in `MouseEvent.button`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerButton {
    /// Usually the left button.
    Primary,
    /// Usually the middle button or wheel click.
    Auxiliary,
    /// Usually the right button.
    Secondary,
    /// The "browser back" button.
    Back,
    /// The "browser forward" button.
    Forward,
}

impl PointerButton {
    /// Maps a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Option<Self> {
        Some(match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            3 => Self::Back,
            4 => Self::Forward,
            _ => return None,
        })
    }

    /// Returns the bit this button occupies in [`PointerButtons`].
    #[must_use]
    pub fn mask(self) -> PointerButtons {
        match self {
            Self::Primary => PointerButtons::PRIMARY,
            Self::Secondary => PointerButtons::SECONDARY,
            Self::Auxiliary => PointerButtons::AUXILIARY,
            Self::Back => PointerButtons::BACK,
            Self::Forward => PointerButtons::FORWARD,
        }
    }
}

bitflags::bitflags! {
    /// The set of pressed buttons, with the bit layout of `MouseEvent.buttons`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct PointerButtons: u16 {
        /// Usually the left button.
        const PRIMARY   = 0b0_0001;
        /// Usually the right button.
        const SECONDARY = 0b0_0010;
        /// Usually the middle button.
        const AUXILIARY = 0b0_0100;
        /// The "browser back" button.
        const BACK      = 0b0_1000;
        /// The "browser forward" button.
        const FORWARD   = 0b1_0000;
    }
}

/// A pointer sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Position in client (window) coordinates, CSS pixels.
    pub position: Point,
    /// Raw relative motion since the previous sample, in device pixels.
    ///
    /// This keeps reporting motion while the pointer is locked.
    pub movement: Vec2,
    /// The button whose state changed, for presses and releases.
    pub button: Option<PointerButton>,
    /// All buttons held after this event.
    pub buttons: PointerButtons,
    /// Keyboard modifiers held during this event.
    pub modifiers: Modifiers,
}

impl PointerInput {
    /// Creates a sample at `position` with no motion, buttons, or modifiers.
    #[must_use]
    pub fn at(position: Point) -> Self {
        Self {
            position,
            movement: Vec2::ZERO,
            button: None,
            buttons: PointerButtons::empty(),
            modifiers: Modifiers::empty(),
        }
    }

    /// Sets the changed button.
    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = Some(button);
        self
    }

    /// Sets the held buttons.
    #[must_use]
    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Sets the relative motion.
    #[must_use]
    pub fn with_movement(mut self, movement: Vec2) -> Self {
        self.movement = movement;
        self
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A wheel sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    /// Position in client coordinates, CSS pixels.
    pub position: Point,
    /// Scroll delta; only the sign of `y` is used.
    pub delta: Vec2,
    /// Keyboard modifiers held during this event.
    pub modifiers: Modifiers,
}

/// A key press or release.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyInput {
    /// The logical key.
    pub key: Key,
    /// Keyboard modifiers held during this event.
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// Creates a key event without modifiers.
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Everything a viewport reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A pointer button was pressed.
    PointerDown(PointerInput),
    /// The pointer moved.
    PointerMove(PointerInput),
    /// A pointer button was released.
    PointerUp(PointerInput),
    /// The wheel turned.
    Wheel(WheelInput),
    /// A key was pressed.
    KeyDown(KeyInput),
    /// A key was released.
    KeyUp(KeyInput),
    /// The container changed size.
    Resize,
    /// The container lost keyboard focus.
    FocusLost {
        /// Focus left the document (or went nowhere) rather than moving to
        /// another element.
        to_outside: bool,
    },
}

/// Returns `true` if any of Ctrl, Shift or Alt is held.
#[must_use]
pub fn is_gated(modifiers: Modifiers) -> bool {
    modifiers.intersects(Modifiers::CONTROL | Modifiers::SHIFT | Modifiers::ALT)
}

#[cfg(test)]
mod tests {
    use ui_events::keyboard::Modifiers;

    use super::{PointerButton, PointerButtons, is_gated};

    #[test]
    fn dom_button_numbering() {
        assert_eq!(PointerButton::from_dom(0), Some(PointerButton::Primary));
        assert_eq!(PointerButton::from_dom(1), Some(PointerButton::Auxiliary));
        assert_eq!(PointerButton::from_dom(2), Some(PointerButton::Secondary));
        assert_eq!(PointerButton::from_dom(5), None);
        assert_eq!(PointerButton::from_dom(-1), None);
    }

    #[test]
    fn masks_match_dom_buttons_bits() {
        // `MouseEvent.buttons == 4` is the middle button.
        assert_eq!(
            PointerButtons::from_bits_truncate(4),
            PointerButton::Auxiliary.mask()
        );
        assert_eq!(
            PointerButtons::from_bits_truncate(2),
            PointerButton::Secondary.mask()
        );
        assert_eq!(
            PointerButtons::from_bits_truncate(1),
            PointerButton::Primary.mask()
        );
    }

    #[test]
    fn meta_does_not_gate() {
        assert!(!is_gated(Modifiers::empty()));
        assert!(!is_gated(Modifiers::META));
        assert!(is_gated(Modifiers::SHIFT));
        assert!(is_gated(Modifiers::CONTROL | Modifiers::META));
        assert!(is_gated(Modifiers::ALT));
    }
}
