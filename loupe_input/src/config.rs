// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::PointerButton;

/// Tuning for an [`InputRouter`](crate::InputRouter).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputConfig {
    /// Distance, in CSS pixels, that one arrow key press pans.
    pub pan_step: f64,
    /// Button that starts a drag pan.
    pub pan_button: PointerButton,
    /// Zoom with the wheel only while Shift is held.
    pub shift_to_zoom: bool,
}

impl InputConfig {
    /// Default arrow-key pan step.
    pub const PAN_STEP: f64 = 32.0;

    /// Returns the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pan_step: Self::PAN_STEP,
            pan_button: PointerButton::Auxiliary,
            shift_to_zoom: false,
        }
    }

    /// Sets the arrow-key pan step. Non-finite or negative steps are ignored.
    #[must_use]
    pub fn with_pan_step(mut self, step: f64) -> Self {
        if step.is_finite() && step >= 0.0 {
            self.pan_step = step;
        }
        self
    }

    /// Sets the button that starts a drag pan.
    #[must_use]
    pub fn with_pan_button(mut self, button: PointerButton) -> Self {
        self.pan_button = button;
        self
    }

    /// Requires Shift for wheel zoom.
    #[must_use]
    pub fn with_shift_to_zoom(mut self, shift_to_zoom: bool) -> Self {
        self.shift_to_zoom = shift_to_zoom;
        self
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::InputConfig;
    use crate::PointerButton;

    #[test]
    fn defaults() {
        let config = InputConfig::default();
        assert_eq!(config.pan_step, 32.0);
        assert_eq!(config.pan_button, PointerButton::Auxiliary);
        assert!(!config.shift_to_zoom);
    }

    #[test]
    fn invalid_pan_step_is_ignored() {
        let config = InputConfig::new().with_pan_step(-4.0);
        assert_eq!(config.pan_step, InputConfig::PAN_STEP);
        let config = config.with_pan_step(f64::NAN);
        assert_eq!(config.pan_step, InputConfig::PAN_STEP);
        let config = config.with_pan_step(10.0);
        assert_eq!(config.pan_step, 10.0);
    }
}
