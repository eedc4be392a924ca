// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use loupe_input::InputConfig;
use loupe_view::ViewConfig;

/// Configuration of a [`Viewport`](crate::Viewport).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewportConfig {
    /// Zoom and clamping constants.
    pub view: ViewConfig,
    /// Input mapping constants.
    pub input: InputConfig,
}

impl ViewportConfig {
    /// Returns the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            view: ViewConfig::new(),
            input: InputConfig::new(),
        }
    }

    /// Replaces the view configuration.
    #[must_use]
    pub fn with_view(mut self, view: ViewConfig) -> Self {
        self.view = view;
        self
    }

    /// Replaces the input configuration.
    #[must_use]
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = input;
        self
    }
}
