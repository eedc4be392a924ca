// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use loupe_viewport::FrameScheduler;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

/// [`FrameScheduler`] over `requestAnimationFrame`.
///
/// Every request calls the same callback.
pub struct AnimationFrames {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl core::fmt::Debug for AnimationFrames {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnimationFrames")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

impl AnimationFrames {
    /// Creates a scheduler that runs `callback` on each requested frame.
    pub fn new(window: Window, callback: Closure<dyn FnMut(f64)>) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for AnimationFrames {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!(?err, "requestAnimationFrame failed");
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            tracing::warn!(?err, "cancelAnimationFrame failed");
        }
    }
}
