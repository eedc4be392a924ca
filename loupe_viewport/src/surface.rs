// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Rect};

use crate::PixelBuffer;

/// The platform side of a viewport: a container plus the surface that shows
/// the image inside it.
///
/// The surface holds its own copy of the pixels (a canvas backing store, a
/// texture) sized by [`resize_buffer`](Self::resize_buffer) and filled by
/// [`present`](Self::present). It is displayed with the affine passed to
/// [`set_transform`](Self::set_transform), relative to the container's
/// top-left corner.
pub trait Surface {
    /// Returns the container's bounds in client coordinates, CSS pixels.
    fn container_rect(&self) -> Rect;

    /// Returns the ratio of device pixels to CSS pixels.
    fn device_pixel_ratio(&self) -> f64;

    /// Resizes the backing store to `width` x `height` image pixels.
    fn resize_buffer(&mut self, width: u32, height: u32);

    /// Positions the image: maps image pixels into container space.
    fn set_transform(&mut self, transform: Affine);

    /// Copies `buffer` into the backing store.
    fn present(&mut self, buffer: &PixelBuffer);

    /// Moves keyboard focus to the container.
    fn focus_container(&mut self);
}
