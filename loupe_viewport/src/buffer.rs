// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Size;

/// A row-major image of packed 32-bit pixels.
///
/// Each pixel is one `u32` whose little-endian bytes are `R, G, B, A`, the
/// layout of a canvas `ImageData` viewed as a `Uint32Array` on little-endian
/// hosts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Creates a fully transparent black buffer.
    ///
    /// Returns `None` when the pixel count, or its size in bytes, does not fit
    /// in the address space.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let len = usize::try_from(width)
            .ok()?
            .checked_mul(usize::try_from(height).ok()?)?;
        let bytes = len.checked_mul(size_of::<u32>())?;
        if bytes > isize::MAX.unsigned_abs() {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    /// Returns the width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the dimensions as a [`Size`] in image pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Returns the pixels, row by row.
    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Returns the pixels mutably, row by row.
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Returns the pixels as bytes, `R, G, B, A` per pixel.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_le_bytes()).collect()
    }

    /// Packs one pixel from its channels.
    #[must_use]
    pub const fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
        u32::from_le_bytes([r, g, b, a])
    }
}
