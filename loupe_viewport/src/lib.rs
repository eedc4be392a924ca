// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loupe Viewport: a platform-neutral host for a pannable, zoomable image.
//!
//! [`Viewport`] owns the pieces from the lower Loupe crates and drives a
//! platform through two traits:
//!
//! - [`Surface`]: the container metrics, the backing store the pixels are
//!   copied into, and where the image transform is applied.
//! - [`CapturePlatform`](loupe_drag_lock::CapturePlatform): pointer capture
//!   for drag panning.
//!
//! The host application receives a pixel store from [`Viewport::load`],
//! writes into it, and calls [`Viewport::refresh`]. Pointer events the
//! viewport does not consume are handed to the callback installed with
//! [`Viewport::set_pointer_handler`], already resolved into image pixels,
//! together with a [`PointerContext`] for painting into the image.
//!
//! [`FrameJob`] and [`FrameScheduler`] schedule redraws with at most one
//! outstanding frame request.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Affine, Rect};
//! use loupe_drag_lock::{CaptureHandle, CapturePlatform, CaptureRequest, capture_channel};
//! use loupe_viewport::{PixelBuffer, Surface, Viewport, ViewportConfig};
//!
//! struct Headless {
//!     transform: Affine,
//! }
//!
//! impl Surface for Headless {
//!     fn container_rect(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 800.0, 600.0)
//!     }
//!     fn device_pixel_ratio(&self) -> f64 {
//!         1.0
//!     }
//!     fn resize_buffer(&mut self, _width: u32, _height: u32) {}
//!     fn set_transform(&mut self, transform: Affine) {
//!         self.transform = transform;
//!     }
//!     fn present(&mut self, _buffer: &PixelBuffer) {}
//!     fn focus_container(&mut self) {}
//! }
//!
//! struct NoCapture;
//!
//! impl CapturePlatform for NoCapture {
//!     fn request_capture(&mut self) -> CaptureRequest {
//!         // Dropping the resolver refuses the request.
//!         capture_channel().1
//!     }
//!     fn release_capture(&mut self, _handle: CaptureHandle) {}
//! }
//!
//! let surface = Headless { transform: Affine::IDENTITY };
//! let mut viewport = Viewport::new(surface, NoCapture, ViewportConfig::default());
//!
//! let pixels = viewport.load(400, 300).unwrap();
//! pixels.fill(PixelBuffer::pack(255, 0, 0, 255));
//! viewport.refresh();
//!
//! // The image was fitted at twice its size.
//! assert_eq!(viewport.surface().transform, Affine::scale(2.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod buffer;
mod config;
mod frame;
mod host;
mod surface;

pub use buffer::PixelBuffer;
pub use config::ViewportConfig;
pub use frame::{FrameJob, FrameScheduler};
pub use host::{PointerContext, PointerHandler, Viewport};
pub use surface::Surface;
