// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loupe Web: the browser binding of the Loupe image viewport.
//!
//! On `wasm32` this crate turns a container element into a pannable,
//! zoomable image view:
//!
//! - [`CanvasSurface`] appends a `<canvas>` to the container, copies pixels
//!   into it with `putImageData`, and positions it with a CSS transform.
//! - [`PointerLock`] grants drag capture through the Pointer Lock API.
//! - [`AnimationFrames`] schedules redraws with `requestAnimationFrame`.
//! - [`WebViewport`] wires DOM listeners to a
//!   [`Viewport`](loupe_viewport::Viewport) built from the above.
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn show(container: web_sys::HtmlElement) -> Result<loupe_web::WebViewport, loupe_web::WebError> {
//!     let viewport = loupe_web::WebViewport::attach(container, Default::default())?;
//!     viewport.load(256, 256, |pixels| {
//!         for (i, pixel) in pixels.iter_mut().enumerate() {
//!             let v = (i % 256) as u8;
//!             *pixel = loupe_viewport::PixelBuffer::pack(v, v, v, 255);
//!         }
//!     });
//!     // Paint the clicked pixel white.
//!     viewport.set_pointer_handler(|hit, cx| {
//!         if let (Some(index), Some(pixels)) = (hit.point.index, cx.pixels_mut()) {
//!             pixels[index] = loupe_viewport::PixelBuffer::pack(255, 255, 255, 255);
//!             cx.request_redraw();
//!         }
//!     });
//!     Ok(viewport)
//! }
//! ```
//!
//! On every other target the crate is empty.

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod error;
#[cfg(target_arch = "wasm32")]
mod frames;
#[cfg(target_arch = "wasm32")]
mod lock;
#[cfg(target_arch = "wasm32")]
mod viewport;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
#[cfg(target_arch = "wasm32")]
pub use error::WebError;
#[cfg(target_arch = "wasm32")]
pub use frames::AnimationFrames;
#[cfg(target_arch = "wasm32")]
pub use lock::{LockChange, PointerLock};
#[cfg(target_arch = "wasm32")]
pub use viewport::WebViewport;
